use crate::constants::AssetId;
use anchor_lang::prelude::*;

#[event]
#[derive(Debug, PartialEq, Eq)]
pub struct ChainStarted {
    pub chain_id: u64,
    pub starter: Pubkey,
    pub base_entry: u64,
    pub asset: AssetId,
    pub duration_ms: u64,
    pub multiplier_bps: u64,
    pub burn_bps: u16,
    pub end_timestamp: i64,
}
