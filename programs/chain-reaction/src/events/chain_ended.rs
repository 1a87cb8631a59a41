use anchor_lang::prelude::*;

#[event]
#[derive(Debug, PartialEq, Eq)]
pub struct ChainEnded {
    pub chain_id: u64,
    pub winner: Pubkey,
    pub payout: u64,
}
