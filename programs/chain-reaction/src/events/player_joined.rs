use anchor_lang::prelude::*;

#[event]
#[derive(Debug, PartialEq, Eq)]
pub struct PlayerJoined {
    pub chain_id: u64,
    pub player: Pubkey,
    pub entry_fee: u64,
    pub burned: u64,
    pub end_timestamp: i64,
}
