use anchor_lang::prelude::*;

#[event]
#[derive(Debug, PartialEq, Eq)]
pub struct PotBoosted {
    pub chain_id: u64,
    pub booster: Pubkey,
    pub amount: u64,
}
