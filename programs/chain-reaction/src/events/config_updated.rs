use anchor_lang::prelude::*;

#[event]
pub struct ConfigUpdated {
    pub admin: Pubkey,
    pub duration_decrease_ms: u64,
    pub min_duration: u64,
}
