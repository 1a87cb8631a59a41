use anchor_lang::prelude::*;

/// PDA Seeds
#[constant]
pub const CHAIN_STATE_SEED: &str = "chain_state";

/// Account discriminator prefix
pub const DISCRIMINATOR_SIZE: u8 = 8;

/// Basis points
#[constant]
pub const HUNDRED_PERCENT_BPS: u16 = 10_000;
#[constant]
pub const MAX_BURN_BPS: u16 = 10_000;

/// Deployment defaults for the countdown decay (milliseconds)
pub const DEFAULT_DURATION_DECREASE_MS: u64 = 60_000;
pub const DEFAULT_MIN_DURATION_MS: u64 = 60_000;

pub const MS_PER_SECOND: i64 = 1_000;

/// Enum for the asset a chain is played in
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub enum AssetId {
    Native,
    Token(Pubkey),
}

impl AssetId {
    pub fn mint(&self) -> Option<Pubkey> {
        match self {
            AssetId::Native => None,
            AssetId::Token(mint) => Some(*mint),
        }
    }
}
