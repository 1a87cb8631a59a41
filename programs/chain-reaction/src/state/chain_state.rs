use crate::{constants::*, error::ChainReactionError, utils::next_entry_price};
use anchor_lang::prelude::*;

#[account]
#[derive(InitSpace, Debug, PartialEq, Eq)]
pub struct ChainState {
    // --- Authorities ---
    pub admin: Pubkey, // May change the countdown configuration while no chain is running.

    // --- Identity ---
    pub chain_id: u64,  // Incremented when a chain ends; identifies the next chain.
    pub is_active: bool, // True between a successful start and the matching end.
    pub asset: AssetId,  // Native or SPL mint, fixed for the lifetime of a chain.

    // --- Pricing ---
    pub base_entry: u64,     // The fee paid by the starter.
    pub current_entry: u64,  // The fee paid by the most recent player.
    pub multiplier_bps: u64, // Added on top of current_entry to get the next price.
    pub burn_bps: u16,       // Share of each join fee destroyed. 0 disables burning.

    // --- Funds ---
    pub pot: u64,           // Claimable entry fees (after burn).
    pub boost_amount: u64,  // Boosts, only merged into the payout at end.
    pub burned_amount: u64, // Destroyed this chain, reporting only.

    // --- Players ---
    pub last_player: Pubkey, // Current leader, Pubkey::default() while inactive.
    pub player_count: u64,   // Successful entries including the start.

    // --- Countdown (milliseconds) ---
    pub last_entry_timestamp: i64,
    pub duration_ms: u64,
    pub duration_decrease_ms: u64,
    pub min_duration: u64,
    pub end_timestamp: i64,

    // --- Metadata ---
    pub bump: u8,
}

impl ChainState {
    pub fn new(admin: Pubkey, duration_decrease_ms: u64, min_duration: u64, bump: u8) -> Self {
        Self {
            admin,
            chain_id: 0,
            is_active: false,
            asset: AssetId::Native,
            base_entry: 0,
            current_entry: 0,
            multiplier_bps: 0,
            burn_bps: 0,
            pot: 0,
            boost_amount: 0,
            burned_amount: 0,
            last_player: Pubkey::default(),
            player_count: 0,
            last_entry_timestamp: 0,
            duration_ms: 0,
            duration_decrease_ms,
            min_duration,
            end_timestamp: 0,
            bump,
        }
    }

    pub fn can_end(&self, now_ms: i64) -> bool {
        self.is_active && now_ms >= self.end_timestamp
    }

    /// Price the next join has to pay, 0 while no chain is running.
    pub fn quoted_entry_price(&self) -> Result<u64> {
        if !self.is_active {
            return Ok(0);
        }

        next_entry_price(self.current_entry, self.multiplier_bps)
    }

    /// Countdown configuration must keep every deadline representable as an
    /// i64 millisecond timestamp and have a non-zero floor.
    pub fn check_countdown_config(duration_decrease_ms: u64, min_duration: u64) -> Result<()> {
        require!(min_duration > 0, ChainReactionError::InvalidConfig);
        require!(
            min_duration <= i64::MAX as u64 && duration_decrease_ms <= i64::MAX as u64,
            ChainReactionError::InvalidConfig
        );

        Ok(())
    }
}
