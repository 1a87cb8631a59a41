use crate::{constants::*, error::ChainReactionError};
use anchor_lang::prelude::*;

/// Price the next player must pay: `current_entry` plus `multiplier_bps` of it,
/// floored.
pub fn next_entry_price(current_entry: u64, multiplier_bps: u64) -> Result<u64> {
    let increment = (current_entry as u128)
        .checked_mul(multiplier_bps as u128)
        .ok_or(ChainReactionError::MathOverflow)?
        .checked_div(HUNDRED_PERCENT_BPS as u128)
        .ok_or(ChainReactionError::MathOverflow)?;

    (current_entry as u128)
        .checked_add(increment)
        .ok_or(ChainReactionError::MathOverflow)?
        .try_into() // Convert u128 back to u64
        .map_err(|_| ChainReactionError::MathOverflow.into())
}
