use crate::{constants::*, error::ChainReactionError};
use anchor_lang::prelude::*;

/// How a join fee is divided between the pot and the burn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntrySplit {
    pub to_pot: u64,
    pub burn_cut: u64,
}

pub fn split_entry(payment: u64, burn_bps: u16) -> Result<EntrySplit> {
    require!(
        burn_bps <= MAX_BURN_BPS,
        ChainReactionError::InvalidParameter
    );

    let burn_cut = (payment as u128)
        .checked_mul(burn_bps as u128)
        .and_then(|x| x.checked_div(HUNDRED_PERCENT_BPS as u128))
        .ok_or(ChainReactionError::MathOverflow)? as u64; // <= payment

    let to_pot = payment
        .checked_sub(burn_cut)
        .ok_or(ChainReactionError::MathUnderflow)?;

    Ok(EntrySplit { to_pot, burn_cut })
}

/// Amount owed to the winner. Burned funds have no claimant and are never part
/// of it.
pub fn payout(pot: u64, boost_amount: u64) -> Result<u64> {
    pot.checked_add(boost_amount)
        .ok_or(ChainReactionError::MathOverflow.into())
}
