use crate::{constants::*, state::*, utils::*};
use anchor_lang::prelude::*;

#[derive(Accounts)]
pub struct ViewChain<'info> {
    #[account(
        seeds = [CHAIN_STATE_SEED.as_bytes()],
        bump = chain_state.bump
    )]
    pub chain_state: Account<'info, ChainState>,
}

pub fn next_entry_price_handler(ctx: Context<ViewChain>) -> Result<u64> {
    ctx.accounts.chain_state.quoted_entry_price()
}

pub fn can_end_handler(ctx: Context<ViewChain>) -> Result<bool> {
    Ok(ctx.accounts.chain_state.can_end(now_ms()?))
}
