use crate::{constants::*, state::*};
use anchor_lang::prelude::*;

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(mut)]
    pub signer: Signer<'info>,

    #[account(
        init,
        payer = signer,
        space = DISCRIMINATOR_SIZE as usize + ChainState::INIT_SPACE,
        seeds = [CHAIN_STATE_SEED.as_bytes()],
        bump
    )]
    pub chain_state: Account<'info, ChainState>,

    pub system_program: Program<'info, System>,
}

impl<'info> Initialize<'info> {
    pub fn validate(&self, duration_decrease_ms: u64, min_duration: u64) -> Result<()> {
        ChainState::check_countdown_config(duration_decrease_ms, min_duration)
    }
}

pub fn handler(
    ctx: Context<Initialize>,
    duration_decrease_ms: Option<u64>,
    min_duration: Option<u64>,
) -> Result<()> {
    let duration_decrease_ms = duration_decrease_ms.unwrap_or(DEFAULT_DURATION_DECREASE_MS);
    let min_duration = min_duration.unwrap_or(DEFAULT_MIN_DURATION_MS);

    // validate
    ctx.accounts
        .validate(duration_decrease_ms, min_duration)?;

    let admin = ctx.accounts.signer.key();
    ctx.accounts.chain_state.set_inner(ChainState::new(
        admin,
        duration_decrease_ms,
        min_duration,
        ctx.bumps.chain_state,
    ));

    msg!(
        "Chain state initialized: decrease {} ms, floor {} ms",
        duration_decrease_ms,
        min_duration
    );

    Ok(())
}
