use crate::{constants::*, error::ChainReactionError, events::*, state::*};
use anchor_lang::prelude::*;

#[derive(Accounts)]
pub struct UpdateConfig<'info> {
    #[account(mut)]
    pub signer: Signer<'info>,

    #[account(
        mut,
        seeds = [CHAIN_STATE_SEED.as_bytes()],
        bump = chain_state.bump
    )]
    pub chain_state: Account<'info, ChainState>,
}

impl<'info> UpdateConfig<'info> {
    pub fn validate(
        &self,
        new_admin: Option<Pubkey>,
        new_duration_decrease_ms: Option<u64>,
        new_min_duration: Option<u64>,
    ) -> Result<()> {
        require_keys_eq!(
            self.signer.key(),
            self.chain_state.admin,
            ChainReactionError::Unauthorized
        );

        // countdown parameters of a running chain are fixed
        require!(
            !self.chain_state.is_active,
            ChainReactionError::InvalidState
        );

        if let Some(new_admin) = new_admin {
            require!(
                new_admin != self.chain_state.admin && new_admin != Pubkey::default(),
                ChainReactionError::InvalidConfig
            );
        }

        ChainState::check_countdown_config(
            new_duration_decrease_ms.unwrap_or(self.chain_state.duration_decrease_ms),
            new_min_duration.unwrap_or(self.chain_state.min_duration),
        )?;

        Ok(())
    }
}

pub fn handler(
    ctx: Context<UpdateConfig>,
    new_admin: Option<Pubkey>,
    new_duration_decrease_ms: Option<u64>,
    new_min_duration: Option<u64>,
) -> Result<()> {
    // validate
    ctx.accounts
        .validate(new_admin, new_duration_decrease_ms, new_min_duration)?;

    let chain_state = &mut ctx.accounts.chain_state;

    // set fields
    if let Some(new_admin) = new_admin {
        chain_state.admin = new_admin;
    }
    if let Some(new_duration_decrease_ms) = new_duration_decrease_ms {
        chain_state.duration_decrease_ms = new_duration_decrease_ms;
    }
    if let Some(new_min_duration) = new_min_duration {
        chain_state.min_duration = new_min_duration;
    }

    // emit event
    emit!(ConfigUpdated {
        admin: chain_state.admin,
        duration_decrease_ms: chain_state.duration_decrease_ms,
        min_duration: chain_state.min_duration,
    });

    Ok(())
}
