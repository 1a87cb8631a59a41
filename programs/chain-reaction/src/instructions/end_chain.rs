use crate::{constants::*, error::ChainReactionError, lifecycle::*, state::*, utils::*};
use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

#[derive(Accounts)]
pub struct EndChain<'info> {
    // anyone may end an expired chain
    pub signer: Signer<'info>,

    #[account(
        mut,
        seeds = [CHAIN_STATE_SEED.as_bytes()],
        bump = chain_state.bump
    )]
    pub chain_state: Account<'info, ChainState>,

    /// CHECK: Must be the last player, checked in validate
    #[account(mut)]
    pub winner: UncheckedAccount<'info>,

    // Token chains only
    pub mint: Option<Account<'info, Mint>>,

    #[account(mut)]
    pub vault: Option<Account<'info, TokenAccount>>,

    #[account(mut)]
    pub winner_token_account: Option<Account<'info, TokenAccount>>,

    pub token_program: Option<Program<'info, Token>>,
}

impl<'info> EndChain<'info> {
    pub fn validate(&self) -> Result<()> {
        // an inactive chain is reported as such by the state machine
        if self.chain_state.is_active {
            require_keys_eq!(
                self.winner.key(),
                self.chain_state.last_player,
                ChainReactionError::InvalidWinner
            );
        }

        Ok(())
    }

    fn pay_out(&self, asset: &AssetId, amount: u64) -> Result<()> {
        let token_vault = TokenVault::resolve(
            asset,
            self.chain_state.key(),
            self.mint.as_ref(),
            self.vault.as_ref(),
            self.token_program.as_ref(),
        )?;

        match token_vault {
            Some(token_vault) => {
                let to = token_vault
                    .check_user_account(self.winner_token_account.as_ref(), self.winner.key())?;
                token_vault.withdraw(
                    to,
                    self.chain_state.to_account_info(),
                    self.chain_state.bump,
                    amount,
                )
            }
            None => release_native(
                &self.chain_state.to_account_info(),
                &self.winner.to_account_info(),
                &Rent::get()?,
                amount,
            ),
        }
    }
}

pub fn handler(ctx: Context<EndChain>) -> Result<()> {
    // validate
    ctx.accounts.validate()?;

    let now = now_ms()?;
    let ended_chain_id = ctx.accounts.chain_state.chain_id;
    let (next, transition) = apply((*ctx.accounts.chain_state).clone(), ChainAction::End, now)?;

    // transfer pot and boost from vault to winner
    let asset = ctx.accounts.chain_state.asset;
    ctx.accounts.pay_out(&asset, transition.payout)?;

    msg!(
        "Chain {} ended by {}, paid {} to {}",
        ended_chain_id,
        ctx.accounts.signer.key(),
        transition.payout,
        ctx.accounts.winner.key()
    );

    ctx.accounts.chain_state.set_inner(next);
    transition.event.emit();

    Ok(())
}
