use crate::{constants::*, lifecycle::*, state::*, utils::*};
use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

#[derive(Accounts)]
pub struct StartChain<'info> {
    #[account(mut)]
    pub signer: Signer<'info>,

    #[account(
        mut,
        seeds = [CHAIN_STATE_SEED.as_bytes()],
        bump = chain_state.bump
    )]
    pub chain_state: Account<'info, ChainState>,

    // Token chains only
    pub mint: Option<Account<'info, Mint>>,

    #[account(mut)]
    pub vault: Option<Account<'info, TokenAccount>>,

    #[account(mut)]
    pub signer_token_account: Option<Account<'info, TokenAccount>>,

    pub token_program: Option<Program<'info, Token>>,
    pub system_program: Program<'info, System>,
}

impl<'info> StartChain<'info> {
    fn collect(&self, asset: &AssetId, amount: u64) -> Result<()> {
        let token_vault = TokenVault::resolve(
            asset,
            self.chain_state.key(),
            self.mint.as_ref(),
            self.vault.as_ref(),
            self.token_program.as_ref(),
        )?;

        match token_vault {
            Some(token_vault) => {
                let from = token_vault
                    .check_user_account(self.signer_token_account.as_ref(), self.signer.key())?;
                token_vault.deposit(from, &self.signer, amount)
            }
            None => deposit_native(
                &self.system_program,
                &self.signer,
                self.chain_state.to_account_info(),
                amount,
            ),
        }
    }
}

pub fn handler(
    ctx: Context<StartChain>,
    payment: u64,
    duration_ms: u64,
    multiplier_bps: u64,
    asset: AssetId,
    burn_bps: u16,
) -> Result<()> {
    let now = now_ms()?;
    let starter = ctx.accounts.signer.key();

    let (next, transition) = apply(
        (*ctx.accounts.chain_state).clone(),
        ChainAction::Start {
            starter,
            params: StartParams {
                payment,
                duration_ms,
                multiplier_bps,
                asset,
                burn_bps,
            },
        },
        now,
    )?;

    // transfer from starter to vault
    ctx.accounts.collect(&next.asset, transition.deposit)?;

    msg!(
        "Chain {} started by {} with {} (x{} bps, burn {} bps), ends at {}",
        next.chain_id,
        starter,
        payment,
        multiplier_bps,
        burn_bps,
        next.end_timestamp
    );

    ctx.accounts.chain_state.set_inner(next);
    transition.event.emit();

    Ok(())
}
