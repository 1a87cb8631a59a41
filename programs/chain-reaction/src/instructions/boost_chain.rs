use crate::{constants::*, lifecycle::*, state::*, utils::*};
use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

#[derive(Accounts)]
pub struct BoostChain<'info> {
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

impl<'info> BoostChain<'info> {
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

pub fn handler(ctx: Context<BoostChain>, amount: u64) -> Result<()> {
    let now = now_ms()?;
    let booster = ctx.accounts.signer.key();
    let asset = presented_asset(ctx.accounts.mint.as_ref());

    let (next, transition) = apply(
        (*ctx.accounts.chain_state).clone(),
        ChainAction::Boost {
            booster,
            amount,
            asset,
        },
        now,
    )?;

    // transfer from booster to vault
    ctx.accounts.collect(&next.asset, transition.deposit)?;

    msg!(
        "Chain {} boosted by {} with {}, boost total {}",
        next.chain_id,
        booster,
        amount,
        next.boost_amount
    );

    ctx.accounts.chain_state.set_inner(next);
    transition.event.emit();

    Ok(())
}
