use crate::{constants::*, lifecycle::*, state::*, utils::*};
use anchor_lang::prelude::*;
use anchor_lang::solana_program::incinerator;
use anchor_spl::token::{Mint, Token, TokenAccount};

#[derive(Accounts)]
pub struct JoinChain<'info> {
    #[account(mut)]
    pub signer: Signer<'info>,

    #[account(
        mut,
        seeds = [CHAIN_STATE_SEED.as_bytes()],
        bump = chain_state.bump
    )]
    pub chain_state: Account<'info, ChainState>,

    /// CHECK: Burn destination for native chains, pinned by address
    #[account(mut, address = incinerator::ID)]
    pub incinerator: UncheckedAccount<'info>,

    // Token chains only. The mint is written by the burn.
    #[account(mut)]
    pub mint: Option<Account<'info, Mint>>,

    #[account(mut)]
    pub vault: Option<Account<'info, TokenAccount>>,

    #[account(mut)]
    pub signer_token_account: Option<Account<'info, TokenAccount>>,

    pub token_program: Option<Program<'info, Token>>,
    pub system_program: Program<'info, System>,
}

impl<'info> JoinChain<'info> {
    fn settle(&self, asset: &AssetId, deposit: u64, burn_cut: u64) -> Result<()> {
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
                token_vault.deposit(from, &self.signer, deposit)?;

                if burn_cut > 0 {
                    token_vault.burn(
                        self.chain_state.to_account_info(),
                        self.chain_state.bump,
                        burn_cut,
                    )?;
                }
            }
            None => {
                let chain_info = self.chain_state.to_account_info();
                deposit_native(&self.system_program, &self.signer, chain_info.clone(), deposit)?;
                release_native(
                    &chain_info,
                    &self.incinerator.to_account_info(),
                    &Rent::get()?,
                    burn_cut,
                )?;
            }
        }

        Ok(())
    }
}

pub fn handler(ctx: Context<JoinChain>, payment: u64) -> Result<()> {
    let now = now_ms()?;
    let player = ctx.accounts.signer.key();
    let asset = presented_asset(ctx.accounts.mint.as_ref());

    let (next, transition) = apply(
        (*ctx.accounts.chain_state).clone(),
        ChainAction::Join {
            player,
            payment,
            asset,
        },
        now,
    )?;

    // transfer from player to vault, then burn the cut
    ctx.accounts
        .settle(&next.asset, transition.deposit, transition.burn)?;

    msg!(
        "Player {} joined chain {} paying {} (burned {}), player #{}, ends at {}",
        player,
        next.chain_id,
        payment,
        transition.burn,
        next.player_count,
        next.end_timestamp
    );

    ctx.accounts.chain_state.set_inner(next);
    transition.event.emit();

    Ok(())
}
