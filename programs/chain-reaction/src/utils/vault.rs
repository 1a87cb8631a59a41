use crate::{constants::*, error::ChainReactionError};
use anchor_lang::{prelude::*, system_program};
use anchor_spl::{
    associated_token::get_associated_token_address,
    token::{burn, transfer, Burn, Mint, Token, TokenAccount, Transfer},
};

/// Asset presented by the caller: the mint passed in, or the native asset when
/// no mint is supplied.
pub fn presented_asset(mint: Option<&Account<'_, Mint>>) -> AssetId {
    match mint {
        Some(mint) => AssetId::Token(mint.key()),
        None => AssetId::Native,
    }
}

/// SPL side of a chain's vault. Only built for token chains.
pub struct TokenVault<'a, 'info> {
    pub mint: &'a Account<'info, Mint>,
    pub vault: &'a Account<'info, TokenAccount>,
    pub token_program: &'a Program<'info, Token>,
}

impl<'a, 'info> TokenVault<'a, 'info> {
    /// Checks the supplied token accounts against `asset`. Returns `None` for
    /// native chains. The vault is the associated token account of the chain
    /// state for the chain's mint; no other account is accepted.
    pub fn resolve(
        asset: &AssetId,
        chain_state: Pubkey,
        mint: Option<&'a Account<'info, Mint>>,
        vault: Option<&'a Account<'info, TokenAccount>>,
        token_program: Option<&'a Program<'info, Token>>,
    ) -> Result<Option<Self>> {
        let Some(expected_mint) = asset.mint() else {
            return Ok(None);
        };

        let (mint, vault, token_program) = match (mint, vault, token_program) {
            (Some(mint), Some(vault), Some(token_program)) => (mint, vault, token_program),
            _ => return err!(ChainReactionError::MissingTokenAccounts),
        };

        require_keys_eq!(
            mint.key(),
            expected_mint,
            ChainReactionError::AssetMismatch
        );
        require_keys_eq!(
            vault.key(),
            get_associated_token_address(&chain_state, &expected_mint),
            ChainReactionError::InvalidTokenAccount
        );
        require_keys_eq!(
            vault.mint,
            expected_mint,
            ChainReactionError::InvalidTokenAccount
        );
        require_keys_eq!(
            vault.owner,
            chain_state,
            ChainReactionError::InvalidTokenAccount
        );

        Ok(Some(Self {
            mint,
            vault,
            token_program,
        }))
    }

    /// Checks a user-side token account: right mint, owned by `owner`.
    pub fn check_user_account(
        &self,
        account: Option<&'a Account<'info, TokenAccount>>,
        owner: Pubkey,
    ) -> Result<&'a Account<'info, TokenAccount>> {
        let account = account.ok_or(ChainReactionError::MissingTokenAccounts)?;

        require_keys_eq!(
            account.mint,
            self.mint.key(),
            ChainReactionError::AssetMismatch
        );
        require_keys_eq!(
            account.owner,
            owner,
            ChainReactionError::InvalidTokenAccount
        );

        Ok(account)
    }

    pub fn deposit(
        &self,
        from: &Account<'info, TokenAccount>,
        authority: &Signer<'info>,
        amount: u64,
    ) -> Result<()> {
        let transfer_accounts = Transfer {
            from: from.to_account_info(),
            to: self.vault.to_account_info(),
            authority: authority.to_account_info(),
        };
        let transfer_ctx = CpiContext::new(self.token_program.to_account_info(), transfer_accounts);
        transfer(transfer_ctx, amount)
    }

    pub fn withdraw(
        &self,
        to: &Account<'info, TokenAccount>,
        chain_state: AccountInfo<'info>,
        chain_bump: u8,
        amount: u64,
    ) -> Result<()> {
        require!(
            self.vault.amount >= amount,
            ChainReactionError::InsufficientVaultBalance
        );

        let transfer_accounts = Transfer {
            from: self.vault.to_account_info(),
            to: to.to_account_info(),
            authority: chain_state,
        };
        let bump = [chain_bump];
        let seeds = &[CHAIN_STATE_SEED.as_bytes(), &bump[..]];
        let signer = &[&seeds[..]];
        let transfer_ctx = CpiContext::new_with_signer(
            self.token_program.to_account_info(),
            transfer_accounts,
            signer,
        );
        transfer(transfer_ctx, amount)
    }

    pub fn burn(&self, chain_state: AccountInfo<'info>, chain_bump: u8, amount: u64) -> Result<()> {
        let burn_accounts = Burn {
            mint: self.mint.to_account_info(),
            from: self.vault.to_account_info(),
            authority: chain_state,
        };
        let bump = [chain_bump];
        let seeds = &[CHAIN_STATE_SEED.as_bytes(), &bump[..]];
        let signer = &[&seeds[..]];
        let burn_ctx = CpiContext::new_with_signer(
            self.token_program.to_account_info(),
            burn_accounts,
            signer,
        );
        burn(burn_ctx, amount)
    }
}

/// Moves lamports from the payer onto the chain state PDA.
pub fn deposit_native<'info>(
    system_program: &Program<'info, System>,
    from: &Signer<'info>,
    chain_state: AccountInfo<'info>,
    amount: u64,
) -> Result<()> {
    let transfer_ctx = CpiContext::new(
        system_program.to_account_info(),
        system_program::Transfer {
            from: from.to_account_info(),
            to: chain_state,
        },
    );
    system_program::transfer(transfer_ctx, amount)
}

/// Moves lamports off the program-owned chain state PDA. The rent-exempt
/// reserve of the PDA is never touched.
pub fn release_native<'info>(
    chain_state: &AccountInfo<'info>,
    to: &AccountInfo<'info>,
    rent: &Rent,
    amount: u64,
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }

    let reserve = rent.minimum_balance(chain_state.data_len());
    let available = chain_state
        .lamports()
        .checked_sub(reserve)
        .ok_or(ChainReactionError::InsufficientVaultBalance)?;
    require!(
        available >= amount,
        ChainReactionError::InsufficientVaultBalance
    );

    let credited = to
        .lamports()
        .checked_add(amount)
        .ok_or(ChainReactionError::MathOverflow)?;

    **chain_state.try_borrow_mut_lamports()? -= amount;
    **to.try_borrow_mut_lamports()? = credited;

    Ok(())
}
