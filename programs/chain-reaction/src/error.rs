use anchor_lang::prelude::*;

#[error_code]
pub enum ChainReactionError {
    // Lifecycle Errors (0x1000 - 0x1999)
    #[msg("Operation is not valid while the chain is in its current phase")]
    InvalidState = 0x1000,

    #[msg("The countdown has not expired yet")]
    PrematureEnd = 0x1001,

    // Parameter Errors (0x2000 - 0x2999)
    // Also raised at start when payment * multiplier_bps < 10_000: the floored
    // increment would be 0 and the entry price would never rise.
    #[msg("Zero or out-of-range amount, multiplier, burn rate or duration, or a multiplier too small to raise the entry price")]
    InvalidParameter = 0x2000,

    #[msg("Payment does not equal the next entry price")]
    WrongPayment = 0x2001,

    // Asset & Account Errors (0x3000 - 0x3999)
    #[msg("Payment asset does not match the chain asset")]
    AssetMismatch = 0x3000,

    #[msg("Invalid token account")]
    InvalidTokenAccount = 0x3001,

    #[msg("Token accounts are required for a token chain")]
    MissingTokenAccounts = 0x3002,

    #[msg("Winner account does not match the last player")]
    InvalidWinner = 0x3003,

    #[msg("Vault balance is insufficient for this operation")]
    InsufficientVaultBalance = 0x3004,

    // Config Errors (0x4000 - 0x4999)
    #[msg("Unauthorized action for this account")]
    Unauthorized = 0x4000,

    #[msg("Invalid configuration value")]
    InvalidConfig = 0x4001,

    // Math Errors (0x5000 - 0x5999)
    #[msg("Arithmetic overflow")]
    MathOverflow = 0x5000,

    #[msg("Arithmetic underflow")]
    MathUnderflow = 0x5001,
}
