use crate::{constants::*, error::ChainReactionError};
use anchor_lang::prelude::*;

pub fn unix_seconds_to_ms(unix_timestamp: i64) -> Result<i64> {
    unix_timestamp
        .checked_mul(MS_PER_SECOND)
        .ok_or(ChainReactionError::MathOverflow.into())
}

/// Current cluster time in milliseconds.
pub fn now_ms() -> Result<i64> {
    unix_seconds_to_ms(Clock::get()?.unix_timestamp)
}

/// `now_ms + duration_ms`, the instant a countdown expires.
pub fn deadline_after(now_ms: i64, duration_ms: u64) -> Result<i64> {
    let duration: i64 = duration_ms
        .try_into()
        .map_err(|_| ChainReactionError::MathOverflow)?;

    now_ms
        .checked_add(duration)
        .ok_or(ChainReactionError::MathOverflow.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unix_seconds_to_ms() {
        assert_eq!(unix_seconds_to_ms(1_700_000_000).unwrap(), 1_700_000_000_000);
        assert!(unix_seconds_to_ms(i64::MAX).is_err());
    }

    #[test]
    fn test_deadline_after() {
        assert_eq!(deadline_after(1_000, 500).unwrap(), 1_500);
        assert!(deadline_after(i64::MAX, 1).is_err());
        assert!(deadline_after(0, u64::MAX).is_err());
    }
}
