//! Chain state machine.
//!
//! [`apply`] takes the current [`ChainState`] by value, validates the action
//! against it and returns the replacement state together with the fund
//! movements the caller has to perform. An error leaves the caller's state
//! untouched, because every check runs before the new value is built.

use crate::{constants::*, error::ChainReactionError, events::*, state::ChainState, utils::*};
use anchor_lang::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartParams {
    pub payment: u64,
    pub duration_ms: u64,
    pub multiplier_bps: u64,
    pub asset: AssetId,
    pub burn_bps: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainAction {
    Start {
        starter: Pubkey,
        params: StartParams,
    },
    Join {
        player: Pubkey,
        payment: u64,
        asset: AssetId,
    },
    End,
    Boost {
        booster: Pubkey,
        amount: u64,
        asset: AssetId,
    },
}

/// Outcome of a committed action.
#[derive(Debug, PartialEq, Eq)]
pub struct Transition {
    pub deposit: u64, // caller -> vault
    pub burn: u64,    // vault -> nowhere
    pub payout: u64,  // vault -> winner
    pub event: ChainEvent,
}

pub fn apply(state: ChainState, action: ChainAction, now_ms: i64) -> Result<(ChainState, Transition)> {
    match action {
        ChainAction::Start { starter, params } => start(state, starter, params, now_ms),
        ChainAction::Join {
            player,
            payment,
            asset,
        } => join(state, player, payment, asset, now_ms),
        ChainAction::End => end(state, now_ms),
        ChainAction::Boost {
            booster,
            amount,
            asset,
        } => boost(state, booster, amount, asset),
    }
}

fn start(
    mut state: ChainState,
    starter: Pubkey,
    params: StartParams,
    now_ms: i64,
) -> Result<(ChainState, Transition)> {
    require!(!state.is_active, ChainReactionError::InvalidState);

    require!(params.payment > 0, ChainReactionError::InvalidParameter);
    require!(params.multiplier_bps > 0, ChainReactionError::InvalidParameter);
    require!(
        params.burn_bps <= MAX_BURN_BPS,
        ChainReactionError::InvalidParameter
    );
    require!(
        params.duration_ms > 0 && params.duration_ms >= state.min_duration,
        ChainReactionError::InvalidParameter
    );

    // first join must be payable and strictly pricier than the start
    let first_join_price = next_entry_price(params.payment, params.multiplier_bps)
        .map_err(|_| ChainReactionError::InvalidParameter)?;
    require!(
        first_join_price > params.payment,
        ChainReactionError::InvalidParameter
    );

    let end_timestamp = deadline_after(now_ms, params.duration_ms)
        .map_err(|_| ChainReactionError::InvalidParameter)?;

    state.is_active = true;
    state.asset = params.asset;
    state.base_entry = params.payment;
    state.current_entry = params.payment;
    state.multiplier_bps = params.multiplier_bps;
    state.burn_bps = params.burn_bps;
    state.pot = params.payment;
    state.boost_amount = 0;
    state.burned_amount = 0;
    state.last_player = starter;
    state.player_count = 1;
    state.last_entry_timestamp = now_ms;
    state.duration_ms = params.duration_ms;
    state.end_timestamp = end_timestamp;

    let event = ChainEvent::Started(ChainStarted {
        chain_id: state.chain_id,
        starter,
        base_entry: params.payment,
        asset: params.asset,
        duration_ms: params.duration_ms,
        multiplier_bps: params.multiplier_bps,
        burn_bps: params.burn_bps,
        end_timestamp,
    });

    Ok((
        state,
        Transition {
            deposit: params.payment,
            burn: 0,
            payout: 0,
            event,
        },
    ))
}

fn join(
    mut state: ChainState,
    player: Pubkey,
    payment: u64,
    asset: AssetId,
    now_ms: i64,
) -> Result<(ChainState, Transition)> {
    require!(state.is_active, ChainReactionError::InvalidState);
    require!(asset == state.asset, ChainReactionError::AssetMismatch);

    let price = next_entry_price(state.current_entry, state.multiplier_bps)?;
    require_eq!(payment, price, ChainReactionError::WrongPayment);

    let split = split_entry(payment, state.burn_bps)?;
    let countdown = next_duration(
        state.duration_ms,
        state.duration_decrease_ms,
        state.min_duration,
        state.player_count,
    );
    let end_timestamp = deadline_after(now_ms, countdown)?;

    let pot = state
        .pot
        .checked_add(split.to_pot)
        .ok_or(ChainReactionError::MathOverflow)?;
    let burned_amount = state
        .burned_amount
        .checked_add(split.burn_cut)
        .ok_or(ChainReactionError::MathOverflow)?;
    let player_count = state
        .player_count
        .checked_add(1)
        .ok_or(ChainReactionError::MathOverflow)?;

    state.pot = pot;
    state.burned_amount = burned_amount;
    state.current_entry = payment;
    state.last_player = player;
    state.player_count = player_count;
    state.last_entry_timestamp = now_ms;
    state.end_timestamp = end_timestamp;

    let event = ChainEvent::Joined(PlayerJoined {
        chain_id: state.chain_id,
        player,
        entry_fee: payment,
        burned: split.burn_cut,
        end_timestamp,
    });

    Ok((
        state,
        Transition {
            deposit: payment,
            burn: split.burn_cut,
            payout: 0,
            event,
        },
    ))
}

fn end(mut state: ChainState, now_ms: i64) -> Result<(ChainState, Transition)> {
    require!(state.is_active, ChainReactionError::InvalidState);
    require!(
        now_ms >= state.end_timestamp,
        ChainReactionError::PrematureEnd
    );

    let amount = payout(state.pot, state.boost_amount)?;
    let next_chain_id = state
        .chain_id
        .checked_add(1)
        .ok_or(ChainReactionError::MathOverflow)?;

    let event = ChainEvent::Ended(ChainEnded {
        chain_id: state.chain_id,
        winner: state.last_player,
        payout: amount,
    });

    state.is_active = false;
    state.pot = 0;
    state.boost_amount = 0;
    state.burned_amount = 0;
    state.player_count = 0;
    state.last_player = Pubkey::default();
    state.chain_id = next_chain_id;

    Ok((
        state,
        Transition {
            deposit: 0,
            burn: 0,
            payout: amount,
            event,
        },
    ))
}

fn boost(
    mut state: ChainState,
    booster: Pubkey,
    amount: u64,
    asset: AssetId,
) -> Result<(ChainState, Transition)> {
    require!(state.is_active, ChainReactionError::InvalidState);
    require!(amount > 0, ChainReactionError::InvalidParameter);
    require!(asset == state.asset, ChainReactionError::AssetMismatch);

    state.boost_amount = state
        .boost_amount
        .checked_add(amount)
        .ok_or(ChainReactionError::MathOverflow)?;

    let event = ChainEvent::Boosted(PotBoosted {
        chain_id: state.chain_id,
        booster,
        amount,
    });

    Ok((
        state,
        Transition {
            deposit: amount,
            burn: 0,
            payout: 0,
            event,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_lang::error::Error;

    const ONE_UNIT: u64 = 1_000_000_000_000_000_000;
    const T0: i64 = 1_700_000_000_000;

    fn inactive(duration_decrease_ms: u64, min_duration: u64) -> ChainState {
        ChainState::new(Pubkey::new_unique(), duration_decrease_ms, min_duration, 254)
    }

    fn start_params(payment: u64, duration_ms: u64, burn_bps: u16) -> StartParams {
        StartParams {
            payment,
            duration_ms,
            multiplier_bps: 1_000,
            asset: AssetId::Native,
            burn_bps,
        }
    }

    fn started(state: ChainState, starter: Pubkey, params: StartParams) -> ChainState {
        apply(state, ChainAction::Start { starter, params }, T0).unwrap().0
    }

    fn join_next(state: ChainState, player: Pubkey, now_ms: i64) -> (ChainState, Transition) {
        let payment = next_entry_price(state.current_entry, state.multiplier_bps).unwrap();
        let asset = state.asset;
        apply(
            state,
            ChainAction::Join {
                player,
                payment,
                asset,
            },
            now_ms,
        )
        .unwrap()
    }

    fn assert_err(result: Result<(ChainState, Transition)>, expected: ChainReactionError) {
        assert_eq!(result.unwrap_err(), Error::from(expected));
    }

    fn assert_inactive_defaults(state: &ChainState) {
        assert!(!state.is_active);
        assert_eq!(state.pot, 0);
        assert_eq!(state.boost_amount, 0);
        assert_eq!(state.burned_amount, 0);
        assert_eq!(state.player_count, 0);
        assert_eq!(state.last_player, Pubkey::default());
    }

    #[test]
    fn test_start_seeds_chain() {
        let starter = Pubkey::new_unique();
        let (state, transition) = apply(
            inactive(0, 500),
            ChainAction::Start {
                starter,
                params: start_params(10, 1_000, 0),
            },
            T0,
        )
        .unwrap();

        assert!(state.is_active);
        assert_eq!(state.base_entry, 10);
        assert_eq!(state.current_entry, 10);
        assert_eq!(state.pot, 10);
        assert_eq!(state.player_count, 1);
        assert_eq!(state.last_player, starter);
        assert_eq!(state.last_entry_timestamp, T0);
        assert_eq!(state.end_timestamp, T0 + 1_000);
        assert_eq!(
            next_entry_price(state.current_entry, state.multiplier_bps).unwrap(),
            11
        );

        assert_eq!(transition.deposit, 10);
        assert_eq!(
            transition.event,
            ChainEvent::Started(ChainStarted {
                chain_id: 0,
                starter,
                base_entry: 10,
                asset: AssetId::Native,
                duration_ms: 1_000,
                multiplier_bps: 1_000,
                burn_bps: 0,
                end_timestamp: T0 + 1_000,
            })
        );
    }

    #[test]
    fn test_start_is_never_burned() {
        let state = started(inactive(0, 500), Pubkey::new_unique(), start_params(100, 1_000, 500));
        assert_eq!(state.pot, 100);
        assert_eq!(state.burned_amount, 0);
    }

    #[test]
    fn test_start_rejects_invalid_parameters() {
        let starter = Pubkey::new_unique();
        let cases = [
            start_params(0, 1_000, 0),
            StartParams {
                multiplier_bps: 0,
                ..start_params(10, 1_000, 0)
            },
            start_params(10, 1_000, 10_001),
            start_params(10, 499, 0),
            // first join price would not fit in u64
            StartParams {
                multiplier_bps: 1,
                ..start_params(u64::MAX, 1_000, 0)
            },
            // 9 * 1000 / 10000 floors to 0: the price would never rise
            start_params(9, 1_000, 0),
        ];

        for params in cases {
            assert_err(
                apply(inactive(0, 500), ChainAction::Start { starter, params }, T0),
                ChainReactionError::InvalidParameter,
            );
        }
    }

    #[test]
    fn test_start_rejects_zero_duration_without_floor() {
        assert_err(
            apply(
                inactive(0, 0),
                ChainAction::Start {
                    starter: Pubkey::new_unique(),
                    params: start_params(10, 0, 0),
                },
                T0,
            ),
            ChainReactionError::InvalidParameter,
        );
    }

    #[test]
    fn test_start_while_active() {
        let state = started(inactive(0, 500), Pubkey::new_unique(), start_params(10, 1_000, 0));
        assert_err(
            apply(
                state,
                ChainAction::Start {
                    starter: Pubkey::new_unique(),
                    params: start_params(10, 1_000, 0),
                },
                T0 + 1,
            ),
            ChainReactionError::InvalidState,
        );
    }

    #[test]
    fn test_end_to_end_scenario() {
        let starter = Pubkey::new_unique();
        let joiner = Pubkey::new_unique();
        let state = started(inactive(0, 500), starter, start_params(10, 1_000, 0));

        let (state, transition) = join_next(state, joiner, T0 + 200);
        assert_eq!(transition.deposit, 11);
        assert_eq!(transition.burn, 0);
        assert_eq!(state.pot, 21);
        assert_eq!(state.current_entry, 11);
        assert_eq!(state.player_count, 2);
        assert_eq!(state.last_player, joiner);
        assert_eq!(state.end_timestamp, T0 + 1_200);

        assert!(!state.can_end(T0 + 1_199));
        assert!(state.can_end(T0 + 1_200));

        let (state, transition) = apply(state, ChainAction::End, T0 + 1_200).unwrap();
        assert_eq!(transition.payout, 21);
        assert_eq!(
            transition.event,
            ChainEvent::Ended(ChainEnded {
                chain_id: 0,
                winner: joiner,
                payout: 21,
            })
        );
        assert_inactive_defaults(&state);
        assert_eq!(state.chain_id, 1);
    }

    #[test]
    fn test_premature_end_leaves_state_unchanged() {
        let state = started(inactive(0, 500), Pubkey::new_unique(), start_params(10, 1_000, 0));
        let snapshot = state.clone();

        assert_err(
            apply(state.clone(), ChainAction::End, T0 + 999),
            ChainReactionError::PrematureEnd,
        );
        assert_eq!(state, snapshot);
        assert!(!state.can_end(T0 + 999));
    }

    #[test]
    fn test_end_twice() {
        let state = started(inactive(0, 500), Pubkey::new_unique(), start_params(10, 1_000, 0));
        let (state, _) = apply(state, ChainAction::End, T0 + 1_000).unwrap();

        assert_err(
            apply(state, ChainAction::End, T0 + 5_000),
            ChainReactionError::InvalidState,
        );
    }

    #[test]
    fn test_end_is_permissionless_and_ignores_caller() {
        // End carries no caller at all: the payout always goes to last_player.
        let starter = Pubkey::new_unique();
        let state = started(inactive(0, 500), starter, start_params(10, 1_000, 0));
        let (_, transition) = apply(state, ChainAction::End, T0 + 1_000).unwrap();

        match transition.event {
            ChainEvent::Ended(ended) => assert_eq!(ended.winner, starter),
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn test_join_rejections() {
        let player = Pubkey::new_unique();
        let join = |payment, asset| ChainAction::Join {
            player,
            payment,
            asset,
        };

        assert_err(
            apply(inactive(0, 500), join(10, AssetId::Native), T0),
            ChainReactionError::InvalidState,
        );

        let state = started(inactive(0, 500), Pubkey::new_unique(), start_params(10, 1_000, 0));
        for payment in [0, 10, 12] {
            assert_err(
                apply(state.clone(), join(payment, AssetId::Native), T0 + 1),
                ChainReactionError::WrongPayment,
            );
        }
        assert_err(
            apply(
                state.clone(),
                join(11, AssetId::Token(Pubkey::new_unique())),
                T0 + 1,
            ),
            ChainReactionError::AssetMismatch,
        );
    }

    #[test]
    fn test_join_after_end_is_rejected() {
        let state = started(inactive(0, 500), Pubkey::new_unique(), start_params(10, 1_000, 0));
        let (state, _) = apply(state, ChainAction::End, T0 + 1_000).unwrap();

        assert_err(
            apply(
                state,
                ChainAction::Join {
                    player: Pubkey::new_unique(),
                    payment: 10,
                    asset: AssetId::Native,
                },
                T0 + 1_001,
            ),
            ChainReactionError::InvalidState,
        );
    }

    #[test]
    fn test_join_burns_share_of_fee() {
        let params = StartParams {
            multiplier_bps: 10_000,
            ..start_params(50, 1_000, 500)
        };
        let state = started(inactive(0, 500), Pubkey::new_unique(), params);

        // 50 doubled: the joiner pays 100, 5% of it is burned
        let (state, transition) = join_next(state, Pubkey::new_unique(), T0 + 1);
        assert_eq!(transition.deposit, 100);
        assert_eq!(transition.burn, 5);
        assert_eq!(state.pot, 50 + 95);
        assert_eq!(state.burned_amount, 5);
    }

    #[test]
    fn test_conservation_with_burn() {
        let mut state = started(inactive(500, 500), Pubkey::new_unique(), start_params(ONE_UNIT, 500, 500));
        let mut fees_paid = ONE_UNIT;
        let mut last = Pubkey::default();

        for i in 1..6 {
            last = Pubkey::new_unique();
            let (next, transition) = join_next(state, last, T0 + i);
            fees_paid += transition.deposit;
            state = next;
        }

        // 1 unit started, then 1.1 + 1.21 + 1.331 + 1.4641 + 1.61051 units joined, 5% of each join burned
        assert_eq!(fees_paid, 7_715_610_000_000_000_000);
        assert_eq!(state.burned_amount, 335_780_500_000_000_000);
        assert_eq!(state.pot + state.burned_amount, fees_paid);

        let pot_before_end = state.pot;
        let (state, transition) = apply(state, ChainAction::End, i64::MAX).unwrap();
        assert_eq!(transition.payout, pot_before_end);
        assert_eq!(transition.burn, 0);
        assert_eq!(
            transition.event,
            ChainEvent::Ended(ChainEnded {
                chain_id: 0,
                winner: last,
                payout: pot_before_end,
            })
        );
        assert_inactive_defaults(&state);
    }

    #[test]
    fn test_boost_only_touches_boost_amount() {
        let booster = Pubkey::new_unique();
        let before = started(inactive(0, 500), Pubkey::new_unique(), start_params(10, 2_000, 0));

        let (after, transition) = apply(
            before.clone(),
            ChainAction::Boost {
                booster,
                amount: 10 * ONE_UNIT,
                asset: AssetId::Native,
            },
            T0 + 10,
        )
        .unwrap();

        assert_eq!(
            after,
            ChainState {
                boost_amount: 10 * ONE_UNIT,
                ..before
            }
        );
        assert_eq!(transition.deposit, 10 * ONE_UNIT);
        assert_eq!(
            transition.event,
            ChainEvent::Boosted(PotBoosted {
                chain_id: 0,
                booster,
                amount: 10 * ONE_UNIT,
            })
        );
    }

    #[test]
    fn test_boost_rejections() {
        let boost = |amount, asset| ChainAction::Boost {
            booster: Pubkey::new_unique(),
            amount,
            asset,
        };

        assert_err(
            apply(inactive(0, 500), boost(5, AssetId::Native), T0),
            ChainReactionError::InvalidState,
        );

        let state = started(inactive(0, 500), Pubkey::new_unique(), start_params(10, 1_000, 0));
        assert_err(
            apply(state.clone(), boost(0, AssetId::Native), T0),
            ChainReactionError::InvalidParameter,
        );
        assert_err(
            apply(state, boost(5, AssetId::Token(Pubkey::new_unique())), T0),
            ChainReactionError::AssetMismatch,
        );
    }

    #[test]
    fn test_token_chain_with_boost_pays_pot_and_boost() {
        let mint = Pubkey::new_unique();
        let params = StartParams {
            asset: AssetId::Token(mint),
            ..start_params(10, 2_000, 0)
        };
        let state = started(inactive(500, 500), Pubkey::new_unique(), params);
        let (mut state, _) = apply(
            state,
            ChainAction::Boost {
                booster: Pubkey::new_unique(),
                amount: 100,
                asset: AssetId::Token(mint),
            },
            T0,
        )
        .unwrap();

        let mut winner = Pubkey::default();
        for (i, expected_fee) in [11u64, 12, 13].into_iter().enumerate() {
            winner = Pubkey::new_unique();
            let (next, transition) = join_next(state, winner, T0 + i as i64);
            assert_eq!(transition.deposit, expected_fee);
            state = next;
        }
        assert_eq!(state.pot, 46);
        assert_eq!(state.boost_amount, 100);

        let end_at = state.end_timestamp;
        let (state, transition) = apply(state, ChainAction::End, end_at).unwrap();
        assert_eq!(transition.payout, 146);
        assert_eq!(
            transition.event,
            ChainEvent::Ended(ChainEnded {
                chain_id: 0,
                winner,
                payout: 146,
            })
        );
        assert_inactive_defaults(&state);
    }

    #[test]
    fn test_countdown_decays_to_floor() {
        let state = started(inactive(500, 500), Pubkey::new_unique(), start_params(10, 2_000, 0));
        assert_eq!(state.end_timestamp, T0 + 2_000);

        // player_count 1: 2000 - 2 * 500
        let (state, _) = join_next(state, Pubkey::new_unique(), T0 + 100);
        assert_eq!(state.end_timestamp, T0 + 100 + 1_000);

        // player_count 2: 2000 - 3 * 500
        let (state, _) = join_next(state, Pubkey::new_unique(), T0 + 200);
        assert_eq!(state.end_timestamp, T0 + 200 + 500);

        // floor from here on
        let (state, _) = join_next(state, Pubkey::new_unique(), T0 + 300);
        assert_eq!(state.end_timestamp, T0 + 300 + 500);
        let (state, _) = join_next(state, Pubkey::new_unique(), T0 + 400);
        assert_eq!(state.end_timestamp, T0 + 400 + 500);
    }

    #[test]
    fn test_entry_price_never_decreases_within_chain() {
        let mut state = started(inactive(0, 500), Pubkey::new_unique(), start_params(10, 1_000, 0));
        let mut previous = state.current_entry;

        for i in 0..20 {
            state = join_next(state, Pubkey::new_unique(), T0 + i).0;
            assert!(state.current_entry > previous);
            previous = state.current_entry;
        }
    }

    #[test]
    fn test_restart_after_end() {
        let state = started(inactive(0, 500), Pubkey::new_unique(), start_params(ONE_UNIT, 500, 500));
        let (state, _) = join_next(state, Pubkey::new_unique(), T0 + 1);
        let (state, _) = apply(state, ChainAction::End, i64::MAX).unwrap();

        let starter = Pubkey::new_unique();
        let (state, transition) = apply(
            state,
            ChainAction::Start {
                starter,
                params: start_params(ONE_UNIT, 500, 500),
            },
            T0 + 10_000,
        )
        .unwrap();

        assert_eq!(state.chain_id, 1);
        assert_eq!(state.pot, ONE_UNIT);
        assert_eq!(state.burned_amount, 0);
        assert_eq!(state.player_count, 1);
        assert_eq!(
            next_entry_price(state.current_entry, state.multiplier_bps).unwrap(),
            1_100_000_000_000_000_000
        );
        match transition.event {
            ChainEvent::Started(started) => assert_eq!(started.chain_id, 1),
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn test_quoted_entry_price_follows_phase() {
        let state = inactive(0, 500);
        assert_eq!(state.quoted_entry_price().unwrap(), 0);

        let state = started(state, Pubkey::new_unique(), start_params(10, 1_000, 0));
        assert_eq!(state.quoted_entry_price().unwrap(), 11);

        let (state, _) = apply(state, ChainAction::End, T0 + 1_000).unwrap();
        assert!(!state.is_active);
        assert_eq!(state.current_entry, 10);
        assert_eq!(state.quoted_entry_price().unwrap(), 0);
    }

    #[test]
    fn test_boost_after_deadline_keeps_countdown() {
        let state = started(inactive(0, 500), Pubkey::new_unique(), start_params(10, 1_000, 0));
        let boost = ChainAction::Boost {
            booster: Pubkey::new_unique(),
            amount: 7,
            asset: AssetId::Native,
        };

        let (early, _) = apply(state.clone(), boost, T0 + 1).unwrap();
        let (late, _) = apply(state.clone(), boost, T0 + 5_000).unwrap();

        assert_eq!(early, late);
        assert_eq!(late.end_timestamp, state.end_timestamp);
        assert_eq!(late.last_entry_timestamp, state.last_entry_timestamp);
        assert_eq!(late.boost_amount, 7);
    }
}
