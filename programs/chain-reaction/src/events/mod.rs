pub mod chain_ended;
pub mod chain_started;
pub mod config_updated;
pub mod player_joined;
pub mod pot_boosted;

pub use chain_ended::*;
pub use chain_started::*;
pub use config_updated::*;
pub use player_joined::*;
pub use pot_boosted::*;

use anchor_lang::prelude::*;

/// Domain event produced by a lifecycle transition.
#[derive(Debug, PartialEq, Eq)]
pub enum ChainEvent {
    Started(ChainStarted),
    Joined(PlayerJoined),
    Ended(ChainEnded),
    Boosted(PotBoosted),
}

impl ChainEvent {
    pub fn emit(self) {
        match self {
            ChainEvent::Started(event) => emit!(event),
            ChainEvent::Joined(event) => emit!(event),
            ChainEvent::Ended(event) => emit!(event),
            ChainEvent::Boosted(event) => emit!(event),
        }
    }
}
