pub mod chain_state;

pub use chain_state::*;
