#![allow(unexpected_cfgs)]
#![allow(deprecated)]

pub mod constants;
pub mod error;
pub mod events;
pub mod instructions;
pub mod lifecycle;
pub mod state;
pub mod utils;

use anchor_lang::prelude::*;

pub use constants::*;
pub use instructions::*;
pub use state::*;

declare_id!("EJXm94TtEgohBB5ZRzM5WUBi19tV9syvdMmtbHmkg6qY");

#[program]
pub mod chain_reaction {
    use super::*;

    pub fn initialize(
        ctx: Context<Initialize>,
        duration_decrease_ms: Option<u64>,
        min_duration: Option<u64>,
    ) -> Result<()> {
        initialize::handler(ctx, duration_decrease_ms, min_duration)
    }

    pub fn update_config(
        ctx: Context<UpdateConfig>,
        new_admin: Option<Pubkey>,
        new_duration_decrease_ms: Option<u64>,
        new_min_duration: Option<u64>,
    ) -> Result<()> {
        update_config::handler(ctx, new_admin, new_duration_decrease_ms, new_min_duration)
    }

    pub fn start_chain(
        ctx: Context<StartChain>,
        payment: u64,
        duration_ms: u64,
        multiplier_bps: u64,
        asset: AssetId,
        burn_bps: u16,
    ) -> Result<()> {
        start_chain::handler(ctx, payment, duration_ms, multiplier_bps, asset, burn_bps)
    }

    pub fn join_chain(ctx: Context<JoinChain>, payment: u64) -> Result<()> {
        join_chain::handler(ctx, payment)
    }

    pub fn end_chain(ctx: Context<EndChain>) -> Result<()> {
        end_chain::handler(ctx)
    }

    pub fn boost_chain(ctx: Context<BoostChain>, amount: u64) -> Result<()> {
        boost_chain::handler(ctx, amount)
    }

    pub fn get_next_entry_price(ctx: Context<ViewChain>) -> Result<u64> {
        view_chain::next_entry_price_handler(ctx)
    }

    pub fn can_end(ctx: Context<ViewChain>) -> Result<bool> {
        view_chain::can_end_handler(ctx)
    }
}
