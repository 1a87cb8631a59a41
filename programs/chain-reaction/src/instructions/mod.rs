#![allow(ambiguous_glob_reexports)]

pub mod boost_chain;
pub mod end_chain;
pub mod initialize;
pub mod join_chain;
pub mod start_chain;
pub mod update_config;
pub mod view_chain;

pub use boost_chain::*;
pub use end_chain::*;
pub use initialize::*;
pub use join_chain::*;
pub use start_chain::*;
pub use update_config::*;
pub use view_chain::*;
