pub mod duration;
pub mod ledger;
pub mod pricing;
pub mod time;
pub mod vault;

pub use duration::*;
pub use ledger::*;
pub use pricing::*;
pub use time::*;
pub use vault::*;
