pub mod config;
pub mod error;
pub mod types;

pub use config::{rules, set_rules, BayRules};
pub use error::{BayError, NoSlotAvailable, Result};
pub use types::{BayId, Round, UnitId};
