//! Records, values, and the contract domain model

mod columns;
mod contract;
pub mod format;
mod record;
mod record_serde;
mod value;

pub use columns::*;
pub use contract::*;
pub use record::*;
pub use value::*;
