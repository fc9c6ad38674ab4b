//! Contracts API support: list queries, request tracking and search input.

mod loading;
mod query;
mod search;

pub use loading::*;
pub use query::*;
pub use search::*;
