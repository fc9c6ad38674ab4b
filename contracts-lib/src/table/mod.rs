//! Generic client-side table pipeline.
//!
//! Rows flow through three stages, each a pure function of the raw rows and
//! the current state:
//!
//! 1. [`filter_rows`] keeps rows whose field text is accepted by the
//!    [`FilterState`] (AND across fields, OR within a field).
//! 2. [`sort_rows`] orders them by the [`SortState`], using each column's
//!    default or custom comparator.
//! 3. [`paginate`] slices the current page.
//!
//! [`TableView`] composes the stages, tracks selection and expansion by row
//! key, and emits a [`ChangeEvent`] for every sort or page interaction.

mod column;
mod filter;
mod page;
mod row;
mod selection;
mod sort;
mod view;

pub use column::*;
pub use filter::*;
pub use page::*;
pub use row::*;
pub use selection::*;
pub use sort::*;
pub use view::*;
