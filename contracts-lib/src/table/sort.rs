//! Sort state and the sort engine.

use std::cmp::Ordering;

use log::debug;
use serde::Deserialize;
use serde::Serialize;

use super::Column;
use super::ColumnSorter;
use super::Row;
use crate::model::compare_optional_values;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Ascend,
    Descend,
}

impl SortOrder {
    /// Returns the order that follows `current` when a column header is
    /// activated: none, then ascending, then descending, then none again.
    pub fn next(current: Option<SortOrder>) -> Option<SortOrder> {
        match current {
            None => Some(SortOrder::Ascend),
            Some(SortOrder::Ascend) => Some(SortOrder::Descend),
            Some(SortOrder::Descend) => None,
        }
    }

    /// Applies this direction to an ascending comparison result.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortOrder::Ascend => ordering,
            SortOrder::Descend => ordering.reverse(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Ascend => "ascend",
            SortOrder::Descend => "descend",
        }
    }
}

/// One (field, direction) entry of the sort state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sorter {
    pub field: String,
    pub order: SortOrder,
}

/// Ordered list of active sorters.
///
/// Activating a column replaces whatever was sorted before, so in practice
/// at most one entry is active.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortState {
    sorters: Vec<Sorter>,
}

impl SortState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sort state with a single entry.
    pub fn by(field: impl Into<String>, order: SortOrder) -> Self {
        Self {
            sorters: vec![Sorter {
                field: field.into(),
                order,
            }],
        }
    }

    /// Returns the direction `field` is currently sorted in.
    pub fn order_for(&self, field: &str) -> Option<SortOrder> {
        self.sorters
            .iter()
            .find(|s| s.field == field)
            .map(|s| s.order)
    }

    /// The first active sorter.
    pub fn active(&self) -> Option<&Sorter> {
        self.sorters.first()
    }

    pub fn sorters(&self) -> &[Sorter] {
        &self.sorters
    }

    pub fn is_empty(&self) -> bool {
        self.sorters.is_empty()
    }

    pub fn clear(&mut self) {
        self.sorters.clear();
    }

    /// Advances the sort of `field` one step and drops any other sorter.
    ///
    /// Returns the new direction, or `None` when the field is now unsorted.
    pub fn cycle(&mut self, field: &str) -> Option<SortOrder> {
        let next = SortOrder::next(self.order_for(field));
        self.sorters.clear();
        if let Some(order) = next {
            self.sorters.push(Sorter {
                field: field.to_string(),
                order,
            });
        }
        debug!("Sort on '{}' is now {:?}", field, next);
        next
    }
}

/// Orders `rows` by the sort state, using each column's sorter.
///
/// Sorters whose field names no sortable column are ignored. The sort is
/// stable; with no active sorter the rows pass through unchanged.
pub fn sort_rows<'a, R: Row>(
    mut rows: Vec<&'a R>,
    sort: &SortState,
    columns: &[Column<R>],
) -> Vec<&'a R> {
    let sorters: Vec<(&Column<R>, SortOrder)> = sort
        .sorters()
        .iter()
        .filter_map(|s| {
            columns
                .iter()
                .find(|c| c.id() == s.field && c.is_sortable())
                .map(|c| (c, s.order))
        })
        .collect();
    if sorters.is_empty() {
        return rows;
    }

    rows.sort_by(|a, b| {
        for (column, order) in &sorters {
            let ordering = match &column.sorter {
                ColumnSorter::Custom(compare) => compare(a, b, *order).cmp(&0),
                ColumnSorter::Default => {
                    order.apply(compare_optional_values(column.value(a), column.value(b)))
                }
                ColumnSorter::None => Ordering::Equal,
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    });
    rows
}
