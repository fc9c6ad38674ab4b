//! Filter state and the filter engine.

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use serde::Serialize;

use super::Row;

/// Accepted values per field.
///
/// A field that is absent, or mapped to an empty set, imposes no constraint.
/// Constraints on different fields combine with AND; the values accepted for
/// one field combine with OR.
///
/// # Example
///
/// ```
/// use contracts_lib::table::FilterState;
///
/// let filters = FilterState::new()
///     .with("estado", ["activo", "pendiente_firma"])
///     .with("moneda", ["USD"]);
/// assert_eq!(filters.active().count(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FilterState {
    fields: BTreeMap<String, BTreeSet<String>>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds filter state from single-valued form inputs.
    ///
    /// Empty inputs impose no constraint, so clearing a select box or date
    /// input removes its filter.
    pub fn from_inputs<I, K, V>(inputs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut state = Self::new();
        for (field, value) in inputs {
            let value = value.into();
            if !value.is_empty() {
                state.set(field, [value]);
            }
        }
        state
    }

    /// Sets the accepted values for a field (builder pattern).
    pub fn with<I, V>(mut self, field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.set(field, values);
        self
    }

    /// Replaces the accepted values for a field.
    pub fn set<I, V>(&mut self, field: impl Into<String>, values: I)
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.fields
            .insert(field.into(), values.into_iter().map(Into::into).collect());
    }

    /// Adds one accepted value to a field.
    pub fn accept(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.fields
            .entry(field.into())
            .or_default()
            .insert(value.into());
    }

    /// Removes the constraint on a field.
    pub fn remove(&mut self, field: &str) -> Option<BTreeSet<String>> {
        self.fields.remove(field)
    }

    pub fn clear(&mut self) {
        self.fields.clear();
    }

    /// Returns the accepted values for a field, if any were set.
    pub fn accepted(&self, field: &str) -> Option<&BTreeSet<String>> {
        self.fields.get(field)
    }

    /// Iterates the constraints that actually restrict rows.
    pub fn active(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.fields
            .iter()
            .filter(|(_, values)| !values.is_empty())
            .map(|(field, values)| (field.as_str(), values))
    }

    /// Returns `true` when no constraint restricts rows.
    pub fn is_empty(&self) -> bool {
        self.active().next().is_none()
    }

    /// Returns `true` if `row` satisfies every active constraint.
    ///
    /// The row's value is compared by its text; a missing value has the
    /// empty text.
    pub fn matches<R: Row>(&self, row: &R) -> bool {
        self.active().all(|(field, values)| {
            let text = row.value_at(field).map(|v| v.to_text()).unwrap_or_default();
            values.contains(&text)
        })
    }
}

/// Keeps the rows that satisfy `filters`, in their original order.
pub fn filter_rows<'a, R, I>(rows: I, filters: &FilterState) -> Vec<&'a R>
where
    R: Row + 'a,
    I: IntoIterator<Item = &'a R>,
{
    if filters.is_empty() {
        return rows.into_iter().collect();
    }
    rows.into_iter().filter(|row| filters.matches(*row)).collect()
}
