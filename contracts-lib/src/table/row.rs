//! Row access and row identity

use std::fmt;
use std::sync::Arc;

use crate::model::Record;
use crate::model::Value;

/// A row the table pipeline can read fields from.
///
/// The pipeline never mutates rows; it only resolves dot-separated field
/// paths to values for filtering, sorting, rendering, and row identity.
pub trait Row {
    /// Returns the value at a dot-separated path, if present.
    fn value_at(&self, path: &str) -> Option<&Value>;
}

impl Row for Record {
    fn value_at(&self, path: &str) -> Option<&Value> {
        self.get_path(path)
    }
}

/// Function deriving a row key from a row and its position on the page.
pub type KeyFn<R> = Arc<dyn Fn(&R, usize) -> String + Send + Sync>;

/// How a row's identity is derived for selection and expansion tracking.
///
/// Keys are assumed stable for the lifetime of a view.
pub enum RowKey<R> {
    /// Text of the value at this field; a missing or null value falls back
    /// to the row's position on the page.
    Field(String),
    /// Custom key function.
    Custom(KeyFn<R>),
}

impl<R: Row> RowKey<R> {
    /// Keys rows by the given field.
    pub fn field(name: impl Into<String>) -> Self {
        RowKey::Field(name.into())
    }

    /// Keys rows with a custom function of (row, position).
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&R, usize) -> String + Send + Sync + 'static,
    {
        RowKey::Custom(Arc::new(f))
    }

    /// Returns the key of `row` shown at `index`.
    pub fn key_for(&self, row: &R, index: usize) -> String {
        match self {
            RowKey::Field(field) => match row.value_at(field) {
                None | Some(Value::Null) => index.to_string(),
                Some(value) => value.to_text(),
            },
            RowKey::Custom(f) => f(row, index),
        }
    }
}

impl<R> Default for RowKey<R> {
    fn default() -> Self {
        RowKey::Field("id".to_string())
    }
}

impl<R> Clone for RowKey<R> {
    fn clone(&self) -> Self {
        match self {
            RowKey::Field(field) => RowKey::Field(field.clone()),
            RowKey::Custom(f) => RowKey::Custom(Arc::clone(f)),
        }
    }
}

impl<R> fmt::Debug for RowKey<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowKey::Field(field) => f.debug_tuple("Field").field(field).finish(),
            RowKey::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_key_uses_value_text() {
        let key = RowKey::<Record>::default();
        let row = Record::new().set("id", 42i64);
        assert_eq!(key.key_for(&row, 3), "42");
    }

    #[test]
    fn test_missing_key_falls_back_to_position() {
        let key = RowKey::<Record>::field("id");
        assert_eq!(key.key_for(&Record::new(), 3), "3");
        assert_eq!(key.key_for(&Record::new().set("id", Value::Null), 0), "0");
    }

    #[test]
    fn test_custom_key() {
        let key = RowKey::<Record>::custom(|row, index| {
            format!("{}#{}", row.get_string("id").ok().flatten().unwrap_or("?"), index)
        });
        assert_eq!(key.key_for(&Record::new().set("id", "CON-1"), 2), "CON-1#2");
    }
}
