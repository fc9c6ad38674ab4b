//! Dynamic record

use std::collections::BTreeMap;

use super::Value;
use crate::error::FieldError;

/// A dynamic record: a mapping from field name to [`Value`].
///
/// Records are what the table pipeline filters, sorts, and pages. Nested
/// objects are reachable with dot-separated paths through [`Record::get_path`].
///
/// # Example
///
/// ```
/// use contracts_lib::model::Record;
///
/// let record = Record::new()
///     .set("id", "CON-1001")
///     .set("valor", 15_000i64);
///
/// assert_eq!(record.get_string("id").unwrap(), Some("CON-1001"));
/// assert_eq!(record.get_int("valor").unwrap(), Some(15_000));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    pub(crate) fields: BTreeMap<String, Value>,
}

impl Record {
    /// Creates a new empty record.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Raw field access
    // =========================================================================

    /// Returns a reference to the field value, if it exists.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Resolves a dot-separated path through nested objects.
    ///
    /// A path without dots is a plain field lookup. Any segment that is
    /// missing or lands on a non-object value resolves to `None`.
    pub fn get_path(&self, path: &str) -> Option<&Value> {
        if !path.contains('.') {
            return self.fields.get(path);
        }

        let mut segments = path.split('.');
        let mut current = self.fields.get(segments.next()?)?;
        for segment in segments {
            match current {
                Value::Object(record) => current = record.fields.get(segment)?,
                _ => return None,
            }
        }
        Some(current)
    }

    /// Returns `true` if the record contains the given field.
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Returns a reference to all fields.
    pub fn fields(&self) -> &BTreeMap<String, Value> {
        &self.fields
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    // =========================================================================
    // Setters
    // =========================================================================

    /// Sets a field value (builder pattern).
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Inserts a field value.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Removes a field and returns its value.
    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.fields.remove(field)
    }

    // =========================================================================
    // Typed getters
    //
    // Err when the path is missing or holds another kind.
    // Ok(None) only when the value exists and is Value::Null.
    // =========================================================================

    fn typed<'a, T>(
        &'a self,
        path: &str,
        expected: &'static str,
        pick: impl FnOnce(&'a Value) -> Option<T>,
    ) -> Result<Option<T>, FieldError> {
        match self.get_path(path) {
            None => Err(FieldError::missing(path)),
            Some(Value::Null) => Ok(None),
            Some(value) => match pick(value) {
                Some(v) => Ok(Some(v)),
                None => Err(FieldError::type_mismatch(path, expected, value.type_name())),
            },
        }
    }

    /// Gets a string field value.
    pub fn get_string(&self, path: &str) -> Result<Option<&str>, FieldError> {
        self.typed(path, "string", |v| v.as_str())
    }

    /// Gets a boolean field value.
    pub fn get_bool(&self, path: &str) -> Result<Option<bool>, FieldError> {
        self.typed(path, "bool", |v| match v {
            Value::Bool(b) => Some(*b),
            _ => None,
        })
    }

    /// Gets an integer field value.
    pub fn get_int(&self, path: &str) -> Result<Option<i64>, FieldError> {
        self.typed(path, "int", |v| match v {
            Value::Int(n) => Some(*n),
            _ => None,
        })
    }

    /// Gets a float field value. Integers widen.
    pub fn get_float(&self, path: &str) -> Result<Option<f64>, FieldError> {
        self.typed(path, "float", Value::as_f64)
    }

    /// Gets a nested object.
    pub fn get_record(&self, path: &str) -> Result<Option<&Record>, FieldError> {
        self.typed(path, "object", |v| match v {
            Value::Object(r) => Some(r),
            _ => None,
        })
    }

    /// Gets a list value.
    pub fn get_list(&self, path: &str) -> Result<Option<&[Value]>, FieldError> {
        self.typed(path, "list", |v| match v {
            Value::List(items) => Some(items.as_slice()),
            _ => None,
        })
    }
}

impl FromIterator<(String, Value)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contract() -> Record {
        Record::new().set("id", "CON-1001").set(
            "contacto",
            Record::new()
                .set("nombre", "Ana Pérez")
                .set("email", "ana@example.com"),
        )
    }

    #[test]
    fn test_get_path_nested() {
        let record = contract();
        assert_eq!(
            record.get_path("contacto.nombre"),
            Some(&Value::from("Ana Pérez"))
        );
        assert_eq!(record.get_path("contacto.telefono"), None);
        assert_eq!(record.get_path("id.nombre"), None);
    }

    #[test]
    fn test_typed_getters() {
        let record = contract().set("firmado", Value::Null).set("valor", 10i64);
        assert_eq!(record.get_string("contacto.email").unwrap(), Some("ana@example.com"));
        assert_eq!(record.get_bool("firmado").unwrap(), None);
        assert_eq!(record.get_float("valor").unwrap(), Some(10.0));
        assert_eq!(
            record.get_int("id"),
            Err(FieldError::type_mismatch("id", "int", "string"))
        );
        assert_eq!(record.get_string("titulo"), Err(FieldError::missing("titulo")));
    }
}
