//! Row selection and expansion tracking.

use std::fmt;
use std::sync::Arc;

/// Callback receiving the selected keys and the resolved rows.
pub type SelectionCallback<R> = Arc<dyn Fn(&[String], &[&R]) + Send + Sync>;
/// Predicate marking rows whose selection can't change.
pub type DisabledFn<R> = Arc<dyn Fn(&R) -> bool + Send + Sync>;
/// Callback receiving the new expanded flag and the toggled row.
pub type ExpandCallback<R> = Arc<dyn Fn(bool, &R) + Send + Sync>;

/// Set of row keys that remembers insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeySet {
    keys: Vec<String>,
}

impl KeySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.iter().any(|k| k == key)
    }

    /// Adds `key`; returns `false` if it was already present.
    pub fn insert(&mut self, key: impl Into<String>) -> bool {
        let key = key.into();
        if self.contains(&key) {
            return false;
        }
        self.keys.push(key);
        true
    }

    /// Removes `key`; returns `false` if it wasn't present.
    pub fn remove(&mut self, key: &str) -> bool {
        let before = self.keys.len();
        self.keys.retain(|k| k != key);
        self.keys.len() != before
    }

    /// Adds `key` if absent, removes it otherwise. Returns whether it is now present.
    pub fn toggle(&mut self, key: &str) -> bool {
        if self.remove(key) {
            false
        } else {
            self.keys.push(key.to_string());
            true
        }
    }

    /// Toggles a group of keys together.
    ///
    /// When every key of a non-empty group is present they are all removed;
    /// otherwise the missing ones are added. Keys outside the group are left
    /// alone. Returns whether the group is now present.
    pub fn toggle_group(&mut self, group: &[String]) -> bool {
        let all_present = !group.is_empty() && group.iter().all(|k| self.contains(k));
        if all_present {
            self.keys.retain(|k| !group.contains(k));
            false
        } else {
            for key in group {
                self.insert(key.as_str());
            }
            true
        }
    }

    /// Returns `true` if every key of a non-empty group is present.
    pub fn contains_all(&self, group: &[String]) -> bool {
        !group.is_empty() && group.iter().all(|k| self.contains(k))
    }

    /// Returns `true` if at least one key of the group is present.
    pub fn contains_any(&self, group: &[String]) -> bool {
        group.iter().any(|k| self.contains(k))
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.keys
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for KeySet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = KeySet::new();
        for key in iter {
            set.insert(key);
        }
        set
    }
}

/// Selection control shown in front of each row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionType {
    #[default]
    Checkbox,
    /// At most one row is selected at a time.
    Radio,
}

/// Row selection settings.
pub struct RowSelection<R> {
    pub kind: SelectionType,
    /// Keys selected when the view is built.
    pub selected_keys: Vec<String>,
    on_change: Option<SelectionCallback<R>>,
    is_disabled: Option<DisabledFn<R>>,
}

impl<R> RowSelection<R> {
    pub fn checkbox() -> Self {
        Self {
            kind: SelectionType::Checkbox,
            selected_keys: Vec::new(),
            on_change: None,
            is_disabled: None,
        }
    }

    pub fn radio() -> Self {
        Self {
            kind: SelectionType::Radio,
            ..Self::checkbox()
        }
    }

    pub fn with_selected_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    /// Registers a callback run after every selection change.
    pub fn on_change<F>(mut self, callback: F) -> Self
    where
        F: Fn(&[String], &[&R]) + Send + Sync + 'static,
    {
        self.on_change = Some(Arc::new(callback));
        self
    }

    /// Marks rows matching `predicate` as not selectable.
    pub fn disabled_when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&R) -> bool + Send + Sync + 'static,
    {
        self.is_disabled = Some(Arc::new(predicate));
        self
    }

    pub fn is_row_disabled(&self, row: &R) -> bool {
        self.is_disabled.as_ref().is_some_and(|f| f(row))
    }

    pub(crate) fn notify(&self, change: &SelectionChange<'_, R>) {
        if let Some(callback) = &self.on_change {
            callback(&change.keys, &change.rows);
        }
    }
}

impl<R> Default for RowSelection<R> {
    fn default() -> Self {
        Self::checkbox()
    }
}

impl<R> Clone for RowSelection<R> {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            selected_keys: self.selected_keys.clone(),
            on_change: self.on_change.clone(),
            is_disabled: self.is_disabled.clone(),
        }
    }
}

impl<R> fmt::Debug for RowSelection<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RowSelection")
            .field("kind", &self.kind)
            .field("selected_keys", &self.selected_keys)
            .field("on_change", &self.on_change.is_some())
            .field("is_disabled", &self.is_disabled.is_some())
            .finish()
    }
}

/// Row expansion settings.
pub struct Expandable<R> {
    /// Keys expanded when the view is built.
    pub expanded_keys: Vec<String>,
    on_expand: Option<ExpandCallback<R>>,
}

impl<R> Expandable<R> {
    pub fn new() -> Self {
        Self {
            expanded_keys: Vec::new(),
            on_expand: None,
        }
    }

    pub fn with_expanded_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.expanded_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    pub fn on_expand<F>(mut self, callback: F) -> Self
    where
        F: Fn(bool, &R) + Send + Sync + 'static,
    {
        self.on_expand = Some(Arc::new(callback));
        self
    }

    pub(crate) fn notify(&self, change: &ExpansionChange<'_, R>) {
        if let Some(callback) = &self.on_expand {
            callback(change.expanded, change.row);
        }
    }
}

impl<R> Default for Expandable<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> Clone for Expandable<R> {
    fn clone(&self) -> Self {
        Self {
            expanded_keys: self.expanded_keys.clone(),
            on_expand: self.on_expand.clone(),
        }
    }
}

impl<R> fmt::Debug for Expandable<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Expandable")
            .field("expanded_keys", &self.expanded_keys)
            .field("on_expand", &self.on_expand.is_some())
            .finish()
    }
}

/// Result of a selection mutation.
#[derive(Debug)]
pub struct SelectionChange<'a, R> {
    /// Every selected key, in selection order.
    pub keys: Vec<String>,
    /// Selected rows among those on the current page.
    pub rows: Vec<&'a R>,
}

/// Result of an expansion toggle.
#[derive(Debug)]
pub struct ExpansionChange<'a, R> {
    pub key: String,
    pub expanded: bool,
    pub row: &'a R,
}
