//! Column descriptors

use std::fmt;
use std::sync::Arc;

use super::Row;
use super::SortOrder;
use crate::model::Value;

/// Custom comparator: returns a negative, zero, or positive number.
///
/// It receives the requested direction as a hint and is trusted as is; the
/// pipeline does not invert its result for descending order.
pub type Comparator<R> = Arc<dyn Fn(&R, &R, SortOrder) -> i32 + Send + Sync>;

/// Custom cell renderer: (value, row, position on page) to display text.
pub type CellRenderer<R> = Arc<dyn Fn(&Value, &R, usize) -> String + Send + Sync>;

/// How a column sorts, if at all.
pub enum ColumnSorter<R> {
    /// The column can't be sorted.
    None,
    /// Default comparison on the raw field values.
    Default,
    /// Delegates to a custom comparator.
    Custom(Comparator<R>),
}

impl<R> Clone for ColumnSorter<R> {
    fn clone(&self) -> Self {
        match self {
            ColumnSorter::None => ColumnSorter::None,
            ColumnSorter::Default => ColumnSorter::Default,
            ColumnSorter::Custom(f) => ColumnSorter::Custom(Arc::clone(f)),
        }
    }
}

impl<R> fmt::Debug for ColumnSorter<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnSorter::None => f.write_str("None"),
            ColumnSorter::Default => f.write_str("Default"),
            ColumnSorter::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Horizontal alignment of a column's cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// Side a column is pinned to while scrolling horizontally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fixed {
    Left,
    Right,
}

/// Declares one column of a table.
///
/// # Example
///
/// ```
/// use contracts_lib::model::Record;
/// use contracts_lib::table::Column;
///
/// let columns: Vec<Column<Record>> = vec![
///     Column::new("# Numero", "id").sortable().width("200px"),
///     Column::new("Contacto", "contacto.nombre"),
/// ];
/// assert!(columns[0].is_sortable());
/// ```
pub struct Column<R> {
    /// Header text.
    pub title: String,
    /// Dot-separated path of the field shown in this column.
    pub data_index: Option<String>,
    /// Explicit column identifier; defaults to the data index.
    pub key: Option<String>,
    /// Fixed width (CSS-like, e.g. `200px`).
    pub width: Option<String>,
    pub align: Align,
    pub fixed: Option<Fixed>,
    /// Truncate long cell text.
    pub ellipsis: bool,
    pub visible: bool,
    pub sorter: ColumnSorter<R>,
    /// Sort applied when the view is first built.
    pub default_sort_order: Option<SortOrder>,
    pub render: Option<CellRenderer<R>>,
}

impl<R: Row> Column<R> {
    /// Creates a visible, unsortable column over `data_index`.
    pub fn new(title: impl Into<String>, data_index: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            data_index: Some(data_index.into()),
            key: None,
            width: None,
            align: Align::default(),
            fixed: None,
            ellipsis: false,
            visible: true,
            sorter: ColumnSorter::None,
            default_sort_order: None,
            render: None,
        }
    }

    /// Creates a column with no backing field, e.g. an actions column.
    pub fn computed(key: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            data_index: None,
            key: Some(key.into()),
            ..Self::new(title, "")
        }
    }

    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn width(mut self, width: impl Into<String>) -> Self {
        self.width = Some(width.into());
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn fixed(mut self, side: Fixed) -> Self {
        self.fixed = Some(side);
        self
    }

    pub fn ellipsis(mut self) -> Self {
        self.ellipsis = true;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Sorts with the default comparison on the raw values.
    pub fn sortable(mut self) -> Self {
        self.sorter = ColumnSorter::Default;
        self
    }

    /// Sorts with a custom comparator.
    pub fn sort_with<F>(mut self, compare: F) -> Self
    where
        F: Fn(&R, &R, SortOrder) -> i32 + Send + Sync + 'static,
    {
        self.sorter = ColumnSorter::Custom(Arc::new(compare));
        self
    }

    pub fn default_sort(mut self, order: SortOrder) -> Self {
        self.default_sort_order = Some(order);
        self
    }

    pub fn render_with<F>(mut self, render: F) -> Self
    where
        F: Fn(&Value, &R, usize) -> String + Send + Sync + 'static,
    {
        self.render = Some(Arc::new(render));
        self
    }

    /// Returns the column identifier: the key, else the data index, else the title.
    pub fn id(&self) -> &str {
        self.key
            .as_deref()
            .or(self.data_index.as_deref())
            .unwrap_or(&self.title)
    }

    pub fn is_sortable(&self) -> bool {
        !matches!(self.sorter, ColumnSorter::None)
    }

    /// Returns the raw value this column shows for `row`.
    pub fn value<'a>(&self, row: &'a R) -> Option<&'a Value> {
        let path = self.data_index.as_deref()?;
        if path.is_empty() {
            return None;
        }
        row.value_at(path)
    }

    /// Renders the cell text for `row` shown at `index`.
    ///
    /// Without a renderer the value's text is shown; a missing value renders
    /// as the empty string.
    pub fn render_cell(&self, row: &R, index: usize) -> String {
        let null = Value::Null;
        let value = self.value(row).unwrap_or(&null);
        match &self.render {
            Some(render) => render(value, row, index),
            None => value.to_text(),
        }
    }
}

impl<R> Clone for Column<R> {
    fn clone(&self) -> Self {
        Self {
            title: self.title.clone(),
            data_index: self.data_index.clone(),
            key: self.key.clone(),
            width: self.width.clone(),
            align: self.align,
            fixed: self.fixed,
            ellipsis: self.ellipsis,
            visible: self.visible,
            sorter: self.sorter.clone(),
            default_sort_order: self.default_sort_order,
            render: self.render.clone(),
        }
    }
}

impl<R> fmt::Debug for Column<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("title", &self.title)
            .field("data_index", &self.data_index)
            .field("key", &self.key)
            .field("visible", &self.visible)
            .field("sorter", &self.sorter)
            .field("default_sort_order", &self.default_sort_order)
            .field("render", &self.render.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Record;

    #[test]
    fn test_render_defaults() {
        let column = Column::<Record>::new("Titulo", "titulo");
        assert_eq!(column.render_cell(&Record::new().set("titulo", "Obra"), 0), "Obra");
        assert_eq!(column.render_cell(&Record::new(), 0), "");
    }

    #[test]
    fn test_custom_render_sees_row_and_index() {
        let column = Column::<Record>::new("Valor", "valor").render_with(|value, row, index| {
            format!(
                "{} {} @{}",
                row.get_string("moneda").ok().flatten().unwrap_or(""),
                value.to_text(),
                index
            )
        });
        let row = Record::new().set("valor", 500i64).set("moneda", "USD");
        assert_eq!(column.render_cell(&row, 4), "USD 500 @4");
    }

    #[test]
    fn test_id_prefers_key() {
        let column = Column::<Record>::new("Estado", "estado");
        assert_eq!(column.id(), "estado");
        assert_eq!(column.clone().key("status").id(), "status");
        assert_eq!(Column::<Record>::computed("acciones", "Acciones").id(), "acciones");
    }
}
