//! The table view: composes filter, sort and pagination over caller-owned
//! rows and tracks selection and expansion.

use log::debug;
use serde::Serialize;

use super::Align;
use super::Column;
use super::ExpansionChange;
use super::Expandable;
use super::FilterState;
use super::KeySet;
use super::PageItem;
use super::PageRange;
use super::Pagination;
use super::PaginationConfig;
use super::Row;
use super::RowKey;
use super::RowSelection;
use super::SelectionChange;
use super::SelectionType;
use super::SortOrder;
use super::SortState;
use super::Sorter;
use super::filter_rows;
use super::page_numbers;
use super::paginate;
use super::sort_rows;
use super::total_pages;

/// Interaction that produced a [`ChangeEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TableAction {
    Sort,
    Paginate,
}

/// Extra context of a [`ChangeEvent`].
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase", bound = "R: Serialize")]
pub struct ChangeExtra<'a, R> {
    pub action: TableAction,
    /// Rows the interaction was evaluated against.
    pub current_data_source: Vec<&'a R>,
}

/// Notification emitted on every sort or pagination interaction.
#[derive(Debug, Serialize)]
#[serde(bound = "R: Serialize")]
pub struct ChangeEvent<'a, R> {
    pub pagination: Pagination,
    pub filters: FilterState,
    pub sorter: Vec<Sorter>,
    pub extra: ChangeExtra<'a, R>,
}

/// Notification emitted when a row is clicked.
#[derive(Debug)]
pub struct RowClick<'a, R> {
    pub record: &'a R,
    /// Position of the row on the current page.
    pub index: usize,
}

/// Header cell of a rendered table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell {
    pub id: String,
    pub title: String,
    pub align: Align,
    pub width: Option<String>,
    pub sortable: bool,
    pub sort_order: Option<SortOrder>,
}

/// One row of a rendered page.
#[derive(Debug)]
pub struct ViewRow<'a, R> {
    /// Position on the current page.
    pub index: usize,
    pub key: String,
    pub record: &'a R,
    pub selected: bool,
    pub expanded: bool,
    pub disabled: bool,
    /// Rendered text of each visible column.
    pub cells: Vec<String>,
}

/// State of the pager below a rendered page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagerView {
    pub current: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub items: Vec<PageItem>,
    pub range: PageRange,
}

/// Tri-state of the "select all" control for the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderSelection {
    None,
    Some,
    All,
}

/// Everything a renderer needs to draw the current page.
#[derive(Debug)]
pub struct ViewModel<'a, R> {
    pub headers: Vec<HeaderCell>,
    pub rows: Vec<ViewRow<'a, R>>,
    /// `None` when row selection is off or radio.
    pub select_all: Option<HeaderSelection>,
    /// `None` when the pager is hidden.
    pub pager: Option<PagerView>,
}

/// Client-side table over rows owned by the view.
///
/// All derived collections (filtered, sorted, paged) are recomputed from the
/// raw rows and the current state on every call; nothing derived is cached.
/// In server-side mode the pipeline is bypassed and interactions only
/// produce change events for the caller to act on.
///
/// # Example
///
/// ```
/// use contracts_lib::model::Record;
/// use contracts_lib::table::{Column, PaginationConfig, TableView};
///
/// let rows: Vec<Record> = (1..=12).map(|i| Record::new().set("id", i)).collect();
/// let view = TableView::new(vec![Column::new("Id", "id").sortable()])
///     .with_data(rows)
///     .with_pagination(PaginationConfig::new().with_page_size(5));
/// assert_eq!(view.total_pages(), 3);
/// ```
#[derive(Debug)]
pub struct TableView<R> {
    data: Vec<R>,
    columns: Vec<Column<R>>,
    pagination: Pagination,
    server_side: bool,
    row_key: RowKey<R>,
    row_selection: Option<RowSelection<R>>,
    expandable: Option<Expandable<R>>,
    current_page: usize,
    page_size: usize,
    filters: FilterState,
    sort: SortState,
    selected: KeySet,
    expanded: KeySet,
}

impl<R: Row> TableView<R> {
    /// Creates an empty view with default pagination.
    ///
    /// The first column declaring a default sort order seeds the sort state.
    pub fn new(columns: Vec<Column<R>>) -> Self {
        let sort = columns
            .iter()
            .find_map(|c| c.default_sort_order.map(|order| SortState::by(c.id(), order)))
            .unwrap_or_default();
        let config = PaginationConfig::default();
        Self {
            data: Vec::new(),
            current_page: config.current,
            page_size: config.page_size,
            pagination: Pagination::Enabled(config),
            columns,
            server_side: false,
            row_key: RowKey::default(),
            row_selection: None,
            expandable: None,
            filters: FilterState::new(),
            sort,
            selected: KeySet::new(),
            expanded: KeySet::new(),
        }
    }

    pub fn with_data(mut self, data: Vec<R>) -> Self {
        self.data = data;
        self
    }

    pub fn with_pagination(mut self, config: PaginationConfig) -> Self {
        self.current_page = config.current.max(1);
        if config.page_size > 0 {
            self.page_size = config.page_size;
        }
        self.pagination = Pagination::Enabled(config);
        self
    }

    pub fn without_pagination(mut self) -> Self {
        self.pagination = Pagination::Disabled;
        self
    }

    /// Marks the data source as paged, filtered and sorted by the caller.
    pub fn server_side(mut self) -> Self {
        self.server_side = true;
        self
    }

    pub fn with_row_key(mut self, row_key: RowKey<R>) -> Self {
        self.row_key = row_key;
        self
    }

    pub fn with_row_selection(mut self, selection: RowSelection<R>) -> Self {
        self.selected = selection.selected_keys.iter().map(String::as_str).collect();
        if selection.kind == SelectionType::Radio && self.selected.len() > 1 {
            let first = self.selected.as_slice()[0].clone();
            self.selected = KeySet::from_iter([first]);
        }
        self.row_selection = Some(selection);
        self
    }

    pub fn with_expandable(mut self, expandable: Expandable<R>) -> Self {
        self.expanded = expandable.expanded_keys.iter().map(String::as_str).collect();
        self.expandable = Some(expandable);
        self
    }

    pub fn with_filters(mut self, filters: FilterState) -> Self {
        self.filters = filters;
        self
    }

    pub fn data(&self) -> &[R] {
        &self.data
    }

    pub fn columns(&self) -> &[Column<R>] {
        &self.columns
    }

    /// Columns that are shown, in declaration order.
    pub fn visible_columns(&self) -> impl Iterator<Item = &Column<R>> {
        self.columns.iter().filter(|c| c.visible)
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    pub fn is_server_side(&self) -> bool {
        self.server_side
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn sort(&self) -> &SortState {
        &self.sort
    }

    pub fn selected_keys(&self) -> &[String] {
        self.selected.as_slice()
    }

    pub fn expanded_keys(&self) -> &[String] {
        self.expanded.as_slice()
    }

    /// Replaces the rows. Selection and expansion are kept.
    pub fn set_data(&mut self, data: Vec<R>) {
        debug!("Table data replaced with {} rows", data.len());
        self.data = data;
    }

    pub fn set_filter<I, V>(&mut self, field: impl Into<String>, values: I)
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.filters.set(field, values);
    }

    pub fn set_filters(&mut self, filters: FilterState) {
        self.filters = filters;
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
    }

    /// Moves to `page` without emitting a change event.
    pub fn set_page(&mut self, page: usize) {
        self.current_page = page.max(1);
        self.sync_pagination();
    }

    /// Writes the current page and size back into the pager config.
    fn sync_pagination(&mut self) {
        if let Pagination::Enabled(config) = &mut self.pagination {
            config.current = self.current_page;
            config.page_size = self.page_size;
        }
    }

    /// Sets the total row count of an externally paged data source.
    pub fn set_total_rows(&mut self, total_rows: usize) {
        if let Pagination::Enabled(config) = &mut self.pagination {
            config.total_rows = total_rows;
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    pub fn clear_expansion(&mut self) {
        self.expanded.clear();
    }

    /// Rows that pass the filters, in data order.
    pub fn filtered_rows(&self) -> Vec<&R> {
        if self.server_side {
            return self.data.iter().collect();
        }
        filter_rows(&self.data, &self.filters)
    }

    /// Filtered rows in sort order.
    pub fn sorted_rows(&self) -> Vec<&R> {
        let rows = self.filtered_rows();
        if self.server_side {
            return rows;
        }
        sort_rows(rows, &self.sort, &self.columns)
    }

    /// Rows on the current page.
    pub fn page_rows(&self) -> Vec<&R> {
        let rows = self.sorted_rows();
        if self.server_side || !self.pagination.is_enabled() {
            return rows;
        }
        paginate(rows, self.current_page, self.page_size)
    }

    /// Total row count: the external total when one is set, else the number
    /// of filtered rows.
    pub fn total(&self) -> usize {
        match self.pagination.config() {
            Some(config) if config.total_rows > 0 => config.total_rows,
            _ => self.filtered_rows().len(),
        }
    }

    pub fn total_pages(&self) -> usize {
        if !self.pagination.is_enabled() {
            return 1;
        }
        total_pages(self.total(), self.page_size)
    }

    pub fn page_numbers(&self) -> Vec<PageItem> {
        page_numbers(self.total_pages(), self.current_page)
    }

    pub fn page_range(&self) -> PageRange {
        PageRange::new(self.current_page, self.page_size, self.total())
    }

    /// Returns `true` if the pager should be drawn.
    pub fn show_pager(&self) -> bool {
        match self.pagination.config() {
            None => false,
            Some(config) => !(config.hide_on_single_page && self.total_pages() <= 1),
        }
    }

    /// Key of `row` shown at `index` on the current page.
    pub fn row_key(&self, row: &R, index: usize) -> String {
        self.row_key.key_for(row, index)
    }

    fn page_keys(&self) -> Vec<String> {
        self.page_rows()
            .into_iter()
            .enumerate()
            .map(|(i, row)| self.row_key(row, i))
            .collect()
    }

    fn is_disabled(&self, row: &R) -> bool {
        self.row_selection
            .as_ref()
            .is_some_and(|s| s.is_row_disabled(row))
    }

    /// Builds the rendered page.
    pub fn view(&self) -> ViewModel<'_, R> {
        let visible: Vec<&Column<R>> = self.visible_columns().collect();
        let headers = visible
            .iter()
            .map(|c| HeaderCell {
                id: c.id().to_string(),
                title: c.title.clone(),
                align: c.align,
                width: c.width.clone(),
                sortable: c.is_sortable(),
                sort_order: self.sort.order_for(c.id()),
            })
            .collect();

        let rows: Vec<ViewRow<'_, R>> = self
            .page_rows()
            .into_iter()
            .enumerate()
            .map(|(index, record)| {
                let key = self.row_key(record, index);
                ViewRow {
                    index,
                    selected: self.selected.contains(&key),
                    expanded: self.expanded.contains(&key),
                    disabled: self.is_disabled(record),
                    cells: visible.iter().map(|c| c.render_cell(record, index)).collect(),
                    key,
                    record,
                }
            })
            .collect();

        let select_all = match &self.row_selection {
            Some(s) if s.kind == SelectionType::Checkbox => {
                let keys: Vec<String> = rows.iter().map(|r| r.key.clone()).collect();
                Some(if self.selected.contains_all(&keys) {
                    HeaderSelection::All
                } else if self.selected.contains_any(&keys) {
                    HeaderSelection::Some
                } else {
                    HeaderSelection::None
                })
            }
            _ => None,
        };

        let pager = self.show_pager().then(|| PagerView {
            current: self.current_page,
            page_size: self.page_size,
            total_pages: self.total_pages(),
            items: self.page_numbers(),
            range: self.page_range(),
        });

        ViewModel {
            headers,
            rows,
            select_all,
            pager,
        }
    }

    /// Cycles the sort of a column and returns the resulting change event.
    ///
    /// Returns `None` if no sortable column has this id.
    pub fn handle_sort(&mut self, column_id: &str) -> Option<ChangeEvent<'_, R>> {
        if !self
            .columns
            .iter()
            .any(|c| c.id() == column_id && c.is_sortable())
        {
            debug!("Ignoring sort on unknown or unsortable column '{}'", column_id);
            return None;
        }
        self.sort.cycle(column_id);

        let this = &*self;
        Some(ChangeEvent {
            pagination: this.pagination.clone(),
            filters: this.filters.clone(),
            sorter: this.sort.sorters().to_vec(),
            extra: ChangeExtra {
                action: TableAction::Sort,
                current_data_source: this.sorted_rows(),
            },
        })
    }

    /// Requests `page` with `page_size` rows per page.
    ///
    /// In server-side mode the view's own page state is left for the caller
    /// to update once it supplies the new rows.
    pub fn handle_page_change(&mut self, page: usize, page_size: usize) -> ChangeEvent<'_, R> {
        debug!("Page change requested: page {} size {}", page, page_size);
        if !self.server_side {
            self.current_page = page.max(1);
            if page_size > 0 {
                self.page_size = page_size;
            }
            self.sync_pagination();
        }

        let pagination = match &self.pagination {
            Pagination::Disabled => Pagination::Disabled,
            Pagination::Enabled(config) => Pagination::Enabled(PaginationConfig {
                current: page,
                page_size,
                ..config.clone()
            }),
        };

        let this = &*self;
        ChangeEvent {
            pagination,
            filters: this.filters.clone(),
            sorter: this.sort.sorters().to_vec(),
            extra: ChangeExtra {
                action: TableAction::Paginate,
                current_data_source: this.data.iter().collect(),
            },
        }
    }

    /// Returns the click notification for the row at `index` on the page.
    pub fn handle_row_click(&self, index: usize) -> Option<RowClick<'_, R>> {
        let record = self.page_rows().get(index).copied()?;
        Some(RowClick { record, index })
    }

    fn selection_change(&self) -> SelectionChange<'_, R> {
        let rows = self
            .page_rows()
            .into_iter()
            .enumerate()
            .filter(|(i, row)| self.selected.contains(&self.row_key(row, *i)))
            .map(|(_, row)| row)
            .collect();
        SelectionChange {
            keys: self.selected.as_slice().to_vec(),
            rows,
        }
    }

    /// Toggles the selection of the row at `index` on the current page.
    ///
    /// Returns `None` when selection is off, the index is off the page, or
    /// the row is disabled.
    pub fn toggle_row_selection(&mut self, index: usize) -> Option<SelectionChange<'_, R>> {
        let selection = self.row_selection.as_ref()?;
        let kind = selection.kind;
        let row = self.page_rows().get(index).copied()?;
        if self.is_disabled(row) {
            debug!("Row {} is disabled; selection unchanged", index);
            return None;
        }
        let key = self.row_key(row, index);

        match kind {
            SelectionType::Checkbox => {
                self.selected.toggle(&key);
            }
            SelectionType::Radio => {
                if self.selected.contains(&key) {
                    self.selected.clear();
                } else {
                    self.selected = KeySet::from_iter([key]);
                }
            }
        }

        let this = &*self;
        let change = this.selection_change();
        if let Some(selection) = &this.row_selection {
            selection.notify(&change);
        }
        Some(change)
    }

    /// Toggles the selection of every enabled row on the current page.
    ///
    /// Keys of rows on other pages are left untouched. Returns `None` when
    /// checkbox selection is off.
    pub fn toggle_all_selection(&mut self) -> Option<SelectionChange<'_, R>> {
        let selection = self.row_selection.as_ref()?;
        if selection.kind == SelectionType::Radio {
            return None;
        }
        let page_keys: Vec<String> = self
            .page_rows()
            .into_iter()
            .enumerate()
            .filter(|(_, row)| !self.is_disabled(row))
            .map(|(i, row)| self.row_key(row, i))
            .collect();
        let selected = self.selected.toggle_group(&page_keys);
        debug!(
            "{} {} rows on page {}",
            if selected { "Selected" } else { "Deselected" },
            page_keys.len(),
            self.current_page
        );

        let this = &*self;
        let change = this.selection_change();
        if let Some(selection) = &this.row_selection {
            selection.notify(&change);
        }
        Some(change)
    }

    /// Toggles the expansion of the row at `index` on the current page.
    pub fn toggle_row_expansion(&mut self, index: usize) -> Option<ExpansionChange<'_, R>> {
        if self.expandable.is_none() {
            return None;
        }
        let row = self.page_rows().get(index).copied()?;
        let key = self.row_key(row, index);
        let expanded = self.expanded.toggle(&key);

        let this = &*self;
        let row = this.page_rows().get(index).copied()?;
        let change = ExpansionChange { key, expanded, row };
        if let Some(expandable) = &this.expandable {
            expandable.notify(&change);
        }
        Some(change)
    }

    /// Returns `true` if every enabled row on the page is selected.
    pub fn is_page_selected(&self) -> bool {
        let keys: Vec<String> = self
            .page_rows()
            .into_iter()
            .enumerate()
            .filter(|(_, row)| !self.is_disabled(row))
            .map(|(i, row)| self.row_key(row, i))
            .collect();
        self.selected.contains_all(&keys)
    }

    /// Keys of all rows on the current page.
    pub fn current_page_keys(&self) -> Vec<String> {
        self.page_keys()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::Mutex;

    use super::*;
    use crate::model::Record;

    fn record(id: i64, estado: &str, valor: i64) -> Record {
        Record::new()
            .set("id", id)
            .set("estado", estado)
            .set("valor", valor)
    }

    fn columns() -> Vec<Column<Record>> {
        vec![
            Column::new("Id", "id").sortable(),
            Column::new("Estado", "estado").sortable(),
            Column::new("Valor", "valor").sortable(),
        ]
    }

    fn twelve() -> Vec<Record> {
        (1..=12)
            .map(|i| record(i, if i % 2 == 0 { "activo" } else { "borrador" }, i * 100))
            .collect()
    }

    fn ids(rows: &[&Record]) -> Vec<i64> {
        rows.iter().map(|r| r.get_int("id").unwrap().unwrap()).collect()
    }

    fn paged_view() -> TableView<Record> {
        TableView::new(columns())
            .with_data(twelve())
            .with_pagination(PaginationConfig::new().with_page_size(5))
    }

    #[test]
    fn test_page_windows() {
        let mut view = paged_view();
        assert_eq!(view.total_pages(), 3);
        view.set_page(3);
        assert_eq!(ids(&view.page_rows()), [11, 12]);
        view.set_page(4);
        assert!(view.page_rows().is_empty());
    }

    #[test]
    fn test_filter_then_sort_then_page() {
        let mut view = paged_view().with_filters(FilterState::new().with("estado", ["activo"]));
        view.handle_sort("valor");
        view.handle_sort("valor");
        assert_eq!(view.total(), 6);
        assert_eq!(ids(&view.page_rows()), [12, 10, 8, 6, 4]);
    }

    #[test]
    fn test_sort_cycle_restores_order() {
        let mut view = TableView::new(columns()).with_data(vec![
            record(1, "a", 10000),
            record(2, "b", 15000),
            record(3, "c", 8000),
        ]);
        let before = ids(&view.sorted_rows());
        for _ in 0..3 {
            view.handle_sort("valor");
        }
        assert!(view.sort().is_empty());
        assert_eq!(ids(&view.sorted_rows()), before);
    }

    #[test]
    fn test_sort_event() {
        let mut view = TableView::new(columns()).with_data(vec![
            record(1, "a", 10000),
            record(2, "b", 15000),
            record(3, "c", 8000),
        ]);
        let event = view.handle_sort("valor").unwrap();
        assert_eq!(event.extra.action, TableAction::Sort);
        assert_eq!(event.sorter, [Sorter { field: "valor".into(), order: SortOrder::Ascend }]);
        assert_eq!(ids(&event.extra.current_data_source), [3, 1, 2]);

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["extra"]["action"], "sort");
        assert_eq!(json["sorter"][0]["order"], "ascend");
        assert_eq!(json["extra"]["currentDataSource"][0]["id"], 3);
    }

    #[test]
    fn test_unsortable_column_emits_nothing() {
        let mut view: TableView<Record> =
            TableView::new(vec![Column::new("Estado", "estado")]).with_data(twelve());
        assert!(view.handle_sort("estado").is_none());
        assert!(view.handle_sort("missing").is_none());
    }

    #[test]
    fn test_default_sort_seeds_state() {
        let view = TableView::new(vec![
            Column::new("Id", "id").sortable(),
            Column::new("Valor", "valor").sortable().default_sort(SortOrder::Descend),
        ])
        .with_data(twelve());
        assert_eq!(view.sort().order_for("valor"), Some(SortOrder::Descend));
        assert_eq!(ids(&view.sorted_rows())[0], 12);
    }

    #[test]
    fn test_page_change_event() {
        let mut view = paged_view();
        let event = view.handle_page_change(2, 5);
        assert_eq!(event.extra.action, TableAction::Paginate);
        assert_eq!(event.extra.current_data_source.len(), 12);
        assert_eq!(event.pagination.config().unwrap().current, 2);
        assert_eq!(view.current_page(), 2);
        assert_eq!(ids(&view.page_rows()), [6, 7, 8, 9, 10]);
    }

    #[test]
    fn test_sort_event_reports_current_page() {
        let rows: Vec<Record> = (1..=30).map(|i| record(i, "activo", i)).collect();
        let mut view = TableView::new(columns())
            .with_data(rows)
            .with_pagination(PaginationConfig::new().with_page_size(5));
        view.handle_page_change(3, 10);
        let config = view.pagination().config().unwrap();
        assert_eq!((config.current, config.page_size), (3, 10));

        let event = view.handle_sort("id").unwrap();
        let config = event.pagination.config().unwrap();
        assert_eq!((config.current, config.page_size), (3, 10));
        let json = serde_json::to_value(&event.pagination).unwrap();
        assert_eq!(json["current"], 3);
        assert_eq!(json["pageSize"], 10);
    }

    #[test]
    fn test_set_page_updates_pager_config() {
        let mut view = paged_view();
        view.set_page(2);
        assert_eq!(view.pagination().config().unwrap().current, 2);
    }

    #[test]
    fn test_server_side_bypasses_pipeline() {
        let mut view = paged_view()
            .server_side()
            .with_filters(FilterState::new().with("estado", ["activo"]));
        view.set_total_rows(40);
        assert_eq!(view.page_rows().len(), 12);
        assert_eq!(view.total_pages(), 8);

        let event = view.handle_page_change(3, 5);
        assert_eq!(event.pagination.config().unwrap().current, 3);
        assert_eq!(view.current_page(), 1);
    }

    #[test]
    fn test_disabled_pagination() {
        let view = paged_view().without_pagination();
        assert_eq!(view.page_rows().len(), 12);
        assert_eq!(view.total_pages(), 1);
        assert!(!view.show_pager());
        let mut view = view;
        let event = view.handle_page_change(2, 5);
        assert_eq!(serde_json::to_value(&event.pagination).unwrap(), serde_json::json!(false));
    }

    #[test]
    fn test_hide_on_single_page() {
        let view = TableView::new(columns())
            .with_data(vec![record(1, "a", 1)])
            .with_pagination(PaginationConfig::new().hide_on_single_page());
        assert!(!view.show_pager());
        assert!(view.view().pager.is_none());
    }

    #[test]
    fn test_select_all_is_page_scoped() {
        let mut view = paged_view().with_row_selection(RowSelection::checkbox());
        let change = view.toggle_all_selection().unwrap();
        assert_eq!(change.keys, ["1", "2", "3", "4", "5"]);
        assert_eq!(change.rows.len(), 5);

        view.set_page(2);
        view.toggle_all_selection();
        assert_eq!(view.selected_keys().len(), 10);

        view.toggle_all_selection();
        assert_eq!(view.selected_keys(), ["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn test_select_all_skips_disabled() {
        let mut view = paged_view().with_row_selection(
            RowSelection::checkbox()
                .disabled_when(|r: &Record| r.get_int("id").ok().flatten() == Some(2)),
        );
        view.toggle_all_selection();
        assert_eq!(view.selected_keys(), ["1", "3", "4", "5"]);
        assert!(view.is_page_selected());
        assert!(view.toggle_row_selection(1).is_none());
        assert_eq!(view.view().select_all, Some(HeaderSelection::Some));
    }

    #[test]
    fn test_selection_survives_sort_and_filter() {
        let mut view = paged_view().with_row_selection(RowSelection::checkbox());
        view.toggle_row_selection(0);
        view.handle_sort("valor");
        view.handle_sort("valor");
        view.set_filter("estado", ["activo"]);
        assert_eq!(view.selected_keys(), ["1"]);
        view.set_data(twelve());
        assert_eq!(view.selected_keys(), ["1"]);
    }

    #[test]
    fn test_radio_keeps_one_key() {
        let mut view = paged_view().with_row_selection(RowSelection::radio());
        view.toggle_row_selection(0);
        view.toggle_row_selection(2);
        assert_eq!(view.selected_keys(), ["3"]);
        assert!(view.toggle_all_selection().is_none());
        view.toggle_row_selection(2);
        assert!(view.selected_keys().is_empty());
    }

    #[test]
    fn test_on_change_callback() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let mut view = paged_view().with_row_selection(
            RowSelection::checkbox()
                .on_change(move |keys: &[String], rows: &[&Record]| {
                    sink.lock().unwrap().push((keys.to_vec(), rows.len()));
                }),
        );
        view.toggle_row_selection(1);
        view.toggle_row_selection(1);
        let seen = seen.lock().unwrap();
        assert_eq!(seen[0], (vec!["2".to_string()], 1));
        assert_eq!(seen[1], (Vec::<String>::new(), 0));
    }

    #[test]
    fn test_expansion() {
        let expanded = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&expanded);
        let mut view = paged_view().with_expandable(
            Expandable::new().on_expand(move |open, row: &Record| {
                sink.lock().unwrap().push((open, row.get_int("id").unwrap().unwrap()));
            }),
        );
        let change = view.toggle_row_expansion(0).unwrap();
        assert!(change.expanded);
        assert_eq!(change.key, "1");
        view.toggle_row_expansion(0);
        assert!(view.expanded_keys().is_empty());
        assert_eq!(*expanded.lock().unwrap(), [(true, 1), (false, 1)]);
    }

    #[test]
    fn test_expansion_needs_config() {
        let mut view = paged_view();
        assert!(view.toggle_row_expansion(0).is_none());
        assert!(view.toggle_row_selection(0).is_none());
    }

    #[test]
    fn test_missing_key_falls_back_to_index() {
        let view = TableView::new(vec![Column::new("Estado", "estado")])
            .with_data(vec![Record::new().set("estado", "activo"), Record::new()]);
        let model = view.view();
        assert_eq!(model.rows[0].key, "0");
        assert_eq!(model.rows[1].key, "1");
        assert_eq!(model.rows[1].cells, [""]);
    }

    #[test]
    fn test_view_model() {
        let mut view = paged_view()
            .with_row_selection(RowSelection::checkbox().with_selected_keys(["2"]));
        view.handle_sort("id");
        let model = view.view();
        assert_eq!(model.headers.len(), 3);
        assert_eq!(model.headers[0].sort_order, Some(SortOrder::Ascend));
        assert_eq!(model.rows[0].cells, ["1", "borrador", "100"]);
        assert!(model.rows[1].selected);
        assert_eq!(model.select_all, Some(HeaderSelection::Some));
        let pager = model.pager.unwrap();
        assert_eq!(pager.total_pages, 3);
        assert_eq!(pager.range.to_string(), "Mostrando 1-5 de 12 registros");
    }

    #[test]
    fn test_hidden_columns_not_rendered() {
        let view = TableView::new(vec![
            Column::new("Id", "id"),
            Column::new("Valor", "valor").hidden(),
        ])
        .with_data(twelve());
        assert_eq!(view.visible_columns().count(), 1);
        assert_eq!(view.view().rows[0].cells.len(), 1);
    }

    #[test]
    fn test_row_click() {
        let mut view = paged_view();
        view.set_page(2);
        let click = view.handle_row_click(1).unwrap();
        assert_eq!(click.index, 1);
        assert_eq!(click.record.get_int("id").unwrap(), Some(7));
        assert!(view.handle_row_click(9).is_none());
    }
}
