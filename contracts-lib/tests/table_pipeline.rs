//! End-to-end behaviour of the table pipeline over the contracts fixture.

use contracts_lib::model::Contract;
use contracts_lib::model::Record;
use contracts_lib::model::contract_columns;
use contracts_lib::model::contract_filters;
use contracts_lib::model::contract_pagination;
use contracts_lib::table::FilterState;
use contracts_lib::table::HeaderSelection;
use contracts_lib::table::PageItem;
use contracts_lib::table::PaginationConfig;
use contracts_lib::table::RowSelection;
use contracts_lib::table::SortOrder;
use contracts_lib::table::TableAction;
use contracts_lib::table::TableView;

const FIXTURE: &str = include_str!("fixtures/contracts.json");

fn records() -> Vec<Record> {
    let contracts: Vec<Contract> = serde_json::from_str(FIXTURE).unwrap();
    contracts.iter().map(Contract::to_record).collect()
}

fn ids(rows: &[&Record]) -> Vec<String> {
    rows.iter()
        .map(|r| r.get_string("id").unwrap().unwrap().to_string())
        .collect()
}

fn values(rows: &[&Record]) -> Vec<f64> {
    rows.iter()
        .map(|r| r.get_float("valor").unwrap().unwrap())
        .collect()
}

fn view() -> TableView<Record> {
    TableView::new(contract_columns())
        .with_data(records())
        .with_pagination(contract_pagination())
}

#[test]
fn numeric_sort_reverses_between_directions() {
    let first_three: Vec<Record> = records().into_iter().take(3).collect();
    let mut view = TableView::new(contract_columns()).with_data(first_three);

    view.handle_sort("valor");
    assert_eq!(values(&view.sorted_rows()), [8000.0, 10000.0, 15000.0]);

    view.handle_sort("valor");
    assert_eq!(values(&view.sorted_rows()), [15000.0, 10000.0, 8000.0]);
}

#[test]
fn third_activation_restores_filtered_order() {
    let mut view = view().with_filters(FilterState::new().with("estado", ["activo"]));
    let filtered = ids(&view.sorted_rows());
    assert_eq!(
        filtered,
        ["CON-2024-001", "CON-2024-006", "CON-2024-007", "CON-2024-012"]
    );

    for _ in 0..3 {
        view.handle_sort("titulo");
    }
    assert_eq!(ids(&view.sorted_rows()), filtered);
}

#[test]
fn status_filter_keeps_only_matching_rows() {
    let mut view = view();
    view.set_filters(contract_filters(Some("activo"), None));
    let rows = view.filtered_rows();
    assert_eq!(rows.len(), 4);
    assert!(
        rows.iter()
            .all(|r| r.get_string("estado").unwrap() == Some("activo"))
    );
    assert_eq!(view.total_pages(), 1);
}

#[test]
fn pages_of_five_over_twelve_rows() {
    let mut view = view();
    assert_eq!(view.page_size(), 5);
    assert_eq!(view.total_pages(), 3);

    view.handle_page_change(3, 5);
    assert_eq!(ids(&view.page_rows()), ["CON-2024-011", "CON-2024-012"]);
    assert_eq!(view.page_range().to_string(), "Mostrando 11-12 de 12 registros");

    view.set_page(4);
    assert!(view.page_rows().is_empty());
}

#[test]
fn pager_numbers_with_ellipses() {
    let data: Vec<Record> = (0..100).map(|i| Record::new().set("id", i)).collect();
    let mut view = TableView::new(contract_columns())
        .with_data(data)
        .with_pagination(PaginationConfig::new().with_page_size(10));
    view.set_page(5);
    let numbers: Vec<i64> = view
        .page_numbers()
        .into_iter()
        .map(PageItem::as_number)
        .collect();
    assert_eq!(numbers, [1, -1, 4, 5, 6, -1, 10]);
}

#[test]
fn select_all_only_touches_visible_page() {
    let mut view = view().with_row_selection(RowSelection::checkbox());
    view.handle_sort("valor");

    let change = view.toggle_all_selection().unwrap();
    assert_eq!(
        change.keys,
        ["CON-2024-006", "CON-2024-009", "CON-2024-003", "CON-2024-010", "CON-2024-001"]
    );
    assert_eq!(view.view().select_all, Some(HeaderSelection::All));

    view.handle_page_change(2, 5);
    assert_eq!(view.view().select_all, Some(HeaderSelection::None));
    view.toggle_all_selection();
    assert_eq!(view.selected_keys().len(), 10);

    view.toggle_all_selection();
    assert_eq!(view.selected_keys().len(), 5);
    assert!(view.selected_keys().iter().all(|k| k != "CON-2024-002"));
}

#[test]
fn sort_event_carries_sorted_snapshot() {
    let mut view = view();
    let event = view.handle_sort("fecha_fin").unwrap();
    assert_eq!(event.extra.action, TableAction::Sort);
    assert_eq!(event.sorter[0].order, SortOrder::Ascend);
    assert_eq!(event.extra.current_data_source.len(), 12);

    let json = serde_json::to_value(&event).unwrap();
    assert_eq!(json["pagination"]["pageSize"], 5);
    assert_eq!(json["sorter"][0]["field"], "fecha_fin");
    assert_eq!(json["filters"], serde_json::json!({}));
}

#[test]
fn page_event_carries_raw_data_and_requested_page() {
    let mut view = view().with_filters(FilterState::new().with("estado", ["activo"]));
    let event = view.handle_page_change(2, 10);
    assert_eq!(event.extra.action, TableAction::Paginate);
    assert_eq!(event.extra.current_data_source.len(), 12);

    let json = serde_json::to_value(&event).unwrap();
    assert_eq!(json["pagination"]["current"], 2);
    assert_eq!(json["pagination"]["pageSize"], 10);
    assert_eq!(json["filters"]["estado"], serde_json::json!(["activo"]));
    assert_eq!(json["extra"]["action"], "paginate");
}

#[test]
fn rendered_page_uses_column_renderers() {
    let view = view();
    let model = view.view();
    assert_eq!(model.headers[0].title, "# Numero");
    assert_eq!(
        model.rows[0].cells,
        [
            "CON-2024-001",
            "Servicio de Limpieza Oficinas",
            "Activo",
            "15/02/2024",
            "14/02/2025",
            "USD 10,000"
        ]
    );
    assert_eq!(model.rows[3].cells[5], "USD 25,000.5");
    assert_eq!(model.rows[2].cells[5], "EUR 8,000");
}
