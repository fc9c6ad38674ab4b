//! Table layout of the contracts list.

use super::ContractStatus;
use super::Record;
use super::format;
use crate::table::Align;
use crate::table::Column;
use crate::table::FilterState;
use crate::table::PaginationConfig;

/// Columns of the contracts list: number, title, status, start date, end
/// date and value, all sortable.
pub fn contract_columns() -> Vec<Column<Record>> {
    vec![
        Column::new("# Numero", "id").sortable().width("200px"),
        Column::new("Título", "titulo").sortable(),
        Column::new("Estado", "estado")
            .sortable()
            .render_with(|value, _, _| {
                let text = value.to_text();
                ContractStatus::parse(&text)
                    .map(|status| status.badge().to_string())
                    .unwrap_or(text)
            }),
        Column::new("Fecha Inicio", "fecha_inicio")
            .sortable()
            .render_with(|value, _, _| format::short_date(&value.to_text())),
        Column::new("Fecha Fin", "fecha_fin")
            .sortable()
            .render_with(|value, _, _| format::short_date(&value.to_text())),
        Column::new("Valor", "valor")
            .sortable()
            .align(Align::Left)
            .render_with(|value, record: &Record, _| {
                let currency = record.get_string("moneda").ok().flatten().unwrap_or_default();
                match value.as_f64() {
                    Some(amount) => format::list_amount(currency, amount),
                    None => value.to_text(),
                }
            }),
    ]
}

/// Pager settings of the contracts list.
pub fn contract_pagination() -> PaginationConfig {
    PaginationConfig::new()
        .with_page_size(5)
        .with_page_size_options(vec![5, 10, 20, 50])
        .with_size_changer()
}

/// Filter state for the list's status select and end-date input.
///
/// Empty inputs impose no constraint.
pub fn contract_filters(status: Option<&str>, end_date: Option<&str>) -> FilterState {
    FilterState::from_inputs([
        ("estado", status.unwrap_or_default()),
        ("fecha_fin", end_date.unwrap_or_default()),
    ])
}
