//! Terminal rendering of the contracts list and detail view.

use comfy_table::Attribute;
use comfy_table::Cell;
use comfy_table::CellAlignment;
use comfy_table::ContentArrangement;
use comfy_table::Table;
use contracts_lib::model::Contract;
use contracts_lib::model::ContractDetail;
use contracts_lib::model::ContractStats;
use contracts_lib::model::ContractStatus;
use contracts_lib::model::DetailTab;
use contracts_lib::model::Record;
use contracts_lib::model::format;
use contracts_lib::table::Align;
use contracts_lib::table::HeaderCell;
use contracts_lib::table::PageItem;
use contracts_lib::table::PagerView;
use contracts_lib::table::SortOrder;
use contracts_lib::table::TableView;

const EMPTY_LIST: &str = "No se encontraron contratos";

fn new_table() -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn alignment(align: Align) -> CellAlignment {
    match align {
        Align::Left => CellAlignment::Left,
        Align::Center => CellAlignment::Center,
        Align::Right => CellAlignment::Right,
    }
}

fn header(cell: &HeaderCell) -> Cell {
    let title = match cell.sort_order {
        Some(SortOrder::Ascend) => format!("{} ▲", cell.title),
        Some(SortOrder::Descend) => format!("{} ▼", cell.title),
        None => cell.title.clone(),
    };
    Cell::new(title)
        .add_attribute(Attribute::Bold)
        .set_alignment(alignment(cell.align))
}

/// Page list with the current page in brackets: `1 ... [4] 5 ... 10`.
pub fn pager_line(pager: &PagerView) -> String {
    pager
        .items
        .iter()
        .map(|item| match item {
            PageItem::Page(n) if *n == pager.current => format!("[{}]", n),
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Renders the current page of the list, then the pager and range summary.
pub fn contract_list(view: &TableView<Record>) -> String {
    let model = view.view();
    if model.rows.is_empty() {
        return EMPTY_LIST.to_string();
    }

    let mut table = new_table();
    table.set_header(model.headers.iter().map(header));
    for row in &model.rows {
        table.add_row(
            row.cells
                .iter()
                .zip(&model.headers)
                .map(|(text, h)| Cell::new(text).set_alignment(alignment(h.align))),
        );
    }

    let mut out = table.to_string();
    if let Some(pager) = &model.pager {
        out.push('\n');
        out.push_str(&pager_line(pager));
        out.push('\n');
        out.push_str(&pager.range.to_string());
    }
    out
}

fn status_label(status: &str) -> String {
    ContractStatus::parse(status)
        .map(|s| s.label().to_string())
        .unwrap_or_else(|| status.to_string())
}

fn details(contract: &Contract) -> String {
    let mut summary = new_table();
    summary.add_row(vec!["Título", contract.title.as_str()]);
    summary.add_row(vec!["Estado".to_string(), contract.status.label().to_string()]);
    summary.add_row(vec![
        "Fecha de Inicio".to_string(),
        format::long_date(Some(&contract.starts_on)),
    ]);
    summary.add_row(vec![
        "Fecha de Fin".to_string(),
        format::long_date(Some(&contract.ends_on)),
    ]);
    summary.add_row(vec![
        "Fecha de Firma".to_string(),
        format::long_date(contract.signed_on.as_deref()),
    ]);
    summary.add_row(vec![
        "Valor".to_string(),
        format::detail_amount(&contract.currency, contract.value),
    ]);

    let mut out = summary.to_string();

    if !contract.parties.is_empty() {
        let mut parties = new_table();
        parties.set_header(vec!["Parte", "Rol", "Contacto", "Email"]);
        for party in &contract.parties {
            parties.add_row(vec![
                party.name.as_str(),
                party.role.label(),
                party.main_contact.name.as_str(),
                party.main_contact.email.as_str(),
            ]);
        }
        out.push_str("\n\nPartes\n");
        out.push_str(&parties.to_string());
    }

    if !contract.clauses.is_empty() {
        out.push_str("\n\nCláusulas\n");
        for clause in &contract.clauses {
            out.push_str(&format!("{}. {}\n", clause.number, clause.text));
        }
        out.truncate(out.trim_end().len());
    }

    if !contract.attachments.is_empty() {
        out.push_str("\n\nDocumentos\n");
        for doc in &contract.attachments {
            out.push_str(&format!("- {} ({})\n", doc.name, doc.url));
        }
        out.truncate(out.trim_end().len());
    }

    out
}

fn history(contract: &Contract) -> String {
    if contract.status_history.is_empty() {
        return "Sin cambios de estado".to_string();
    }
    let mut table = new_table();
    table.set_header(vec!["Estado", "Fecha", "Usuario"]);
    for change in &contract.status_history {
        table.add_row(vec![
            status_label(&change.status),
            format::long_date(Some(&change.date)),
            change.user.clone(),
        ]);
    }
    table.to_string()
}

/// Renders the active tab of a contract's detail view.
pub fn contract_detail(detail: &ContractDetail) -> String {
    let contract = detail.contract();
    let tab = detail.active_tab();
    let body = match tab {
        DetailTab::Details => details(contract),
        DetailTab::History => history(contract),
    };
    format!("{} · {}\n{}\n\n{}", contract.id, contract.title, tab.label(), body)
}

pub fn stats(stats: &ContractStats) -> String {
    let mut table = new_table();
    table.set_header(vec!["Total", "Activos", "Pendientes", "Finalizados"]);
    table.add_row(vec![stats.total, stats.active, stats.pending, stats.finished]);
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts_lib::model::Clause;
    use contracts_lib::model::StatusChange;
    use contracts_lib::model::contract_columns;
    use contracts_lib::model::contract_pagination;
    use contracts_lib::table::PageRange;

    fn contract(n: usize) -> Contract {
        Contract {
            id: format!("CON-2024-{:03}", n),
            title: format!("Contrato {}", n),
            status: ContractStatus::Active,
            created_on: "2024-01-01".to_string(),
            starts_on: "2024-01-15".to_string(),
            ends_on: "2025-01-14".to_string(),
            signed_on: None,
            value: 10000.0 + n as f64,
            currency: "USD".to_string(),
            parties: Vec::new(),
            clauses: vec![Clause {
                number: 1,
                text: "Objeto del contrato".to_string(),
            }],
            attachments: Vec::new(),
            status_history: vec![StatusChange {
                status: "pendiente_firma".to_string(),
                date: "2024-01-10T09:00:00.000Z".to_string(),
                user: "ana@example.com".to_string(),
            }],
        }
    }

    fn list_view(count: usize) -> TableView<Record> {
        TableView::new(contract_columns())
            .with_pagination(contract_pagination())
            .with_data((1..=count).map(|n| contract(n).to_record()).collect())
    }

    #[test]
    fn test_pager_line_marks_current_page() {
        let pager = PagerView {
            current: 4,
            page_size: 5,
            total_pages: 10,
            items: contracts_lib::table::page_numbers(10, 4),
            range: PageRange::new(4, 5, 50),
        };
        assert_eq!(pager_line(&pager), "1 ... 3 [4] 5 ... 10");
    }

    #[test]
    fn test_list_shows_page_and_summary() {
        let mut view = list_view(12);
        view.handle_page_change(3, 5);
        let out = contract_list(&view);
        assert!(out.contains("CON-2024-011"));
        assert!(!out.contains("CON-2024-001"));
        assert!(out.contains("1 2 [3]"));
        assert!(out.ends_with("Mostrando 11-12 de 12 registros"));
    }

    #[test]
    fn test_list_marks_sorted_column() {
        let mut view = list_view(3);
        view.handle_sort("valor");
        view.handle_sort("valor");
        let out = contract_list(&view);
        assert!(out.contains("Valor ▼"));
        let first = out.find("CON-2024-003").unwrap();
        let last = out.find("CON-2024-001").unwrap();
        assert!(first < last);
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(contract_list(&list_view(0)), EMPTY_LIST);
    }

    #[test]
    fn test_detail_tabs() {
        let mut detail = ContractDetail::new(contract(1));
        let out = contract_detail(&detail);
        assert!(out.contains("Detalles del Contrato"));
        assert!(out.contains("15 de enero de 2024"));
        assert!(out.contains("USD 10.001,00"));
        assert!(out.contains("1. Objeto del contrato"));

        assert!(detail.select_tab("history"));
        let out = contract_detail(&detail);
        assert!(out.contains("Pendiente de Firma"));
        assert!(out.contains("ana@example.com"));
    }
}
