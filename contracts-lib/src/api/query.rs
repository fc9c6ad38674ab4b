//! List query for the contracts endpoint.

use crate::model::Contract;
use crate::model::ContractStatus;

/// Sort direction sent to the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Ascending order (A-Z, 0-9).
    #[default]
    Asc,
    /// Descending order (Z-A, 9-0).
    Desc,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        }
    }
}

/// Filters, sort and paging for [`ContractsClient::list`](crate::ContractsClient::list).
///
/// # Example
///
/// ```
/// use contracts_lib::api::{ContractQuery, Direction};
/// use contracts_lib::model::ContractStatus;
///
/// let query = ContractQuery::new()
///     .status(ContractStatus::Active)
///     .sort_by("valor", Direction::Desc)
///     .page(2, 10);
/// let pairs = query.to_query_pairs();
/// assert!(pairs.contains(&("_order", "desc".to_string())));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContractQuery {
    pub status: Option<ContractStatus>,
    /// End date, `YYYY-MM-DD`.
    pub end_date: Option<String>,
    /// Free text matched against id and title. Applied locally, never sent.
    pub search: Option<String>,
    pub page: Option<usize>,
    pub page_size: Option<usize>,
    pub sort_by: Option<String>,
    pub sort_order: Option<Direction>,
}

impl ContractQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(mut self, status: ContractStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn end_date(mut self, date: impl Into<String>) -> Self {
        self.end_date = Some(date.into());
        self
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    pub fn page(mut self, page: usize, page_size: usize) -> Self {
        self.page = Some(page);
        self.page_size = Some(page_size);
        self
    }

    pub fn sort_by(mut self, field: impl Into<String>, order: Direction) -> Self {
        self.sort_by = Some(field.into());
        self.sort_order = Some(order);
        self
    }

    /// Query string parameters for the list endpoint.
    ///
    /// Paging is only sent when both page and a non-zero page size are set.
    /// A sort field without an order sorts ascending.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();

        if let Some(status) = self.status {
            pairs.push(("estado", status.as_str().to_string()));
        }
        if let Some(end_date) = self.end_date.as_deref().filter(|d| !d.is_empty()) {
            pairs.push(("fecha_fin", end_date.to_string()));
        }
        if let Some(field) = self.sort_by.as_deref().filter(|f| !f.is_empty()) {
            pairs.push(("_sort", field.to_string()));
            pairs.push((
                "_order",
                self.sort_order.unwrap_or_default().as_str().to_string(),
            ));
        }
        if let (Some(page), Some(size)) = (self.page, self.page_size.filter(|s| *s > 0)) {
            pairs.push(("_page", page.to_string()));
            pairs.push(("_limit", size.to_string()));
        }

        pairs
    }

    /// Returns `true` if `contract` matches the search text.
    ///
    /// Matching is a case-insensitive substring test on id and title; no
    /// search text matches everything.
    pub fn matches_search(&self, contract: &Contract) -> bool {
        let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) else {
            return true;
        };
        let needle = search.to_lowercase();
        contract.id.to_lowercase().contains(&needle)
            || contract.title.to_lowercase().contains(&needle)
    }

    /// Keeps the contracts matching the search text.
    pub fn apply_search(&self, contracts: Vec<Contract>) -> Vec<Contract> {
        contracts
            .into_iter()
            .filter(|c| self.matches_search(c))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contract(id: &str, title: &str) -> Contract {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "titulo": title,
            "estado": "activo",
            "fecha_creacion": "2024-01-01",
            "fecha_inicio": "2024-01-01",
            "fecha_fin": "2024-12-31",
            "fecha_firma": null,
            "valor": 1000,
            "moneda": "USD",
            "partes": []
        }))
        .unwrap()
    }

    #[test]
    fn test_empty_query() {
        assert!(ContractQuery::new().to_query_pairs().is_empty());
    }

    #[test]
    fn test_full_query() {
        let query = ContractQuery::new()
            .status(ContractStatus::PendingSignature)
            .end_date("2024-12-31")
            .search("limpieza")
            .sort_by("valor", Direction::Desc)
            .page(2, 5);
        assert_eq!(
            query.to_query_pairs(),
            vec![
                ("estado", "pendiente_firma".to_string()),
                ("fecha_fin", "2024-12-31".to_string()),
                ("_sort", "valor".to_string()),
                ("_order", "desc".to_string()),
                ("_page", "2".to_string()),
                ("_limit", "5".to_string()),
            ]
        );
    }

    #[test]
    fn test_sort_defaults_to_asc() {
        let query = ContractQuery {
            sort_by: Some("titulo".into()),
            ..Default::default()
        };
        assert_eq!(query.to_query_pairs()[1], ("_order", "asc".to_string()));
    }

    #[test]
    fn test_paging_needs_both_values() {
        let query = ContractQuery {
            page: Some(1),
            ..Default::default()
        };
        assert!(query.to_query_pairs().is_empty());
        assert!(ContractQuery::new().page(1, 0).to_query_pairs().is_empty());
    }

    #[test]
    fn test_search_is_local_and_case_insensitive() {
        let contracts = vec![
            contract("CON-001", "Servicio de Limpieza"),
            contract("CON-002", "Mantenimiento"),
            contract("LIMP-3", "Otro"),
        ];
        let query = ContractQuery::new().search("LIMP");
        assert!(query.to_query_pairs().is_empty());
        let found: Vec<_> = query.apply_search(contracts).into_iter().map(|c| c.id).collect();
        assert_eq!(found, ["CON-001", "LIMP-3"]);
    }
}
