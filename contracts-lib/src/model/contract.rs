//! Contract domain types
//!
//! JSON field names follow the contracts API (`titulo`, `estado`, ...).

use chrono::NaiveDate;
use serde::Deserialize;
use serde::Serialize;

use super::Record;

/// Lifecycle status of a contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContractStatus {
    #[serde(rename = "activo")]
    Active,
    #[serde(rename = "pendiente_firma")]
    PendingSignature,
    #[serde(rename = "finalizado")]
    Finished,
    #[serde(rename = "borrador")]
    Draft,
    #[serde(rename = "suspendido")]
    Suspended,
}

impl ContractStatus {
    /// All statuses, in the order the status filter lists them.
    pub const ALL: [ContractStatus; 5] = [
        ContractStatus::Active,
        ContractStatus::PendingSignature,
        ContractStatus::Finished,
        ContractStatus::Draft,
        ContractStatus::Suspended,
    ];

    /// Returns the wire value (`activo`, `pendiente_firma`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            ContractStatus::Active => "activo",
            ContractStatus::PendingSignature => "pendiente_firma",
            ContractStatus::Finished => "finalizado",
            ContractStatus::Draft => "borrador",
            ContractStatus::Suspended => "suspendido",
        }
    }

    /// Returns the display label.
    pub fn label(&self) -> &'static str {
        match self {
            ContractStatus::Active => "Activo",
            ContractStatus::PendingSignature => "Pendiente de Firma",
            ContractStatus::Finished => "Finalizado",
            ContractStatus::Draft => "Borrador",
            ContractStatus::Suspended => "Suspendido",
        }
    }

    /// Returns the short label shown in the contracts list badge.
    pub fn badge(&self) -> &'static str {
        match self {
            ContractStatus::PendingSignature => "Pendiente",
            other => other.label(),
        }
    }

    /// Parses a wire value.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }
}

impl std::fmt::Display for ContractStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Role a party plays in a contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PartyRole {
    #[serde(rename = "Proveedor")]
    Supplier,
    #[serde(rename = "Cliente")]
    Customer,
}

impl PartyRole {
    pub fn label(&self) -> &'static str {
        match self {
            PartyRole::Supplier => "Proveedor",
            PartyRole::Customer => "Cliente",
        }
    }
}

/// Main contact of a party.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(rename = "nombre")]
    pub name: String,
    pub email: String,
}

/// A party to a contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Party {
    pub id: String,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "rol")]
    pub role: PartyRole,
    #[serde(rename = "contacto_principal")]
    pub main_contact: Contact,
}

/// A numbered clause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clause {
    #[serde(rename = "numero")]
    pub number: u32,
    #[serde(rename = "texto")]
    pub text: String,
}

/// An attached document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    #[serde(rename = "nombre")]
    pub name: String,
    pub url: String,
}

/// One entry of a contract's status history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusChange {
    #[serde(rename = "estado")]
    pub status: String,
    #[serde(rename = "fecha")]
    pub date: String,
    #[serde(rename = "usuario")]
    pub user: String,
}

/// A contract as returned by the contracts API.
///
/// Dates are kept as the API's `YYYY-MM-DD` strings; the formatting helpers
/// in [`crate::model::format`] parse them for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    pub id: String,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "estado")]
    pub status: ContractStatus,
    #[serde(rename = "fecha_creacion", default)]
    pub created_on: String,
    #[serde(rename = "fecha_inicio", default)]
    pub starts_on: String,
    #[serde(rename = "fecha_fin", default)]
    pub ends_on: String,
    #[serde(rename = "fecha_firma", default)]
    pub signed_on: Option<String>,
    #[serde(rename = "valor")]
    pub value: f64,
    #[serde(rename = "moneda")]
    pub currency: String,
    #[serde(rename = "partes", default)]
    pub parties: Vec<Party>,
    #[serde(rename = "clausulas", default)]
    pub clauses: Vec<Clause>,
    #[serde(rename = "documentos_adjuntos", default)]
    pub attachments: Vec<Attachment>,
    #[serde(rename = "historial_estados", default)]
    pub status_history: Vec<StatusChange>,
}

impl Contract {
    /// Converts the contract into a dynamic record for the table pipeline.
    pub fn to_record(&self) -> Record {
        // Every field serializes to JSON, so the object branch always matches.
        Record::from_serializable(self).unwrap_or_default()
    }

    /// Parses the end date, if it is a valid `YYYY-MM-DD` date.
    pub fn end_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.ends_on, "%Y-%m-%d").ok()
    }
}

/// Contract counts by status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractStats {
    pub total: usize,
    #[serde(rename = "activos")]
    pub active: usize,
    #[serde(rename = "pendientes")]
    pub pending: usize,
    #[serde(rename = "finalizados")]
    pub finished: usize,
}

impl ContractStats {
    /// Counts contracts locally.
    pub fn from_contracts(contracts: &[Contract]) -> Self {
        let count = |status| contracts.iter().filter(|c| c.status == status).count();
        Self {
            total: contracts.len(),
            active: count(ContractStatus::Active),
            pending: count(ContractStatus::PendingSignature),
            finished: count(ContractStatus::Finished),
        }
    }
}

/// Tabs of the contract detail view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetailTab {
    #[default]
    Details,
    History,
}

impl DetailTab {
    pub const ALL: [DetailTab; 2] = [DetailTab::Details, DetailTab::History];

    pub fn key(&self) -> &'static str {
        match self {
            DetailTab::Details => "details",
            DetailTab::History => "history",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DetailTab::Details => "Detalles del Contrato",
            DetailTab::History => "Historial",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.key() == key)
    }
}

/// A contract opened in the detail view.
#[derive(Debug, Clone, PartialEq)]
pub struct ContractDetail {
    contract: Contract,
    active_tab: DetailTab,
}

impl ContractDetail {
    pub fn new(contract: Contract) -> Self {
        Self {
            contract,
            active_tab: DetailTab::default(),
        }
    }

    pub fn contract(&self) -> &Contract {
        &self.contract
    }

    pub fn active_tab(&self) -> DetailTab {
        self.active_tab
    }

    /// Switches tabs by key. Unknown keys leave the active tab unchanged.
    pub fn select_tab(&mut self, key: &str) -> bool {
        match DetailTab::from_key(key) {
            Some(tab) => {
                self.active_tab = tab;
                true
            }
            None => false,
        }
    }
}
