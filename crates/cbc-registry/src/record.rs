//! Citizen record returned by a registry lookup.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::cpf::Cpf;

/// Registration status ("situação cadastral").
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum RegistrationStatus {
    Regular,
    Irregular,
    Suspenso,
}

impl RegistrationStatus {
    pub const ALL: [RegistrationStatus; 3] = [
        RegistrationStatus::Regular,
        RegistrationStatus::Irregular,
        RegistrationStatus::Suspenso,
    ];

    /// Upper-case label as the API spells it.
    pub fn as_str(&self) -> &'static str {
        match self {
            RegistrationStatus::Regular => "REGULAR",
            RegistrationStatus::Irregular => "IRREGULAR",
            RegistrationStatus::Suspenso => "SUSPENSO",
        }
    }
}

impl std::fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A citizen record in the CBC-CPF response shape.
///
/// Field names on the wire follow the API (`nome`, `situacao`, ...).
/// Optional fields are omitted when absent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CitizenRecord {
    pub cpf: Cpf,

    #[serde(rename = "nome")]
    pub name: String,

    #[serde(rename = "situacao")]
    pub status: RegistrationStatus,

    #[serde(rename = "dataInscricao")]
    pub registered_at: DateTime<Utc>,

    #[serde(rename = "nascimento")]
    pub birth_date: NaiveDate,

    #[serde(rename = "municipio", default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    #[serde(rename = "uf", default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    #[serde(rename = "nomeCompleto", default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rg: Option<String>,

    #[serde(rename = "tituloEleitor", default, skip_serializing_if = "Option::is_none")]
    pub voter_title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pis: Option<String>,
}

impl CitizenRecord {
    /// Record with only the mandatory fields set.
    pub fn new(
        cpf: Cpf,
        name: impl Into<String>,
        status: RegistrationStatus,
        registered_at: DateTime<Utc>,
        birth_date: NaiveDate,
    ) -> Self {
        Self {
            cpf,
            name: name.into(),
            status,
            registered_at,
            birth_date,
            city: None,
            state: None,
            full_name: None,
            rg: None,
            voter_title: None,
            pis: None,
        }
    }

    /// Full name, when present and different from `name`.
    pub fn distinct_full_name(&self) -> Option<&str> {
        self.full_name
            .as_deref()
            .filter(|full| !full.is_empty() && *full != self.name)
    }

    pub fn has_location(&self) -> bool {
        self.city.is_some() || self.state.is_some()
    }

    pub fn has_other_documents(&self) -> bool {
        self.rg.is_some() || self.voter_title.is_some() || self.pis.is_some()
    }
}
