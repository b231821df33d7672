//! Citizen data source abstraction.
//!
//! `CitizenSource` is the single seam between presentation code and
//! whatever answers a CPF query. Today only [`crate::MockCitizenSource`]
//! implements it; a backend proxy speaking to the real CBC-CPF API would
//! slot in here without touching the session or the renderers.

use async_trait::async_trait;

use crate::cpf::Cpf;
use crate::error::SourceError;
use crate::record::CitizenRecord;

/// Result type for source lookups
pub type SourceResult<T> = std::result::Result<T, SourceError>;

/// Fetch-or-simulate lookup of a citizen record.
///
/// Guarantees:
/// - The returned record's `cpf` equals the queried CPF.
/// - Errors are non-fatal; callers may re-issue the same query.
#[async_trait]
pub trait CitizenSource: Send + Sync {
    /// Look up the record for `cpf`.
    async fn lookup(&self, cpf: &Cpf) -> SourceResult<CitizenRecord>;

    /// Short backend name for logs.
    fn name(&self) -> &'static str;
}
