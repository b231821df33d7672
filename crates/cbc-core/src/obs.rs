//! Structured observability hooks for the search lifecycle.
//!
//! - `query_span`: span tagging a search task's events with its query id
//! - `emit_*`: one function per lifecycle event
//!
//! CPFs are logged only as fingerprints (see `Cpf::fingerprint`).

use tracing::info;
use uuid::Uuid;

/// Span for everything a single search does.
///
/// Attach it to the search future with `tracing::Instrument`.
pub fn query_span(query_id: Uuid) -> tracing::Span {
    tracing::info_span!("cbc.query", query_id = %query_id)
}

/// Emit event: a validated CPF was handed to the source.
pub fn emit_search_started(query_id: Uuid, cpf_fingerprint: &str, source: &str) {
    info!(
        event = "search.started",
        query_id = %query_id,
        cpf = %cpf_fingerprint,
        source = %source,
    );
}

/// Emit event: the source returned a record.
pub fn emit_search_resolved(query_id: Uuid, duration_ms: u64, status: &str) {
    info!(
        event = "search.resolved",
        query_id = %query_id,
        duration_ms = duration_ms,
        status = %status,
    );
}

/// Emit event: the source returned an error.
pub fn emit_search_rejected(query_id: Uuid, duration_ms: u64, kind: &str) {
    tracing::warn!(
        event = "search.rejected",
        query_id = %query_id,
        duration_ms = duration_ms,
        kind = %kind,
    );
}

/// Emit event: an in-flight search was cancelled.
pub fn emit_search_cancelled(query_id: Uuid) {
    info!(event = "search.cancelled", query_id = %query_id);
}

/// Emit event: input failed validation; no search was issued.
pub fn emit_validation_failed(reason: &dyn std::fmt::Display) {
    info!(event = "cpf.validation_failed", reason = %reason);
}

/// Emit event: the status panel was asked to refresh.
pub fn emit_status_refresh_requested(endpoints: usize) {
    info!(
        event = "status.refresh_requested",
        endpoints = endpoints,
        "no live check is performed; endpoint list is static"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_span_create() {
        let span = query_span(Uuid::new_v4());
        let _entered = span.enter();
    }
}
