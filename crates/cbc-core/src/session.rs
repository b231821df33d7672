//! Search session state.
//!
//! A `SearchSession` is the single owner of the loading/result/error trio.
//! State changes only through its transition methods:
//!
//! ```text
//!            begin_search            resolve
//!   Idle ───────────────▶ Pending ─────────▶ Resolved
//!    ▲                     │  │    reject
//!    │        cancel       │  └────────────▶ Rejected
//!    ├─────────────────────┘                    │
//!    └──────────────── clear ◀──────────────────┘
//! ```
//!
//! A new `begin_search` from Resolved/Rejected discards the previous
//! outcome. Completions carry the query id they answer; answers for a query
//! that is no longer pending are refused.

use cbc_registry::{CitizenRecord, SourceError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::SessionError;

/// Failure half of a [`QueryOutcome`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryFailure {
    /// Machine-readable tag (`not_found`, `unauthorized`, ...)
    pub kind: String,
    /// Message shown to the user
    pub message: String,
}

impl From<&SourceError> for QueryFailure {
    fn from(err: &SourceError) -> Self {
        Self {
            kind: err.kind().to_string(),
            message: err.user_message().to_string(),
        }
    }
}

/// Result of one lookup: a record or a failure, never both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "data", rename_all = "snake_case")]
pub enum QueryOutcome {
    Found(CitizenRecord),
    Failed(QueryFailure),
}

impl QueryOutcome {
    pub fn record(&self) -> Option<&CitizenRecord> {
        match self {
            QueryOutcome::Found(record) => Some(record),
            QueryOutcome::Failed(_) => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            QueryOutcome::Found(_) => None,
            QueryOutcome::Failed(failure) => Some(&failure.message),
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, QueryOutcome::Found(_))
    }
}

impl From<Result<CitizenRecord, SourceError>> for QueryOutcome {
    fn from(result: Result<CitizenRecord, SourceError>) -> Self {
        match result {
            Ok(record) => QueryOutcome::Found(record),
            Err(err) => QueryOutcome::Failed(QueryFailure::from(&err)),
        }
    }
}

/// Observable state of a session.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SearchState {
    #[default]
    Idle,
    Pending {
        query_id: Uuid,
    },
    Resolved(CitizenRecord),
    Rejected(QueryFailure),
}

/// State container for one search form and its result view.
#[derive(Debug, Default)]
pub struct SearchSession {
    state: SearchState,
}

impl SearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, SearchState::Pending { .. })
    }

    pub fn pending_query(&self) -> Option<Uuid> {
        match self.state {
            SearchState::Pending { query_id } => Some(query_id),
            _ => None,
        }
    }

    pub fn record(&self) -> Option<&CitizenRecord> {
        match &self.state {
            SearchState::Resolved(record) => Some(record),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            SearchState::Rejected(failure) => Some(&failure.message),
            _ => None,
        }
    }

    /// Enter Pending, discarding any previous outcome.
    ///
    /// # Errors
    ///
    /// `SessionError::Busy` if a query is already pending.
    pub fn begin_search(&mut self) -> Result<Uuid, SessionError> {
        if let Some(pending) = self.pending_query() {
            return Err(SessionError::Busy(pending));
        }
        let query_id = Uuid::new_v4();
        self.state = SearchState::Pending { query_id };
        Ok(query_id)
    }

    pub fn resolve(&mut self, query_id: Uuid, record: CitizenRecord) -> Result<(), SessionError> {
        self.ensure_pending(query_id)?;
        self.state = SearchState::Resolved(record);
        Ok(())
    }

    pub fn reject(&mut self, query_id: Uuid, failure: QueryFailure) -> Result<(), SessionError> {
        self.ensure_pending(query_id)?;
        self.state = SearchState::Rejected(failure);
        Ok(())
    }

    /// Apply a finished lookup.
    pub fn complete(&mut self, query_id: Uuid, outcome: QueryOutcome) -> Result<(), SessionError> {
        match outcome {
            QueryOutcome::Found(record) => self.resolve(query_id, record),
            QueryOutcome::Failed(failure) => self.reject(query_id, failure),
        }
    }

    /// Abandon a pending query and return to Idle.
    pub fn cancel(&mut self, query_id: Uuid) -> Result<(), SessionError> {
        self.ensure_pending(query_id)?;
        self.state = SearchState::Idle;
        Ok(())
    }

    /// Drop the current record or error ("nova consulta").
    ///
    /// A pending query is left alone; returns `false` in that case.
    pub fn clear(&mut self) -> bool {
        if self.is_loading() {
            return false;
        }
        self.state = SearchState::Idle;
        true
    }

    fn ensure_pending(&self, query_id: Uuid) -> Result<(), SessionError> {
        match self.state {
            SearchState::Pending { query_id: pending } if pending == query_id => Ok(()),
            _ => Err(SessionError::StaleQuery(query_id)),
        }
    }
}
