//! Error taxonomy for search sessions.

use cbc_registry::CpfError;
use uuid::Uuid;

/// Illegal transitions of a `SearchSession`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("a search is already pending (query {0})")]
    Busy(Uuid),

    #[error("query {0} is no longer pending")]
    StaleQuery(Uuid),
}

/// Errors from submitting or awaiting a search.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("invalid cpf: {0}")]
    InvalidCpf(#[from] CpfError),

    #[error("session error: {0}")]
    Session(#[from] SessionError),

    #[error("search cancelled")]
    Cancelled,

    #[error("search task failed: {0}")]
    Join(String),
}

/// Result type for search operations.
pub type Result<T> = std::result::Result<T, SearchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_error_display() {
        let err = SearchError::from(CpfError::RepeatedDigits);
        assert!(err.to_string().contains("invalid cpf"));

        let id = Uuid::new_v4();
        let err = SearchError::from(SessionError::Busy(id));
        assert!(err.to_string().contains(&id.to_string()));

        assert_eq!(SearchError::Cancelled.to_string(), "search cancelled");
    }
}
