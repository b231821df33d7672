//! Error types for cbc-registry

use thiserror::Error;

/// Reasons a CPF input is rejected by the validator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CpfError {
    /// Input does not carry exactly 11 digits
    #[error("expected 11 digits, found {found}")]
    WrongLength { found: usize },

    /// All 11 digits are the same (000.000.000-00, 111.111.111-11, ...)
    #[error("all digits are identical")]
    RepeatedDigits,
}

/// Errors returned by a citizen data source
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// No record exists for the CPF
    #[error("cpf not found in registry")]
    NotFound,

    /// The access token was rejected
    #[error("authentication failed: invalid token")]
    Unauthorized,

    /// Query quota exhausted
    #[error("rate limit exceeded")]
    RateLimited,

    /// Any other backend failure
    #[error("source unavailable: {0}")]
    Unavailable(String),
}

impl SourceError {
    /// Message shown to the user (pt-BR).
    pub fn user_message(&self) -> &'static str {
        match self {
            SourceError::NotFound => "CPF não encontrado na base de dados",
            SourceError::Unauthorized => "Erro de autenticação - Token inválido",
            SourceError::RateLimited => "Limite de consultas excedido",
            SourceError::Unavailable(_) => "Erro desconhecido na consulta",
        }
    }

    /// Short machine-readable tag used in logs and JSON output.
    pub fn kind(&self) -> &'static str {
        match self {
            SourceError::NotFound => "not_found",
            SourceError::Unauthorized => "unauthorized",
            SourceError::RateLimited => "rate_limited",
            SourceError::Unavailable(_) => "unavailable",
        }
    }
}

/// Invalid values in the source configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value:?} ({reason})")]
    InvalidVar {
        var: &'static str,
        value: String,
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages_are_portuguese() {
        assert_eq!(
            SourceError::NotFound.user_message(),
            "CPF não encontrado na base de dados"
        );
        assert_eq!(
            SourceError::Unauthorized.user_message(),
            "Erro de autenticação - Token inválido"
        );
        assert_eq!(
            SourceError::RateLimited.user_message(),
            "Limite de consultas excedido"
        );
        assert_eq!(
            SourceError::Unavailable("boom".to_string()).user_message(),
            "Erro desconhecido na consulta"
        );
    }

    #[test]
    fn test_cpf_error_display() {
        let err = CpfError::WrongLength { found: 9 };
        assert!(err.to_string().contains("found 9"));
        assert!(CpfError::RepeatedDigits.to_string().contains("identical"));
    }

    #[test]
    fn test_unavailable_keeps_detail() {
        let err = SourceError::Unavailable("connection reset".to_string());
        assert!(err.to_string().contains("connection reset"));
        assert_eq!(err.kind(), "unavailable");
    }
}
