//! CBC Registry: CPF values and citizen data sources
//!
//! This crate holds everything that talks about the registry itself: the
//! CPF value type, the citizen record returned by a lookup, and the
//! `CitizenSource` abstraction behind which the mock generator lives.
//!
//! ## Layer 0 - Data
//!
//! Focus: input normalization, validation, and record synthesis.
//!
//! ## Key Components
//!
//! - `Cpf`: validated 11-digit CPF (only constructed through the validator)
//! - `CitizenRecord`: the record shape of the CBC-CPF API
//! - `CitizenSource`: async lookup seam (`MockCitizenSource` is the only backend)

mod config;
pub mod cpf;
mod error;
pub mod fakes;
pub mod mock;
mod record;
pub mod source;

pub use config::{MockSourceConfig, DEFAULT_LATENCY_MS};
pub use cpf::{format_cpf, is_valid, normalize, Cpf, CPF_LEN};
pub use error::{ConfigError, CpfError, SourceError};
pub use mock::MockCitizenSource;
pub use record::{CitizenRecord, RegistrationStatus};
pub use source::{CitizenSource, SourceResult};
