//! CBC Core Library
//!
//! Search session, result rendering and the API status catalog, on top of
//! the data sources in `cbc-registry`.

pub mod api_status;
pub mod error;
pub mod metrics;
pub mod notify;
pub mod obs;
pub mod render;
pub mod search;
pub mod session;
pub mod telemetry;

pub use api_status::{
    ApiEndpoint, ApiStatusPanel, ApiStatusReport, EndpointStatus, HttpMethod, API_ENDPOINTS,
    DOCS_URL, OPENAPI_URL,
};
pub use error::{Result, SearchError, SessionError};
pub use metrics::METRICS;
pub use notify::{Notification, NotificationVariant, Notifier, RecordingNotifier, TracingNotifier};
pub use render::{format_date_br, render_error, render_record, render_state};
pub use search::{SearchController, SearchTask};
pub use session::{QueryFailure, QueryOutcome, SearchSession, SearchState};
pub use telemetry::init_tracing;

pub use cbc_registry::{
    format_cpf, is_valid, normalize, CitizenRecord, CitizenSource, Cpf, CpfError,
    MockCitizenSource, MockSourceConfig, RegistrationStatus, SourceError,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
