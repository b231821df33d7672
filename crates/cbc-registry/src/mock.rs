//! Mock citizen source.
//!
//! Answers every lookup after a fixed simulated latency. The CPF's last
//! digit scripts the outcome:
//!
//! | last digit | outcome |
//! |---|---|
//! | `0` | `SourceError::NotFound` |
//! | `1` | `SourceError::Unauthorized` |
//! | `2` | `SourceError::RateLimited` |
//! | `3`..=`9` | fabricated `CitizenRecord` |
//!
//! Records are drawn from small lookup tables and bounded random ranges.
//! Nothing leaves the process.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::config::MockSourceConfig;
use crate::cpf::Cpf;
use crate::error::SourceError;
use crate::record::{CitizenRecord, RegistrationStatus};
use crate::source::{CitizenSource, SourceResult};

const NAMES: [&str; 6] = [
    "João Silva Santos",
    "Maria Oliveira Costa",
    "Pedro Souza Lima",
    "Ana Paula Ferreira",
    "Carlos Eduardo Almeida",
    "Lucia Helena Ribeiro",
];

/// City and state share an index.
const LOCATIONS: [(&str, &str); 6] = [
    ("São Paulo", "SP"),
    ("Rio de Janeiro", "RJ"),
    ("Belo Horizonte", "MG"),
    ("Salvador", "BA"),
    ("Brasília", "DF"),
    ("Curitiba", "PR"),
];

const REGISTERED_ON: (i32, u32, u32) = (2010, 3, 15);

/// Failure scripted for a given last digit, if any.
pub fn scripted_failure(last_digit: u8) -> Option<SourceError> {
    match last_digit {
        0 => Some(SourceError::NotFound),
        1 => Some(SourceError::Unauthorized),
        2 => Some(SourceError::RateLimited),
        _ => None,
    }
}

/// Deterministic-outcome, random-content citizen source.
#[derive(Debug)]
pub struct MockCitizenSource {
    latency: Duration,
    rng: Mutex<StdRng>,
}

impl Default for MockCitizenSource {
    fn default() -> Self {
        Self::new(MockSourceConfig::default())
    }
}

impl MockCitizenSource {
    pub fn new(config: MockSourceConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            latency: config.latency,
            rng: Mutex::new(rng),
        }
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }

    /// Fabricate a record for `cpf` without waiting or consulting the
    /// scripted failures.
    pub fn generate(&self, cpf: &Cpf) -> SourceResult<CitizenRecord> {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);

        let name = NAMES.choose(&mut *rng).copied().unwrap_or(NAMES[0]);
        let (city, state) = LOCATIONS.choose(&mut *rng).copied().unwrap_or(LOCATIONS[0]);
        let status = RegistrationStatus::ALL
            .choose(&mut *rng)
            .copied()
            .unwrap_or(RegistrationStatus::Regular);

        let birth_date = date(
            rng.gen_range(1950..2000),
            rng.gen_range(1..=12),
            rng.gen_range(1..=28),
        )?;
        let (y, m, d) = REGISTERED_ON;
        let registered_at = date(y, m, d)?
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| SourceError::Unavailable("invalid registration time".to_string()))?
            .and_utc();

        let rg: u64 = rng.gen_range(10_000_000..=99_999_999);
        let voter_title: u64 = rng.gen_range(100_000_000_000..=999_999_999_999);
        let pis: u64 = rng.gen_range(10_000_000_000..=99_999_999_999);

        let mut record = CitizenRecord::new(cpf.clone(), name, status, registered_at, birth_date);
        record.city = Some(city.to_string());
        record.state = Some(state.to_string());
        record.full_name = Some(name.to_string());
        record.rg = Some(rg.to_string());
        record.voter_title = Some(voter_title.to_string());
        record.pis = Some(pis.to_string());
        Ok(record)
    }
}

fn date(year: i32, month: u32, day: u32) -> SourceResult<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        SourceError::Unavailable(format!("invalid date {year}-{month:02}-{day:02}"))
    })
}

#[async_trait]
impl CitizenSource for MockCitizenSource {
    async fn lookup(&self, cpf: &Cpf) -> SourceResult<CitizenRecord> {
        debug!(
            cpf = %cpf.fingerprint(),
            latency_ms = self.latency.as_millis() as u64,
            "simulating registry lookup"
        );
        tokio::time::sleep(self.latency).await;

        if let Some(err) = scripted_failure(cpf.last_digit()) {
            debug!(cpf = %cpf.fingerprint(), kind = err.kind(), "scripted failure");
            return Err(err);
        }
        self.generate(cpf)
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
