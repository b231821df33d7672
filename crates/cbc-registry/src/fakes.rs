//! In-memory fakes for `CitizenSource` (testing only)
//!
//! `StaticCitizenSource` answers every lookup with the same scripted result
//! and counts how often it was asked.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::cpf::Cpf;
use crate::error::SourceError;
use crate::record::CitizenRecord;
use crate::source::{CitizenSource, SourceResult};

/// Source returning a fixed record (re-keyed to the queried CPF) or a fixed error.
#[derive(Debug)]
pub struct StaticCitizenSource {
    result: SourceResult<CitizenRecord>,
    delay: Duration,
    calls: AtomicUsize,
}

impl StaticCitizenSource {
    pub fn found(record: CitizenRecord) -> Self {
        Self {
            result: Ok(record),
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(err: SourceError) -> Self {
        Self {
            result: Err(err),
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Number of lookups issued so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CitizenSource for StaticCitizenSource {
    async fn lookup(&self, cpf: &Cpf) -> SourceResult<CitizenRecord> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.result.clone().map(|mut record| {
            record.cpf = cpf.clone();
            record
        })
    }

    fn name(&self) -> &'static str {
        "static"
    }
}
