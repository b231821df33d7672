//! Search orchestration.
//!
//! `SearchController::submit` runs the whole form submission:
//! validate, enter Pending, spawn the lookup, and hand back a
//! [`SearchTask`]. The spawned task is the only writer of the outcome into
//! the shared [`SearchSession`] and sends the matching notification.
//!
//! Invalid input never reaches the source and never touches the session.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use cbc_registry::{CitizenSource, Cpf, SourceError};
use futures::future::{AbortHandle, AbortRegistration, Abortable, Aborted};
use futures::FutureExt;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, warn, Instrument};
use uuid::Uuid;

use crate::error::{Result, SearchError};
use crate::metrics::METRICS;
use crate::notify::{Notification, Notifier};
use crate::obs;
use crate::session::{QueryOutcome, SearchSession, SearchState};

/// Owns the session and wires it to a source and a notifier.
pub struct SearchController {
    session: Arc<Mutex<SearchSession>>,
    source: Arc<dyn CitizenSource>,
    notifier: Arc<dyn Notifier>,
}

impl SearchController {
    pub fn new(source: Arc<dyn CitizenSource>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            session: Arc::new(Mutex::new(SearchSession::new())),
            source,
            notifier,
        }
    }

    /// Shared handle to the session, for views that read it.
    pub fn session(&self) -> Arc<Mutex<SearchSession>> {
        Arc::clone(&self.session)
    }

    /// Copy of the current state.
    pub async fn snapshot(&self) -> SearchState {
        self.session.lock().await.state().clone()
    }

    /// "Nova consulta": drop the current record or error.
    pub async fn clear(&self) -> bool {
        self.session.lock().await.clear()
    }

    /// Validate `input` and start a lookup.
    ///
    /// # Errors
    ///
    /// - `SearchError::InvalidCpf`: input failed validation; an
    ///   "invalid CPF" notification was sent and the session is unchanged.
    /// - `SearchError::Session(Busy)`: another query is still pending.
    pub async fn submit(&self, input: &str) -> Result<SearchTask> {
        let cpf = match Cpf::parse(input) {
            Ok(cpf) => cpf,
            Err(err) => {
                METRICS.inc_validation_failures();
                obs::emit_validation_failed(&err);
                self.notifier.notify(Notification::invalid_cpf());
                return Err(err.into());
            }
        };

        let query_id = self.session.lock().await.begin_search()?;
        METRICS.inc_started();
        obs::emit_search_started(query_id, &cpf.fingerprint(), self.source.name());

        let (abort, registration) = AbortHandle::new_pair();
        let session = Arc::clone(&self.session);
        let source = Arc::clone(&self.source);
        let notifier = Arc::clone(&self.notifier);

        let handle = tokio::spawn(
            run_lookup(query_id, cpf, registration, Arc::clone(&session), source, notifier)
                .instrument(obs::query_span(query_id)),
        );

        Ok(SearchTask {
            query_id,
            abort,
            handle,
            session,
        })
    }

    /// Submit and wait for the outcome.
    pub async fn search(&self, input: &str) -> Result<QueryOutcome> {
        self.submit(input).await?.join().await
    }
}

async fn run_lookup(
    query_id: Uuid,
    cpf: Cpf,
    registration: AbortRegistration,
    session: Arc<Mutex<SearchSession>>,
    source: Arc<dyn CitizenSource>,
    notifier: Arc<dyn Notifier>,
) -> Result<QueryOutcome> {
    let started = Instant::now();
    let lookup = AssertUnwindSafe(async { source.lookup(&cpf).await }).catch_unwind();
    let result = Abortable::new(lookup, registration).await;
    let elapsed_ms = started.elapsed().as_millis() as u64;

    let lookup = match result {
        Ok(Ok(lookup)) => lookup,
        // a source that panics is reported like any other unavailable backend
        Ok(Err(panic)) => {
            let reason = panic_reason(panic.as_ref());
            warn!(source = source.name(), reason = %reason, "citizen source panicked");
            Err(SourceError::Unavailable(format!("source panicked: {reason}")))
        }
        Err(Aborted) => {
            if let Err(err) = session.lock().await.cancel(query_id) {
                debug!(error = %err, "cancelled query already settled");
            }
            METRICS.inc_cancelled();
            obs::emit_search_cancelled(query_id);
            return Err(SearchError::Cancelled);
        }
    };

    let outcome = QueryOutcome::from(lookup);
    session.lock().await.complete(query_id, outcome.clone())?;

    match &outcome {
        QueryOutcome::Found(record) => {
            METRICS.inc_resolved();
            obs::emit_search_resolved(query_id, elapsed_ms, record.status.as_str());
            notifier.notify(Notification::search_succeeded(&cpf));
        }
        QueryOutcome::Failed(failure) => {
            METRICS.inc_rejected();
            obs::emit_search_rejected(query_id, elapsed_ms, &failure.kind);
            notifier.notify(Notification::search_failed(&failure.message));
        }
    }
    Ok(outcome)
}

fn panic_reason(panic: &(dyn Any + Send)) -> String {
    if let Some(msg) = panic.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Handle to one in-flight lookup.
///
/// Completes with the tagged outcome. `cancel` stops the lookup; the
/// session then returns to Idle and `join` yields `SearchError::Cancelled`.
/// A lookup that already finished is not affected by `cancel`.
#[derive(Debug)]
pub struct SearchTask {
    query_id: Uuid,
    abort: AbortHandle,
    handle: JoinHandle<Result<QueryOutcome>>,
    session: Arc<Mutex<SearchSession>>,
}

impl SearchTask {
    pub fn query_id(&self) -> Uuid {
        self.query_id
    }

    pub fn cancel(&self) {
        self.abort.abort();
    }

    /// Detached canceller, usable after `join` has taken the task.
    pub fn abort_handle(&self) -> AbortHandle {
        self.abort.clone()
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the lookup to settle.
    ///
    /// If the task died before settling the session, the query is dropped
    /// and the session goes back to Idle so the next search can start.
    pub async fn join(self) -> Result<QueryOutcome> {
        let err = match self.handle.await {
            Ok(result) => return result,
            Err(err) => err,
        };

        if self.session.lock().await.cancel(self.query_id).is_ok() {
            debug!(query_id = %self.query_id, "released query left pending by its task");
        }
        if err.is_cancelled() {
            Err(SearchError::Cancelled)
        } else {
            Err(SearchError::Join(err.to_string()))
        }
    }
}
