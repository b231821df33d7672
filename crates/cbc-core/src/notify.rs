//! Transient user notifications ("toasts").
//!
//! The controller announces every search outcome and every rejected input
//! through a [`Notifier`]. How a notification is shown is the front-end's
//! business; [`TracingNotifier`] logs it, [`RecordingNotifier`] keeps it
//! for inspection.

use std::sync::{Mutex, PoisonError};

use cbc_registry::Cpf;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationVariant {
    Default,
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub variant: NotificationVariant,
}

impl Notification {
    pub fn search_succeeded(cpf: &Cpf) -> Self {
        Self {
            title: "Consulta realizada com sucesso".to_string(),
            description: format!("Dados do CPF {} encontrados.", cpf.formatted()),
            variant: NotificationVariant::Default,
        }
    }

    pub fn search_failed(message: &str) -> Self {
        Self {
            title: "Erro na consulta".to_string(),
            description: message.to_string(),
            variant: NotificationVariant::Destructive,
        }
    }

    pub fn invalid_cpf() -> Self {
        Self {
            title: "CPF Inválido".to_string(),
            description: "Por favor, digite um CPF válido com 11 dígitos.".to_string(),
            variant: NotificationVariant::Destructive,
        }
    }

    pub fn is_destructive(&self) -> bool {
        self.variant == NotificationVariant::Destructive
    }
}

/// Sink for notifications.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Writes notifications to the tracing log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, n: Notification) {
        if n.is_destructive() {
            tracing::warn!(title = %n.title, description = %n.description, "notification");
        } else {
            tracing::info!(title = %n.title, description = %n.description, "notification");
        }
    }
}

/// Keeps every notification in memory.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    seen: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything received so far, oldest first.
    pub fn notifications(&self) -> Vec<Notification> {
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn last(&self) -> Option<Notification> {
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification);
    }
}
