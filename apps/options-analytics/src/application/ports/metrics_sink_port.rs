//! Metrics Sink Port (Driven Port)
//!
//! Interface to the persistence collaborator. The engine emits flattened,
//! serializable records; storage layout is the collaborator's concern.

use async_trait::async_trait;

use crate::analytics::signals::Signal;
use crate::application::dto::MetricsRecord;

/// Persistence error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum MetricsSinkError {
    /// Write failed.
    #[error("Metrics write failed: {message}")]
    WriteError {
        /// Error details.
        message: String,
    },
}

/// Port for persisting computed metrics and signals.
#[async_trait]
pub trait MetricsSinkPort: Send + Sync {
    /// Persist a flattened metrics record.
    async fn persist_metrics(&self, record: &MetricsRecord) -> Result<(), MetricsSinkError>;

    /// Persist emitted signals.
    async fn persist_signals(&self, signals: &[Signal]) -> Result<(), MetricsSinkError>;
}
