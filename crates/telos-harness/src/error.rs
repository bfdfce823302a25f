//! Error types for the verification harness

use telos_wizard::WizardError;

/// Harness error type
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    /// A wizard step failed while driving a session
    #[error("wizard step failed: {0}")]
    Wizard(#[from] WizardError),

    /// Rendered figure is not of the form `<n>%`
    #[error("cannot parse displayed value {text:?} as a percentage")]
    DisplayParse { text: String },

    /// The session ended without reaching the results page
    #[error("no results rendered after completing all sections")]
    MissingResults,

    /// Batched execution needs at least one run per batch
    #[error("batch size must be at least 1")]
    InvalidBatchSize,

    /// A batch task panicked or was cancelled
    #[error("batch task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
