//! Error types for the assessment wizard

use crate::state::{SectionId, WizardState};
use telos_engine::EngineError;

/// Wizard error type
#[derive(Debug, thiserror::Error)]
pub enum WizardError {
    /// Transition not in the page table
    #[error("illegal transition: {from} -> {to}")]
    IllegalTransition { from: WizardState, to: WizardState },

    /// Event has no meaning on the current page
    #[error("{event} is not available on {state}")]
    EventNotAllowed {
        event: &'static str,
        state: WizardState,
    },

    /// Forward move attempted before every question on the page was answered
    #[error("{section} incomplete: {answered} of {required} answered")]
    SectionIncomplete {
        section: SectionId,
        answered: usize,
        required: usize,
    },

    /// Question belongs to a page that is not showing
    #[error("question {question} is not on {state}")]
    QuestionOutOfSection { question: u8, state: WizardState },

    /// No such question number
    #[error("no question {0} (expected 1..=15)")]
    InvalidQuestion(u8),

    /// Answer outside the option range
    #[error("answer {value} for question {question} is outside 1..=5")]
    InvalidAnswer { question: u8, value: u8 },

    /// Scoring the completed answers failed
    #[error("scoring failed: {0}")]
    Engine(#[from] EngineError),
}

impl WizardError {
    /// Whether the user can fix this by answering or navigating differently
    #[inline]
    #[must_use]
    pub fn is_user_recoverable(&self) -> bool {
        !matches!(self, Self::Engine(_))
    }
}
