use crate::error::WizardError;
use serde::{Deserialize, Serialize};
use std::fmt;
use telos_engine::Category;

/// One of the three question pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SectionId {
    First,
    Second,
    Third,
}

impl SectionId {
    pub const ALL: [SectionId; 3] = [SectionId::First, SectionId::Second, SectionId::Third];

    /// Category whose questions this page shows
    pub const fn category(self) -> Category {
        match self {
            SectionId::First => Category::Stability,
            SectionId::Second => Category::Liquidity,
            SectionId::Third => Category::Return,
        }
    }

    /// One-based page number
    pub const fn number(self) -> u8 {
        match self {
            SectionId::First => 1,
            SectionId::Second => 2,
            SectionId::Third => 3,
        }
    }

    pub const fn next(self) -> Option<SectionId> {
        match self {
            SectionId::First => Some(SectionId::Second),
            SectionId::Second => Some(SectionId::Third),
            SectionId::Third => None,
        }
    }

    pub const fn previous(self) -> Option<SectionId> {
        match self {
            SectionId::First => None,
            SectionId::Second => Some(SectionId::First),
            SectionId::Third => Some(SectionId::Second),
        }
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "section {}", self.number())
    }
}

/// Which page of the assessment is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WizardState {
    Welcome,
    Section(SectionId),
    Results,
}

impl WizardState {
    pub const ALL: [WizardState; 5] = [
        WizardState::Welcome,
        WizardState::Section(SectionId::First),
        WizardState::Section(SectionId::Second),
        WizardState::Section(SectionId::Third),
        WizardState::Results,
    ];

    pub const fn section(self) -> Option<SectionId> {
        match self {
            WizardState::Section(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for WizardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WizardState::Welcome => f.write_str("welcome"),
            WizardState::Section(s) => write!(f, "{s}"),
            WizardState::Results => f.write_str("results"),
        }
    }
}

/// Validates a page transition.
///
/// Completion gating is not part of the table; the wizard checks it before
/// asking for a forward move.
///
/// # Errors
/// Returns [`WizardError::IllegalTransition`] if `to` is not in
/// [`allowed_transitions`] for `from`.
pub fn validate_transition(from: WizardState, to: WizardState) -> Result<(), WizardError> {
    if allowed(from, to) {
        Ok(())
    } else {
        Err(WizardError::IllegalTransition { from, to })
    }
}

pub fn allowed_transitions(from: WizardState) -> Vec<WizardState> {
    use SectionId::*;
    use WizardState::*;
    match from {
        Welcome => vec![Section(First)],
        Section(First) => vec![Section(Second)],
        Section(Second) => vec![Section(First), Section(Third)],
        Section(Third) => vec![Section(Second), Results],
        // Retake
        Results => vec![Section(First)],
    }
}

fn allowed(from: WizardState, to: WizardState) -> bool {
    allowed_transitions(from).into_iter().any(|s| s == to)
}
