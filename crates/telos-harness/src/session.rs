//! Drives one wizard session the way a user would click through it

use crate::error::HarnessError;
use telos_engine::{EngineConfig, QUESTION_COUNT, SECTION_SIZE};
use telos_wizard::{ResultsView, Wizard};

/// Answer every question in order, advancing after each full page
///
/// # Errors
/// The first wizard step that fails, or [`HarnessError::MissingResults`].
pub fn drive_session(answers: &[u8; QUESTION_COUNT], config: &EngineConfig) -> Result<ResultsView, HarnessError> {
    let mut wizard = Wizard::new(*config);
    wizard.begin()?;
    for (question, &value) in (1u8..).zip(answers.iter()) {
        wizard.answer(question, value)?;
        if usize::from(question) % SECTION_SIZE == 0 {
            wizard.next()?;
        }
    }
    wizard.results_view().ok_or(HarnessError::MissingResults)
}

/// Parse a rendered `"<n>%"` figure
///
/// # Errors
/// [`HarnessError::DisplayParse`] for anything else.
pub fn parse_percent(text: &str) -> Result<u32, HarnessError> {
    text.strip_suffix('%')
        .and_then(|n| n.parse().ok())
        .ok_or_else(|| HarnessError::DisplayParse { text: text.to_string() })
}
