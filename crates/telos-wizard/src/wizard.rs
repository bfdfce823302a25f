//! Assessment wizard
//!
//! Holds the in-progress answers and the current page. Every page change
//! goes through [`validate_transition`]; forward moves are additionally
//! gated on the current page being fully answered.

use crate::error::WizardError;
use crate::state::{validate_transition, SectionId, WizardState};
use crate::view::ResultsView;
use telos_engine::{
    assess, AnswerSet, Assessment, Category, EngineConfig, MAX_ANSWER, MIN_ANSWER, QUESTION_COUNT,
    SECTION_SIZE,
};

/// Input accepted by [`Wizard::handle`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardEvent {
    /// Leave the welcome page
    Begin,
    /// Select option `value` for one-based `question`
    Answer { question: u8, value: u8 },
    /// Go to the following page (or results)
    Next,
    /// Go back one page
    Previous,
    /// Discard everything and start over from the first section
    Retake,
}

/// One assessment session
#[derive(Debug, Clone)]
pub struct Wizard {
    state: WizardState,
    answers: [Option<u8>; QUESTION_COUNT],
    config: EngineConfig,
    assessment: Option<Assessment>,
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl Wizard {
    /// New session on the welcome page
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self {
            state: WizardState::Welcome,
            answers: [None; QUESTION_COUNT],
            config,
            assessment: None,
        }
    }

    /// Current page
    #[inline]
    #[must_use]
    pub const fn state(&self) -> WizardState {
        self.state
    }

    /// Dispatch an event
    ///
    /// # Errors
    /// Whatever the matching method returns.
    pub fn handle(&mut self, event: WizardEvent) -> Result<WizardState, WizardError> {
        match event {
            WizardEvent::Begin => self.begin(),
            WizardEvent::Answer { question, value } => self.answer(question, value).map(|()| self.state),
            WizardEvent::Next => self.next(),
            WizardEvent::Previous => self.previous(),
            WizardEvent::Retake => self.retake(),
        }
    }

    /// Welcome -> first section
    ///
    /// # Errors
    /// [`WizardError::IllegalTransition`] outside the welcome page.
    pub fn begin(&mut self) -> Result<WizardState, WizardError> {
        self.enter(WizardState::Section(SectionId::First))
    }

    /// Record an answer for a question on the current page
    ///
    /// Answering again replaces the earlier choice.
    ///
    /// # Errors
    /// [`WizardError::InvalidQuestion`] or [`WizardError::InvalidAnswer`] for
    /// out-of-range input, [`WizardError::EventNotAllowed`] off the section
    /// pages, [`WizardError::QuestionOutOfSection`] for a question on another
    /// page.
    pub fn answer(&mut self, question: u8, value: u8) -> Result<(), WizardError> {
        let category = Category::for_question(question).ok_or(WizardError::InvalidQuestion(question))?;
        if !(MIN_ANSWER..=MAX_ANSWER).contains(&value) {
            return Err(WizardError::InvalidAnswer { question, value });
        }
        let section = self.state.section().ok_or(WizardError::EventNotAllowed {
            event: "answer",
            state: self.state,
        })?;
        if section.category() != category {
            return Err(WizardError::QuestionOutOfSection {
                question,
                state: self.state,
            });
        }
        self.answers[usize::from(question) - 1] = Some(value);
        tracing::debug!("Question {} answered with {}", question, value);
        Ok(())
    }

    /// Forward one page; leaving the third section scores the answers
    ///
    /// # Errors
    /// [`WizardError::SectionIncomplete`] until all five questions on the page
    /// are answered, [`WizardError::EventNotAllowed`] off the section pages.
    pub fn next(&mut self) -> Result<WizardState, WizardError> {
        let section = self.state.section().ok_or(WizardError::EventNotAllowed {
            event: "next",
            state: self.state,
        })?;
        let answered = self.section_answered(section);
        if answered < SECTION_SIZE {
            return Err(WizardError::SectionIncomplete {
                section,
                answered,
                required: SECTION_SIZE,
            });
        }
        match section.next() {
            Some(following) => self.enter(WizardState::Section(following)),
            None => {
                let assessment = assess(&self.answer_set()?, &self.config);
                tracing::info!("Assessment complete: {}", assessment);
                self.assessment = Some(assessment);
                self.enter(WizardState::Results)
            }
        }
    }

    /// Back one page, keeping every answer
    ///
    /// # Errors
    /// [`WizardError::IllegalTransition`] on the first section,
    /// [`WizardError::EventNotAllowed`] off the section pages.
    pub fn previous(&mut self) -> Result<WizardState, WizardError> {
        let section = self.state.section().ok_or(WizardError::EventNotAllowed {
            event: "previous",
            state: self.state,
        })?;
        match section.previous() {
            Some(prior) => self.enter(WizardState::Section(prior)),
            None => Err(WizardError::IllegalTransition {
                from: self.state,
                to: WizardState::Welcome,
            }),
        }
    }

    /// Results -> first section with every answer cleared
    ///
    /// # Errors
    /// [`WizardError::EventNotAllowed`] anywhere but the results page.
    pub fn retake(&mut self) -> Result<WizardState, WizardError> {
        if self.state != WizardState::Results {
            return Err(WizardError::EventNotAllowed {
                event: "retake",
                state: self.state,
            });
        }
        self.answers = [None; QUESTION_COUNT];
        self.assessment = None;
        self.enter(WizardState::Section(SectionId::First))
    }

    fn enter(&mut self, to: WizardState) -> Result<WizardState, WizardError> {
        validate_transition(self.state, to)?;
        tracing::info!("Wizard {} -> {}", self.state, to);
        self.state = to;
        Ok(to)
    }

    fn answer_set(&self) -> Result<AnswerSet, WizardError> {
        let raw: Vec<u8> = self.answers.iter().map(|a| a.unwrap_or(0)).collect();
        AnswerSet::new(&raw).map_err(|e| WizardError::Engine(e.into()))
    }

    /// Selected option for a one-based question, if any
    #[must_use]
    pub fn answer_for(&self, question: u8) -> Option<u8> {
        Category::for_question(question).and_then(|_| self.answers[usize::from(question) - 1])
    }

    /// Answered questions across all pages
    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.answers.iter().filter(|a| a.is_some()).count()
    }

    /// Answered questions on one page
    #[must_use]
    pub fn section_answered(&self, section: SectionId) -> usize {
        self.answers[section.category().index_range()]
            .iter()
            .filter(|a| a.is_some())
            .count()
    }

    /// Progress bar text, e.g. `"4 of 15"`
    #[must_use]
    pub fn progress_text(&self) -> String {
        format!("{} of {}", self.answered_count(), QUESTION_COUNT)
    }

    /// Progress bar shows only while answering
    #[inline]
    #[must_use]
    pub const fn progress_visible(&self) -> bool {
        matches!(self.state, WizardState::Section(_))
    }

    /// Whether the page's forward button is enabled
    #[must_use]
    pub fn next_enabled(&self) -> bool {
        self.state
            .section()
            .is_some_and(|s| self.section_answered(s) == SECTION_SIZE)
    }

    /// Whether the page's back button is enabled
    #[must_use]
    pub fn previous_enabled(&self) -> bool {
        self.state.section().and_then(SectionId::previous).is_some()
    }

    /// Scored result, present only on the results page
    #[inline]
    #[must_use]
    pub fn assessment(&self) -> Option<&Assessment> {
        self.assessment.as_ref()
    }

    /// Rendered results, present only on the results page
    #[must_use]
    pub fn results_view(&self) -> Option<ResultsView> {
        self.assessment.as_ref().map(ResultsView::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answer_section(wizard: &mut Wizard, section: SectionId, value: u8) {
        for q in section.category().questions() {
            wizard.answer(q, value).unwrap();
        }
    }

    #[test]
    fn begins_on_welcome() {
        let wizard = Wizard::default();
        assert_eq!(wizard.state(), WizardState::Welcome);
        assert!(!wizard.progress_visible());
        assert!(wizard.assessment().is_none());
    }

    #[test]
    fn answer_rejects_bad_input_without_recording() {
        let mut wizard = Wizard::default();
        wizard.begin().unwrap();
        assert!(matches!(wizard.answer(0, 3), Err(WizardError::InvalidQuestion(0))));
        assert!(matches!(wizard.answer(16, 3), Err(WizardError::InvalidQuestion(16))));
        assert!(matches!(
            wizard.answer(1, 6),
            Err(WizardError::InvalidAnswer { question: 1, value: 6 })
        ));
        assert!(matches!(
            wizard.answer(6, 3),
            Err(WizardError::QuestionOutOfSection { question: 6, .. })
        ));
        assert_eq!(wizard.answered_count(), 0);
    }

    #[test]
    fn answer_off_section_pages_is_rejected() {
        let mut wizard = Wizard::default();
        assert!(matches!(
            wizard.answer(1, 3),
            Err(WizardError::EventNotAllowed { event: "answer", .. })
        ));
    }

    #[test]
    fn completing_third_section_scores() {
        let mut wizard = Wizard::default();
        wizard.begin().unwrap();
        for section in SectionId::ALL {
            answer_section(&mut wizard, section, 3);
            wizard.next().unwrap();
        }
        assert_eq!(wizard.state(), WizardState::Results);
        let assessment = wizard.assessment().unwrap();
        assert_eq!(assessment.percentages.sum(), 99);
        assert_eq!(wizard.results_view().unwrap().stability_score, "33%");
    }

    #[test]
    fn retake_only_from_results() {
        let mut wizard = Wizard::default();
        assert!(wizard.retake().is_err());
        wizard.begin().unwrap();
        assert!(wizard.retake().is_err());
    }
}
