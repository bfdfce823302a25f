//! Scripted navigation scenarios
//!
//! Walks a single wizard through the page flow and records one named check
//! per observable behavior: button gating, progress text, answer
//! preservation and the retake reset.

use crate::session::parse_percent;
use serde::Serialize;
use std::fmt;
use std::ops::RangeInclusive;
use telos_engine::EngineConfig;
use telos_wizard::{SectionId, Wizard, WizardError, WizardState};

/// One named check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationCheck {
    pub group: &'static str,
    pub name: &'static str,
    pub passed: bool,
    /// Why the check failed
    pub detail: Option<String>,
}

/// Checks recorded by one scenario
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationReport {
    pub title: &'static str,
    pub checks: Vec<NavigationCheck>,
}

impl NavigationReport {
    pub fn total(&self) -> usize {
        self.checks.len()
    }

    pub fn passed_count(&self) -> usize {
        self.checks.iter().filter(|c| c.passed).count()
    }

    pub fn failed_count(&self) -> usize {
        self.total() - self.passed_count()
    }

    #[allow(clippy::cast_precision_loss)]
    pub fn pass_rate(&self) -> f64 {
        if self.checks.is_empty() {
            return 0.0;
        }
        self.passed_count() as f64 / self.total() as f64 * 100.0
    }

    pub fn passed(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }

    pub fn failures(&self) -> impl Iterator<Item = &NavigationCheck> {
        self.checks.iter().filter(|c| !c.passed)
    }

    pub fn generate_text(&self) -> String {
        self.to_string()
    }

    /// # Errors
    /// Serialization failure from `serde_json`.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for NavigationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== {} ===", self.title)?;
        let mut group = "";
        for c in &self.checks {
            if c.group != group {
                group = c.group;
                writeln!(f, "\n{group}")?;
            }
            match (&c.detail, c.passed) {
                (_, true) => writeln!(f, "  ok   {}", c.name)?,
                (Some(detail), false) => writeln!(f, "  FAIL {}: {detail}", c.name)?,
                (None, false) => writeln!(f, "  FAIL {}", c.name)?,
            }
        }
        writeln!(f)?;
        writeln!(f, "Checks Passed: {}", self.passed_count())?;
        writeln!(f, "Checks Failed: {}", self.failed_count())?;
        writeln!(f, "Total Checks: {}", self.total())?;
        writeln!(f, "Pass Rate: {:.1}%", self.pass_rate())?;
        writeln!(f, "\n=== Result: {} ===", if self.passed() { "PASS" } else { "FAIL" })
    }
}

struct Recorder {
    title: &'static str,
    group: &'static str,
    checks: Vec<NavigationCheck>,
}

impl Recorder {
    fn new(title: &'static str) -> Self {
        Self {
            title,
            group: "",
            checks: Vec::new(),
        }
    }

    fn group(&mut self, group: &'static str) {
        self.group = group;
    }

    fn push(&mut self, name: &'static str, detail: Option<String>) {
        let passed = detail.is_none();
        if let Some(detail) = &detail {
            tracing::warn!(group = self.group, "Check failed: {}: {}", name, detail);
        }
        self.checks.push(NavigationCheck {
            group: self.group,
            name,
            passed,
            detail,
        });
    }

    fn check(&mut self, name: &'static str, passed: bool) {
        self.push(name, (!passed).then(|| "condition not met".to_string()));
    }

    fn check_eq<T: PartialEq + fmt::Debug>(&mut self, name: &'static str, actual: T, expected: T) {
        let detail = (actual != expected).then(|| format!("expected {expected:?}, got {actual:?}"));
        self.push(name, detail);
    }

    fn step<T>(&mut self, name: &'static str, result: Result<T, WizardError>) {
        self.push(name, result.err().map(|e| e.to_string()));
    }

    fn transition(&mut self, name: &'static str, result: Result<WizardState, WizardError>, expected: WizardState) {
        match result {
            Ok(state) => self.check_eq(name, state, expected),
            Err(e) => self.push(name, Some(e.to_string())),
        }
    }

    fn finish(self) -> NavigationReport {
        let report = NavigationReport {
            title: self.title,
            checks: self.checks,
        };
        tracing::info!(
            passed = report.passed_count(),
            failed = report.failed_count(),
            "{} complete",
            report.title
        );
        report
    }
}

fn answer_range(wizard: &mut Wizard, mut questions: RangeInclusive<u8>, value: u8) -> Result<(), WizardError> {
    questions.try_for_each(|q| wizard.answer(q, value))
}

/// Full navigation scenario: initial state, partial answering, gating,
/// backward navigation, results, retake and edge cases
pub fn run_navigation_scenario(config: &EngineConfig) -> NavigationReport {
    let mut rec = Recorder::new("TELOS Navigation Scenario");
    let mut wizard = Wizard::new(*config);

    rec.group("Initial state");
    rec.check_eq("welcome page is showing", wizard.state(), WizardState::Welcome);
    rec.check("progress is hidden", !wizard.progress_visible());
    rec.check("results are hidden", wizard.results_view().is_none());

    rec.group("Starting the assessment");
    rec.transition("begin moves to section 1", wizard.begin(), WizardState::Section(SectionId::First));
    rec.check("progress becomes visible", wizard.progress_visible());
    rec.check(
        "previous is disabled in section 1",
        !wizard.previous_enabled() && wizard.previous().is_err(),
    );
    rec.check("next is disabled without answers", !wizard.next_enabled());

    rec.group("Partial answering");
    rec.step("answer question 1", wizard.answer(1, 3));
    rec.check("next stays disabled with 1 of 5 answered", !wizard.next_enabled());
    rec.step("answer questions 2 to 4", answer_range(&mut wizard, 2..=4, 3));
    rec.check("next stays disabled with 4 of 5 answered", !wizard.next_enabled());
    rec.check("next is refused with 4 of 5 answered", wizard.next().is_err());
    rec.check_eq("progress shows 4 of 15", wizard.progress_text().as_str(), "4 of 15");

    rec.group("Section navigation");
    rec.step("answer question 5", wizard.answer(5, 3));
    rec.check("next enables when section is complete", wizard.next_enabled());
    rec.transition("next moves to section 2", wizard.next(), WizardState::Section(SectionId::Second));
    rec.check(
        "section 1 no longer showing",
        wizard.state() != WizardState::Section(SectionId::First),
    );
    rec.check("previous is enabled in section 2", wizard.previous_enabled());

    rec.group("Backward navigation");
    rec.transition(
        "previous returns to section 1",
        wizard.previous(),
        WizardState::Section(SectionId::First),
    );
    rec.check(
        "answers are preserved going back",
        (1..=5).all(|q| wizard.answer_for(q) == Some(3)),
    );
    rec.transition(
        "next returns to section 2",
        wizard.next(),
        WizardState::Section(SectionId::Second),
    );

    rec.group("Completing all sections");
    rec.step("answer section 2", answer_range(&mut wizard, 6..=10, 4));
    rec.transition("next moves to section 3", wizard.next(), WizardState::Section(SectionId::Third));
    rec.step("answer section 3", answer_range(&mut wizard, 11..=15, 2));
    rec.check_eq("progress shows 15 of 15", wizard.progress_text().as_str(), "15 of 15");
    rec.check("view results is enabled", wizard.next_enabled());

    rec.group("Results");
    rec.transition("next moves to results", wizard.next(), WizardState::Results);
    rec.check("progress is hidden on results", !wizard.progress_visible());
    rec.check(
        "only results are showing",
        wizard.state().section().is_none() && wizard.results_view().is_some(),
    );

    rec.group("Retake");
    rec.transition(
        "retake moves to section 1",
        wizard.retake(),
        WizardState::Section(SectionId::First),
    );
    rec.check_eq("answers are cleared", wizard.answered_count(), 0);
    rec.check("next is disabled after retake", !wizard.next_enabled());
    rec.check_eq("progress resets to 0 of 15", wizard.progress_text().as_str(), "0 of 15");

    rec.group("Edge cases");
    let rapid = [1, 5, 2, 4, 3].into_iter().try_for_each(|v| wizard.answer(1, v));
    rec.step("rapid answer changes are accepted", rapid);
    rec.check_eq("last rapid answer wins", wizard.answer_for(1), Some(3));
    let flow = [1..=5u8, 6..=10, 11..=15].into_iter().try_for_each(|questions| {
        answer_range(&mut wizard, questions, 4)?;
        wizard.next().map(|_| ())
    });
    let flow = flow.map(|()| wizard.state());
    rec.transition("answering everything completes the flow", flow, WizardState::Results);

    rec.finish()
}

/// Single pass through the assessment with every answer 3
pub fn run_sanity_flow(config: &EngineConfig) -> NavigationReport {
    let mut rec = Recorder::new("TELOS Sanity Flow");
    rec.group("Sanity");

    let mut wizard = Wizard::new(*config);
    rec.check_eq("session created", wizard.answered_count(), 0);
    rec.check_eq("welcome page is showing", wizard.state(), WizardState::Welcome);
    rec.transition("assessment started", wizard.begin(), WizardState::Section(SectionId::First));
    rec.step("section 1 answered", answer_range(&mut wizard, 1..=5, 3));
    rec.check("next is enabled", wizard.next_enabled());
    rec.transition("section 2 showing", wizard.next(), WizardState::Section(SectionId::Second));
    rec.step("section 2 answered", answer_range(&mut wizard, 6..=10, 3));
    rec.transition("section 3 showing", wizard.next(), WizardState::Section(SectionId::Third));
    rec.step("section 3 answered", answer_range(&mut wizard, 11..=15, 3));
    rec.transition("results showing", wizard.next(), WizardState::Results);

    let view = wizard.results_view();
    let scores = view.as_ref().map(|v| {
        [&v.stability_score, &v.liquidity_score, &v.return_score]
            .into_iter()
            .all(|s| parse_percent(s).is_ok())
    });
    rec.check_eq("scores are displayed", scores, Some(true));
    let inside = view.as_ref().map(|v| config.triangle.contains_position(&v.position));
    rec.check_eq("triangle point is inside the reference triangle", inside, Some(true));
    let allocation = view.as_ref().map(|v| {
        [&v.banking_percent, &v.private_percent, &v.stocks_percent]
            .into_iter()
            .map(|s| parse_percent(s))
            .sum::<Result<u32, _>>()
            .ok()
    });
    rec.check_eq("allocation is displayed", allocation, Some(Some(100)));

    rec.transition("retake moves to section 1", wizard.retake(), WizardState::Section(SectionId::First));
    rec.check_eq("answers are cleared on retake", wizard.answered_count(), 0);

    rec.finish()
}
