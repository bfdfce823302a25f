//! TELOS Simulator - randomized end-to-end checks of the assessment
//!
//! Each run draws fifteen answers from a seeded RNG, clicks through a full
//! wizard session, reads the rendered `"<n>%"` figures back and compares
//! them against an expectation computed independently of the engine.

use crate::error::HarnessError;
use crate::session::{drive_session, parse_percent};
use futures::future::join_all;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use telos_engine::{EngineConfig, Point, MAX_ANSWER, MIN_ANSWER, QUESTION_COUNT, SECTION_SIZE};

/// Simulator configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SimulatorConfig {
    /// Random seed for reproducibility
    pub seed: u64,
    /// Number of sessions to run
    pub runs: usize,
    /// Sessions in flight together in batched mode
    pub batch_size: usize,
    /// Allowed distance between displayed and expected scores
    pub score_tolerance: u32,
    /// Scoring configuration every session uses
    pub engine: EngineConfig,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            runs: 100,
            batch_size: 10,
            score_tolerance: 2,
            engine: EngineConfig::default(),
        }
    }
}

impl SimulatorConfig {
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_runs(mut self, runs: usize) -> Self {
        self.runs = runs;
        self
    }

    #[must_use]
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    #[must_use]
    pub fn with_score_tolerance(mut self, tolerance: u32) -> Self {
        self.score_tolerance = tolerance;
        self
    }

    #[must_use]
    pub fn with_engine(mut self, engine: EngineConfig) -> Self {
        self.engine = engine;
        self
    }
}

/// Three category scores as whole percentages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Scores {
    pub stability: u32,
    pub liquidity: u32,
    #[serde(rename = "return")]
    pub return_score: u32,
}

impl Scores {
    pub fn sum(&self) -> u32 {
        self.stability + self.liquidity + self.return_score
    }

    /// Every score within `tolerance` of the matching score in `other`
    pub fn within(&self, other: &Scores, tolerance: u32) -> bool {
        self.stability.abs_diff(other.stability) <= tolerance
            && self.liquidity.abs_diff(other.liquidity) <= tolerance
            && self.return_score.abs_diff(other.return_score) <= tolerance
    }

    fn all_in_range(&self) -> bool {
        [self.stability, self.liquidity, self.return_score]
            .iter()
            .all(|s| *s <= 100)
    }
}

impl fmt::Display for Scores {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S={}%, L={}%, R={}%", self.stability, self.liquidity, self.return_score)
    }
}

/// Rendered asset allocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Allocation {
    pub banking: u32,
    pub private: u32,
    pub stocks: u32,
}

impl Allocation {
    pub fn sum(&self) -> u32 {
        self.banking + self.private + self.stocks
    }
}

impl fmt::Display for Allocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Banking={}%, Private={}%, Stocks={}%",
            self.banking, self.private, self.stocks
        )
    }
}

/// Outcome of each check made against one session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct RunChecks {
    /// Displayed scores within tolerance of the expectation
    pub valid_scores: bool,
    /// Displayed scores sum to 99..=101
    pub valid_total: bool,
    /// Each displayed score in 0..=100
    pub valid_range: bool,
    /// Displayed allocation sums to exactly 100
    pub valid_allocation: bool,
    /// Triangle point inside the reference triangle
    pub valid_position: bool,
}

impl RunChecks {
    pub fn all(&self) -> bool {
        self.valid_scores && self.valid_total && self.valid_range && self.valid_allocation && self.valid_position
    }
}

/// What a completed session showed
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RunObservation {
    pub expected: Scores,
    pub displayed: Scores,
    pub allocation: Allocation,
    pub point: Point,
    pub checks: RunChecks,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RunOutcome {
    /// Session reached the results page
    Completed(RunObservation),
    /// A step failed before results were rendered
    Errored { message: String },
}

/// One simulated session
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunResult {
    /// One-based run number
    pub run: usize,
    pub answers: [u8; QUESTION_COUNT],
    pub outcome: RunOutcome,
}

impl RunResult {
    pub fn passed(&self) -> bool {
        matches!(&self.outcome, RunOutcome::Completed(obs) if obs.checks.all())
    }

    /// Rendered scores, for completed runs
    pub fn displayed(&self) -> Option<Scores> {
        match &self.outcome {
            RunOutcome::Completed(obs) => Some(obs.displayed),
            RunOutcome::Errored { .. } => None,
        }
    }
}

/// Min, max and mean of one score over the passed runs
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Spread {
    pub min: u32,
    pub max: u32,
    pub avg: f64,
}

impl Spread {
    #[allow(clippy::cast_precision_loss)]
    fn of(values: &[u32]) -> Option<Self> {
        let min = *values.iter().min()?;
        let max = *values.iter().max()?;
        let total: u64 = values.iter().map(|v| u64::from(*v)).sum();
        Some(Self {
            min,
            max,
            avg: total as f64 / values.len() as f64,
        })
    }
}

impl fmt::Display for Spread {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Min={}%, Max={}%, Avg={:.1}%", self.min, self.max, self.avg)
    }
}

/// Score distribution over the passed runs
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreDistribution {
    pub stability: Spread,
    pub liquidity: Spread,
    #[serde(rename = "return")]
    pub return_score: Spread,
}

/// Final report from the simulator
#[derive(Debug, Clone, PartialEq)]
pub struct SimulatorReport {
    pub config: SimulatorConfig,
    pub results: Vec<RunResult>,
}

impl SimulatorReport {
    pub fn total(&self) -> usize {
        self.results.len()
    }

    pub fn passed_count(&self) -> usize {
        self.results.iter().filter(|r| r.passed()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.total() - self.passed_count()
    }

    /// Percentage of runs that passed, 0 for an empty report
    #[allow(clippy::cast_precision_loss)]
    pub fn pass_rate(&self) -> f64 {
        if self.results.is_empty() {
            return 0.0;
        }
        self.passed_count() as f64 / self.total() as f64 * 100.0
    }

    /// Check if every run passed
    pub fn passed(&self) -> bool {
        self.results.iter().all(RunResult::passed)
    }

    pub fn failed_runs(&self) -> impl Iterator<Item = &RunResult> {
        self.results.iter().filter(|r| !r.passed())
    }

    /// `None` when no run passed
    pub fn distribution(&self) -> Option<ScoreDistribution> {
        let passed: Vec<Scores> = self
            .results
            .iter()
            .filter(|r| r.passed())
            .filter_map(RunResult::displayed)
            .collect();
        let column = |pick: fn(&Scores) -> u32| passed.iter().map(pick).collect::<Vec<_>>();
        Some(ScoreDistribution {
            stability: Spread::of(&column(|s| s.stability))?,
            liquidity: Spread::of(&column(|s| s.liquidity))?,
            return_score: Spread::of(&column(|s| s.return_score))?,
        })
    }

    /// Generate a text report
    pub fn generate_text(&self) -> String {
        self.to_string()
    }

    /// Summary, failed runs and distribution as pretty JSON
    ///
    /// # Errors
    /// Serialization failure from `serde_json`.
    pub fn to_json(&self) -> serde_json::Result<String> {
        let failures: Vec<&RunResult> = self.failed_runs().collect();
        serde_json::to_string_pretty(&serde_json::json!({
            "seed": self.config.seed,
            "runs": self.total(),
            "passed": self.passed_count(),
            "failed": self.failed_count(),
            "pass_rate": self.pass_rate(),
            "result": if self.passed() { "PASS" } else { "FAIL" },
            "failures": failures,
            "distribution": self.distribution(),
        }))
    }
}

impl fmt::Display for SimulatorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== TELOS Simulator Report ===\n")?;
        writeln!(f, "Seed: {}", self.config.seed)?;
        writeln!(f, "Total Runs: {}", self.total())?;
        writeln!(f, "Passed: {}", self.passed_count())?;
        writeln!(f, "Failed: {}", self.failed_count())?;
        writeln!(f, "Pass Rate: {:.1}%", self.pass_rate())?;

        if !self.passed() {
            writeln!(f, "\n=== Failed Runs ===")?;
            for r in self.failed_runs() {
                let answers: Vec<String> = r.answers.iter().map(ToString::to_string).collect();
                writeln!(f, "\nRun #{}:", r.run)?;
                writeln!(f, "  Answers: [{}]", answers.join(", "))?;
                match &r.outcome {
                    RunOutcome::Errored { message } => writeln!(f, "  Error: {message}")?,
                    RunOutcome::Completed(obs) => {
                        writeln!(f, "  Expected: {}", obs.expected)?;
                        writeln!(f, "  Displayed: {}", obs.displayed)?;
                        writeln!(
                            f,
                            "  Valid Scores: {}, Valid Total: {}, Valid Range: {}",
                            obs.checks.valid_scores, obs.checks.valid_total, obs.checks.valid_range
                        )?;
                        writeln!(f, "  Allocation: {}", obs.allocation)?;
                        writeln!(f, "  Valid Allocation: {}", obs.checks.valid_allocation)?;
                        writeln!(
                            f,
                            "  Point: ({:.2}, {:.2}), Valid Position: {}",
                            obs.point.x, obs.point.y, obs.checks.valid_position
                        )?;
                    }
                }
            }
        }

        if let Some(dist) = self.distribution() {
            writeln!(f, "\n=== Score Distribution ===")?;
            writeln!(f, "Stability:  {}", dist.stability)?;
            writeln!(f, "Liquidity:  {}", dist.liquidity)?;
            writeln!(f, "Return:     {}", dist.return_score)?;
        }

        writeln!(f, "\n=== Result: {} ===", if self.passed() { "PASS" } else { "FAIL" })
    }
}

/// Fifteen answers, each uniform in 1..=5
pub fn generate_answers(rng: &mut StdRng) -> [u8; QUESTION_COUNT] {
    let mut answers = [0; QUESTION_COUNT];
    for a in &mut answers {
        *a = rng.gen_range(MIN_ANSWER..=MAX_ANSWER);
    }
    answers
}

/// Rounded share of each category sum, computed without the engine
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn expected_scores(answers: &[u8; QUESTION_COUNT]) -> Scores {
    let sums: Vec<u32> = answers
        .chunks(SECTION_SIZE)
        .map(|c| c.iter().map(|a| u32::from(*a)).sum())
        .collect();
    let total = f64::from(sums.iter().sum::<u32>());
    let share = |part: u32| (f64::from(part) / total * 100.0).round() as u32;
    Scores {
        stability: share(sums[0]),
        liquidity: share(sums[1]),
        return_score: share(sums[2]),
    }
}

/// Drive one session and check what it rendered
pub fn run_session(run: usize, answers: [u8; QUESTION_COUNT], config: &SimulatorConfig) -> RunResult {
    let outcome = match observe(&answers, config) {
        Ok(obs) => RunOutcome::Completed(obs),
        Err(e) => RunOutcome::Errored { message: e.to_string() },
    };
    let result = RunResult { run, answers, outcome };
    if !result.passed() {
        tracing::warn!(run, answers = ?result.answers, "Run failed: {:?}", result.outcome);
    }
    result
}

fn observe(answers: &[u8; QUESTION_COUNT], config: &SimulatorConfig) -> Result<RunObservation, HarnessError> {
    let view = drive_session(answers, &config.engine)?;
    let displayed = Scores {
        stability: parse_percent(&view.stability_score)?,
        liquidity: parse_percent(&view.liquidity_score)?,
        return_score: parse_percent(&view.return_score)?,
    };
    let allocation = Allocation {
        banking: parse_percent(&view.banking_percent)?,
        private: parse_percent(&view.private_percent)?,
        stocks: parse_percent(&view.stocks_percent)?,
    };
    let expected = expected_scores(answers);
    let point = view.position.point;
    let checks = RunChecks {
        valid_scores: displayed.within(&expected, config.score_tolerance),
        valid_total: (99..=101).contains(&displayed.sum()),
        valid_range: displayed.all_in_range(),
        valid_allocation: allocation.sum() == 100,
        valid_position: config.engine.triangle.contains_position(&view.position),
    };
    Ok(RunObservation {
        expected,
        displayed,
        allocation,
        point,
        checks,
    })
}

/// Every run's answers, drawn up front so results never depend on scheduling
fn generate_runs(config: &SimulatorConfig) -> Vec<[u8; QUESTION_COUNT]> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    (0..config.runs).map(|_| generate_answers(&mut rng)).collect()
}

fn finish(config: SimulatorConfig, results: Vec<RunResult>) -> SimulatorReport {
    let report = SimulatorReport { config, results };
    tracing::info!(
        seed = config.seed,
        passed = report.passed_count(),
        failed = report.failed_count(),
        "Simulation complete"
    );
    report
}

/// Run the TELOS Simulator one session at a time
pub fn run_simulator(config: SimulatorConfig) -> SimulatorReport {
    let results = generate_runs(&config)
        .into_iter()
        .enumerate()
        .map(|(i, answers)| run_session(i + 1, answers, &config))
        .collect();
    finish(config, results)
}

/// Run the TELOS Simulator in batches of `batch_size` concurrent tasks
///
/// A batch completes before the next one starts. Results are identical to
/// [`run_simulator`] with the same configuration.
///
/// # Errors
/// [`HarnessError::InvalidBatchSize`] for a zero batch size and
/// [`HarnessError::Task`] if a session task panics.
pub async fn run_batched(config: SimulatorConfig) -> Result<SimulatorReport, HarnessError> {
    if config.batch_size == 0 {
        return Err(HarnessError::InvalidBatchSize);
    }
    let shared = Arc::new(config);
    let runs = generate_runs(&config);
    let mut results = Vec::with_capacity(runs.len());

    for (batch, chunk) in runs.chunks(config.batch_size).enumerate() {
        let tasks = chunk.iter().enumerate().map(|(offset, &answers)| {
            let run = batch * config.batch_size + offset + 1;
            let config = Arc::clone(&shared);
            tokio::spawn(async move { run_session(run, answers, &config) })
        });
        for joined in join_all(tasks).await {
            results.push(joined?);
        }
        tracing::debug!(batch = batch + 1, completed = results.len(), "Batch complete");
    }

    Ok(finish(config, results))
}
