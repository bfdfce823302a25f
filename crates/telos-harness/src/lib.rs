//! TELOS Verification Harness (telos-harness)
//!
//! End-to-end checks of the assessment through the wizard:
//! - **Simulator**: seeded random sessions, sequential or in concurrent batches
//! - **Navigation scenario**: named checks over the page flow
//! - **Sanity flow**: one complete pass with every answer 3
//!
//! # Example
//!
//! ```rust
//! use telos_harness::{run_simulator, SimulatorConfig};
//!
//! let report = run_simulator(SimulatorConfig::default().with_runs(20));
//! assert!(report.passed());
//! assert_eq!(report.total(), 20);
//! ```

#![allow(missing_docs)]

pub mod error;
pub mod navigation;
pub mod session;
pub mod simulator;

pub use error::HarnessError;
pub use navigation::{run_navigation_scenario, run_sanity_flow, NavigationCheck, NavigationReport};
pub use session::{drive_session, parse_percent};
pub use simulator::{
    expected_scores, generate_answers, run_batched, run_session, run_simulator, Allocation, RunChecks,
    RunObservation, RunOutcome, RunResult, ScoreDistribution, Scores, SimulatorConfig, SimulatorReport, Spread,
};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
