//! TELOS Assessment Wizard (telos-wizard)
//!
//! The page flow around the scoring engine as an explicit state machine:
//!
//! ```text
//! Welcome -> Section 1 <-> Section 2 <-> Section 3 -> Results
//!               ^                                       |
//!               +---------------- retake ---------------+
//! ```
//!
//! Forward moves require every question on the current page to be answered.
//! Scoring happens once, when leaving the third section.
//!
//! # Example
//!
//! ```rust
//! use telos_wizard::{Wizard, WizardState};
//!
//! let mut wizard = Wizard::default();
//! wizard.begin()?;
//! for question in 1..=15 {
//!     wizard.answer(question, 3)?;
//!     if question % 5 == 0 {
//!         wizard.next()?;
//!     }
//! }
//! assert_eq!(wizard.state(), WizardState::Results);
//! assert_eq!(wizard.results_view().unwrap().stability_score, "33%");
//! # Ok::<(), telos_wizard::WizardError>(())
//! ```

#![allow(missing_docs)]

pub mod error;
pub mod state;
pub mod view;
pub mod wizard;

pub use error::WizardError;
pub use state::{allowed_transitions, validate_transition, SectionId, WizardState};
pub use view::ResultsView;
pub use wizard::{Wizard, WizardEvent};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
