//! Text the results page renders for an assessment

use serde::Serialize;
use telos_engine::{Assessment, TrianglePosition};

/// Rendered results, one `"<n>%"` string per displayed figure
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultsView {
    pub stability_score: String,
    pub liquidity_score: String,
    pub return_score: String,
    pub banking_percent: String,
    pub private_percent: String,
    pub stocks_percent: String,
    /// Handed to the canvas collaborator as-is
    pub position: TrianglePosition,
}

impl From<&Assessment> for ResultsView {
    fn from(assessment: &Assessment) -> Self {
        let [stability_score, liquidity_score, return_score] = assessment.percentages.display();
        let [banking_percent, private_percent, stocks_percent] = assessment.allocation.display();
        Self {
            stability_score,
            liquidity_score,
            return_score,
            banking_percent,
            private_percent,
            stocks_percent,
            position: assessment.position,
        }
    }
}
