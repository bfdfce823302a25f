//! Testing utilities for TELOS workspace
//!
//! Shared answer fixtures and proptest strategies.

#![allow(missing_docs)]

use proptest::prelude::*;
use telos_engine::{AnswerSet, Category, EngineConfig, ScorePercentages, QUESTION_COUNT, SECTION_SIZE};

/// Build an answer set from per-category values repeated five times
pub fn sectioned_answers(stability: u8, liquidity: u8, ret: u8) -> AnswerSet {
    let mut raw = Vec::with_capacity(QUESTION_COUNT);
    for value in [stability, liquidity, ret] {
        raw.extend(std::iter::repeat(value).take(SECTION_SIZE));
    }
    AnswerSet::new(&raw).unwrap()
}

pub fn all_threes() -> AnswerSet {
    AnswerSet::uniform(3).unwrap()
}

pub fn all_ones() -> AnswerSet {
    AnswerSet::uniform(1).unwrap()
}

pub fn all_fives() -> AnswerSet {
    AnswerSet::uniform(5).unwrap()
}

/// Stability maxed, the rest minimal
pub fn stability_skewed() -> AnswerSet {
    sectioned_answers(5, 1, 1)
}

/// Return maxed, the rest minimal
pub fn return_skewed() -> AnswerSet {
    sectioned_answers(1, 1, 5)
}

pub fn default_config() -> EngineConfig {
    EngineConfig::default()
}

/// One-based question numbers for a category
pub fn questions_of(category: Category) -> Vec<u8> {
    category.questions().collect()
}

prop_compose! {
    /// Any valid answer set
    pub fn answer_set()(raw in prop::collection::vec(1u8..=5, QUESTION_COUNT)) -> AnswerSet {
        AnswerSet::new(&raw).unwrap()
    }
}

/// Any percentages reachable through independent rounding (sum 99..=101)
pub fn score_percentages() -> impl Strategy<Value = ScorePercentages> {
    (0u32..=100, 0u32..=100, 99u32..=101).prop_filter_map("shares must fit the drifted total", |(s, l, target)| {
        target.checked_sub(s + l).and_then(|r| ScorePercentages::new(s, l, r).ok())
    })
}
