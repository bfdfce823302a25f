//! Core types for the scoring engine
//!
//! Defines the values that flow through a scoring pass:
//! - Validated answer sets
//! - Per-category totals
//! - Rounded score percentages
//! - The reconciled asset allocation

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Range, RangeInclusive};
use std::str::FromStr;

/// Number of questions in an assessment
pub const QUESTION_COUNT: usize = 15;

/// Number of questions per category
pub const SECTION_SIZE: usize = 5;

/// Lowest allowed answer
pub const MIN_ANSWER: u8 = 1;

/// Highest allowed answer
pub const MAX_ANSWER: u8 = 5;

/// Smallest possible category total
pub const MIN_CATEGORY_TOTAL: u32 = SECTION_SIZE as u32 * MIN_ANSWER as u32;

/// Largest possible category total
pub const MAX_CATEGORY_TOTAL: u32 = SECTION_SIZE as u32 * MAX_ANSWER as u32;

/// Assessment category, each backed by five consecutive answers
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Questions 1-5
    Stability,
    /// Questions 6-10
    Liquidity,
    /// Questions 11-15
    Return,
}

impl Category {
    /// All categories in answer order
    pub const ALL: [Category; 3] = [Category::Stability, Category::Liquidity, Category::Return];

    /// Zero-based position in answer order
    #[inline]
    #[must_use]
    pub const fn ordinal(self) -> usize {
        match self {
            Category::Stability => 0,
            Category::Liquidity => 1,
            Category::Return => 2,
        }
    }

    /// Slice of the answer set backing this category
    #[inline]
    #[must_use]
    pub const fn index_range(self) -> Range<usize> {
        let start = self.ordinal() * SECTION_SIZE;
        start..start + SECTION_SIZE
    }

    /// One-based question numbers in this category
    #[inline]
    #[must_use]
    pub const fn questions(self) -> RangeInclusive<u8> {
        let first = (self.ordinal() * SECTION_SIZE) as u8 + 1;
        first..=first + SECTION_SIZE as u8 - 1
    }

    /// Category owning a one-based question number
    #[must_use]
    pub fn for_question(question: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.questions().contains(&question))
    }

    /// Lowercase name
    #[inline]
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Category::Stability => "stability",
            Category::Liquidity => "liquidity",
            Category::Return => "return",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Fifteen validated answers, each in `1..=5`
///
/// The only way to obtain one is through validation, so every downstream
/// computation can rely on the length and range invariants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct AnswerSet([u8; QUESTION_COUNT]);

impl AnswerSet {
    /// Validate raw answers
    ///
    /// # Errors
    /// Returns [`ValidationError::WrongLength`] unless exactly 15 values are
    /// given, or [`ValidationError::OutOfRange`] for the first value outside
    /// `1..=5`. Values are never clamped.
    pub fn new(values: &[u8]) -> Result<Self, ValidationError> {
        if values.len() != QUESTION_COUNT {
            return Err(ValidationError::WrongLength {
                expected: QUESTION_COUNT,
                actual: values.len(),
            });
        }
        if let Some((index, &value)) = values
            .iter()
            .enumerate()
            .find(|(_, v)| !(MIN_ANSWER..=MAX_ANSWER).contains(*v))
        {
            return Err(ValidationError::OutOfRange {
                index,
                value,
                min: MIN_ANSWER,
                max: MAX_ANSWER,
            });
        }
        let mut answers = [0u8; QUESTION_COUNT];
        answers.copy_from_slice(values);
        Ok(Self(answers))
    }

    /// Same answer for every question
    ///
    /// # Errors
    /// Returns [`ValidationError::OutOfRange`] if `value` is outside `1..=5`.
    pub fn uniform(value: u8) -> Result<Self, ValidationError> {
        Self::new(&[value; QUESTION_COUNT])
    }

    /// All answers in question order
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// The five answers backing a category
    #[inline]
    #[must_use]
    pub fn category(&self, category: Category) -> &[u8] {
        &self.0[category.index_range()]
    }

    /// Sum of all fifteen answers
    #[must_use]
    pub fn sum(&self) -> u32 {
        self.0.iter().map(|&v| u32::from(v)).sum()
    }
}

impl TryFrom<&[u8]> for AnswerSet {
    type Error = ValidationError;

    fn try_from(values: &[u8]) -> Result<Self, Self::Error> {
        Self::new(values)
    }
}

impl TryFrom<Vec<u8>> for AnswerSet {
    type Error = ValidationError;

    fn try_from(values: Vec<u8>) -> Result<Self, Self::Error> {
        Self::new(&values)
    }
}

impl From<AnswerSet> for Vec<u8> {
    fn from(answers: AnswerSet) -> Self {
        answers.0.to_vec()
    }
}

impl FromStr for AnswerSet {
    type Err = ValidationError;

    /// Parse comma- or whitespace-separated answers, e.g. `"3,3,3,..."`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = s
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|token| !token.is_empty())
            .map(|token| {
                token.parse::<u8>().map_err(|_| ValidationError::Parse {
                    token: token.to_string(),
                })
            })
            .collect::<Result<Vec<u8>, _>>()?;
        Self::new(&values)
    }
}

impl fmt::Display for AnswerSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{v}")?;
        }
        write!(f, "]")
    }
}

/// Per-category answer sums, each in `5..=25`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CategoryTotals {
    stability_sum: u32,
    liquidity_sum: u32,
    return_sum: u32,
}

impl CategoryTotals {
    /// Build totals directly
    ///
    /// # Errors
    /// Returns [`ValidationError::TotalOutOfRange`] for a sum five answers
    /// cannot produce.
    pub fn new(stability_sum: u32, liquidity_sum: u32, return_sum: u32) -> Result<Self, ValidationError> {
        for (category, value) in Category::ALL.into_iter().zip([stability_sum, liquidity_sum, return_sum]) {
            if !(MIN_CATEGORY_TOTAL..=MAX_CATEGORY_TOTAL).contains(&value) {
                return Err(ValidationError::TotalOutOfRange {
                    category,
                    value,
                    min: MIN_CATEGORY_TOTAL,
                    max: MAX_CATEGORY_TOTAL,
                });
            }
        }
        Ok(Self::from_parts(stability_sum, liquidity_sum, return_sum))
    }

    #[inline]
    pub(crate) const fn from_parts(stability_sum: u32, liquidity_sum: u32, return_sum: u32) -> Self {
        Self {
            stability_sum,
            liquidity_sum,
            return_sum,
        }
    }

    /// Stability answers summed
    #[inline]
    #[must_use]
    pub const fn stability_sum(&self) -> u32 {
        self.stability_sum
    }

    /// Liquidity answers summed
    #[inline]
    #[must_use]
    pub const fn liquidity_sum(&self) -> u32 {
        self.liquidity_sum
    }

    /// Return answers summed
    #[inline]
    #[must_use]
    pub const fn return_sum(&self) -> u32 {
        self.return_sum
    }

    /// Sum for one category
    #[must_use]
    pub const fn get(&self, category: Category) -> u32 {
        match category {
            Category::Stability => self.stability_sum,
            Category::Liquidity => self.liquidity_sum,
            Category::Return => self.return_sum,
        }
    }

    /// Sum of all three categories, in `15..=75`
    #[inline]
    #[must_use]
    pub const fn grand_total(&self) -> u32 {
        self.stability_sum + self.liquidity_sum + self.return_sum
    }
}

/// Rounded category shares of the grand total
///
/// Each term is rounded on its own, so the three sum to 99, 100 or 101.
/// Consumers must accept that drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ScorePercentages {
    stability_pct: u32,
    liquidity_pct: u32,
    return_pct: u32,
}

impl ScorePercentages {
    /// Build percentages directly
    ///
    /// # Errors
    /// Returns [`ValidationError::PercentageOutOfRange`] for a share above
    /// 100, or [`ValidationError::PercentageSum`] unless the three sum to
    /// `99..=101`.
    pub fn new(stability_pct: u32, liquidity_pct: u32, return_pct: u32) -> Result<Self, ValidationError> {
        for (category, value) in Category::ALL.into_iter().zip([stability_pct, liquidity_pct, return_pct]) {
            if value > 100 {
                return Err(ValidationError::PercentageOutOfRange { category, value });
            }
        }
        let sum = stability_pct + liquidity_pct + return_pct;
        if !(99..=101).contains(&sum) {
            return Err(ValidationError::PercentageSum { sum });
        }
        Ok(Self::from_parts(stability_pct, liquidity_pct, return_pct))
    }

    #[inline]
    pub(crate) const fn from_parts(stability_pct: u32, liquidity_pct: u32, return_pct: u32) -> Self {
        Self {
            stability_pct,
            liquidity_pct,
            return_pct,
        }
    }

    /// Stability share
    #[inline]
    #[must_use]
    pub const fn stability_pct(&self) -> u32 {
        self.stability_pct
    }

    /// Liquidity share
    #[inline]
    #[must_use]
    pub const fn liquidity_pct(&self) -> u32 {
        self.liquidity_pct
    }

    /// Return share
    #[inline]
    #[must_use]
    pub const fn return_pct(&self) -> u32 {
        self.return_pct
    }

    /// Share for one category
    #[must_use]
    pub const fn get(&self, category: Category) -> u32 {
        match category {
            Category::Stability => self.stability_pct,
            Category::Liquidity => self.liquidity_pct,
            Category::Return => self.return_pct,
        }
    }

    /// Sum of the three shares (99, 100 or 101)
    #[inline]
    #[must_use]
    pub const fn sum(&self) -> u32 {
        self.stability_pct + self.liquidity_pct + self.return_pct
    }

    /// `"<n>%"` text for each category in answer order
    #[must_use]
    pub fn display(&self) -> [String; 3] {
        Category::ALL.map(|c| format_percent(self.get(c)))
    }
}

impl fmt::Display for ScorePercentages {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "S={}%, L={}%, R={}%",
            self.stability_pct, self.liquidity_pct, self.return_pct
        )
    }
}

/// Investment bucket of the allocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetClass {
    /// Deposits and other bank products
    Banking,
    /// Private markets; takes the rounding remainder
    Private,
    /// Listed equities
    Stocks,
}

impl AssetClass {
    /// All asset classes in display order
    pub const ALL: [AssetClass; 3] = [AssetClass::Banking, AssetClass::Private, AssetClass::Stocks];
}

/// Three-way allocation summing to exactly 100
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct AssetAllocation {
    banking_pct: u32,
    private_pct: u32,
    stocks_pct: u32,
}

impl AssetAllocation {
    #[inline]
    pub(crate) const fn from_parts(banking_pct: u32, private_pct: u32, stocks_pct: u32) -> Self {
        Self {
            banking_pct,
            private_pct,
            stocks_pct,
        }
    }

    /// Banking share
    #[inline]
    #[must_use]
    pub const fn banking_pct(&self) -> u32 {
        self.banking_pct
    }

    /// Private share (the reconciled remainder)
    #[inline]
    #[must_use]
    pub const fn private_pct(&self) -> u32 {
        self.private_pct
    }

    /// Stocks share
    #[inline]
    #[must_use]
    pub const fn stocks_pct(&self) -> u32 {
        self.stocks_pct
    }

    /// Share for one asset class
    #[must_use]
    pub const fn get(&self, class: AssetClass) -> u32 {
        match class {
            AssetClass::Banking => self.banking_pct,
            AssetClass::Private => self.private_pct,
            AssetClass::Stocks => self.stocks_pct,
        }
    }

    /// Always 100
    #[inline]
    #[must_use]
    pub const fn sum(&self) -> u32 {
        self.banking_pct + self.private_pct + self.stocks_pct
    }

    /// `"<n>%"` text for banking, private, stocks
    #[must_use]
    pub fn display(&self) -> [String; 3] {
        AssetClass::ALL.map(|c| format_percent(self.get(c)))
    }
}

impl fmt::Display for AssetAllocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Banking={}%, Private={}%, Stocks={}%",
            self.banking_pct, self.private_pct, self.stocks_pct
        )
    }
}

/// Render a percentage the way the results page shows it
#[inline]
#[must_use]
pub fn format_percent(value: u32) -> String {
    format!("{value}%")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_ranges_partition_answers() {
        assert_eq!(Category::Stability.index_range(), 0..5);
        assert_eq!(Category::Liquidity.index_range(), 5..10);
        assert_eq!(Category::Return.index_range(), 10..15);
        assert_eq!(Category::Return.questions(), 11..=15);
    }

    #[test]
    fn category_for_question() {
        assert_eq!(Category::for_question(1), Some(Category::Stability));
        assert_eq!(Category::for_question(5), Some(Category::Stability));
        assert_eq!(Category::for_question(6), Some(Category::Liquidity));
        assert_eq!(Category::for_question(15), Some(Category::Return));
        assert_eq!(Category::for_question(0), None);
        assert_eq!(Category::for_question(16), None);
    }

    #[test]
    fn answer_set_rejects_wrong_length() {
        let err = AnswerSet::new(&[3; 14]).unwrap_err();
        assert_eq!(err, ValidationError::WrongLength { expected: 15, actual: 14 });
        assert!(AnswerSet::new(&[3; 16]).is_err());
        assert!(AnswerSet::new(&[]).is_err());
    }

    #[test]
    fn answer_set_rejects_out_of_range_without_clamping() {
        let mut raw = [3u8; 15];
        raw[7] = 6;
        let err = AnswerSet::new(&raw).unwrap_err();
        assert_eq!(
            err,
            ValidationError::OutOfRange { index: 7, value: 6, min: 1, max: 5 }
        );

        raw[7] = 0;
        assert!(matches!(
            AnswerSet::new(&raw),
            Err(ValidationError::OutOfRange { index: 7, value: 0, .. })
        ));
    }

    #[test]
    fn answer_set_parses_text() {
        let answers: AnswerSet = "5,5,5,5,5 1 1 1 1 1, 2,2,2,2,2".parse().unwrap();
        assert_eq!(answers.category(Category::Stability), &[5; 5]);
        assert_eq!(answers.category(Category::Return), &[2; 5]);
        assert_eq!(answers.sum(), 40);

        let err = "3,3,x".parse::<AnswerSet>().unwrap_err();
        assert_eq!(err, ValidationError::Parse { token: "x".to_string() });
    }

    #[test]
    fn totals_reject_impossible_sums() {
        assert!(CategoryTotals::new(5, 25, 15).is_ok());
        assert!(matches!(
            CategoryTotals::new(4, 10, 10),
            Err(ValidationError::TotalOutOfRange { category: Category::Stability, value: 4, .. })
        ));
        assert!(CategoryTotals::new(10, 10, 26).is_err());
    }

    #[test]
    fn percentages_accept_drift_only_within_one() {
        assert!(ScorePercentages::new(33, 33, 33).is_ok());
        assert!(ScorePercentages::new(34, 34, 33).is_ok());
        assert_eq!(
            ScorePercentages::new(33, 33, 32),
            Err(ValidationError::PercentageSum { sum: 98 })
        );
        assert_eq!(
            ScorePercentages::new(0, 0, 101),
            Err(ValidationError::PercentageOutOfRange { category: Category::Return, value: 101 })
        );
    }

    #[test]
    fn display_renders_percent_text() {
        let pct = ScorePercentages::new(71, 14, 14).unwrap();
        assert_eq!(pct.display(), ["71%".to_string(), "14%".to_string(), "14%".to_string()]);
        assert_eq!(pct.to_string(), "S=71%, L=14%, R=14%");
    }
}
