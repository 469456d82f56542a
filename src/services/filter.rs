//! Expense filter and sort pipeline
//!
//! A filter is a plain value built up from optional criteria. Applying it to
//! a snapshot is a pure function: every supplied criterion must match, then
//! the survivors are stably sorted.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{KharchaError, KharchaResult};
use crate::models::{Category, Expense};

/// Ordering applied to an expense listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    DateAsc,
    #[default]
    DateDesc,
    AmountAsc,
    AmountDesc,
}

impl SortOrder {
    pub fn all() -> &'static [Self] {
        &[Self::DateDesc, Self::DateAsc, Self::AmountDesc, Self::AmountAsc]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DateAsc => "date-asc",
            Self::DateDesc => "date-desc",
            Self::AmountAsc => "amount-asc",
            Self::AmountDesc => "amount-desc",
        }
    }

    fn compare(&self, a: &Expense, b: &Expense) -> Ordering {
        match self {
            Self::DateAsc => a.date.cmp(&b.date),
            Self::DateDesc => b.date.cmp(&a.date),
            Self::AmountAsc => a.amount.cmp(&b.amount),
            Self::AmountDesc => b.amount.cmp(&a.amount),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = KharchaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|order| order.as_str() == wanted)
            .ok_or_else(|| {
                KharchaError::Validation(format!(
                    "Unknown sort order '{}' (expected date-desc, date-asc, amount-desc or amount-asc)",
                    s
                ))
            })
    }
}

/// Parse a category filter where "all" (or nothing) means no restriction
pub fn parse_category_filter(s: &str) -> KharchaResult<Option<Category>> {
    let s = s.trim();
    if s.is_empty() || s.eq_ignore_ascii_case("all") {
        return Ok(None);
    }
    s.parse::<Category>()
        .map(Some)
        .map_err(|e| KharchaError::Validation(e.to_string()))
}

/// Parse a month criterion ("05", "5"); empty means unbounded
pub fn parse_month(s: &str) -> KharchaResult<Option<u32>> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(None);
    }
    match s.parse::<u32>() {
        Ok(month) if (1..=12).contains(&month) && s.len() <= 2 => Ok(Some(month)),
        _ => Err(KharchaError::Validation(format!(
            "Month must be 01-12 (got '{}')",
            s
        ))),
    }
}

/// Parse a 4-digit year criterion; empty means unbounded
pub fn parse_year(s: &str) -> KharchaResult<Option<i32>> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(None);
    }
    if s.len() != 4 || !s.chars().all(|c| c.is_ascii_digit()) {
        return Err(KharchaError::Validation(format!(
            "Year must have 4 digits (got '{}')",
            s
        )));
    }
    s.parse::<i32>()
        .map(Some)
        .map_err(|e| KharchaError::Validation(format!("Invalid year '{}': {}", s, e)))
}

/// Criteria for deriving a view over an expense snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpenseFilter {
    /// Case-insensitive substring matched against the description
    pub search: Option<String>,
    /// `None` is "all"
    pub category: Option<Category>,
    /// Inclusive lower bound
    pub start: Option<NaiveDate>,
    /// Inclusive upper bound
    pub end: Option<NaiveDate>,
    pub month: Option<u32>,
    pub year: Option<i32>,
    pub sort: SortOrder,
}

impl ExpenseFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty or whitespace-only text clears the search criterion
    pub fn search(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        self.search = if text.trim().is_empty() { None } else { Some(text) };
        self
    }

    pub fn category(mut self, category: Option<Category>) -> Self {
        self.category = category;
        self
    }

    pub fn date_range(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.start = start;
        self.end = end;
        self
    }

    pub fn month(mut self, month: Option<u32>) -> Self {
        self.month = month;
        self
    }

    pub fn year(mut self, year: Option<i32>) -> Self {
        self.year = year;
        self
    }

    pub fn sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    /// True when no criterion restricts the view
    pub fn is_unrestricted(&self) -> bool {
        self.search.is_none()
            && self.category.is_none()
            && self.start.is_none()
            && self.end.is_none()
            && self.month.is_none()
            && self.year.is_none()
    }

    /// Whether a single expense satisfies every supplied criterion
    pub fn matches(&self, expense: &Expense) -> bool {
        if let Some(search) = &self.search {
            let needle = search.to_lowercase();
            if !expense.description.to_lowercase().contains(&needle) {
                return false;
            }
        }

        if let Some(category) = self.category {
            if expense.category != category {
                return false;
            }
        }

        if let Some(start) = self.start {
            if expense.date < start {
                return false;
            }
        }

        if let Some(end) = self.end {
            if expense.date > end {
                return false;
            }
        }

        if let Some(month) = self.month {
            if expense.date.month() != month {
                return false;
            }
        }

        if let Some(year) = self.year {
            if expense.date.year() != year {
                return false;
            }
        }

        true
    }

    /// Derive the filtered, sorted view of `expenses`
    ///
    /// Records that compare equal keep their snapshot order.
    pub fn apply(&self, expenses: &[Expense]) -> Vec<Expense> {
        let mut view: Vec<Expense> = expenses
            .iter()
            .filter(|e| self.matches(e))
            .cloned()
            .collect();
        view.sort_by(|a, b| self.sort.compare(a, b));
        view
    }
}
