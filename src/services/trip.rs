//! Trip listing filters

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::KharchaError;
use crate::models::{Money, Trip};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TripSortOrder {
    #[default]
    DateAsc,
    DateDesc,
    BudgetAsc,
    BudgetDesc,
}

impl TripSortOrder {
    pub fn all() -> &'static [Self] {
        &[Self::DateAsc, Self::DateDesc, Self::BudgetAsc, Self::BudgetDesc]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DateAsc => "date-asc",
            Self::DateDesc => "date-desc",
            Self::BudgetAsc => "budget-asc",
            Self::BudgetDesc => "budget-desc",
        }
    }

    fn compare(&self, a: &Trip, b: &Trip) -> Ordering {
        match self {
            Self::DateAsc => a.start_date.cmp(&b.start_date),
            Self::DateDesc => b.start_date.cmp(&a.start_date),
            Self::BudgetAsc => a.budget.cmp(&b.budget),
            Self::BudgetDesc => b.budget.cmp(&a.budget),
        }
    }
}

impl fmt::Display for TripSortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TripSortOrder {
    type Err = KharchaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|order| order.as_str() == wanted)
            .ok_or_else(|| {
                KharchaError::Validation(format!(
                    "Unknown trip sort order '{}' (expected date-asc, date-desc, budget-asc or budget-desc)",
                    s
                ))
            })
    }
}

/// Search and sort criteria for trips
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TripFilter {
    /// Case-insensitive substring of the destination or the description
    pub search: Option<String>,
    pub sort: TripSortOrder,
}

impl TripFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        self.search = if text.trim().is_empty() { None } else { Some(text) };
        self
    }

    pub fn sort(mut self, sort: TripSortOrder) -> Self {
        self.sort = sort;
        self
    }

    pub fn matches(&self, trip: &Trip) -> bool {
        match &self.search {
            Some(search) => {
                let needle = search.to_lowercase();
                trip.destination.to_lowercase().contains(&needle)
                    || trip.description.to_lowercase().contains(&needle)
            }
            None => true,
        }
    }

    pub fn apply(&self, trips: &[Trip]) -> Vec<Trip> {
        let mut view: Vec<Trip> = trips.iter().filter(|t| self.matches(t)).cloned().collect();
        view.sort_by(|a, b| self.sort.compare(a, b));
        view
    }
}

/// Sum of the planned budgets of `trips`
pub fn total_trip_budget(trips: &[Trip]) -> Money {
    trips.iter().map(|t| t.budget).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn trip(destination: &str, description: &str, start: (i32, u32, u32), budget: i64) -> Trip {
        let start = NaiveDate::from_ymd_opt(start.0, start.1, start.2).unwrap();
        Trip::new(destination, start, start, Money::from_units(budget)).with_description(description)
    }

    fn sample() -> Vec<Trip> {
        vec![
            trip("Goa", "beach week", (2024, 12, 20), 900),
            trip("Manali", "snow", (2024, 1, 5), 1500),
            trip("Jaipur", "forts and beaches?", (2024, 3, 1), 400),
        ]
    }

    fn destinations(view: &[Trip]) -> Vec<&str> {
        view.iter().map(|t| t.destination.as_str()).collect()
    }

    #[test]
    fn test_default_sort_is_start_date_asc() {
        let view = TripFilter::new().apply(&sample());
        assert_eq!(destinations(&view), vec!["Manali", "Jaipur", "Goa"]);
    }

    #[test]
    fn test_search_matches_destination_or_description() {
        let view = TripFilter::new().search("BEACH").apply(&sample());
        assert_eq!(destinations(&view), vec!["Jaipur", "Goa"]);

        let view = TripFilter::new().search("mana").apply(&sample());
        assert_eq!(destinations(&view), vec!["Manali"]);
    }

    #[test]
    fn test_budget_sort() {
        let view = TripFilter::new().sort(TripSortOrder::BudgetDesc).apply(&sample());
        assert_eq!(destinations(&view), vec!["Manali", "Goa", "Jaipur"]);
    }

    #[test]
    fn test_total_budget() {
        assert_eq!(total_trip_budget(&sample()), Money::from_units(2800));
        assert_eq!(total_trip_budget(&[]), Money::zero());
    }

    #[test]
    fn test_parse_sort() {
        assert_eq!("budget-asc".parse::<TripSortOrder>().unwrap(), TripSortOrder::BudgetAsc);
        assert!("cheapest".parse::<TripSortOrder>().is_err());
    }
}
