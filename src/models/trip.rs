//! Trip model
//!
//! Trips are planned journeys with their own budget, tracked alongside
//! expenses but not aggregated with them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::TripId;
use super::money::Money;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trip {
    pub id: TripId,

    pub destination: String,

    pub start_date: NaiveDate,

    /// Never earlier than `start_date` for trips entered through validation
    pub end_date: NaiveDate,

    /// Planned spend for the whole trip
    pub budget: Money,

    #[serde(default)]
    pub description: String,
}

impl Trip {
    /// Create a new trip with a fresh id
    pub fn new(
        destination: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        budget: Money,
    ) -> Self {
        Self {
            id: TripId::new(),
            destination: destination.into(),
            start_date,
            end_date,
            budget,
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Inclusive length of the trip in days
    pub fn duration_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }

    /// Entry-point validation
    pub fn validate(&self) -> Result<(), TripValidationError> {
        if self.destination.trim().is_empty() {
            return Err(TripValidationError::MissingDestination);
        }

        if self.end_date < self.start_date {
            return Err(TripValidationError::EndBeforeStart {
                start: self.start_date,
                end: self.end_date,
            });
        }

        if !self.budget.is_positive() {
            return Err(TripValidationError::NonPositiveBudget(self.budget));
        }

        Ok(())
    }
}

impl fmt::Display for Trip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} to {}) budget {}",
            self.destination, self.start_date, self.end_date, self.budget
        )
    }
}

/// Partial update applied to an existing trip
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TripUpdate {
    pub destination: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub budget: Option<Money>,
    pub description: Option<String>,
}

impl TripUpdate {
    pub fn is_empty(&self) -> bool {
        self.destination.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
            && self.budget.is_none()
            && self.description.is_none()
    }

    pub fn apply_to(&self, trip: &mut Trip) {
        if let Some(destination) = &self.destination {
            trip.destination = destination.clone();
        }
        if let Some(start) = self.start_date {
            trip.start_date = start;
        }
        if let Some(end) = self.end_date {
            trip.end_date = end;
        }
        if let Some(budget) = self.budget {
            trip.budget = budget;
        }
        if let Some(description) = &self.description {
            trip.description = description.clone();
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TripValidationError {
    MissingDestination,
    EndBeforeStart { start: NaiveDate, end: NaiveDate },
    NonPositiveBudget(Money),
}

impl fmt::Display for TripValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingDestination => write!(f, "Destination is required"),
            Self::EndBeforeStart { start, end } => {
                write!(f, "End date {} is before start date {}", end, start)
            }
            Self::NonPositiveBudget(budget) => {
                write!(f, "Trip budget must be positive (got {})", budget)
            }
        }
    }
}

impl std::error::Error for TripValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_duration_is_inclusive() {
        let trip = Trip::new("Goa", date(2025, 12, 20), date(2025, 12, 24), Money::from_units(800));
        assert_eq!(trip.duration_days(), 5);
    }

    #[test]
    fn test_end_before_start_rejected() {
        let trip = Trip::new("Goa", date(2025, 12, 20), date(2025, 12, 19), Money::from_units(800));
        assert!(matches!(
            trip.validate(),
            Err(TripValidationError::EndBeforeStart { .. })
        ));
    }

    #[test]
    fn test_same_day_trip_is_valid() {
        let trip = Trip::new("Pune", date(2025, 1, 5), date(2025, 1, 5), Money::from_units(50))
            .with_description("Day trip");
        assert!(trip.validate().is_ok());
    }

    #[test]
    fn test_update_merges_fields() {
        let mut trip = Trip::new("Goa", date(2025, 12, 20), date(2025, 12, 24), Money::from_units(800));
        let update = TripUpdate {
            budget: Some(Money::from_units(950)),
            ..TripUpdate::default()
        };
        update.apply_to(&mut trip);
        assert_eq!(trip.budget, Money::from_units(950));
        assert_eq!(trip.destination, "Goa");
    }
}
