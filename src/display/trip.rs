//! Trip display formatting

use crate::models::{Trip, TripId};
use crate::services::Selection;

use super::report::truncate;

pub fn format_trip_list(trips: &[Trip], selection: &Selection<TripId>) -> String {
    if trips.is_empty() {
        return "No trips found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:3} {:<20} {:10} {:10} {:>5} {:>12}  {}\n",
        "Sel", "Destination", "Start", "End", "Days", "Budget", "ID"
    ));
    output.push_str(&"-".repeat(90));
    output.push('\n');

    for trip in trips {
        output.push_str(&format!(
            "{} {:<20} {:10} {:10} {:>5} {:>12}  {}\n",
            if selection.contains(&trip.id) { "[x]" } else { "[ ]" },
            truncate(&trip.destination, 20),
            trip.start_date,
            trip.end_date,
            trip.duration_days(),
            trip.budget,
            trip.id
        ));
    }

    output
}

pub fn format_trip_details(trip: &Trip) -> String {
    let mut output = String::new();
    output.push_str(&format!("Trip:        {}\n", trip.id));
    output.push_str(&format!("Destination: {}\n", trip.destination));
    output.push_str(&format!(
        "Dates:       {} to {} ({} days)\n",
        trip.start_date,
        trip.end_date,
        trip.duration_days()
    ));
    output.push_str(&format!("Budget:      {}\n", trip.budget));
    if !trip.description.is_empty() {
        output.push_str(&format!("Notes:       {}\n", trip.description));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use chrono::NaiveDate;

    #[test]
    fn test_trip_list_and_details() {
        let trip = Trip::new(
            "Goa",
            NaiveDate::from_ymd_opt(2024, 12, 20).unwrap(),
            NaiveDate::from_ymd_opt(2024, 12, 27).unwrap(),
            Money::from_units(900),
        );

        let list = format_trip_list(std::slice::from_ref(&trip), &Selection::new());
        assert!(list.contains("Goa"));
        assert!(list.contains("$900.00"));

        let details = format_trip_details(&trip);
        assert!(details.contains("(8 days)"));
        assert!(!details.contains("Notes"));
    }
}
