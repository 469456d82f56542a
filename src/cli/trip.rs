//! Trip CLI commands

use std::collections::HashSet;

use clap::Subcommand;

use crate::display::{format_trip_details, format_trip_list};
use crate::error::{KharchaError, KharchaResult};
use crate::models::{Trip, TripId, TripUpdate};
use crate::services::trip::total_trip_budget;
use crate::services::{TripFilter, TripSortOrder};
use crate::session::Session;

use super::{parse_amount, parse_date, require_user};

#[derive(Subcommand)]
pub enum TripCommands {
    /// Plan a new trip
    Add {
        destination: String,
        /// Start date (YYYY-MM-DD)
        start: String,
        /// End date (YYYY-MM-DD)
        end: String,
        /// Planned budget (e.g. "900")
        budget: String,
        #[arg(short, long)]
        description: Option<String>,
    },

    /// List trips
    List {
        /// Text to find in destination or description
        #[arg(short, long)]
        search: Option<String>,
        /// date-asc, date-desc, budget-asc or budget-desc
        #[arg(long)]
        sort: Option<String>,
    },

    /// Show one trip
    Show { id: String },

    /// Change fields of a trip
    Edit {
        id: String,
        #[arg(long)]
        destination: Option<String>,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
        #[arg(long)]
        budget: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
    },

    /// Delete trips by id
    Delete {
        #[arg(required = true)]
        ids: Vec<String>,
    },
}

pub fn handle_trip_command(session: &mut Session, cmd: TripCommands) -> KharchaResult<()> {
    require_user(session)?;

    match cmd {
        TripCommands::Add {
            destination,
            start,
            end,
            budget,
            description,
        } => {
            let trip = Trip::new(
                destination.trim(),
                parse_date(&start)?,
                parse_date(&end)?,
                parse_amount(&budget)?,
            )
            .with_description(description.unwrap_or_default());
            trip.validate()
                .map_err(|e| KharchaError::Validation(e.to_string()))?;

            session.add_trip(trip.clone())?;
            println!("Added trip: {}", trip);
            println!("  ID: {}", trip.id);
        }

        TripCommands::List { search, sort } => {
            let sort = match sort {
                Some(s) => s.parse::<TripSortOrder>()?,
                None => TripSortOrder::default(),
            };
            let filter = TripFilter::new()
                .search(search.unwrap_or_default())
                .sort(sort);
            let view = session.filtered_trips(&filter);

            print!("{}", format_trip_list(&view, session.trip_selection()));
            println!();
            println!("{} trip(s), total budget {}", view.len(), total_trip_budget(&view));
        }

        TripCommands::Show { id } => {
            let trip = session
                .trip(&TripId::from(id.as_str()))
                .ok_or_else(|| KharchaError::trip_not_found(&id))?;
            print!("{}", format_trip_details(trip));
        }

        TripCommands::Edit {
            id,
            destination,
            start,
            end,
            budget,
            description,
        } => {
            let trip_id = TripId::from(id.as_str());
            let mut candidate = session
                .trip(&trip_id)
                .cloned()
                .ok_or_else(|| KharchaError::trip_not_found(&id))?;

            let update = TripUpdate {
                destination: destination.map(|d| d.trim().to_string()),
                start_date: start.as_deref().map(parse_date).transpose()?,
                end_date: end.as_deref().map(parse_date).transpose()?,
                budget: budget.as_deref().map(parse_amount).transpose()?,
                description,
            };

            if update.is_empty() {
                println!("Nothing to change.");
                return Ok(());
            }

            update.apply_to(&mut candidate);
            candidate
                .validate()
                .map_err(|e| KharchaError::Validation(e.to_string()))?;

            session.update_trip(&trip_id, &update)?;
            println!("Updated trip: {}", candidate);
        }

        TripCommands::Delete { ids } => {
            let ids: HashSet<TripId> = ids.iter().map(|s| TripId::from(s.as_str())).collect();
            let deleted = session.delete_trips(&ids)?;
            println!("Deleted {} trip(s).", deleted);
        }
    }

    Ok(())
}
