//! Principal selection commands
//!
//! The remembered user lives in settings; `--user` or `KHARCHA_USER` override
//! it for a single invocation.

use clap::Subcommand;

use crate::config::paths::KharchaPaths;
use crate::config::settings::Settings;
use crate::error::{KharchaError, KharchaResult};
use crate::models::Principal;
use crate::session::Session;

#[derive(Subcommand)]
pub enum UserCommands {
    /// Show the active user
    Show,

    /// Remember a user and load their records
    Switch { email: String },

    /// Forget the remembered user
    Clear,
}

pub fn handle_user_command(
    session: &mut Session,
    settings: &mut Settings,
    paths: &KharchaPaths,
    cmd: UserCommands,
) -> KharchaResult<()> {
    match cmd {
        UserCommands::Show => match session.principal() {
            Some(principal) => {
                println!("Active user: {}", principal);
                println!(
                    "  {} expenses, {} trips, {} budgets",
                    session.expenses().len(),
                    session.trips().len(),
                    session.budgets().len()
                );
                if settings.current_user.as_deref() != Some(principal.email()) {
                    println!(
                        "  (set for this run only; remembered user: {})",
                        settings.current_user.as_deref().unwrap_or("none")
                    );
                }
            }
            None => println!("No user selected."),
        },

        UserCommands::Switch { email } => {
            let principal = Principal::parse(&email)
                .ok_or_else(|| KharchaError::Validation("Email cannot be empty".into()))?;

            session.switch_principal(Some(principal.clone()))?;
            settings.current_user = Some(principal.email().to_string());
            settings.save(paths)?;

            println!("Switched to {}", principal);
            println!(
                "  {} expenses, {} trips, {} budgets",
                session.expenses().len(),
                session.trips().len(),
                session.budgets().len()
            );
        }

        UserCommands::Clear => {
            session.switch_principal(None)?;
            settings.current_user = None;
            settings.save(paths)?;
            println!("No user selected.");
        }
    }

    Ok(())
}
