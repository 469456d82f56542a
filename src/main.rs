use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use kharcha::cli::{
    handle_budget_command, handle_expense_command, handle_export_command, handle_history_command,
    handle_report_command, handle_trip_command, handle_user_command,
};
use kharcha::config::{paths::KharchaPaths, settings::Settings};
use kharcha::models::Principal;
use kharcha::reports::SpendingSummary;
use kharcha::session::Session;

#[derive(Parser)]
#[command(
    name = "kharcha",
    version,
    about = "Personal expense tracker",
    long_about = "Kharcha records expenses, trips and monthly budgets per user, \
                  and reports where the money went."
)]
struct Cli {
    /// Act as this user for one run, overriding the remembered one
    #[arg(long, env = "KHARCHA_USER", global = true)]
    user: Option<String>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Expense management
    #[command(subcommand, alias = "exp")]
    Expense(kharcha::cli::ExpenseCommands),

    /// Trip planning
    #[command(subcommand)]
    Trip(kharcha::cli::TripCommands),

    /// Monthly budgets
    #[command(subcommand)]
    Budget(kharcha::cli::BudgetCommands),

    /// Spending reports
    #[command(subcommand)]
    Report(kharcha::cli::ReportCommands),

    /// Export data
    #[command(subcommand)]
    Export(kharcha::cli::ExportCommands),

    /// Select the active user
    #[command(subcommand)]
    User(kharcha::cli::UserCommands),

    /// Show recent changes made by the active user
    History {
        #[arg(short = 'n', long, default_value = "20")]
        limit: usize,
    },

    /// Show current configuration and paths
    Config,
}

fn init_logging(verbose: bool) {
    // Priority: KHARCHA_LOG > RUST_LOG > --verbose > warn
    let filter = if let Ok(directives) = std::env::var("KHARCHA_LOG") {
        EnvFilter::new(directives)
    } else if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if verbose {
        EnvFilter::new("kharcha=debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .compact()
                .with_writer(std::io::stderr),
        )
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let paths = KharchaPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;

    let principal = match cli.user.as_deref() {
        Some(email) => Principal::parse(email),
        None => settings.principal(),
    };
    debug!(
        user = principal.as_ref().map(Principal::email).unwrap_or("none"),
        data_dir = %paths.data_dir().display(),
        "opening session"
    );

    let mut session = Session::open(&paths, principal)?;

    match cli.command {
        Some(Commands::Expense(cmd)) => handle_expense_command(&mut session, &settings, cmd)?,
        Some(Commands::Trip(cmd)) => handle_trip_command(&mut session, cmd)?,
        Some(Commands::Budget(cmd)) => handle_budget_command(&mut session, cmd)?,
        Some(Commands::Report(cmd)) => {
            handle_report_command(&session, &settings.date_format, cmd)?
        }
        Some(Commands::Export(cmd)) => handle_export_command(&session, cmd)?,
        Some(Commands::User(cmd)) => {
            handle_user_command(&mut session, &mut settings, &paths, cmd)?
        }
        Some(Commands::History { limit }) => handle_history_command(&session, limit)?,
        Some(Commands::Config) => {
            println!("Kharcha Configuration");
            println!("=====================");
            println!("Base directory:  {}", paths.base_dir().display());
            println!("Data directory:  {}", paths.data_dir().display());
            println!("Settings file:   {}", paths.settings_file().display());
            println!("Audit log:       {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!(
                "  Current user:  {}",
                settings.current_user.as_deref().unwrap_or("(none)")
            );
            println!("  Date format:   {}", settings.date_format);
            println!("  Default sort:  {}", settings.default_sort);
        }
        None => match session.principal() {
            Some(_) => {
                let today = chrono::Local::now().date_naive();
                let summary =
                    SpendingSummary::generate(session.expenses(), session.budgets(), today);
                print!("{}", summary.format_terminal());
            }
            None => {
                println!("Kharcha - personal expense tracker");
                println!();
                println!("Run 'kharcha user switch <email>' to pick a user.");
                println!("Run 'kharcha --help' for usage information.");
            }
        },
    }

    Ok(())
}
