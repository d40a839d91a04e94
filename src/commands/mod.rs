//! Command-line surface. Each subcommand runs one controller operation and
//! prints the result.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::app::controller::{AppController, ControllerOptions, SortKey};
use crate::domain::destination::{parse_budget, split_activities, validate_date};
use crate::domain::{AdviceIntent, Destination, DestinationUpdate, DomainError};
use crate::ports::AdvisorStatus;

#[derive(Parser, Debug)]
#[clap(
    name = "itinerary",
    version = env!("CARGO_PKG_VERSION"),
    about = "Keep a list of travel destinations and get itinerary and budget suggestions"
)]
pub struct Cli {
    /// Itinerary JSON file (overrides storage.itinerary_file).
    #[clap(long, short, global = true)]
    pub file: Option<PathBuf>,
    /// Directory holding config.toml (defaults to the OS config directory).
    #[clap(long, global = true)]
    pub config_dir: Option<PathBuf>,
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add a destination
    Add {
        city: String,
        country: String,
        /// First day of the trip (YYYY-MM-DD)
        #[clap(long)]
        start: String,
        /// Last day of the trip (YYYY-MM-DD)
        #[clap(long)]
        end: String,
        /// Total budget in USD
        #[clap(long)]
        budget: String,
        /// Comma-separated activities
        #[clap(long)]
        activities: String,
    },
    /// Remove the first destination matching a city
    Remove { city: String },
    /// Change fields of the first destination matching a city
    Update {
        city: String,
        #[clap(long)]
        country: Option<String>,
        /// New start date (YYYY-MM-DD)
        #[clap(long)]
        start: Option<String>,
        /// New end date (YYYY-MM-DD)
        #[clap(long)]
        end: Option<String>,
        #[clap(long)]
        budget: Option<String>,
        /// Comma-separated activities, replacing the current list
        #[clap(long)]
        activities: Option<String>,
        /// Additional changes as field=value
        #[clap(long = "set", value_name = "FIELD=VALUE")]
        set: Vec<String>,
    },
    /// Find destinations by city, country or activity
    Search { query: String },
    /// Show every destination
    List,
    /// Reorder the itinerary
    Sort {
        #[clap(value_enum)]
        by: SortField,
    },
    /// Generate an itinerary or budget tips for a destination
    Suggest {
        #[clap(value_enum)]
        kind: SuggestKind,
        city: String,
        /// Use the offline template even when an API key is configured
        #[clap(long)]
        offline: bool,
    },
    /// Check an OpenAI API key and save it to the config file if it works
    SetKey { key: String },
    /// Show configuration, log and itinerary file locations
    Paths,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SortField {
    Date,
    Budget,
}

impl From<SortField> for SortKey {
    fn from(field: SortField) -> Self {
        match field {
            SortField::Date => SortKey::StartDate,
            SortField::Budget => SortKey::Budget,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SuggestKind {
    Itinerary,
    BudgetTips,
}

impl From<SuggestKind> for AdviceIntent {
    fn from(kind: SuggestKind) -> Self {
        match kind {
            SuggestKind::Itinerary => AdviceIntent::Itinerary,
            SuggestKind::BudgetTips => AdviceIntent::BudgetTips,
        }
    }
}

/// Collect the update flags into tagged updates.
fn collect_updates(
    country: Option<String>,
    start: Option<String>,
    end: Option<String>,
    budget: Option<String>,
    activities: Option<String>,
    set: &[String],
) -> Result<Vec<DestinationUpdate>, DomainError> {
    let mut updates = Vec::new();
    if let Some(country) = country {
        updates.push(DestinationUpdate::Country(country));
    }
    if let Some(start) = start {
        updates.push(DestinationUpdate::StartDate(validate_date(&start)?));
    }
    if let Some(end) = end {
        updates.push(DestinationUpdate::EndDate(validate_date(&end)?));
    }
    if let Some(budget) = budget {
        updates.push(DestinationUpdate::Budget(parse_budget(&budget)?));
    }
    if let Some(activities) = activities {
        updates.push(DestinationUpdate::Activities(split_activities(&activities)));
    }
    for pair in set {
        updates.push(pair.parse()?);
    }
    Ok(updates)
}

/// Explain why the offline template was shown, if it was.
fn template_notice(status: AdvisorStatus) -> Option<&'static str> {
    match status {
        AdvisorStatus::Ready => None,
        AdvisorStatus::Offline => Some("ℹ️  Offline mode; showing the offline template."),
        AdvisorStatus::MissingKey => Some(
            "⚠️  No OpenAI API key found; showing the offline template. \
             Run `itinerary set-key <KEY>` to enable AI suggestions.",
        ),
        AdvisorStatus::KeyRejected => Some(
            "❌ The configured OpenAI API key was rejected; showing the offline template.",
        ),
    }
}

fn print_destinations(destinations: &[&Destination]) {
    for (i, destination) in destinations.iter().enumerate() {
        println!("{}. {}", i + 1, destination);
    }
}

/// Execute a parsed command line.
pub async fn execute(cli: Cli) -> Result<(), DomainError> {
    let mut app = AppController::new(ControllerOptions {
        config_dir: cli.config_dir,
        itinerary_file: cli.file,
    })?;

    match cli.command {
        Command::Add {
            city,
            country,
            start,
            end,
            budget,
            activities,
        } => {
            let destination = Destination::new(
                city,
                country,
                &start,
                &end,
                parse_budget(&budget)?,
                split_activities(&activities),
            )?;
            let label = format!("{}, {}", destination.city(), destination.country());
            app.add(destination)?;
            println!("✅ Added {} to your itinerary!", label);
        }
        Command::Remove { city } => {
            let removed = app.remove(&city)?;
            println!(
                "✅ Removed {}, {} from your itinerary!",
                removed.city(),
                removed.country()
            );
        }
        Command::Update {
            city,
            country,
            start,
            end,
            budget,
            activities,
            set,
        } => {
            let updates = collect_updates(country, start, end, budget, activities, &set)?;
            let updated = app.update(&city, &updates)?;
            println!("✅ Updated {}!", updated.city());
            println!("{}", updated);
        }
        Command::Search { query } => {
            let found = app.store().search(&query);
            if found.is_empty() {
                println!("No destinations found matching '{}'", query);
            } else {
                println!("🔍 Found {} destination(s) matching '{}':", found.len(), query);
                print_destinations(&found);
            }
        }
        Command::List => {
            let store = app.store();
            if store.is_empty() {
                println!("📭 No destinations in your itinerary yet!");
            } else {
                println!("🗺️  YOUR TRAVEL ITINERARY ({} destinations)", store.len());
                println!("{}", "=".repeat(60));
                let all: Vec<&Destination> = store.list_all().iter().collect();
                print_destinations(&all);
            }
        }
        Command::Sort { by } => {
            app.sort(by.into())?;
            match by {
                SortField::Date => println!("✅ Destinations sorted by start date!"),
                SortField::Budget => println!("✅ Destinations sorted by budget!"),
            }
        }
        Command::Suggest { kind, city, offline } => {
            let advice = app.suggest(&city, kind.into(), offline).await?;
            if let Some(notice) = template_notice(advice.status) {
                eprintln!("{}", notice);
            }
            println!("{}", advice.text);
        }
        Command::SetKey { key } => match app.set_api_key(&key).await? {
            AdvisorStatus::Ready => {
                println!("✅ OpenAI API key validated and saved to {}", app.config_path().display());
            }
            _ => {
                return Err(DomainError::AdvisoryAuth);
            }
        },
        Command::Paths => {
            println!("config:    {}", app.config_path().display());
            println!("logs:      {}", app.logs_dir().display());
            println!("itinerary: {}", app.itinerary_path().display());
        }
    }

    Ok(())
}
