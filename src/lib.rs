#![forbid(unsafe_code)]

pub mod adapters;
pub mod app;
pub mod commands;
pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use app::{AppController, ItineraryStore};
pub use commands::Cli;
pub use domain::{Destination, DestinationUpdate, DomainError};

/// Run one command line to completion.
pub async fn run(cli: Cli) -> Result<(), DomainError> {
    commands::execute(cli).await
}
