pub mod advice;
pub mod config;
pub mod credential;
pub mod destination;
pub mod error;

pub use advice::{fallback_advice, AdviceIntent};
pub use config::AppConfig;
pub use credential::ApiKey;
pub use destination::{Destination, DestinationUpdate};
pub use error::DomainError;
