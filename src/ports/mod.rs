pub mod advisor;
pub mod config;
pub mod http;
pub mod repository;

pub use advisor::{Advisor, AdvisorStatus};
pub use config::ConfigStore;
pub use http::HttpClient;
pub use repository::ItineraryRepository;
