pub mod config_store;
pub mod http_client;
pub mod json_store;
pub mod openai_advisor;

pub use config_store::TomlConfigStore;
pub use http_client::ReqwestHttpClient;
pub use json_store::JsonItineraryStore;
pub use openai_advisor::{AdvisorSettings, OpenAiAdvisor};
