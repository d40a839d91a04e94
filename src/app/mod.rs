pub mod controller;
pub mod store;

pub use controller::AppController;
pub use store::ItineraryStore;
