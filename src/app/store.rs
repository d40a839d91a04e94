use std::path::Path;

use tracing::{debug, info, warn};

use crate::domain::{Destination, DestinationUpdate, DomainError};
use crate::ports::ItineraryRepository;

/// In-memory itinerary backed by a repository.
///
/// Mutations only touch memory. Call [`save`](Self::save) to persist and
/// [`load`](Self::load) to replace the list with the stored one.
pub struct ItineraryStore {
    destinations: Vec<Destination>,
    repository: Box<dyn ItineraryRepository>,
}

impl ItineraryStore {
    /// Create an empty store. Nothing is read until `load`.
    pub fn new(repository: Box<dyn ItineraryRepository>) -> Self {
        Self {
            destinations: Vec::new(),
            repository,
        }
    }

    /// Append a destination.
    pub fn add(&mut self, destination: Destination) {
        info!(city = destination.city(), country = destination.country(), "Destination added");
        self.destinations.push(destination);
    }

    /// Remove the first destination whose city matches, ignoring case.
    pub fn remove(&mut self, city: &str) -> bool {
        match self.destinations.iter().position(|d| d.matches_city(city)) {
            Some(index) => {
                let removed = self.destinations.remove(index);
                info!(city = removed.city(), country = removed.country(), "Destination removed");
                true
            }
            None => {
                debug!(city = city, "No destination to remove");
                false
            }
        }
    }

    /// First destination whose city matches, ignoring case.
    pub fn find_by_city(&self, city: &str) -> Option<&Destination> {
        self.destinations.iter().find(|d| d.matches_city(city))
    }

    fn find_by_city_mut(&mut self, city: &str) -> Option<&mut Destination> {
        self.destinations.iter_mut().find(|d| d.matches_city(city))
    }

    /// Apply updates to the first matching destination.
    ///
    /// Returns `Ok(false)` if no destination matches. If the updated record
    /// would be invalid, nothing changes and the validation error is returned.
    pub fn update(&mut self, city: &str, updates: &[DestinationUpdate]) -> Result<bool, DomainError> {
        let Some(destination) = self.find_by_city_mut(city) else {
            return Ok(false);
        };
        destination.apply(updates)?;
        info!(city = destination.city(), changes = updates.len(), "Destination updated");
        Ok(true)
    }

    /// Destinations whose city, country or any activity contains `query`,
    /// ignoring case, in list order.
    pub fn search(&self, query: &str) -> Vec<&Destination> {
        self.destinations
            .iter()
            .filter(|d| d.matches_query(query))
            .collect()
    }

    /// All destinations in current order.
    pub fn list_all(&self) -> &[Destination] {
        &self.destinations
    }

    pub fn len(&self) -> usize {
        self.destinations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.destinations.is_empty()
    }

    /// Stable sort by start date, earliest first.
    pub fn sort_by_date(&mut self) {
        self.destinations.sort_by_key(Destination::start_date);
    }

    /// Stable sort by budget, cheapest first.
    pub fn sort_by_budget(&mut self) {
        self.destinations
            .sort_by(|a, b| a.budget().total_cmp(&b.budget()));
    }

    /// Write every destination to the repository.
    pub fn save(&self) -> Result<(), DomainError> {
        self.repository.save(&self.destinations).inspect_err(|e| {
            warn!(path = ?self.repository.path(), error = %e, "Failed to save itinerary");
        })
    }

    /// Replace the in-memory list with the stored one.
    ///
    /// A missing file leaves the list untouched. On error nothing changes.
    pub fn load(&mut self) -> Result<(), DomainError> {
        match self.repository.load() {
            Ok(Some(destinations)) => {
                self.destinations = destinations;
                Ok(())
            }
            Ok(None) => Ok(()),
            Err(e) => {
                warn!(path = ?self.repository.path(), error = %e, "Failed to load itinerary");
                Err(e)
            }
        }
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        self.repository.path()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};

    /// Repository kept in memory so tests can inspect what was saved.
    #[derive(Clone, Default)]
    struct MemoryRepository {
        stored: Arc<Mutex<Option<Vec<Destination>>>>,
        fail: bool,
        path: PathBuf,
    }

    impl ItineraryRepository for MemoryRepository {
        fn load(&self) -> Result<Option<Vec<Destination>>, DomainError> {
            if self.fail {
                return Err(DomainError::MalformedRecord("broken".to_string()));
            }
            Ok(self.stored.lock().unwrap().clone())
        }

        fn save(&self, destinations: &[Destination]) -> Result<(), DomainError> {
            if self.fail {
                return Err(DomainError::Io("disk full".to_string()));
            }
            *self.stored.lock().unwrap() = Some(destinations.to_vec());
            Ok(())
        }

        fn path(&self) -> &Path {
            &self.path
        }
    }

    fn dest(city: &str, start: &str, budget: f64, activities: &[&str]) -> Destination {
        Destination::new(
            city,
            "Country",
            start,
            "2030-12-31",
            budget,
            activities.iter().map(|a| a.to_string()).collect(),
        )
        .unwrap()
    }

    fn cities(destinations: &[Destination]) -> Vec<&str> {
        destinations.iter().map(Destination::city).collect()
    }

    fn store() -> ItineraryStore {
        ItineraryStore::new(Box::new(MemoryRepository::default()))
    }

    #[test]
    fn test_add_search_remove_example() {
        let mut store = store();
        store.add(
            Destination::new(
                "Paris",
                "France",
                "2024-05-01",
                "2024-05-05",
                1500.0,
                vec!["Museums".into(), "Food".into()],
            )
            .unwrap(),
        );

        let found = store.search("mus");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].city(), "Paris");

        assert!(store.remove("paris"));
        assert!(store.is_empty());
        assert!(!store.remove("paris"));
    }

    #[test]
    fn test_remove_only_first_match() {
        let mut store = store();
        store.add(dest("Rome", "2024-01-01", 100.0, &["A"]));
        store.add(dest("Rome", "2024-02-01", 200.0, &["B"]));
        store.add(dest("Oslo", "2024-03-01", 300.0, &["C"]));

        assert!(store.remove("ROME"));
        assert_eq!(store.len(), 2);
        assert_eq!(store.list_all()[0].budget(), 200.0);

        assert!(!store.remove("Berlin"));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_search_matches_each_field_in_order() {
        let mut store = store();
        store.add(dest("Cairo", "2024-01-01", 100.0, &["Pyramids"]));
        store.add(dest("Reykjavik", "2024-01-01", 100.0, &["Hot springs"]));
        store.add(dest("Springfield", "2024-01-01", 100.0, &["Donuts"]));

        let found: Vec<&str> = store.search("SPRING").iter().map(|d| d.city()).collect();
        assert_eq!(found, vec!["Reykjavik", "Springfield"]);
        assert_eq!(store.search("country").len(), 3);
        assert_eq!(store.search("").len(), 3);
        assert!(store.search("zzz").is_empty());
    }

    #[test]
    fn test_update_found_and_missing() {
        let mut store = store();
        store.add(dest("Lima", "2024-01-01", 100.0, &["A"]));

        assert!(store.update("lima", &[DestinationUpdate::Budget(250.0)]).unwrap());
        assert_eq!(store.find_by_city("LIMA").unwrap().budget(), 250.0);

        assert!(!store.update("Quito", &[DestinationUpdate::Budget(1.0)]).unwrap());
    }

    #[test]
    fn test_invalid_update_leaves_record() {
        let mut store = store();
        store.add(dest("Lima", "2024-01-01", 100.0, &["A"]));

        let result = store.update("Lima", &[DestinationUpdate::Budget(-1.0)]);
        assert!(matches!(result, Err(DomainError::Validation(_))));
        assert_eq!(store.find_by_city("Lima").unwrap().budget(), 100.0);
    }

    #[test]
    fn test_sorts_are_stable() {
        let mut store = store();
        store.add(dest("A", "2024-03-01", 300.0, &["x"]));
        store.add(dest("B", "2024-01-01", 100.0, &["x"]));
        store.add(dest("C", "2024-03-01", 100.0, &["x"]));
        store.add(dest("D", "2024-01-01", 300.0, &["x"]));

        store.sort_by_date();
        assert_eq!(cities(store.list_all()), vec!["B", "D", "A", "C"]);

        store.sort_by_budget();
        assert_eq!(cities(store.list_all()), vec!["B", "C", "D", "A"]);
    }

    #[test]
    fn test_save_then_load_reproduces_sequence() {
        let repository = MemoryRepository::default();
        let mut first = ItineraryStore::new(Box::new(repository.clone()));
        first.add(dest("Z", "2024-05-01", 10.0, &["x"]));
        first.add(dest("A", "2024-01-01", 20.0, &["y", "z"]));
        first.save().unwrap();

        let mut second = ItineraryStore::new(Box::new(repository));
        second.add(dest("Stale", "2024-01-01", 1.0, &["x"]));
        second.load().unwrap();
        assert_eq!(second.list_all(), first.list_all());
    }

    #[test]
    fn test_load_without_stored_data_keeps_memory() {
        let mut store = store();
        store.load().unwrap();
        assert!(store.is_empty());

        store.add(dest("Kept", "2024-01-01", 1.0, &["x"]));
        store.load().unwrap();
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_failed_load_and_save_keep_memory() {
        let repository = MemoryRepository {
            fail: true,
            ..Default::default()
        };
        let mut store = ItineraryStore::new(Box::new(repository));
        store.add(dest("Kept", "2024-01-01", 1.0, &["x"]));

        assert!(store.load().is_err());
        assert!(store.save().is_err());
        assert_eq!(cities(store.list_all()), vec!["Kept"]);
    }
}
