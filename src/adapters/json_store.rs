use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::domain::{Destination, DomainError};
use crate::ports::ItineraryRepository;

/// Itinerary repository backed by a single pretty-printed JSON array.
pub struct JsonItineraryStore {
    path: PathBuf,
}

impl JsonItineraryStore {
    /// Create a store for the given file. Nothing is read until `load`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "itinerary.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl ItineraryRepository for JsonItineraryStore {
    fn load(&self) -> Result<Option<Vec<Destination>>, DomainError> {
        if !self.path.exists() {
            debug!(path = ?self.path, "Itinerary file not found, nothing to load");
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;
        let destinations: Vec<Destination> = serde_json::from_str(&content)?;

        info!(path = ?self.path, count = destinations.len(), "Itinerary loaded");
        Ok(Some(destinations))
    }

    fn save(&self, destinations: &[Destination]) -> Result<(), DomainError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(destinations)
            .map_err(|e| DomainError::Serialization(e.to_string()))?;

        // Write to temp file first, then rename atomically
        let temp_path = self.temp_path();
        if let Err(e) = fs::write(&temp_path, content) {
            let _ = fs::remove_file(&temp_path);
            return Err(e.into());
        }
        if let Err(e) = fs::rename(&temp_path, &self.path) {
            let _ = fs::remove_file(&temp_path);
            return Err(e.into());
        }

        info!(path = ?self.path, count = destinations.len(), "Itinerary saved");
        Ok(())
    }

    fn path(&self) -> &Path {
        &self.path
    }
}
