use std::path::Path;

use crate::domain::{Destination, DomainError};

/// Port for persisting the full destination list.
pub trait ItineraryRepository: Send + Sync {
    /// Load every stored destination.
    ///
    /// Returns `Ok(None)` when nothing has been stored yet.
    fn load(&self) -> Result<Option<Vec<Destination>>, DomainError>;

    /// Replace the stored list with `destinations`.
    fn save(&self, destinations: &[Destination]) -> Result<(), DomainError>;

    /// Location of the backing file.
    fn path(&self) -> &Path;
}
