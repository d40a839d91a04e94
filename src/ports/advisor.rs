use async_trait::async_trait;

use crate::domain::{AdviceIntent, Destination, DomainError};

/// Why an advisor does or does not produce generated advice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvisorStatus {
    /// A usable API key is configured.
    Ready,
    /// Offline mode was requested.
    Offline,
    /// No API key was found.
    MissingKey,
    /// The API rejected the configured key.
    KeyRejected,
}

/// Port for generated travel advice.
///
/// Implementations that cannot reach their backend must still answer with
/// the offline template instead of failing.
#[async_trait]
pub trait Advisor: Send + Sync {
    /// Availability of generated advice. Fixed at construction.
    fn status(&self) -> AdvisorStatus;

    /// Whether generated (non-template) advice is available.
    fn is_available(&self) -> bool {
        self.status() == AdvisorStatus::Ready
    }

    /// Generate advice for a destination.
    async fn generate(
        &self,
        destination: &Destination,
        intent: AdviceIntent,
    ) -> Result<String, DomainError>;

    /// Generate a day-by-day itinerary.
    async fn generate_itinerary(&self, destination: &Destination) -> Result<String, DomainError> {
        self.generate(destination, AdviceIntent::Itinerary).await
    }

    /// Generate money-saving tips.
    async fn generate_budget_tips(&self, destination: &Destination) -> Result<String, DomainError> {
        self.generate(destination, AdviceIntent::BudgetTips).await
    }
}
