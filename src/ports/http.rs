use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::domain::{ApiKey, DomainError};

/// HTTP client port for all network requests.
/// All network traffic must go through this interface.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Perform a POST request with a JSON body and bearer authentication.
    ///
    /// Non-success responses map to [`DomainError::HttpStatus`].
    async fn post_json<T: Serialize + Send + Sync, R: DeserializeOwned>(
        &self,
        url: &str,
        token: &ApiKey,
        body: &T,
    ) -> Result<R, DomainError>;
}
