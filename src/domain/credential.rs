use std::fmt;

use zeroize::Zeroize;

use super::error::DomainError;

/// API key that is securely zeroed on drop and never printed.
#[derive(Clone, Zeroize)]
#[zeroize(drop)]
pub struct ApiKey {
    secret: String,
}

impl ApiKey {
    /// Wrap a key. Returns None for blank input.
    pub fn new(secret: impl Into<String>) -> Option<Self> {
        let mut secret = secret.into();
        let trimmed = secret.trim().to_string();
        secret.zeroize();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self { secret: trimmed })
        }
    }

    /// Resolve a key from an explicit override or the first non-blank
    /// variable in `env_vars`, looked up through `lookup`.
    pub fn resolve<F>(
        explicit: Option<&str>,
        env_vars: &[&str],
        lookup: F,
    ) -> Result<Self, DomainError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = explicit.and_then(ApiKey::new) {
            return Ok(key);
        }

        env_vars
            .iter()
            .find_map(|name| lookup(name).and_then(ApiKey::new))
            .ok_or_else(|| DomainError::AdvisoryUnavailable {
                reason: format!(
                    "no API key found; set one of {} or advisor.api_key in the config file",
                    env_vars.join(", ")
                ),
            })
    }

    /// Expose the raw key for request headers.
    pub fn expose(&self) -> &str {
        &self.secret
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}
