use std::path::PathBuf;
use std::time::Duration;

use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;

use crate::adapters::{AdvisorSettings, JsonItineraryStore, OpenAiAdvisor, ReqwestHttpClient, TomlConfigStore};
use crate::app::ItineraryStore;
use crate::domain::config::AdvisorConfig;
use crate::domain::{AdviceIntent, ApiKey, AppConfig, Destination, DestinationUpdate, DomainError};
use crate::infrastructure::init_logging;
use crate::ports::{Advisor, AdvisorStatus, ConfigStore, HttpClient};

/// Overrides supplied on the command line.
#[derive(Debug, Clone, Default)]
pub struct ControllerOptions {
    /// Directory holding `config.toml`; the OS config dir when unset.
    pub config_dir: Option<PathBuf>,
    /// Itinerary file; `storage.itinerary_file` when unset.
    pub itinerary_file: Option<PathBuf>,
}

/// Which field to order the itinerary by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    StartDate,
    Budget,
}

/// Generated or template advice for one destination.
#[derive(Debug, Clone)]
pub struct Advice {
    pub text: String,
    /// Anything but `Ready` means the offline template was used.
    pub status: AdvisorStatus,
}

/// Application controller that wires configuration, logging, storage and the
/// advisor together. Every mutating operation is persisted before returning.
pub struct AppController {
    config: AppConfig,
    config_store: TomlConfigStore,
    store: ItineraryStore,
    _log_guard: Option<WorkerGuard>,
}

impl AppController {
    /// Initialize configuration and logging, then load the itinerary.
    pub fn new(options: ControllerOptions) -> Result<Self, DomainError> {
        // Step 1: Initialize config store
        let config_store = match options.config_dir {
            Some(dir) => TomlConfigStore::with_config_dir(dir)?,
            None => TomlConfigStore::new()?,
        };

        // Step 2: Load configuration
        let config = config_store.load()?;

        // Step 3: Initialize logging
        let log_guard = init_logging(
            &config_store.logs_dir(),
            &config.logging.level,
            config.logging.file_logging,
        )?;

        // Step 4: Load the itinerary. A command-line file only applies to this
        // run and is never written back to the config.
        let itinerary_file = options
            .itinerary_file
            .unwrap_or_else(|| config.storage.itinerary_file.clone());
        let repository = JsonItineraryStore::new(itinerary_file);
        let mut store = ItineraryStore::new(Box::new(repository));
        store.load()?;

        info!(
            path = ?store.path(),
            destinations = store.len(),
            "AppController initialized"
        );

        Ok(Self {
            config,
            config_store,
            store,
            _log_guard: log_guard,
        })
    }

    /// Read-only access to the itinerary.
    pub fn store(&self) -> &ItineraryStore {
        &self.store
    }

    /// Add a destination and save.
    pub fn add(&mut self, destination: Destination) -> Result<(), DomainError> {
        self.store.add(destination);
        self.store.save()
    }

    /// Remove a destination by city and save.
    pub fn remove(&mut self, city: &str) -> Result<Destination, DomainError> {
        let removed = self
            .store
            .find_by_city(city)
            .cloned()
            .ok_or_else(|| DomainError::NotFound(city.to_string()))?;
        self.store.remove(city);
        self.store.save()?;
        Ok(removed)
    }

    /// Update a destination by city and save.
    pub fn update(&mut self, city: &str, updates: &[DestinationUpdate]) -> Result<&Destination, DomainError> {
        if updates.is_empty() {
            return Err(DomainError::Validation("nothing to update".to_string()));
        }
        if !self.store.update(city, updates)? {
            return Err(DomainError::NotFound(city.to_string()));
        }
        self.store.save()?;
        self.store
            .find_by_city(city)
            .ok_or_else(|| DomainError::NotFound(city.to_string()))
    }

    /// Reorder the itinerary and save.
    pub fn sort(&mut self, key: SortKey) -> Result<(), DomainError> {
        match key {
            SortKey::StartDate => self.store.sort_by_date(),
            SortKey::Budget => self.store.sort_by_budget(),
        }
        self.store.save()
    }

    /// Generate advice for the destination matching `city`.
    ///
    /// The advisor is built per call so the startup key check only runs when
    /// advice is actually requested.
    pub async fn suggest(
        &self,
        city: &str,
        intent: AdviceIntent,
        offline: bool,
    ) -> Result<Advice, DomainError> {
        let destination = self
            .store
            .find_by_city(city)
            .ok_or_else(|| DomainError::NotFound(city.to_string()))?;

        let advisor = self.connect_advisor(offline).await?;
        let text = advisor.generate(destination, intent).await?;

        Ok(Advice {
            text,
            status: advisor.status(),
        })
    }

    async fn connect_advisor(&self, offline: bool) -> Result<Box<dyn Advisor>, DomainError> {
        let advisor_config = &self.config.advisor;
        let http = ReqwestHttpClient::new(Duration::from_secs(advisor_config.timeout_secs))?;
        let settings = AdvisorSettings::from(advisor_config);

        if offline || advisor_config.offline {
            info!("Offline mode, using advice templates");
            return Ok(Box::new(OpenAiAdvisor::offline(http, settings)));
        }

        let credential = ApiKey::resolve(
            advisor_config.api_key.as_deref(),
            &AdvisorConfig::API_KEY_ENV_VARS,
            |name| std::env::var(name).ok(),
        );

        Ok(Box::new(OpenAiAdvisor::connect(http, settings, credential).await))
    }

    /// Validate `key` against the API and store it in the config file.
    pub async fn set_api_key(&mut self, key: &str) -> Result<AdvisorStatus, DomainError> {
        let http = ReqwestHttpClient::new(Duration::from_secs(self.config.advisor.timeout_secs))?;
        self.adopt_api_key(http, key).await
    }

    /// Check `key` through `http` and persist it only if the advisor accepts it.
    ///
    /// Returns the resulting advisor status; the config is untouched unless it
    /// is `Ready`.
    pub async fn adopt_api_key<H: HttpClient>(
        &mut self,
        http: H,
        key: &str,
    ) -> Result<AdvisorStatus, DomainError> {
        let api_key = ApiKey::new(key)
            .ok_or_else(|| DomainError::Validation("API key must not be empty".to_string()))?;

        let mut settings = AdvisorSettings::from(&self.config.advisor);
        settings.validate_on_startup = true;
        let advisor = OpenAiAdvisor::connect(http, settings, Ok(api_key)).await;

        if advisor.is_available() {
            let mut config = self.config.clone();
            config.advisor.api_key = Some(key.trim().to_string());
            self.config_store.save(&config)?;
            self.config = config;
            info!("API key stored in configuration");
        }

        Ok(advisor.status())
    }

    /// Get the config file path.
    pub fn config_path(&self) -> PathBuf {
        self.config_store.config_path()
    }

    /// Get the logs directory path.
    pub fn logs_dir(&self) -> PathBuf {
        self.config_store.logs_dir()
    }

    /// Get the itinerary file path.
    pub fn itinerary_path(&self) -> PathBuf {
        self.store.path().to_path_buf()
    }
}
