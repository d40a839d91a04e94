use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// Calendar date format used for input and persistence.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` date.
pub fn validate_date(text: &str) -> Result<NaiveDate, DomainError> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT).map_err(|_| {
        DomainError::Validation(format!("invalid date '{}', use YYYY-MM-DD", text.trim()))
    })
}

/// Parse a budget amount. Only the format is checked here; positivity is a
/// record invariant checked by [`Destination::validate`].
pub fn parse_budget(text: &str) -> Result<f64, DomainError> {
    text.trim()
        .trim_start_matches('$')
        .parse::<f64>()
        .map_err(|_| DomainError::Validation(format!("invalid budget '{}'", text.trim())))
}

/// Split a comma-separated activity list, dropping blank entries.
pub fn split_activities(text: &str) -> Vec<String> {
    clean_activities(text.split(',').map(str::to_string).collect())
}

fn clean_activities(activities: Vec<String>) -> Vec<String> {
    activities
        .into_iter()
        .map(|a| a.trim().to_string())
        .filter(|a| !a.is_empty())
        .collect()
}

/// A single trip in the itinerary.
///
/// Serializes to the persisted JSON shape:
/// `{city, country, start_date, end_date, budget, activities}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Destination {
    city: String,
    country: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    budget: f64,
    activities: Vec<String>,
}

impl Destination {
    /// Create a validated destination.
    pub fn new(
        city: impl Into<String>,
        country: impl Into<String>,
        start_date: &str,
        end_date: &str,
        budget: f64,
        activities: Vec<String>,
    ) -> Result<Self, DomainError> {
        let destination = Self {
            city: city.into().trim().to_string(),
            country: country.into().trim().to_string(),
            start_date: validate_date(start_date)?,
            end_date: validate_date(end_date)?,
            budget,
            activities: clean_activities(activities),
        };
        destination.validate()?;
        Ok(destination)
    }

    /// Check every record invariant.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.city.trim().is_empty() {
            return Err(DomainError::Validation("city must not be empty".to_string()));
        }
        if self.country.trim().is_empty() {
            return Err(DomainError::Validation("country must not be empty".to_string()));
        }
        if self.end_date < self.start_date {
            return Err(DomainError::Validation(format!(
                "end date {} is before start date {}",
                self.end_date, self.start_date
            )));
        }
        if !self.budget.is_finite() || self.budget <= 0.0 {
            return Err(DomainError::Validation("budget must be greater than zero".to_string()));
        }
        if self.activities.is_empty() {
            return Err(DomainError::Validation(
                "at least one activity is required".to_string(),
            ));
        }
        Ok(())
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    pub fn budget(&self) -> f64 {
        self.budget
    }

    pub fn activities(&self) -> &[String] {
        &self.activities
    }

    /// Number of travel days, counting both the start and end date.
    pub fn day_count(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }

    /// Case-insensitive identity match on the city name.
    pub fn matches_city(&self, city: &str) -> bool {
        self.city.to_lowercase() == city.trim().to_lowercase()
    }

    /// Case-insensitive substring match on city, country or any activity.
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.city.to_lowercase().contains(&query)
            || self.country.to_lowercase().contains(&query)
            || self
                .activities
                .iter()
                .any(|activity| activity.to_lowercase().contains(&query))
    }

    /// Apply a batch of field updates.
    ///
    /// The whole record is revalidated afterwards; on failure the record is
    /// left exactly as it was.
    pub fn apply(&mut self, updates: &[DestinationUpdate]) -> Result<(), DomainError> {
        let mut candidate = self.clone();
        for update in updates {
            match update {
                DestinationUpdate::Country(country) => candidate.country = country.trim().to_string(),
                DestinationUpdate::StartDate(date) => candidate.start_date = *date,
                DestinationUpdate::EndDate(date) => candidate.end_date = *date,
                DestinationUpdate::Budget(budget) => candidate.budget = *budget,
                DestinationUpdate::Activities(activities) => {
                    candidate.activities = clean_activities(activities.clone())
                }
            }
        }
        candidate.validate()?;
        *self = candidate;
        Ok(())
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "City: {}", self.city)?;
        writeln!(f, "Country: {}", self.country)?;
        writeln!(f, "Travel Dates: {} to {}", self.start_date, self.end_date)?;
        writeln!(f, "Budget: ${:.2}", self.budget)?;
        writeln!(f, "Activities: {}", self.activities.join(", "))?;
        write!(f, "{}", "-".repeat(50))
    }
}

/// A change to one mutable field of a [`Destination`].
///
/// The city is the identity key and cannot be changed.
#[derive(Debug, Clone, PartialEq)]
pub enum DestinationUpdate {
    Country(String),
    StartDate(NaiveDate),
    EndDate(NaiveDate),
    Budget(f64),
    Activities(Vec<String>),
}

impl DestinationUpdate {
    /// Build an update from a field name and its textual value.
    pub fn parse(field: &str, value: &str) -> Result<Self, DomainError> {
        match field.trim().to_lowercase().as_str() {
            "country" => Ok(Self::Country(value.trim().to_string())),
            "start_date" | "start" => Ok(Self::StartDate(validate_date(value)?)),
            "end_date" | "end" => Ok(Self::EndDate(validate_date(value)?)),
            "budget" => Ok(Self::Budget(parse_budget(value)?)),
            "activities" => Ok(Self::Activities(split_activities(value))),
            "city" => Err(DomainError::Validation(
                "city identifies the destination and cannot be updated".to_string(),
            )),
            other => Err(DomainError::Validation(format!("unknown field '{}'", other))),
        }
    }
}

impl FromStr for DestinationUpdate {
    type Err = DomainError;

    /// Parse a `field=value` pair.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, value) = s.split_once('=').ok_or_else(|| {
            DomainError::Validation(format!("expected field=value, got '{}'", s))
        })?;
        Self::parse(field, value)
    }
}
