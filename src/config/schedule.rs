//! Ordering schedule loading from config.toml.
//!
//! The schedule fixes the two enumerations the whole application pivots on:
//! the ordered list of stores (report columns) and the weekdays on which
//! stores may submit orders. Both ship with the chain's current defaults so
//! the application runs without a config file; a `config.toml` overrides
//! them when present.

use crate::errors::{Error, Result};
use chrono::{Datelike, NaiveDate};
use serde::Deserialize;
use std::path::Path;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Clone, Deserialize)]
pub struct Schedule {
    /// Ordered list of store identifiers; report columns follow this order
    pub stores: Vec<String>,
    /// Weekdays on which ordering is open
    pub ordering_days: Vec<OrderingDay>,
}

/// One configured ordering weekday
#[derive(Debug, Clone, Deserialize)]
pub struct OrderingDay {
    /// Weekday id, 0 = Monday .. 6 = Sunday (chrono's days-from-Monday)
    pub id: u32,
    /// Display name used in report headers
    pub name: String,
}

impl Default for Schedule {
    fn default() -> Self {
        let days = [
            (0, "SEGUNDA-FEIRA"),
            (1, "TERÇA-FEIRA"),
            (2, "QUARTA-FEIRA"),
            (3, "QUINTA-FEIRA"),
            (4, "SEXTA-FEIRA"),
            (5, "SÁBADO"),
        ];
        Self {
            stores: ["BCS", "SJN", "MEP", "FCL1", "FCL2", "FCL3"]
                .map(String::from)
                .to_vec(),
            ordering_days: days
                .into_iter()
                .map(|(id, name)| OrderingDay {
                    id,
                    name: name.to_string(),
                })
                .collect(),
        }
    }
}

impl Schedule {
    /// Returns the display name of the given weekday id, or `None` when the
    /// weekday is not an ordering day.
    #[must_use]
    pub fn day_name(&self, day_id: u32) -> Option<&str> {
        self.ordering_days
            .iter()
            .find(|d| d.id == day_id)
            .map(|d| d.name.as_str())
    }

    /// Weekday id of a date, in the 0 = Monday numbering the schedule uses.
    #[must_use]
    pub fn day_id_of(date: NaiveDate) -> u32 {
        date.weekday().num_days_from_monday()
    }

    /// Whether the given store is one of the configured stores.
    #[must_use]
    pub fn has_store(&self, store: &str) -> bool {
        self.stores.iter().any(|s| s == store)
    }
}

/// Loads the schedule from a TOML file.
///
/// # Errors
/// Returns an error if the file cannot be read or the TOML is invalid.
pub fn load_schedule<P: AsRef<Path>>(path: P) -> Result<Schedule> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads the schedule from the default location (./config.toml), falling
/// back to the built-in defaults when the file does not exist.
///
/// # Errors
/// Returns an error if the file exists but cannot be parsed.
pub fn load_or_default() -> Result<Schedule> {
    if Path::new("config.toml").exists() {
        load_schedule("config.toml")
    } else {
        Ok(Schedule::default())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_parse_schedule_config() {
        let toml_str = r#"
            stores = ["BCS", "SJN"]

            [[ordering_days]]
            id = 0
            name = "SEGUNDA-FEIRA"

            [[ordering_days]]
            id = 3
            name = "QUINTA-FEIRA"
        "#;

        let schedule: Schedule = toml::from_str(toml_str).unwrap();
        assert_eq!(schedule.stores, vec!["BCS", "SJN"]);
        assert_eq!(schedule.ordering_days.len(), 2);
        assert_eq!(schedule.day_name(3), Some("QUINTA-FEIRA"));
        assert_eq!(schedule.day_name(1), None);
    }

    #[test]
    fn test_default_schedule_covers_monday_to_saturday() {
        let schedule = Schedule::default();
        assert_eq!(schedule.stores.len(), 6);
        for id in 0..6 {
            assert!(schedule.day_name(id).is_some());
        }
        // Sunday is never an ordering day by default
        assert_eq!(schedule.day_name(6), None);
    }

    #[test]
    fn test_day_id_of_uses_monday_zero_numbering() {
        // 2024-01-01 was a Monday
        let monday = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(Schedule::day_id_of(monday), 0);
        let sunday = NaiveDate::from_ymd_opt(2024, 1, 7).unwrap();
        assert_eq!(Schedule::day_id_of(sunday), 6);
    }

    #[test]
    fn test_has_store() {
        let schedule = Schedule::default();
        assert!(schedule.has_store("BCS"));
        assert!(!schedule.has_store("XYZ"));
    }
}
