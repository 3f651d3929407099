//! Selectable locations

use crate::clock::parse_zone;
use anyhow::{bail, Result};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// A location as written in the config file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationSpec {
    pub label: String,
    pub timezone: String,
    pub city: String,
}

impl LocationSpec {
    pub fn new(label: &str, timezone: &str, city: &str) -> Self {
        Self {
            label: label.to_string(),
            timezone: timezone.to_string(),
            city: city.to_string(),
        }
    }
}

/// A location with its timezone resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub label: String,
    pub zone: Tz,
    pub city: String,
}

impl Location {
    pub fn timezone_name(&self) -> &'static str {
        self.zone.name()
    }
}

impl TryFrom<&LocationSpec> for Location {
    type Error = anyhow::Error;

    fn try_from(spec: &LocationSpec) -> Result<Self> {
        let Some(zone) = parse_zone(&spec.timezone) else {
            bail!(
                "Unknown timezone '{}' for location '{}'",
                spec.timezone,
                spec.label
            );
        };
        Ok(Location {
            label: spec.label.clone(),
            zone,
            city: spec.city.clone(),
        })
    }
}

/// Built-in location list
pub fn default_locations() -> Vec<LocationSpec> {
    [
        ("London", "Europe/London", "London"),
        ("New York", "America/New_York", "New York"),
        ("Mumbai", "Asia/Kolkata", "Mumbai"),
        ("Tokyo", "Asia/Tokyo", "Tokyo"),
        ("Dubai", "Asia/Dubai", "Dubai"),
        ("Sydney", "Australia/Sydney", "Sydney"),
        ("Paris", "Europe/Paris", "Paris"),
        ("Greece", "Europe/Athens", "Athens"),
        ("Egypt", "Africa/Cairo", "Cairo"),
        ("Russia", "Europe/Moscow", "Moscow"),
        ("Saudi Arabia", "Asia/Riyadh", "Riyadh"),
        ("Sri Lanka", "Asia/Colombo", "Colombo"),
        ("Nepal", "Asia/Kathmandu", "Kathmandu"),
        ("Australia", "Australia/Melbourne", "Melbourne"),
        ("China", "Asia/Shanghai", "Shanghai"),
        ("Hong Kong", "Asia/Hong_Kong", "Hong Kong"),
        ("Spain", "Europe/Madrid", "Madrid"),
        ("Mexico", "America/Mexico_City", "Mexico City"),
    ]
    .into_iter()
    .map(|(label, tz, city)| LocationSpec::new(label, tz, city))
    .collect()
}

/// Non-empty list of locations with exactly one selected
#[derive(Debug, Clone)]
pub struct LocationSet {
    locations: Vec<Location>,
    current: usize,
}

impl LocationSet {
    /// Resolve every spec; any unknown timezone or an empty list is an error.
    pub fn from_specs(specs: &[LocationSpec]) -> Result<Self> {
        if specs.is_empty() {
            bail!("Location list is empty");
        }
        let locations = specs
            .iter()
            .map(Location::try_from)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            locations,
            current: 0,
        })
    }

    pub fn all(&self) -> &[Location] {
        &self.locations
    }

    pub fn current(&self) -> &Location {
        &self.locations[self.current]
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Select by index; out-of-range indices are ignored
    pub fn select(&mut self, idx: usize) -> Option<&Location> {
        if idx < self.locations.len() {
            self.current = idx;
            Some(&self.locations[idx])
        } else {
            None
        }
    }

    /// Select by label, ignoring ASCII case
    pub fn select_label(&mut self, label: &str) -> Option<&Location> {
        let idx = self
            .locations
            .iter()
            .position(|l| l.label.eq_ignore_ascii_case(label))?;
        self.select(idx)
    }
}
