use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::domain::{DateWindowSpec, DistanceUnit, LocationFilter};

/// One calendar feed configuration, loaded from a JSON or YAML file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub games: Vec<GameRef>,
    pub owners: Vec<OwnerRef>,
    pub location: Option<LocationConfig>,
    pub date_range_years: Option<u32>,
    pub filters: FiltersConfig,
    pub calendar: CalendarConfig,
}

impl FeedConfig {
    /// Load a feed configuration, picking the parser by file extension
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();

        let config = match extension.as_str() {
            "yaml" | "yml" => serde_yml::from_str(&contents)
                .with_context(|| format!("Invalid YAML config: {}", path.display()))?,
            _ => serde_json::from_str(&contents)
                .with_context(|| format!("Invalid JSON config: {}", path.display()))?,
        };

        Ok(config)
    }

    /// Date-window shape for this feed. The day-offset form under `filters`
    /// takes precedence over the top-level year form; neither present means
    /// unbounded.
    pub fn date_window(&self) -> Option<DateWindowSpec> {
        if let Some(ahead) = self.filters.date_range_days {
            return Some(DateWindowSpec::DayOffsets {
                ahead,
                behind: self.filters.include_past_days.unwrap_or(0),
            });
        }
        self.date_range_years.map(DateWindowSpec::SymmetricYears)
    }
}

/// Game list entry: `{ "id": 1 }`, `{ "name": "Melee" }`, or `"Melee"`
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum GameRef {
    Id { id: i64 },
    Named { name: String },
    Name(String),
}

/// Owner list entry: `"12345"`, `12345`, or `{ "id": ... }`
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OwnerRef {
    Id { id: IdValue },
    Plain(IdValue),
}

impl OwnerRef {
    pub fn id(&self) -> String {
        match self {
            OwnerRef::Id { id } | OwnerRef::Plain(id) => id.to_string(),
        }
    }
}

/// Identifier that configs may write as a number or a string
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum IdValue {
    Number(i64),
    Text(String),
}

impl std::fmt::Display for IdValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IdValue::Number(n) => write!(f, "{n}"),
            IdValue::Text(s) => write!(f, "{s}"),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LocationConfig {
    pub center: Option<Coordinates>,
    pub radius: Option<f64>,
    pub radius_unit: DistanceUnit,
}

impl LocationConfig {
    /// Build the query filter; requires both a center and a radius.
    /// Coordinates without a radius disable location filtering entirely.
    pub fn to_filter(&self) -> Option<LocationFilter> {
        let center = self.center.as_ref()?;
        let radius = self.radius?;
        Some(LocationFilter {
            latitude: center.latitude,
            longitude: center.longitude,
            radius_meters: self.radius_unit.to_meters(radius),
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FiltersConfig {
    pub min_attendees: u32,
    pub max_events: Option<u32>,
    pub date_range_days: Option<u32>,
    pub include_past_days: Option<u32>,
}

/// Calendar-level metadata for the rendered feed
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CalendarConfig {
    pub title: String,
    pub description: String,
    pub timezone: String,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            title: "Tournament Calendar".to_string(),
            description: "Upcoming tournaments".to_string(),
            timezone: "UTC".to_string(),
        }
    }
}
