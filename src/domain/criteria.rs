use chrono::{DateTime, Duration, NaiveTime, Utc};
use serde::Deserialize;

const METERS_PER_MILE: f64 = 1609.34;
const METERS_PER_KILOMETER: f64 = 1000.0;
const DAYS_PER_YEAR: i64 = 365;

/// Distance unit accepted in feed configurations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceUnit {
    #[default]
    #[serde(alias = "kilometers")]
    Km,
    #[serde(alias = "miles")]
    Mi,
}

impl DistanceUnit {
    pub fn to_meters(self, radius: f64) -> f64 {
        match self {
            DistanceUnit::Km => radius * METERS_PER_KILOMETER,
            DistanceUnit::Mi => radius * METERS_PER_MILE,
        }
    }
}

/// Geographic filter for the primary query, radius normalized to meters
#[derive(Debug, Clone, PartialEq)]
pub struct LocationFilter {
    pub latitude: f64,
    pub longitude: f64,
    pub radius_meters: f64,
}

/// Resolved date bounds as Unix timestamps.
///
/// Absence of a window means unbounded; it is never encoded as a huge
/// numeric range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub after: i64,
    pub before: i64,
}

/// The two date-window shapes a feed configuration may use
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateWindowSpec {
    /// Symmetric window of `years * 365` days in both directions
    SymmetricYears(u32),
    /// Asymmetric window in days, relative to today
    DayOffsets { ahead: u32, behind: u32 },
}

impl DateWindowSpec {
    /// Resolve to concrete bounds anchored at the UTC midnight floor of
    /// `today`. A zero-year symmetric window means "no filtering at all".
    pub fn resolve(self, today: DateTime<Utc>) -> Option<DateWindow> {
        let (ahead, behind) = match self {
            DateWindowSpec::SymmetricYears(0) => return None,
            DateWindowSpec::SymmetricYears(years) => {
                let days = i64::from(years) * DAYS_PER_YEAR;
                (days, days)
            }
            DateWindowSpec::DayOffsets { ahead, behind } => (i64::from(ahead), i64::from(behind)),
        };

        let midnight = today.date_naive().and_time(NaiveTime::MIN).and_utc();
        Some(DateWindow {
            after: (midnight - Duration::days(behind)).timestamp(),
            before: (midnight + Duration::days(ahead)).timestamp(),
        })
    }
}

/// Post-fetch filter parameters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterParams {
    pub min_attendees: u32,
}

/// Everything the union fetcher needs for one feed generation run
#[derive(Debug, Clone, PartialEq)]
pub struct QueryCriteria {
    pub videogame_ids: Vec<i64>,
    pub owner_ids: Vec<String>,
    pub location: Option<LocationFilter>,
    pub window: Option<DateWindow>,
    pub filters: FilterParams,
    pub per_page: u32,
}
