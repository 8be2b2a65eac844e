use serde::{Deserialize, Deserializer, Serialize};

/// Raw tournament record from the start.gg API
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tournament {
    pub id: i64,
    pub name: String,
    pub slug: String,
    #[serde(rename = "startAt", deserialize_with = "lenient_timestamp")]
    pub start_at: Option<i64>,
    #[serde(rename = "endAt", deserialize_with = "lenient_timestamp")]
    pub end_at: Option<i64>,
    pub timezone: Option<String>,
    #[serde(rename = "venueAddress")]
    pub venue_address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    #[serde(rename = "countryCode")]
    pub country_code: Option<String>,
    #[serde(rename = "isRegistrationOpen")]
    pub is_registration_open: Option<bool>,
    #[serde(rename = "numAttendees")]
    pub num_attendees: Option<u32>,
    pub events: Vec<TournamentEvent>,
}

impl Tournament {
    /// Distinct game names across all sub-events, sorted alphabetically
    pub fn game_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .events
            .iter()
            .filter_map(|e| e.videogame.as_ref())
            .filter_map(|v| v.name.clone())
            .collect();
        names.sort();
        names.dedup();
        names
    }

    pub fn event_names(&self) -> Vec<String> {
        self.events.iter().map(|e| e.name.clone()).collect()
    }

    pub fn detail_url(&self) -> String {
        format!("https://start.gg/{}", self.slug)
    }
}

/// Sub-event (bracket) within a tournament
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TournamentEvent {
    pub name: String,
    pub videogame: Option<Videogame>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Videogame {
    pub id: Option<i64>,
    pub name: Option<String>,
}

/// Accept a Unix timestamp as a number or numeric string; anything else
/// (null, malformed text) becomes None instead of a record-level failure.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n.as_i64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}
