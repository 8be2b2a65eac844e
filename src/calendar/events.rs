use chrono::{DateTime, Duration, Utc};

use crate::domain::Tournament;

/// Assumed duration for tournaments whose listing has no end time
const DEFAULT_DURATION_HOURS: i64 = 4;

const UID_DOMAIN: &str = "startgg-calendar";

/// Feed-ready representation of one tournament
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarEvent {
    pub uid: String,
    pub summary: String,
    pub description: String,
    pub location: String,
    pub url: String,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl CalendarEvent {
    /// Map one tournament record. Total: missing optional fields degrade
    /// to absent parts, never to a failure.
    pub fn from_tournament(tournament: &Tournament) -> Self {
        let start = parse_timestamp(tournament.start_at);
        let end = parse_timestamp(tournament.end_at)
            .or_else(|| start.map(|s| s + Duration::hours(DEFAULT_DURATION_HOURS)));

        Self {
            uid: format!("tournament-{}@{}", tournament.id, UID_DOMAIN),
            summary: build_summary(tournament),
            description: build_description(tournament),
            location: build_location(tournament),
            url: tournament.detail_url(),
            start,
            end,
        }
    }
}

fn build_summary(tournament: &Tournament) -> String {
    let games = tournament.game_names();
    if games.is_empty() {
        tournament.name.clone()
    } else {
        format!("{} ({})", tournament.name, games.join(", "))
    }
}

fn build_description(tournament: &Tournament) -> String {
    let mut lines = Vec::new();

    if let Some(count) = tournament.num_attendees {
        lines.push(format!("Attendees: {count}"));
    }

    let event_names = tournament.event_names();
    if !event_names.is_empty() {
        lines.push(format!("Events: {}", event_names.join(", ")));
    }

    // Closed registration is worth flagging but never hides an event;
    // an absent flag means unknown and gets no line.
    if tournament.is_registration_open == Some(false) {
        lines.push("Registration Closed".to_string());
    }

    lines.push(format!("View on start.gg: {}", tournament.detail_url()));
    lines.join("\n")
}

fn build_location(tournament: &Tournament) -> String {
    let mut parts = Vec::new();

    if let Some(address) = &tournament.venue_address {
        parts.push(address.clone());
    }

    let city_state: Vec<&str> = [tournament.city.as_deref(), tournament.state.as_deref()]
        .into_iter()
        .flatten()
        .collect();
    if !city_state.is_empty() {
        parts.push(city_state.join(", "));
    }

    if let Some(country) = &tournament.country_code {
        parts.push(country.clone());
    }

    if parts.is_empty() {
        "TBD".to_string()
    } else {
        parts.join(", ")
    }
}

fn parse_timestamp(timestamp: Option<i64>) -> Option<DateTime<Utc>> {
    timestamp.and_then(|seconds| DateTime::from_timestamp(seconds, 0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{TournamentEvent, Videogame};
    use pretty_assertions::assert_eq;

    fn named_event(event: &str, game: Option<&str>) -> TournamentEvent {
        TournamentEvent {
            name: event.to_string(),
            videogame: game.map(|name| Videogame {
                id: Some(1),
                name: Some(name.to_string()),
            }),
        }
    }

    #[test]
    fn summary_appends_sorted_distinct_games() {
        let tournament = Tournament {
            name: "The Big House".to_string(),
            events: vec![
                named_event("Ultimate Singles", Some("Ultimate")),
                named_event("Melee Singles", Some("Melee")),
                named_event("Melee Doubles", Some("Melee")),
            ],
            ..Tournament::default()
        };

        let event = CalendarEvent::from_tournament(&tournament);
        assert_eq!(event.summary, "The Big House (Melee, Ultimate)");
    }

    #[test]
    fn summary_is_bare_name_without_named_games() {
        let tournament = Tournament {
            name: "Mystery Bracket".to_string(),
            events: vec![named_event("Side Event", None)],
            ..Tournament::default()
        };

        let event = CalendarEvent::from_tournament(&tournament);
        assert_eq!(event.summary, "Mystery Bracket");
    }

    #[test]
    fn description_includes_all_present_parts_in_order() {
        let tournament = Tournament {
            slug: "tournament/weekly-1".to_string(),
            num_attendees: Some(64),
            is_registration_open: Some(false),
            events: vec![
                named_event("Singles", Some("Melee")),
                named_event("Doubles", Some("Melee")),
            ],
            ..Tournament::default()
        };

        let event = CalendarEvent::from_tournament(&tournament);
        assert_eq!(
            event.description,
            "Attendees: 64\n\
             Events: Singles, Doubles\n\
             Registration Closed\n\
             View on start.gg: https://start.gg/tournament/weekly-1"
        );
    }

    #[test]
    fn description_omits_unknown_fields() {
        let tournament = Tournament {
            slug: "tournament/quiet".to_string(),
            ..Tournament::default()
        };

        let event = CalendarEvent::from_tournament(&tournament);
        assert_eq!(
            event.description,
            "View on start.gg: https://start.gg/tournament/quiet"
        );
    }

    #[test]
    fn unknown_registration_state_gets_no_closed_line() {
        let tournament = Tournament {
            is_registration_open: None,
            ..Tournament::default()
        };

        let event = CalendarEvent::from_tournament(&tournament);
        assert!(!event.description.contains("Registration Closed"));
    }

    #[test]
    fn location_joins_present_fields() {
        let tournament = Tournament {
            venue_address: Some("123 Main St".to_string()),
            city: Some("Springfield".to_string()),
            state: Some("IL".to_string()),
            country_code: Some("US".to_string()),
            ..Tournament::default()
        };

        let event = CalendarEvent::from_tournament(&tournament);
        assert_eq!(event.location, "123 Main St, Springfield, IL, US");
    }

    #[test]
    fn partial_city_state_still_joins() {
        let tournament = Tournament {
            state: Some("IL".to_string()),
            country_code: Some("US".to_string()),
            ..Tournament::default()
        };

        let event = CalendarEvent::from_tournament(&tournament);
        assert_eq!(event.location, "IL, US");
    }

    #[test]
    fn empty_location_falls_back_to_tbd() {
        let event = CalendarEvent::from_tournament(&Tournament::default());
        assert_eq!(event.location, "TBD");
    }

    #[test]
    fn missing_end_defaults_to_four_hours_after_start() {
        let tournament = Tournament {
            start_at: Some(1_000_000),
            end_at: None,
            ..Tournament::default()
        };

        let event = CalendarEvent::from_tournament(&tournament);
        assert_eq!(event.start, DateTime::from_timestamp(1_000_000, 0));
        assert_eq!(event.end, DateTime::from_timestamp(1_000_000 + 4 * 3600, 0));
    }

    #[test]
    fn missing_start_leaves_both_instants_absent() {
        let tournament = Tournament {
            start_at: None,
            end_at: None,
            ..Tournament::default()
        };

        let event = CalendarEvent::from_tournament(&tournament);
        assert_eq!(event.start, None);
        assert_eq!(event.end, None);
    }

    #[test]
    fn uid_is_stable_across_mappings() {
        let tournament = Tournament {
            id: 987_654,
            ..Tournament::default()
        };

        let first = CalendarEvent::from_tournament(&tournament);
        let second = CalendarEvent::from_tournament(&tournament);
        assert_eq!(first.uid, "tournament-987654@startgg-calendar");
        assert_eq!(first.uid, second.uid);
    }
}
