use serde::Deserialize;

use crate::domain::{Tournament, Videogame};

/// Top-level GraphQL response envelope
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse {
    pub data: Option<serde_json::Value>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

/// `data` payload of a tournaments query
#[derive(Debug, Deserialize)]
pub struct TournamentsData {
    pub tournaments: Option<TournamentConnection>,
}

#[derive(Debug, Deserialize)]
pub struct TournamentConnection {
    pub nodes: Option<Vec<Tournament>>,
}

impl TournamentsData {
    pub fn into_nodes(self) -> Vec<Tournament> {
        self.tournaments.and_then(|c| c.nodes).unwrap_or_default()
    }
}

/// `data` payload of a videogames query
#[derive(Debug, Deserialize)]
pub struct VideogamesData {
    pub videogames: Option<VideogameConnection>,
}

#[derive(Debug, Deserialize)]
pub struct VideogameConnection {
    pub nodes: Option<Vec<Videogame>>,
}

impl VideogamesData {
    /// First matching videogame id, if any
    pub fn first_id(self) -> Option<i64> {
        self.videogames
            .and_then(|c| c.nodes)
            .unwrap_or_default()
            .first()
            .and_then(|v| v.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn envelope_surfaces_errors() {
        let envelope: GraphQlResponse = serde_json::from_str(
            r#"{"data": null, "errors": [{"message": "Invalid authentication token"}]}"#,
        )
        .unwrap();

        assert_eq!(envelope.errors.len(), 1);
        assert!(envelope.data.is_none());
    }

    #[test]
    fn null_nodes_become_empty() {
        let data: TournamentsData =
            serde_json::from_str(r#"{"tournaments": {"nodes": null}}"#).unwrap();
        assert!(data.into_nodes().is_empty());
    }

    #[test]
    fn first_videogame_id_wins() {
        let data: VideogamesData = serde_json::from_str(
            r#"{"videogames": {"nodes": [
                {"id": 1, "name": "Melee"},
                {"id": 1386, "name": "Ultimate"}
            ]}}"#,
        )
        .unwrap();

        assert_eq!(data.first_id(), Some(1));
    }
}
