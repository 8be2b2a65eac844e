use anyhow::{Context, Result, bail};
use log::debug;
use serde_json::{Value, json};

use crate::api::gateway::{TournamentGateway, TournamentQuery};
use crate::api::models::{GraphQlResponse, TournamentsData, VideogamesData};
use crate::config::ClientSettings;
use crate::domain::Tournament;
use crate::http::RateLimitedClient;

const TOURNAMENTS_QUERY: &str = r#"
query FilteredTournaments($perPage: Int, $page: Int, $filter: TournamentPageFilter) {
  tournaments(query: { perPage: $perPage, page: $page, filter: $filter }) {
    nodes {
      id
      name
      slug
      startAt
      endAt
      timezone
      venueAddress
      city
      state
      countryCode
      isRegistrationOpen
      numAttendees
      events {
        id
        name
        videogame {
          id
          name
        }
      }
    }
  }
}
"#;

const VIDEOGAMES_QUERY: &str = r#"
query VideogameByName($name: String) {
  videogames(query: { name: $name, perPage: 1 }) {
    nodes {
      id
      name
    }
  }
}
"#;

/// start.gg GraphQL API client
pub struct StartGgClient {
    client: RateLimitedClient,
    base_url: String,
}

impl StartGgClient {
    /// Create a new client. The API key is injected explicitly; the client
    /// never reads process environment itself.
    pub fn new(settings: &ClientSettings, api_key: &str) -> Result<Self> {
        let client = RateLimitedClient::new(
            settings.user_agent,
            settings.timeout_secs,
            settings.rate_limit_ms,
            api_key,
        )?;

        Ok(Self {
            client,
            base_url: settings.api_base_url.to_string(),
        })
    }

    /// Execute a GraphQL query and return its `data` payload
    async fn execute(&self, query: &str, variables: Value) -> Result<Value> {
        let payload = json!({ "query": query, "variables": variables });
        let response = self.client.post_json(&self.base_url, &payload).await?;

        if !response.status().is_success() {
            bail!("API returned status: {}", response.status());
        }

        let envelope: GraphQlResponse = response
            .json()
            .await
            .context("Failed to parse GraphQL response")?;

        if let Some(error) = envelope.errors.first() {
            bail!("GraphQL error: {}", error.message);
        }

        envelope.data.context("GraphQL response carried no data")
    }

    // --- Helper Methods ---

    fn build_variables(query: &TournamentQuery) -> Value {
        json!({
            "perPage": query.per_page,
            "page": query.page,
            "filter": Self::build_filter(query),
        })
    }

    fn build_filter(query: &TournamentQuery) -> Value {
        let mut filter = serde_json::Map::new();

        if !query.videogame_ids.is_empty() {
            filter.insert("videogameIds".to_string(), json!(query.videogame_ids));
        }

        if let Some(owner_id) = &query.owner_id {
            filter.insert("ownerId".to_string(), json!(owner_id));
        }

        if let Some(location) = &query.location {
            filter.insert(
                "location".to_string(),
                json!({
                    "distanceFrom": format!("{},{}", location.latitude, location.longitude),
                    "distance": format!("{}km", location.radius_meters / 1000.0),
                }),
            );
        }

        if let Some(window) = &query.window {
            filter.insert("afterDate".to_string(), json!(window.after));
            filter.insert("beforeDate".to_string(), json!(window.before));
        }

        Value::Object(filter)
    }
}

impl TournamentGateway for StartGgClient {
    async fn query_tournaments(&self, query: &TournamentQuery) -> Result<Vec<Tournament>> {
        debug!(
            "Querying tournaments (games: {}, owner: {:?})",
            query.videogame_ids.len(),
            query.owner_id
        );

        let data = self
            .execute(TOURNAMENTS_QUERY, Self::build_variables(query))
            .await?;
        let payload: TournamentsData =
            serde_json::from_value(data).context("Failed to parse tournaments payload")?;

        Ok(payload.into_nodes())
    }

    async fn resolve_videogame_id(&self, name: &str) -> Result<Option<i64>> {
        let data = self
            .execute(VIDEOGAMES_QUERY, json!({ "name": name }))
            .await?;
        let payload: VideogamesData =
            serde_json::from_value(data).context("Failed to parse videogames payload")?;

        Ok(payload.first_id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DateWindow, FilterParams, LocationFilter, QueryCriteria};
    use pretty_assertions::assert_eq;

    fn criteria() -> QueryCriteria {
        QueryCriteria {
            videogame_ids: vec![1, 1386],
            owner_ids: vec!["owner42".to_string()],
            location: Some(LocationFilter {
                latitude: 40.7,
                longitude: -74.0,
                radius_meters: 50_000.0,
            }),
            window: Some(DateWindow {
                after: 1_700_000_000,
                before: 1_710_000_000,
            }),
            filters: FilterParams { min_attendees: 0 },
            per_page: 100,
        }
    }

    #[test]
    fn primary_filter_carries_all_criteria() {
        let filter = StartGgClient::build_filter(&TournamentQuery::primary(&criteria()));

        assert_eq!(filter["videogameIds"], json!([1, 1386]));
        assert_eq!(filter["location"]["distanceFrom"], json!("40.7,-74"));
        assert_eq!(filter["location"]["distance"], json!("50km"));
        assert_eq!(filter["afterDate"], json!(1_700_000_000));
        assert_eq!(filter["beforeDate"], json!(1_710_000_000));
        assert!(filter.get("ownerId").is_none());
    }

    #[test]
    fn owner_filter_skips_games_and_location() {
        let filter =
            StartGgClient::build_filter(&TournamentQuery::for_owner("owner42", &criteria()));

        assert_eq!(filter["ownerId"], json!("owner42"));
        assert!(filter.get("videogameIds").is_none());
        assert!(filter.get("location").is_none());
        assert_eq!(filter["afterDate"], json!(1_700_000_000));
    }
}
