use std::collections::HashSet;

use chrono::{DateTime, Utc};
use log::{info, warn};

use crate::api::{TournamentGateway, TournamentQuery};
use crate::config::feeds::{FeedConfig, GameRef, OwnerRef};
use crate::domain::{FilterParams, QueryCriteria, Tournament};

/// Builds query criteria from a feed config and runs the union fetch
pub struct FetchService<G> {
    gateway: G,
    default_per_page: u32,
}

impl<G: TournamentGateway> FetchService<G> {
    pub fn new(gateway: G, default_per_page: u32) -> Self {
        Self {
            gateway,
            default_per_page,
        }
    }

    /// Translate a feed configuration into concrete query parameters.
    /// `today` anchors the date window so callers control the clock.
    pub async fn build_criteria(&self, config: &FeedConfig, today: DateTime<Utc>) -> QueryCriteria {
        let videogame_ids = self.resolve_videogame_ids(&config.games).await;
        let owner_ids: Vec<String> = config.owners.iter().map(OwnerRef::id).collect();

        let location = config.location.as_ref().and_then(|l| l.to_filter());
        let window = config.date_window().and_then(|spec| spec.resolve(today));

        let per_page = match config.filters.max_events {
            Some(max) => max.min(self.default_per_page),
            None => self.default_per_page,
        };

        QueryCriteria {
            videogame_ids,
            owner_ids,
            location,
            window,
            filters: FilterParams {
                min_attendees: config.filters.min_attendees,
            },
            per_page,
        }
    }

    /// Resolve game list entries to numeric ids. Unresolvable names are
    /// dropped with a warning so one bad entry never aborts the fetch.
    async fn resolve_videogame_ids(&self, games: &[GameRef]) -> Vec<i64> {
        let mut ids = Vec::new();

        for game in games {
            match game {
                GameRef::Id { id } => ids.push(*id),
                GameRef::Named { name } | GameRef::Name(name) => {
                    match self.gateway.resolve_videogame_id(name).await {
                        Ok(Some(id)) => ids.push(id),
                        Ok(None) => warn!("Could not resolve game id for {name}"),
                        Err(e) => warn!("Game id lookup failed for {name}: {e}"),
                    }
                }
            }
        }

        ids
    }

    /// Fetch the union of the primary query and one query per owner,
    /// deduplicated by tournament id with first occurrence winning.
    pub async fn fetch_tournaments(&self, criteria: &QueryCriteria) -> Vec<Tournament> {
        let mut all = Vec::new();

        info!(
            "Fetching tournaments for {} games...",
            criteria.videogame_ids.len()
        );
        let primary = self.run_query(&TournamentQuery::primary(criteria)).await;
        info!("  → Found {} tournaments from primary criteria", primary.len());
        all.extend(primary);

        for owner_id in &criteria.owner_ids {
            info!("Fetching tournaments from owner {owner_id}...");
            let owned = self
                .run_query(&TournamentQuery::for_owner(owner_id, criteria))
                .await;
            info!("  → Found {} tournaments from owner {owner_id}", owned.len());
            all.extend(owned);
        }

        let unique = Self::dedup_by_id(all);
        info!("Total unique tournaments after union: {}", unique.len());
        unique
    }

    /// Drop tournaments below the attendee threshold. Unknown attendance
    /// is kept; absence is not failure. Order is preserved.
    pub fn apply_filters(tournaments: Vec<Tournament>, filters: &FilterParams) -> Vec<Tournament> {
        tournaments
            .into_iter()
            .filter(|t| {
                t.num_attendees
                    .is_none_or(|count| count >= filters.min_attendees)
            })
            .collect()
    }

    // --- Helper Methods ---

    /// A failed query degrades to an empty result so the remaining
    /// queries still run.
    async fn run_query(&self, query: &TournamentQuery) -> Vec<Tournament> {
        match self.gateway.query_tournaments(query).await {
            Ok(tournaments) => tournaments,
            Err(e) => {
                warn!("Tournament query failed: {e}");
                Vec::new()
            }
        }
    }

    fn dedup_by_id(tournaments: Vec<Tournament>) -> Vec<Tournament> {
        let mut seen = HashSet::new();
        let mut unique = Vec::with_capacity(tournaments.len());

        for tournament in tournaments {
            if tournament.id != 0 && seen.insert(tournament.id) {
                unique.push(tournament);
            }
        }

        unique
    }
}
