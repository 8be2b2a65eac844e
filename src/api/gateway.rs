use anyhow::Result;

use crate::domain::{DateWindow, LocationFilter, QueryCriteria, Tournament};

/// One parameterized tournaments query against the remote service
#[derive(Debug, Clone, PartialEq)]
pub struct TournamentQuery {
    pub videogame_ids: Vec<i64>,
    pub owner_id: Option<String>,
    pub location: Option<LocationFilter>,
    pub window: Option<DateWindow>,
    pub page: u32,
    pub per_page: u32,
}

impl TournamentQuery {
    /// The primary query: game, location and date filters together
    pub fn primary(criteria: &QueryCriteria) -> Self {
        Self {
            videogame_ids: criteria.videogame_ids.clone(),
            owner_id: None,
            location: criteria.location.clone(),
            window: criteria.window,
            page: 1,
            per_page: criteria.per_page,
        }
    }

    /// An owner query: a single owner id plus the date window. Game and
    /// location filters do not apply to owner-sourced tournaments.
    pub fn for_owner(owner_id: &str, criteria: &QueryCriteria) -> Self {
        Self {
            videogame_ids: Vec::new(),
            owner_id: Some(owner_id.to_string()),
            location: None,
            window: criteria.window,
            page: 1,
            per_page: criteria.per_page,
        }
    }
}

/// Read-side contract of the tournament listing service
#[allow(async_fn_in_trait)]
pub trait TournamentGateway {
    /// Run one tournaments query and return its records
    async fn query_tournaments(&self, query: &TournamentQuery) -> Result<Vec<Tournament>>;

    /// Resolve a videogame name to its numeric id, if the service knows it
    async fn resolve_videogame_id(&self, name: &str) -> Result<Option<i64>>;
}
