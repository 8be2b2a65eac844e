pub mod criteria;
pub mod models;

pub use criteria::{
    DateWindow, DateWindowSpec, DistanceUnit, FilterParams, LocationFilter, QueryCriteria,
};
pub use models::{Tournament, TournamentEvent, Videogame};
