mod client;
pub mod gateway;
pub mod models;

pub use client::StartGgClient;
pub use gateway::{TournamentGateway, TournamentQuery};
