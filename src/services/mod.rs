pub mod fetching;
pub mod generation;

pub use fetching::FetchService;
pub use generation::{BatchSummary, GenerationService};
