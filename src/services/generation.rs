use anyhow::{Context, Result};
use chrono::Utc;
use log::{error, info, warn};
use std::fs;
use std::path::{Path, PathBuf};

use crate::api::TournamentGateway;
use crate::calendar::{CalendarEvent, render_calendar, write_calendar};
use crate::config::feeds::FeedConfig;
use crate::services::fetching::FetchService;

const CONFIG_EXTENSIONS: [&str; 3] = ["json", "yaml", "yml"];

/// Outcome counts for one batch run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub processed: usize,
    pub succeeded: usize,
}

impl BatchSummary {
    pub fn failed(&self) -> usize {
        self.processed - self.succeeded
    }
}

/// Runs the fetch → filter → map → render pipeline for feed configs
pub struct GenerationService<G> {
    fetcher: FetchService<G>,
}

impl<G: TournamentGateway> GenerationService<G> {
    pub fn new(gateway: G, default_per_page: u32) -> Self {
        Self {
            fetcher: FetchService::new(gateway, default_per_page),
        }
    }

    /// Generate one feed. Returns the number of events written; zero means
    /// no tournaments matched and no file was produced.
    pub async fn generate_feed(&self, config_path: &Path, output_dir: &Path) -> Result<usize> {
        let config = FeedConfig::load(config_path)?;

        let criteria = self.fetcher.build_criteria(&config, Utc::now()).await;
        let tournaments = self.fetcher.fetch_tournaments(&criteria).await;
        let tournaments = FetchService::<G>::apply_filters(tournaments, &criteria.filters);

        if tournaments.is_empty() {
            info!("No tournaments found for this calendar");
            return Ok(0);
        }

        let events: Vec<CalendarEvent> = tournaments
            .iter()
            .map(CalendarEvent::from_tournament)
            .collect();

        let output = render_calendar(&config.calendar, &events);
        let feed_path = output_dir.join(format!("{}.ics", config_stem(config_path)));
        write_calendar(&feed_path, &output)?;

        info!("Calendar saved to {}", feed_path.display());
        Ok(events.len())
    }

    /// Generate every configured feed. Per-config failures are logged and
    /// counted; the batch always continues with the next config.
    pub async fn run_batch(&self, configs_dir: &Path, output_dir: &Path) -> Result<BatchSummary> {
        let config_paths = find_feed_configs(configs_dir)?;
        if config_paths.is_empty() {
            warn!("No calendar configurations found in {}", configs_dir.display());
            return Ok(BatchSummary::default());
        }

        info!("Found {} calendar configurations", config_paths.len());

        let mut summary = BatchSummary::default();
        for config_path in config_paths {
            let name = config_stem(&config_path);
            info!("=== Processing calendar: {name} ===");
            summary.processed += 1;

            match self.generate_feed(&config_path, output_dir).await {
                Ok(0) => {}
                Ok(count) => {
                    summary.succeeded += 1;
                    info!("Generated calendar with {count} events");
                }
                Err(e) => error!("Error processing calendar {name}: {e:#}"),
            }
        }

        Ok(summary)
    }
}

/// Feed config files (JSON or YAML) in a directory, sorted by name for a
/// deterministic processing order
pub fn find_feed_configs(configs_dir: &Path) -> Result<Vec<PathBuf>> {
    if !configs_dir.is_dir() {
        return Ok(Vec::new());
    }

    let entries = fs::read_dir(configs_dir)
        .with_context(|| format!("Failed to read configs directory: {}", configs_dir.display()))?;

    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| has_config_extension(path))
        .collect();

    paths.sort();
    Ok(paths)
}

fn has_config_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| CONFIG_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
}

fn config_stem(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("calendar")
        .to_string()
}
