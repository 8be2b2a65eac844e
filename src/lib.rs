pub mod api;
pub mod calendar;
pub mod cli;
pub mod config;
pub mod domain;
pub mod http;
pub mod services;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use std::path::Path;

use crate::api::StartGgClient;
use crate::cli::{Cli, Command};
use crate::config::AppConfig;
use crate::services::{BatchSummary, GenerationService};

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn handle_generate(configs_dir: &Path, output_dir: &Path, api_key: &str) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let config = AppConfig::new();
        let gateway = StartGgClient::new(&config.client, api_key)?;
        let service = GenerationService::new(gateway, config.client.default_per_page);

        let summary = service.run_batch(configs_dir, output_dir).await?;
        print_summary(&summary);
        Ok(())
    })
}

fn print_summary(summary: &BatchSummary) {
    println!("\n=== Summary ===");
    println!("Processed {} calendars", summary.processed);
    println!(
        "{}",
        format!("Successfully generated: {}", summary.succeeded).green()
    );

    let failed = summary.failed();
    let failed_line = format!("Failed: {failed}");
    if failed > 0 {
        println!("{}", failed_line.red());
    } else {
        println!("{failed_line}");
    }
}
