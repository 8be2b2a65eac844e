use anyhow::{Context, Result};

use startgg_calendar::cli::Command;
use startgg_calendar::{handle_generate, interpret};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(&command)
}

fn execute_command(command: &Command) -> Result<()> {
    match command {
        Command::Generate {
            configs_dir,
            output_dir,
            api_key,
        } => {
            let api_key = resolve_api_key(api_key.as_deref())?;
            handle_generate(configs_dir, output_dir, &api_key)
        }
    }
}

/// The API key is resolved once at the process boundary; pipeline code
/// only ever sees the injected value.
fn resolve_api_key(flag: Option<&str>) -> Result<String> {
    match flag {
        Some(key) => Ok(key.to_string()),
        None => std::env::var("STARTGG_API_KEY")
            .context("STARTGG_API_KEY not set and --api-key not provided"),
    }
}
