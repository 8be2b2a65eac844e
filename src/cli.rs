use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "start.gg tournament calendar feed generator")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Generate an .ics feed for every config in the configs directory
    Generate {
        /// Directory holding feed configuration files (JSON or YAML)
        #[arg(long, default_value = "calendars/configs")]
        configs_dir: PathBuf,

        /// Directory the .ics feeds are written into
        #[arg(long, default_value = "calendars/feeds")]
        output_dir: PathBuf,

        /// start.gg API key; defaults to the STARTGG_API_KEY environment variable
        #[arg(long)]
        api_key: Option<String>,
    },
}
