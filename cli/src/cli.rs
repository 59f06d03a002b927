use clap::{Parser, Subcommand, ValueHint};
use std::path::PathBuf;
use surfcast_client::MaxAge;

#[derive(Parser)]
#[command(about, version, name = "surfcast")]
/// Surf status dashboard built from linked sensor data
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the surf status web server
    Serve {
        /// Host and port to listen to
        #[arg(short, long, default_value = "localhost:8088", value_hint = ValueHint::Hostname)]
        bind: String,
        /// Directory holding the document and query caches
        #[arg(long, value_hint = ValueHint::DirPath)]
        cache_dir: Option<PathBuf>,
        /// IRI of the observation collection or sensor to start from
        #[arg(long, value_hint = ValueHint::Url)]
        uri: Option<String>,
        /// How long cached documents stay fresh: "forever", "uncached" or
        /// a number of seconds (0 always refetches)
        #[arg(long)]
        max_age: Option<MaxAge>,
    },
    /// Build one status report and print it as JSON
    Report {
        /// IRI of the observation collection or sensor to start from
        #[arg(long, value_hint = ValueHint::Url)]
        uri: Option<String>,
        /// Directory holding the document and query caches
        #[arg(long, value_hint = ValueHint::DirPath)]
        cache_dir: Option<PathBuf>,
        /// How long cached documents stay fresh: "forever", "uncached" or
        /// a number of seconds (0 always refetches)
        #[arg(long)]
        max_age: Option<MaxAge>,
    },
}
