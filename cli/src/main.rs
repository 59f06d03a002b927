#![allow(clippy::print_stdout)]
use crate::cli::{Args, Command};
use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use surfcast_aggregate::{build_report, SurfcastConfig};
use surfcast_client::MaxAge;
use surfcast_model::NamedNode;
use surfcast_web::ServerConfig;
use tracing_subscriber::EnvFilter;

mod cli;

#[tokio::main]
pub async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let matches = Args::parse();
    match matches.command {
        Command::Serve {
            bind,
            cache_dir,
            uri,
            max_age,
        } => {
            let config = build_config(cache_dir, uri, max_age)?;
            surfcast_web::serve(ServerConfig { config, bind }).await
        }
        Command::Report {
            uri,
            cache_dir,
            max_age,
        } => {
            let config = build_config(cache_dir, uri, max_age)?;
            let report = build_report(&config, &config.start_iri).await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        }
    }
}

/// The default configuration with any command line overrides applied.
fn build_config(
    cache_dir: Option<PathBuf>,
    uri: Option<String>,
    max_age: Option<MaxAge>,
) -> anyhow::Result<SurfcastConfig> {
    let mut config = SurfcastConfig::default();
    if let Some(cache_dir) = cache_dir {
        config.cache_root = cache_dir;
    }
    if let Some(uri) = uri {
        config.start_iri =
            NamedNode::new(&uri).with_context(|| format!("invalid start IRI {uri}"))?;
    }
    if let Some(max_age) = max_age {
        config.default_max_age = max_age;
    }
    Ok(config)
}
