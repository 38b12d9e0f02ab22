use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};
use tracing_subscriber::prelude::*;
use tracing_appender::rolling::RollingFileAppender;
use tracing_log::LogTracer;
use tracing::subscriber as tracing_subscriber_global;
use anyhow::{Result, Context};
use spotify_catalog as lib;
use lib::api::CatalogProvider;
use lib::config::Config;

#[derive(Parser)]
#[command(name = "spotify-catalog", version)]
struct Cli {
    /// Path to config TOML
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the catalog and print the normalized record as JSON
    Search {
        /// Name to look up
        query: String,

        /// track, album, artist, playlist (or an alias such as song, singer)
        #[arg(long = "type")]
        kind: Option<String>,
    },
    /// Print one track recommended from a seed track link
    Recommend {
        /// https://open.spotify.com/track/<id>
        track_url: String,
    },
    /// Print links of matching tracks
    Links {
        query: String,

        #[arg(long, default_value_t = 1)]
        limit: u32,
    },
    /// Obtain an access token and print it
    Token,
    /// Validate config file and exit
    ConfigValidate,
}

fn load_config(explicit: Option<&PathBuf>) -> Result<Config> {
    // Explicit --config wins; otherwise use the per-user config file when
    // present and fall back to environment variables.
    let path = match explicit {
        Some(p) => Some(p.clone()),
        None => dirs::config_dir()
            .map(|d| d.join("spotify-catalog").join("config.toml"))
            .filter(|p| p.exists()),
    };
    match path {
        Some(p) => Config::from_path(&p).with_context(|| format!("loading config from {}", p.display())),
        None => Ok(Config::from_env()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = load_config(cli.config.as_ref())?;

    // Initialize log->tracing bridge and structured logging.
    // Logs go to stderr and, when log_dir is set, a daily-rotated file.
    let _ = LogTracer::init();
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stderr_layer = fmt::layer().with_writer(std::io::stderr);
    let (file_layer, _guard) = match &cfg.log_dir {
        Some(dir) => {
            let file_appender: RollingFileAppender = tracing_appender::rolling::daily(dir, "spotify-catalog.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            (Some(fmt::layer().with_writer(non_blocking)), Some(guard))
        }
        None => (None, None),
    };
    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stderr_layer);
    tracing_subscriber_global::set_global_default(subscriber)
        .context("failed to set global tracing subscriber")?;

    if let Commands::ConfigValidate = cli.command {
        match cfg.validate() {
            Ok(()) => println!("OK"),
            Err(e) => {
                eprintln!("Config validation failed: {}", e);
                std::process::exit(2);
            }
        }
        return Ok(());
    }

    cfg.validate().context("invalid configuration")?;
    let client = lib::SpotifyClient::from_config(&cfg);

    match cli.command {
        Commands::Search { query, kind } => {
            let result = client
                .search(&query, kind.as_deref())
                .await
                .with_context(|| format!("searching for {}", query))?;
            if result.is_not_found() {
                eprintln!("No {} found for the given query.", result.kind());
            } else {
                tracing::info!(kind = %result.kind(), link = result.link(), "search matched");
            }
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Commands::Recommend { track_url } => {
            let link = CatalogProvider::get_recommendation(&client, &track_url)
                .await
                .context("getting recommendation")?;
            println!("{}", link);
        }
        Commands::Links { query, limit } => {
            let links = client
                .search_track_links(&query, limit)
                .await
                .context("searching track links")?;
            if links.is_empty() {
                eprintln!("No tracks found for the given query.");
            }
            for l in links {
                println!("{}", l);
            }
        }
        Commands::Token => {
            let token = client.get_access_token().await.context("getting access token")?;
            println!("{}", token);
        }
        Commands::ConfigValidate => {}
    }

    Ok(())
}
