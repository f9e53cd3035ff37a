//! Tropical cyclone track viewer.
//!
//! Polls the cyclone feed and renders the track map with:
//! - Coastline from a GeoJSON file
//! - Optional satellite overlay fetched from the imagery provider
//! - Time scrubbing to render past or forecast positions
//!
//! Frames are written as PNG files to the output directory.

mod config;
mod fetch;
mod viewer;

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use clap::Parser;
use renderer::{LabelRenderer, LayeredRenderer};
use tracing::{error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;
use typhoon_common::{time::parse_utc, Coastline, GeoPoint};

use config::ViewerConfig;
use fetch::{http_client, CycloneSource, FileFeed, HttpFeed, HttpFrames};
use viewer::Viewer;

#[derive(Parser, Debug)]
#[command(name = "typhoon-viewer")]
#[command(about = "Render tropical cyclone tracks over coastline and satellite imagery")]
struct Args {
    /// Configuration file (YAML)
    #[arg(long, env = "VIEWER_CONFIG")]
    config: Option<PathBuf>,

    /// Override the cyclone feed URL
    #[arg(long, env = "CYCLONE_FEED_URL")]
    feed_url: Option<String>,

    /// Read cyclones from a saved JSON file instead of the feed
    #[arg(long, conflicts_with = "feed_url")]
    feed_file: Option<PathBuf>,

    /// Coastline GeoJSON (overrides config)
    #[arg(long)]
    coastline: Option<PathBuf>,

    /// TrueType font for labels (overrides config)
    #[arg(long)]
    font: Option<PathBuf>,

    /// Directory for rendered frames
    #[arg(long, default_value = "frames")]
    output_dir: PathBuf,

    /// Render once and exit (vs continuous polling)
    #[arg(long)]
    once: bool,

    /// Show the satellite overlay
    #[arg(long)]
    satellite: bool,

    /// Viewer location as "lat,lon"
    #[arg(long)]
    location: Option<String>,

    /// Render as of this time instead of live (RFC 3339)
    #[arg(long)]
    as_of: Option<String>,

    /// Number of frames to render per cycle when scrubbing
    #[arg(long, default_value = "1")]
    frames: usize,

    /// Minutes between scrubbed frames (negative steps backward)
    #[arg(long, default_value = "60", allow_hyphen_values = true)]
    step_minutes: i64,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Initialize tracing
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true);
    if args.json_logs {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }

    info!("Starting typhoon viewer");

    let config = ViewerConfig::load(args.config.as_deref())?;

    let location = match &args.location {
        Some(s) => Some(
            GeoPoint::from_pair(s)
                .with_context(|| format!("Invalid --location '{}', expected \"lat,lon\"", s))?,
        ),
        None => None,
    };
    let as_of = args
        .as_of
        .as_deref()
        .map(parse_utc)
        .transpose()
        .context("Invalid --as-of time")?;

    let labels = match args.font.as_ref().or(config.font_path.as_ref()) {
        Some(path) => match LabelRenderer::from_file(path) {
            Ok(labels) => Some(labels),
            Err(e) => {
                warn!(error = %e, "Could not load label font");
                None
            }
        },
        None => None,
    };

    let renderer = LayeredRenderer::new(config.map.clone(), labels)?;

    let client = http_client(config.request_timeout())?;
    let feed: Box<dyn CycloneSource> = match &args.feed_file {
        Some(path) => Box::new(FileFeed::new(path)),
        None => Box::new(HttpFeed::new(
            client.clone(),
            args.feed_url.clone().unwrap_or_else(|| config.feed_url.clone()),
        )),
    };

    tokio::fs::create_dir_all(&args.output_dir)
        .await
        .with_context(|| format!("Failed to create {}", args.output_dir.display()))?;

    let mut viewer = Viewer::new(renderer, feed, Box::new(HttpFrames::new(client)), &args.output_dir);
    viewer.set_viewer_location(location);
    viewer.set_show_satellite(args.satellite);

    if let Some(path) = args.coastline.as_ref().or(config.coastline_path.as_ref()) {
        let coastline = Coastline::from_file(path)
            .with_context(|| format!("Failed to load coastline: {}", path.display()))?;
        viewer.set_coastline(coastline);
    }

    let step = Duration::minutes(args.step_minutes);
    let frames = args.frames.max(1);

    if args.once {
        info!("Rendering single cycle");
        viewer.refresh().await;
        viewer.scrub(as_of, step, frames, Utc::now()).await?;
        return Ok(());
    }

    info!(interval_secs = config.poll_interval_secs, "Starting continuous polling");
    let mut ticker = tokio::time::interval(config.poll_interval());

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Received shutdown signal");
                break;
            }
            _ = ticker.tick() => {
                viewer.refresh().await;
                if let Err(e) = viewer.scrub(as_of, step, frames, Utc::now()).await {
                    error!(error = %e, "Render cycle failed");
                }
            }
        }
    }

    Ok(())
}
