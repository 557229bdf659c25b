//! CLI command handlers
//!
//! Each subcommand has its own module with handler functions.

pub mod cluster;
pub mod config;
pub mod demo;
pub mod serve;
pub mod topics;

use crate::error::{Error, Result};
use crate::geo::{Coordinates, MapRect, Viewport};
use crate::post::Post;
use clap::{Args, Parser, Subcommand};
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Topic clustering for mood posts on a map
#[derive(Parser)]
#[command(name = "mood-map")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Cluster posts for a viewport
    Cluster(cluster::ClusterArgs),

    /// Generate demo posts for a viewport
    Demo(demo::DemoArgs),

    /// List topics and moods
    Topics(topics::TopicsArgs),

    /// Start web server (foreground)
    Serve(serve::ServeArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

/// Viewport given either as a lat/lng box or in projected map units
#[derive(Args, Debug, Default)]
pub struct ViewportArgs {
    /// Bounding box as south,west,north,east in degrees
    #[arg(long, allow_hyphen_values = true, conflicts_with_all = ["x", "y", "width", "height"])]
    pub bbox: Option<String>,

    /// Projected x of the viewport's minimum corner
    #[arg(long, allow_hyphen_values = true, requires_all = ["y", "width", "height"])]
    pub x: Option<f64>,

    /// Projected y of the viewport's minimum corner
    #[arg(long, allow_hyphen_values = true, requires_all = ["x", "width", "height"])]
    pub y: Option<f64>,

    /// Projected viewport width
    #[arg(long, requires_all = ["x", "y", "height"])]
    pub width: Option<f64>,

    /// Projected viewport height
    #[arg(long, requires_all = ["x", "y", "width"])]
    pub height: Option<f64>,
}

impl ViewportArgs {
    /// Build and validate the viewport
    pub fn resolve(&self) -> Result<Viewport> {
        if let Some(bbox) = &self.bbox {
            return parse_bbox(bbox);
        }

        match (self.x, self.y, self.width, self.height) {
            (Some(x), Some(y), Some(width), Some(height)) => {
                let viewport = MapRect::new(x, y, width, height);
                viewport.validate()?;
                Ok(viewport)
            }
            _ => Err(Error::InvalidViewport(
                "Specify --bbox or all of --x/--y/--width/--height".to_string(),
            )),
        }
    }
}

/// Parse "south,west,north,east" into a projected viewport
pub fn parse_bbox(s: &str) -> Result<Viewport> {
    let values: Vec<f64> = s
        .split(',')
        .map(|v| v.trim().parse::<f64>())
        .collect::<std::result::Result<_, _>>()
        .map_err(|_| Error::InvalidViewport(format!("Bounding box is not numeric: {}", s)))?;

    let [south, west, north, east] = values.as_slice() else {
        return Err(Error::InvalidViewport(format!(
            "Bounding box needs 4 values (south,west,north,east), got {}",
            values.len()
        )));
    };

    let viewport = MapRect::from_bounds(
        Coordinates::new(*south, *west),
        Coordinates::new(*north, *east),
    )?;
    viewport.validate()?;
    Ok(viewport)
}

/// Read a JSON array of posts from a file
pub fn read_posts(path: &Path) -> Result<Vec<Post>> {
    let content = std::fs::read_to_string(path)?;
    let posts: Vec<Post> = serde_json::from_str(&content)?;
    Ok(posts)
}

/// Write command output to a file or stdout
fn emit(output: &str, path: Option<&str>) -> Result<()> {
    if let Some(path) = path {
        std::fs::write(path, output)?;
        eprintln!("Output written to {}", path);
    } else {
        println!("{}", output);
    }
    Ok(())
}

fn init_logging(default_level: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

/// Run the CLI
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Serve(_) => init_logging("info"),
        _ => init_logging("warn"),
    }

    match cli.command {
        Commands::Cluster(args) => cluster::run(args).await,
        Commands::Demo(args) => demo::run(args),
        Commands::Topics(args) => topics::run(args),
        Commands::Serve(args) => serve::run(args).await,
        Commands::Config(args) => config::run(args),
    }
}
