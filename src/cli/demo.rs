//! Demo command handler
//!
//! Tops up a post file with random posts for a viewport.

use crate::cli::{emit, read_posts, ViewportArgs};
use crate::config::Config;
use crate::demo::generate_demo_posts;
use crate::error::Result;
use clap::Args;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;

/// Demo command arguments
#[derive(Args)]
pub struct DemoArgs {
    #[command(flatten)]
    pub viewport: ViewportArgs,

    /// Existing posts (JSON array) to keep and count toward the density
    #[arg(long)]
    pub posts: Option<PathBuf>,

    /// Seed for reproducible output
    #[arg(long)]
    pub seed: Option<u64>,

    /// Viewport width per post, in projected units
    #[arg(long)]
    pub spacing: Option<f64>,

    /// Write output to file
    #[arg(long, short = 'o')]
    pub output: Option<String>,
}

/// Run the demo command
pub fn run(args: DemoArgs) -> Result<()> {
    let config = Config::load()?;
    let viewport = args.viewport.resolve()?;
    let spacing = args.spacing.unwrap_or(config.demo.spacing);

    let mut posts = match &args.posts {
        Some(path) => read_posts(path)?,
        None => Vec::new(),
    };

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let generated = generate_demo_posts(&viewport, &posts, spacing, &mut rng)?;
    eprintln!("Generated {} demo posts", generated.len());

    posts.extend(generated);
    let output = serde_json::to_string_pretty(&posts)?;
    emit(&output, args.output.as_deref())
}
