//! mood-map CLI entry point
//!
//! Viewport clustering for mood posts - CLI + web API

use mood_map::cli;

#[tokio::main]
async fn main() {
    if let Err(e) = cli::run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
