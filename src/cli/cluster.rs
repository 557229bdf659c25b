//! Cluster command handler
//!
//! Reads posts from a JSON file, filters them and clusters them for one
//! viewport.

use crate::cli::{emit, read_posts, ViewportArgs};
use crate::cluster::{cluster, ClusterEngine};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::filter::{apply_filter, PostFilter};
use crate::format::{available_formats, get_formatter};
use crate::post::{Mood, Topic};
use clap::Args;
use std::path::PathBuf;
use std::str::FromStr;

/// Cluster command arguments
#[derive(Args)]
pub struct ClusterArgs {
    /// JSON file with an array of posts
    #[arg(long, required_unless_present = "list_formats")]
    pub posts: Option<PathBuf>,

    #[command(flatten)]
    pub viewport: ViewportArgs,

    /// Only cluster posts of this mood
    #[arg(long)]
    pub mood: Option<String>,

    /// Only cluster posts of this topic
    #[arg(long, short = 't')]
    pub topic: Option<String>,

    /// Text narrowing the selectable topics
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Include the cell grid overlay in the response
    #[arg(long)]
    pub include_cells: bool,

    /// Output format
    #[arg(long, short = 'f')]
    pub format: Option<String>,

    /// Write output to file
    #[arg(long, short = 'o')]
    pub output: Option<String>,

    /// List available formats
    #[arg(short = 'F', long = "list-formats")]
    pub list_formats: bool,
}

impl ClusterArgs {
    /// Filter settings from the command line
    fn filter(&self) -> Result<PostFilter> {
        let mut filter = PostFilter::default();
        if let Some(mood) = &self.mood {
            filter = filter.with_mood(Mood::from_str(mood).map_err(Error::InvalidParams)?);
        }
        if let Some(topic) = &self.topic {
            filter = filter.with_topic(Topic::from_str(topic).map_err(Error::InvalidParams)?);
        }
        if let Some(search) = &self.search {
            filter = filter.with_search(search.clone());
        }
        Ok(filter)
    }
}

/// Run the cluster command
pub async fn run(args: ClusterArgs) -> Result<()> {
    if args.list_formats {
        list_formats();
        return Ok(());
    }

    let config = Config::load()?;

    let viewport = args.viewport.resolve()?;
    let filter = args.filter()?;
    let format = args
        .format
        .clone()
        .unwrap_or_else(|| config.defaults.format.clone());
    let formatter = get_formatter(&format)
        .ok_or_else(|| Error::Config(format!("Unknown format: {}", format)))?;

    let path = args
        .posts
        .clone()
        .ok_or_else(|| Error::InvalidParams("--posts is required".to_string()))?;
    let posts = read_posts(&path)?;

    let outcome = apply_filter(&posts, &filter);
    if filter.topic.is_some() && outcome.selected_topic.is_none() {
        eprintln!("Topic filter ignored: not offered under the current mood/search");
    }

    let engine = ClusterEngine::new(config.cluster_params())?;
    let include_cells = args.include_cells;
    let response = tokio::task::spawn_blocking(move || {
        cluster(&engine, viewport, &outcome.posts, include_cells)
    })
    .await
    .map_err(|e| Error::Server(format!("Clustering task failed: {}", e)))??;

    let output = formatter.format(&response, &config)?;
    emit(&output, args.output.as_deref())
}

/// Print available output formats
fn list_formats() {
    println!("Available output formats:");
    for format in available_formats() {
        println!("  {:6} - {}", format.name, format.description);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> ClusterArgs {
        ClusterArgs {
            posts: None,
            viewport: ViewportArgs::default(),
            mood: None,
            topic: None,
            search: None,
            include_cells: false,
            format: None,
            output: None,
            list_formats: false,
        }
    }

    #[test]
    fn test_filter_from_args() {
        let filter = ClusterArgs {
            mood: Some("negative".to_string()),
            topic: Some("sad".to_string()),
            search: Some("гру".to_string()),
            ..args()
        }
        .filter()
        .unwrap();

        assert_eq!(filter.mood, Some(Mood::Negative));
        assert_eq!(filter.topic, Some(Topic::Sad));
        assert_eq!(filter.search, "гру");
    }

    #[test]
    fn test_filter_rejects_unknown_names() {
        let bad_mood = ClusterArgs {
            mood: Some("grumpy".to_string()),
            ..args()
        };
        assert!(bad_mood.filter().is_err());

        let bad_topic = ClusterArgs {
            topic: Some("jazz".to_string()),
            ..args()
        };
        assert!(bad_topic.filter().is_err());
    }
}
