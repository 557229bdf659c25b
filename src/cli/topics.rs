//! Topics command handler
//!
//! Lists the topic catalog, optionally narrowed like the topic picker.

use crate::error::{Error, Result};
use crate::filter::PostFilter;
use crate::post::Mood;
use clap::Args;
use std::str::FromStr;

/// Topics command arguments
#[derive(Args)]
pub struct TopicsArgs {
    /// Only list topics of this mood
    #[arg(long)]
    pub mood: Option<String>,

    /// Only list topics whose title or name contains this text
    #[arg(long, short = 's')]
    pub search: Option<String>,
}

/// Run the topics command
pub fn run(args: TopicsArgs) -> Result<()> {
    let mut filter = PostFilter::default();
    if let Some(mood) = &args.mood {
        filter = filter.with_mood(Mood::from_str(mood).map_err(Error::InvalidParams)?);
    }
    if let Some(search) = args.search {
        filter = filter.with_search(search);
    }

    let topics = filter.visible_topics();
    if topics.is_empty() {
        eprintln!("No topics match");
        return Ok(());
    }

    for topic in topics {
        println!(
            "{} {:12} {:12} {}",
            topic.emoji(),
            topic.to_string(),
            topic.mood().to_string(),
            topic.title()
        );
    }

    Ok(())
}
