//! Post filtering
//!
//! An explicit pipeline from (posts, filter settings) to the posts handed to
//! the cluster engine and the topics offered for selection. Callers invoke
//! it whenever posts or settings change.

use crate::post::{Mood, Post, Topic};
use serde::{Deserialize, Serialize};

/// User-selected filter settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostFilter {
    /// Only show posts of this mood
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<Mood>,

    /// Only show posts of this topic
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<Topic>,

    /// Text narrowing the offered topics
    #[serde(default)]
    pub search: String,
}

/// Output of [`apply_filter`]
#[derive(Debug, Clone, PartialEq)]
pub struct FilterOutcome {
    /// Topics still offered for selection
    pub topics: Vec<Topic>,
    /// Posts to cluster
    pub posts: Vec<Post>,
    /// The selected topic, cleared if it is no longer offered
    pub selected_topic: Option<Topic>,
}

impl PostFilter {
    pub fn with_mood(mut self, mood: Mood) -> Self {
        self.mood = Some(mood);
        self
    }

    pub fn with_topic(mut self, topic: Topic) -> Self {
        self.topic = Some(topic);
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// Select a topic, or deselect it if it is already selected
    pub fn toggle_topic(&mut self, topic: Topic) {
        self.topic = if self.topic == Some(topic) {
            None
        } else {
            Some(topic)
        };
    }

    /// Whether a topic should be shown dimmed (another topic is selected)
    pub fn is_dimmed(&self, topic: Topic) -> bool {
        self.topic.is_some_and(|selected| selected != topic)
    }

    /// Topics offered under the current mood and search text
    pub fn visible_topics(&self) -> Vec<Topic> {
        Topic::ALL
            .iter()
            .copied()
            .filter(|t| self.mood.map_or(true, |mood| t.mood() == mood))
            .filter(|t| self.search.is_empty() || t.matches_search(&self.search))
            .collect()
    }
}

/// Apply filter settings to a post list
///
/// Mood narrows both topics and posts. Search text narrows only the topic
/// list. A selected topic narrows posts when it is still offered; otherwise
/// the selection is dropped and posts stay mood-filtered.
pub fn apply_filter(posts: &[Post], filter: &PostFilter) -> FilterOutcome {
    let topics = filter.visible_topics();

    let mut filtered: Vec<Post> = match filter.mood {
        Some(mood) => posts.iter().filter(|p| p.mood() == mood).copied().collect(),
        None => posts.to_vec(),
    };

    let selected_topic = filter.topic.filter(|t| topics.contains(t));
    if let Some(topic) = selected_topic {
        filtered.retain(|p| p.topic == topic);
    }

    FilterOutcome {
        topics,
        posts: filtered,
        selected_topic,
    }
}
