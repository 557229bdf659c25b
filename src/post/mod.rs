//! Mood posts
//!
//! A post is an immutable value pinned to a projected map point. The same
//! type doubles as the cluster engine's output marker: synthetic cluster
//! markers are posts whose `cluster_count` is greater than one.

pub mod topic;

pub use topic::{Mood, Topic};

use crate::error::Error;
use crate::geo::{Coordinates, MapPoint};
use serde::{Deserialize, Serialize};

/// A geo-tagged mood post or cluster marker
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PostRecord", into = "PostRecord")]
pub struct Post {
    pub topic: Topic,
    pub location: MapPoint,
    /// Number of original posts this marker stands for (1 for a plain post)
    pub cluster_count: usize,
}

impl Post {
    /// Create a single post at a projected location
    pub fn new(topic: Topic, location: MapPoint) -> Self {
        Self {
            topic,
            location,
            cluster_count: 1,
        }
    }

    /// Create a single post at a geographic location
    pub fn at(topic: Topic, coords: Coordinates) -> Self {
        Self::new(topic, coords.to_map_point())
    }

    /// Create a synthetic marker standing for `count` posts
    pub fn cluster(topic: Topic, location: MapPoint, count: usize) -> Self {
        Self {
            topic,
            location,
            cluster_count: count,
        }
    }

    pub fn mood(&self) -> Mood {
        self.topic.mood()
    }

    pub fn coordinates(&self) -> Coordinates {
        self.location.to_coordinates()
    }

    /// Whether this marker aggregates more than one post
    pub fn is_cluster(&self) -> bool {
        self.cluster_count > 1
    }
}

/// JSON shape of a post: geographic coordinates instead of map units
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PostRecord {
    topic: Topic,
    lat: f64,
    lng: f64,
    #[serde(default = "default_cluster_count")]
    cluster_count: usize,
}

fn default_cluster_count() -> usize {
    1
}

impl TryFrom<PostRecord> for Post {
    type Error = Error;

    fn try_from(record: PostRecord) -> Result<Self, Self::Error> {
        let coords = Coordinates::new(record.lat, record.lng);
        coords.validate()?;
        Ok(Self {
            topic: record.topic,
            location: coords.to_map_point(),
            cluster_count: record.cluster_count.max(1),
        })
    }
}

impl From<Post> for PostRecord {
    fn from(post: Post) -> Self {
        let coords = post.coordinates();
        Self {
            topic: post.topic,
            lat: coords.lat,
            lng: coords.lng,
            cluster_count: post.cluster_count,
        }
    }
}
