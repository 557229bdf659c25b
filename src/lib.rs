//! mood-map: topic clustering for mood posts on a map
//!
//! A library and CLI tool that turns a viewport and a set of geo-tagged mood
//! posts into the markers a map should display.
//!
//! ## Features
//!
//! - Fixed three-column cell grid derived from the viewport size
//! - Dense cells reduced to at most three topic cluster markers on
//!   non-overlapping slots
//! - Mood, topic and text filtering of posts
//! - Background refresh session that never publishes stale results
//! - Demo post generation, HTTP API + CLI interface
//!
//! ## Quick Start
//!
//! ```rust
//! use mood_map::cluster::ClusterEngine;
//! use mood_map::geo::{Coordinates, MapRect};
//! use mood_map::post::{Post, Topic};
//!
//! // Central Moscow
//! let viewport = MapRect::from_bounds(
//!     Coordinates::new(55.70, 37.55),
//!     Coordinates::new(55.80, 37.70),
//! )
//! .unwrap();
//!
//! let posts = vec![
//!     Post::at(Topic::Music, Coordinates::new(55.75, 37.62)),
//!     Post::at(Topic::Food, Coordinates::new(55.76, 37.60)),
//! ];
//!
//! let markers = ClusterEngine::default().run(&viewport, &posts).unwrap();
//! assert_eq!(markers.len(), 2);
//! ```

pub mod cli;
pub mod cluster;
pub mod config;
pub mod constants;
pub mod demo;
pub mod error;
pub mod filter;
pub mod format;
pub mod geo;
pub mod post;
pub mod server;
pub mod session;

// Re-export commonly used types
pub use cluster::{ClusterEngine, ClusterParams, ClusterResponse};
pub use config::Config;
pub use error::{Error, Result};
pub use filter::{apply_filter, PostFilter};
pub use geo::{Coordinates, MapPoint, MapRect, Viewport};
pub use post::{Mood, Post, Topic};
pub use session::{MapSession, MarkerSnapshot};
