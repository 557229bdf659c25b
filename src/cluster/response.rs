//! Cluster responses
//!
//! Wraps a clustering pass with an id, timestamp and counts, and optionally
//! the per-cell debug overlay.

use crate::cluster::{CellOverlay, ClusterEngine};
use crate::error::Result;
use crate::geo::Viewport;
use crate::post::Post;
use serde::{Deserialize, Serialize};

/// Full clustering response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterResponse {
    /// Unique ID for this pass
    pub id: String,

    /// Viewport the markers were computed for
    pub viewport: Viewport,

    /// Markers to display, in cell order
    pub markers: Vec<Post>,

    /// Cell outlines and slots (only included if requested)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cells: Option<Vec<CellOverlay>>,

    /// Metadata about the pass
    pub metadata: ClusterMetadata,
}

/// Metadata about a clustering pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterMetadata {
    /// When this was computed
    pub timestamp: String,
    /// Posts handed to the engine
    pub input_posts: usize,
    /// Posts that fell into a cell
    pub assigned_posts: usize,
    /// Posts outside the grid
    pub dropped_posts: usize,
    /// Markers produced
    pub marker_count: usize,
    /// Synthetic cluster markers among them
    pub cluster_markers: usize,
}

/// Cluster posts for a viewport and wrap the result
///
/// # Arguments
/// * `engine` - Engine holding the cluster parameters
/// * `viewport` - Visible map rectangle in projected units
/// * `posts` - Posts to cluster (already filtered by the caller)
/// * `include_cells` - Whether to attach the debug cell overlay
pub fn cluster(
    engine: &ClusterEngine,
    viewport: Viewport,
    posts: &[Post],
    include_cells: bool,
) -> Result<ClusterResponse> {
    let pass = engine.run_pass(&viewport, posts)?;

    let cells = include_cells.then(|| pass.cells.iter().map(CellOverlay::new).collect());
    let cluster_markers = pass.markers.iter().filter(|m| m.is_cluster()).count();

    Ok(ClusterResponse {
        id: uuid::Uuid::new_v4().to_string(),
        viewport,
        metadata: ClusterMetadata {
            timestamp: chrono::Utc::now().to_rfc3339(),
            input_posts: posts.len(),
            assigned_posts: pass.assigned_posts,
            dropped_posts: pass.dropped_posts,
            marker_count: pass.markers.len(),
            cluster_markers,
        },
        markers: pass.markers,
        cells,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::{MapPoint, MapRect};
    use crate::post::Topic;

    fn sample_posts() -> Vec<Post> {
        vec![
            Post::new(Topic::Music, MapPoint::new(5000.0, 7000.0)),
            Post::new(Topic::Food, MapPoint::new(1000.0, 1000.0)),
            Post::new(Topic::Art, MapPoint::new(1e9, 1e9)),
        ]
    }

    #[test]
    fn test_cluster_response_counts() {
        let engine = ClusterEngine::default();
        let viewport = MapRect::new(0.0, 0.0, 10_000.0, 14_000.0);

        let response = cluster(&engine, viewport, &sample_posts(), false).unwrap();

        assert_eq!(response.viewport, viewport);
        assert_eq!(response.markers.len(), 2);
        assert_eq!(response.metadata.input_posts, 3);
        assert_eq!(response.metadata.assigned_posts, 2);
        assert_eq!(response.metadata.dropped_posts, 1);
        assert_eq!(response.metadata.cluster_markers, 0);
        assert!(response.cells.is_none());
    }

    #[test]
    fn test_cluster_response_with_cells() {
        let engine = ClusterEngine::default();
        let viewport = MapRect::new(0.0, 0.0, 10_000.0, 14_000.0);

        let response = cluster(&engine, viewport, &sample_posts(), true).unwrap();

        assert_eq!(response.cells.as_ref().map(Vec::len), Some(15));
    }

    #[test]
    fn test_response_serialization() {
        let engine = ClusterEngine::default();
        let viewport = MapRect::new(0.0, 0.0, 10_000.0, 14_000.0);
        let response = cluster(&engine, viewport, &sample_posts(), false).unwrap();

        let json = serde_json::to_string_pretty(&response).unwrap();
        assert!(json.contains("\"id\""));
        assert!(json.contains("\"markers\""));
        assert!(!json.contains("\"cells\""));

        let _: ClusterResponse = serde_json::from_str(&json).unwrap();
    }
}
