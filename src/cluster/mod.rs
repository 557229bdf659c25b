//! Viewport clustering
//!
//! This module handles:
//! - Computing the cluster cell grid for a viewport
//! - Bucketing posts into cells (first containing cell wins)
//! - Reducing dense buckets to at most three topic markers
//! - Building full responses with diagnostics and debug overlays

pub mod grid;
pub mod reduce;
pub mod response;

#[cfg(test)]
mod tests;

pub use grid::{slot_positions, CellOverlay};
pub use reduce::{assign, TopicGroup};
pub use response::{cluster, ClusterMetadata, ClusterResponse};

use crate::constants::cluster::{
    CELL_HEIGHT_RATIO, CELL_WIDTH_RATIO, PASS_THROUGH_LIMIT, SLOT_COUNT,
};
use crate::error::{Error, Result};
use crate::geo::{MapPoint, MapRect, Viewport};
use crate::post::Post;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Tunable clustering parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClusterParams {
    /// Cell width as a fraction of viewport width
    pub cell_width_ratio: f64,
    /// Cell height as a fraction of viewport width
    pub cell_height_ratio: f64,
    /// Largest bucket shown without reduction
    pub pass_through_limit: usize,
}

impl Default for ClusterParams {
    fn default() -> Self {
        Self {
            cell_width_ratio: CELL_WIDTH_RATIO,
            cell_height_ratio: CELL_HEIGHT_RATIO,
            pass_through_limit: PASS_THROUGH_LIMIT,
        }
    }
}

impl ClusterParams {
    pub fn validate(&self) -> Result<()> {
        for (name, ratio) in [
            ("cell_width_ratio", self.cell_width_ratio),
            ("cell_height_ratio", self.cell_height_ratio),
        ] {
            if !ratio.is_finite() || ratio <= 0.0 {
                return Err(Error::InvalidParams(format!(
                    "{} must be a positive number, got {}",
                    name, ratio
                )));
            }
        }
        if self.pass_through_limit == 0 {
            return Err(Error::InvalidParams(
                "pass_through_limit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Result of one clustering pass with bookkeeping
#[derive(Debug, Clone)]
pub struct ClusterPass {
    /// Grid cells, column-major
    pub cells: Vec<MapRect>,
    /// Markers to display, in cell order
    pub markers: Vec<Post>,
    /// Posts that fell into some cell
    pub assigned_posts: usize,
    /// Posts outside every cell
    pub dropped_posts: usize,
}

/// Stateless clustering engine
///
/// Holds only its parameters; every call is a pure function of its inputs,
/// so one engine can serve concurrent passes.
#[derive(Debug, Clone, Default)]
pub struct ClusterEngine {
    params: ClusterParams,
}

impl ClusterEngine {
    /// Create an engine, rejecting invalid parameters
    pub fn new(params: ClusterParams) -> Result<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &ClusterParams {
        &self.params
    }

    /// Cluster cells for a viewport, column-major
    ///
    /// The viewport must have a positive size; [`ClusterEngine::run`]
    /// checks this before calling. Viewports so tall for their width that
    /// the grid would pass `MAX_ROW_COUNT` rows are rejected.
    pub fn compute_grid(&self, viewport: &Viewport) -> Result<Vec<MapRect>> {
        grid::cell_grid(
            viewport,
            self.params.cell_width_ratio,
            self.params.cell_height_ratio,
        )
    }

    /// The three marker slots of a cell
    pub fn slot_positions(&self, cell: &MapRect) -> [MapPoint; SLOT_COUNT] {
        grid::slot_positions(cell)
    }

    /// Reduce one bucket using this engine's pass-through limit
    pub fn reduce(&self, bucket: &[Post], slots: [MapPoint; SLOT_COUNT]) -> Vec<Post> {
        reduce::reduce(bucket, slots, self.params.pass_through_limit)
    }

    /// Markers to display for the viewport
    pub fn run(&self, viewport: &Viewport, posts: &[Post]) -> Result<Vec<Post>> {
        Ok(self.run_pass(viewport, posts)?.markers)
    }

    /// Run a full pass and report cells and assignment counts
    pub fn run_pass(&self, viewport: &Viewport, posts: &[Post]) -> Result<ClusterPass> {
        viewport.validate()?;

        let cells = self.compute_grid(viewport)?;
        let buckets = assign(posts, &cells);
        let assigned_posts: usize = buckets.values().map(Vec::len).sum();

        let mut markers = Vec::new();
        for (&index, bucket) in &buckets {
            let slots = self.slot_positions(&cells[index]);
            markers.extend(self.reduce(bucket, slots));
        }

        debug!(
            "Clustering pass - cells={}, posts={}, assigned={}, buckets={}, markers={}",
            cells.len(),
            posts.len(),
            assigned_posts,
            buckets.len(),
            markers.len()
        );

        Ok(ClusterPass {
            cells,
            markers,
            assigned_posts,
            dropped_posts: posts.len() - assigned_posts,
        })
    }
}
