//! Human-readable text output formatter

use crate::cluster::ClusterResponse;
use crate::config::Config;
use crate::error::Result;
use crate::format::OutputFormatter;

/// Text formatter - outputs human-readable summary
pub struct TextFormatter;

impl OutputFormatter for TextFormatter {
    fn name(&self) -> &str {
        "text"
    }

    fn description(&self) -> &str {
        "Human-readable text"
    }

    fn format(&self, response: &ClusterResponse, config: &Config) -> Result<String> {
        let mut output = String::new();
        let viewport = &response.viewport;
        let meta = &response.metadata;

        // Header
        output.push_str(&format!("mood-map clusters ({})\n", response.id));
        output.push_str(&format!(
            "Viewport: x={:.1} y={:.1} {:.1}x{:.1}\n",
            viewport.x, viewport.y, viewport.width, viewport.height
        ));
        let center = viewport.mid_point().to_coordinates();
        output.push_str(&format!("Center: ({:.6}, {:.6})\n", center.lat, center.lng));
        output.push_str(&format!(
            "Posts: {} in, {} assigned, {} outside grid\n",
            meta.input_posts, meta.assigned_posts, meta.dropped_posts
        ));
        output.push_str(&format!(
            "Pass-through limit: {}\n\n",
            config.cluster.pass_through_limit
        ));

        // Markers
        output.push_str(&format!(
            "Markers ({}, {} clusters):\n",
            meta.marker_count, meta.cluster_markers
        ));
        for marker in &response.markers {
            let coords = marker.coordinates();
            let count = if marker.is_cluster() {
                format!(" x{}", marker.cluster_count)
            } else {
                String::new()
            };
            output.push_str(&format!(
                "  {} {}{}: ({:.6}, {:.6})\n",
                marker.topic.emoji(),
                marker.topic,
                count,
                coords.lat,
                coords.lng
            ));
        }

        if let Some(cells) = &response.cells {
            output.push_str(&format!("\nCells: {}\n", cells.len()));
        }

        Ok(output)
    }
}
