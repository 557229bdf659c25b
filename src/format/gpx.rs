//! GPX output formatter

use crate::cluster::ClusterResponse;
use crate::config::Config;
use crate::error::Result;
use crate::format::OutputFormatter;

/// GPX formatter - outputs one waypoint per marker
pub struct GpxFormatter;

impl OutputFormatter for GpxFormatter {
    fn name(&self) -> &str {
        "gpx"
    }

    fn description(&self) -> &str {
        "GPX waypoint file"
    }

    fn format(&self, response: &ClusterResponse, _config: &Config) -> Result<String> {
        let mut gpx = String::new();

        // XML header
        gpx.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        gpx.push('\n');
        gpx.push_str(r#"<gpx version="1.1" creator="mood-map">"#);
        gpx.push('\n');

        // Metadata
        gpx.push_str("  <metadata>\n");
        gpx.push_str(&format!("    <name>mood-map clusters {}</name>\n", response.id));
        gpx.push_str(&format!("    <time>{}</time>\n", response.metadata.timestamp));
        gpx.push_str("  </metadata>\n");

        for marker in &response.markers {
            let coords = marker.coordinates();
            gpx.push_str(&format!(
                r#"  <wpt lat="{}" lon="{}">"#,
                coords.lat, coords.lng
            ));
            gpx.push('\n');

            let title = marker.topic.title();
            if marker.is_cluster() {
                gpx.push_str(&format!(
                    "    <name>{} ×{}</name>\n",
                    title, marker.cluster_count
                ));
            } else {
                gpx.push_str(&format!("    <name>{}</name>\n", title));
            }
            gpx.push_str(&format!("    <type>{}</type>\n", marker.topic));

            gpx.push_str("  </wpt>\n");
        }

        gpx.push_str("</gpx>\n");
        Ok(gpx)
    }
}
