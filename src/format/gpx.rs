//! GPX output formatter

use crate::error::Result;
use crate::format::OutputFormatter;
use crate::session::OccurrenceReport;

/// GPX formatter - outputs one waypoint per clustered marker
pub struct GpxFormatter;

impl OutputFormatter for GpxFormatter {
    fn name(&self) -> &str {
        "gpx"
    }

    fn description(&self) -> &str {
        "GPX waypoint file"
    }

    fn format(&self, report: &OccurrenceReport) -> Result<String> {
        let mut gpx = String::new();

        // XML header
        gpx.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        gpx.push('\n');
        gpx.push_str(r#"<gpx version="1.1" creator="terra-atlas">"#);
        gpx.push('\n');

        // Metadata
        gpx.push_str("  <metadata>\n");
        gpx.push_str(&format!(
            "    <name>{} occurrences</name>\n",
            xml_escape(&report.species.scientific_name)
        ));
        gpx.push_str(&format!(
            "    <desc>{} markers from {} records, {} km grid</desc>\n",
            report.markers.len(),
            report.total_fetched,
            report.grid_km
        ));
        gpx.push_str("  </metadata>\n");

        // One waypoint per marker
        for marker in &report.markers {
            let coords = match marker.coordinates() {
                Some(coords) => coords,
                None => continue,
            };

            gpx.push_str(&format!(
                r#"  <wpt lat="{}" lon="{}">"#,
                coords.lat, coords.lng
            ));
            gpx.push('\n');
            gpx.push_str(&format!(
                "    <name>{}</name>\n",
                xml_escape(marker.display_name())
            ));

            let date = marker.observed_on.as_deref().unwrap_or("unknown date");
            gpx.push_str(&format!(
                "    <desc>{}, {}</desc>\n",
                xml_escape(date),
                marker.quality_grade
            ));

            gpx.push_str("  </wpt>\n");
        }

        gpx.push_str("</gpx>\n");
        Ok(gpx)
    }
}

/// Escape the five XML special characters
fn xml_escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
