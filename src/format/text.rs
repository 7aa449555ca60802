//! Human-readable text output formatter

use crate::error::Result;
use crate::format::OutputFormatter;
use crate::session::OccurrenceReport;

/// Text formatter - outputs a human-readable marker list
pub struct TextFormatter;

impl OutputFormatter for TextFormatter {
    fn name(&self) -> &str {
        "text"
    }

    fn description(&self) -> &str {
        "Human-readable marker list"
    }

    fn format(&self, report: &OccurrenceReport) -> Result<String> {
        let mut output = String::new();

        // Header
        output.push_str(&format!(
            "{} ({})\n",
            report.species.common_name, report.species.scientific_name
        ));
        match &report.taxon {
            Some(taxon) => output.push_str(&format!("Taxon: {} (id {})\n", taxon.name, taxon.id)),
            None => output.push_str("Taxon: no match\n"),
        }
        if report.grid_km > 0.0 {
            output.push_str(&format!("Grid: {} km\n", report.grid_km));
        } else {
            output.push_str("Grid: off\n");
        }
        output.push_str(&format!(
            "Markers: {} (from {} records)\n\n",
            report.markers.len(),
            report.total_fetched
        ));

        if report.markers.is_empty() {
            output.push_str("No occurrence data.\n");
            return Ok(output);
        }

        for (index, marker) in report.markers.iter().enumerate() {
            let date = marker.observed_on.as_deref().unwrap_or("unknown date");
            let place = marker.location.as_deref().unwrap_or("-");

            match marker.coordinates() {
                Some(coords) => output.push_str(&format!(
                    "{:>4}. {}  {:<9} ({:.4}, {:.4})  {}\n",
                    index + 1,
                    date,
                    marker.quality_grade,
                    coords.lat,
                    coords.lng,
                    place
                )),
                None => output.push_str(&format!(
                    "{:>4}. {}  {:<9} (no point)  {}\n",
                    index + 1,
                    date,
                    marker.quality_grade,
                    place
                )),
            }
        }

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::test_support::sample_report;

    #[test]
    fn test_text_format() {
        let formatter = TextFormatter;
        let output = formatter.format(&sample_report()).unwrap();

        assert!(output.contains("Eastern Box Turtle"));
        assert!(output.contains("Terrapene carolina"));
        assert!(output.contains("Grid: 25 km"));
        assert!(output.contains("Markers: 2 (from 17 records)"));
        assert!(output.contains("2021-08-09"));
        assert!(output.contains("research"));
    }

    #[test]
    fn test_text_format_empty_report() {
        let formatter = TextFormatter;
        let mut report = sample_report();
        report.markers.clear();
        report.total_fetched = 0;

        let output = formatter.format(&report).unwrap();
        assert!(output.contains("No occurrence data."));
    }

    #[test]
    fn test_text_formatter_info() {
        let formatter = TextFormatter;
        assert_eq!(formatter.name(), "text");
        assert!(!formatter.description().is_empty());
    }
}
