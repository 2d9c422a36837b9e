//! JSON rendering for outlines.

use serde::Serialize;

use super::OutlineSummary;
use crate::error::{Error, Result};
use crate::model::Outline;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert an outline to JSON.
pub fn to_json(outline: &Outline, format: JsonFormat) -> Result<String> {
    serialize(outline, format)
}

/// Convert an outline summary to JSON.
pub fn summary_to_json(summary: &OutlineSummary, format: JsonFormat) -> Result<String> {
    serialize(summary, format)
}

fn serialize<T: Serialize>(value: &T, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value),
        JsonFormat::Compact => serde_json::to_string(value),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BoundingBox, DocumentSection, Role, TextFragment};
    use crate::render::MetadataAggregator;

    fn outline() -> Outline {
        let mut section = DocumentSection::new("Intro", 0);
        section.blocks.push(
            TextFragment::new("Intro", BoundingBox::new(0.0, 100.0, 80.0, 120.0), 1)
                .unwrap()
                .classified(Role::Heading),
        );
        Outline {
            sections: vec![section],
            ..Outline::default()
        }
    }

    #[test]
    fn test_to_json_pretty() {
        let json = to_json(&outline(), JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"title\""));
        assert!(json.contains("Intro"));
        assert!(json.contains("\"heading\""));
        assert!(json.contains('\n')); // Pretty has newlines
    }

    #[test]
    fn test_to_json_compact() {
        let json = to_json(&outline(), JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n')); // Compact has no newlines
    }

    #[test]
    fn test_summary_to_json() {
        let summary = MetadataAggregator::new().aggregate(&outline().sections);
        let json = summary_to_json(&summary, JsonFormat::Compact).unwrap();
        assert!(json.contains("\"toc\""));
        assert!(json.contains("\"list_item\":0"));

        let back: OutlineSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(back, summary);
    }
}
