//! The finished outline of a document.

use serde::{Deserialize, Serialize};

use super::{DocumentSection, Role};
use crate::parser::DocumentStats;
use crate::render::{MetadataAggregator, OutlineSummary};

/// A document's section tree plus the signals gathered while building it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Outline {
    /// Root sections in reading order
    pub sections: Vec<DocumentSection>,

    /// Font statistics the classifier ran with
    pub stats: Option<DocumentStats>,

    /// Number of pages read
    pub page_count: usize,

    /// Lines the page source failed to extract
    pub skipped_fragments: usize,
}

impl Outline {
    /// Check if the outline has no sections.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Total number of sections, including nested ones.
    pub fn section_count(&self) -> usize {
        self.sections.iter().map(|s| s.section_count()).sum()
    }

    /// Total number of fragments in the tree.
    pub fn fragment_count(&self) -> usize {
        self.sections.iter().map(|s| s.fragment_count()).sum()
    }

    /// Number of fragments with the given role.
    pub fn count_role(&self, role: Role) -> usize {
        self.sections
            .iter()
            .flat_map(|s| s.fragments())
            .filter(|f| f.role() == role)
            .count()
    }

    /// Table of contents, word counts and role histogram.
    pub fn summary(&self) -> OutlineSummary {
        MetadataAggregator::new().aggregate(&self.sections)
    }

    /// Plain text of the whole outline.
    pub fn plain_text(&self) -> String {
        self.sections
            .iter()
            .map(|s| s.plain_text())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}
