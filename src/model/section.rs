//! Outline tree nodes.

use super::TextFragment;
use serde::{Deserialize, Serialize};

/// One node of the document outline.
///
/// A section owns the fragments that follow its heading up to the next
/// heading, plus any deeper sections opened before that point.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentSection {
    /// Heading text; empty for the synthetic untitled section
    pub title: String,

    /// Outline depth (0 = shallowest)
    pub depth: usize,

    /// Fragments owned by this section, in reading order
    pub blocks: Vec<TextFragment>,

    /// Nested sections, in reading order
    pub subsections: Vec<DocumentSection>,
}

impl DocumentSection {
    /// Create an empty section.
    pub fn new(title: impl Into<String>, depth: usize) -> Self {
        Self {
            title: title.into(),
            depth,
            blocks: Vec::new(),
            subsections: Vec::new(),
        }
    }

    /// Create the untitled depth-0 section.
    pub fn untitled() -> Self {
        Self::new("", 0)
    }

    /// Whether this section has no heading of its own.
    pub fn is_untitled(&self) -> bool {
        self.title.is_empty()
    }

    /// First and last page touched by this section or any descendant.
    pub fn page_span(&self) -> Option<(u32, u32)> {
        let own = self.blocks.iter().map(|b| b.page_number());
        let mut span: Option<(u32, u32)> = None;
        for page in own {
            span = Some(match span {
                Some((lo, hi)) => (lo.min(page), hi.max(page)),
                None => (page, page),
            });
        }
        for child in &self.subsections {
            if let Some((c_lo, c_hi)) = child.page_span() {
                span = Some(match span {
                    Some((lo, hi)) => (lo.min(c_lo), hi.max(c_hi)),
                    None => (c_lo, c_hi),
                });
            }
        }
        span
    }

    /// Number of fragments in this section and all descendants.
    pub fn fragment_count(&self) -> usize {
        self.blocks.len()
            + self
                .subsections
                .iter()
                .map(|s| s.fragment_count())
                .sum::<usize>()
    }

    /// Total number of sections in this subtree, including this one.
    pub fn section_count(&self) -> usize {
        1 + self
            .subsections
            .iter()
            .map(|s| s.section_count())
            .sum::<usize>()
    }

    /// Plain text of the subtree, one fragment per line.
    pub fn plain_text(&self) -> String {
        let mut lines: Vec<&str> = Vec::new();
        self.collect_lines(&mut lines);
        lines.join("\n")
    }

    fn collect_lines<'a>(&'a self, lines: &mut Vec<&'a str>) {
        lines.extend(self.blocks.iter().map(|b| b.text()));
        for child in &self.subsections {
            child.collect_lines(lines);
        }
    }

    /// All fragments of the subtree in reading order.
    pub fn fragments(&self) -> Vec<&TextFragment> {
        let mut out: Vec<&TextFragment> = self.blocks.iter().collect();
        for child in &self.subsections {
            out.extend(child.fragments());
        }
        out
    }
}
