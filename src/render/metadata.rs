//! Read-only metadata derived from a finished outline.
//!
//! One pre-order walk produces the table of contents, per-section word
//! counts and a role histogram. Nothing in the tree is modified; sections
//! with no title and no content are flagged, never removed.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::{DocumentSection, Role};

/// One table-of-contents line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocEntry {
    /// Outline depth (0 = shallowest)
    pub depth: usize,
    /// Section title
    pub title: String,
    /// Page of the section's first own fragment
    pub first_page: Option<u32>,
}

/// Statistics for one section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionSummary {
    /// Index path from the root list (e.g. `[1, 0]` = first child of second root)
    pub path: Vec<usize>,
    /// Outline depth
    pub depth: usize,
    /// Section title (empty for untitled sections)
    pub title: String,
    /// Words in the section's own fragments
    pub own_word_count: usize,
    /// Words in the section and all descendants
    pub word_count: usize,
    /// Page of the section's first own fragment
    pub first_page: Option<u32>,
    /// Untitled and without any fragment, including descendants
    pub is_empty: bool,
}

/// Everything [`MetadataAggregator`] derives from an outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineSummary {
    /// Titled sections in pre-order
    pub toc: Vec<TocEntry>,
    /// Every section in pre-order
    pub sections: Vec<SectionSummary>,
    /// Fragment count per role; every role is present
    pub role_histogram: BTreeMap<Role, usize>,
    /// Words across the whole outline
    pub total_words: usize,
}

impl OutlineSummary {
    /// Sections flagged as empty.
    pub fn empty_sections(&self) -> impl Iterator<Item = &SectionSummary> {
        self.sections.iter().filter(|s| s.is_empty)
    }

    /// Number of fragments with the given role.
    pub fn role_count(&self, role: Role) -> usize {
        self.role_histogram.get(&role).copied().unwrap_or(0)
    }

    /// Total number of fragments counted.
    pub fn fragment_count(&self) -> usize {
        self.role_histogram.values().sum()
    }
}

/// Derives a table of contents and statistics from a section tree.
#[derive(Debug, Clone, Default)]
pub struct MetadataAggregator;

impl MetadataAggregator {
    /// Create a new aggregator.
    pub fn new() -> Self {
        Self
    }

    /// Walk the tree once and summarize it.
    pub fn aggregate(&self, sections: &[DocumentSection]) -> OutlineSummary {
        let mut summary = OutlineSummary {
            toc: Vec::new(),
            sections: Vec::new(),
            role_histogram: Role::ALL.iter().map(|&role| (role, 0)).collect(),
            total_words: 0,
        };

        let mut path = Vec::new();
        for (i, section) in sections.iter().enumerate() {
            path.push(i);
            let totals = visit(section, &mut path, &mut summary);
            summary.total_words += totals.words;
            path.pop();
        }

        summary
    }
}

struct SubtreeTotals {
    words: usize,
    fragments: usize,
}

fn visit(
    section: &DocumentSection,
    path: &mut Vec<usize>,
    summary: &mut OutlineSummary,
) -> SubtreeTotals {
    let first_page = section.blocks.first().map(|b| b.page_number());
    if !section.title.is_empty() {
        summary.toc.push(TocEntry {
            depth: section.depth,
            title: section.title.clone(),
            first_page,
        });
    }

    let own_word_count: usize = section.blocks.iter().map(|b| b.word_count()).sum();
    for block in &section.blocks {
        *summary.role_histogram.entry(block.role()).or_insert(0) += 1;
    }

    // Reserve the pre-order slot now; totals are known after the children.
    let slot = summary.sections.len();
    summary.sections.push(SectionSummary {
        path: path.clone(),
        depth: section.depth,
        title: section.title.clone(),
        own_word_count,
        word_count: own_word_count,
        first_page,
        is_empty: false,
    });

    let mut totals = SubtreeTotals {
        words: own_word_count,
        fragments: section.blocks.len(),
    };
    for (i, child) in section.subsections.iter().enumerate() {
        path.push(i);
        let child_totals = visit(child, path, summary);
        path.pop();
        totals.words += child_totals.words;
        totals.fragments += child_totals.fragments;
    }

    let entry = &mut summary.sections[slot];
    entry.word_count = totals.words;
    entry.is_empty = section.title.is_empty() && totals.fragments == 0;

    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BoundingBox, TextFragment};

    fn frag(text: &str, page: u32, role: Role) -> TextFragment {
        TextFragment::new(text, BoundingBox::new(0.0, 100.0, 100.0, 112.0), page)
            .unwrap()
            .classified(role)
    }

    fn sample() -> Vec<DocumentSection> {
        let mut untitled = DocumentSection::untitled();
        untitled.blocks.push(frag("Running header", 1, Role::Header));

        let mut chapter = DocumentSection::new("Chapter One", 0);
        chapter.blocks.push(frag("Chapter One", 2, Role::Heading));
        chapter.blocks.push(frag("three words here", 2, Role::Paragraph));

        let mut section = DocumentSection::new("Details", 1);
        section.blocks.push(frag("Details", 3, Role::Heading));
        section.blocks.push(frag("- item", 3, Role::ListItem));
        chapter.subsections.push(section);

        vec![untitled, chapter]
    }

    #[test]
    fn test_toc_skips_untitled() {
        let summary = MetadataAggregator::new().aggregate(&sample());
        assert_eq!(
            summary.toc,
            vec![
                TocEntry {
                    depth: 0,
                    title: "Chapter One".to_string(),
                    first_page: Some(2)
                },
                TocEntry {
                    depth: 1,
                    title: "Details".to_string(),
                    first_page: Some(3)
                },
            ]
        );
    }

    #[test]
    fn test_word_counts_roll_up() {
        let summary = MetadataAggregator::new().aggregate(&sample());

        assert_eq!(summary.sections.len(), 3);
        assert_eq!(summary.sections[0].word_count, 2);
        let chapter = &summary.sections[1];
        assert_eq!(chapter.path, vec![1]);
        assert_eq!(chapter.own_word_count, 5);
        assert_eq!(chapter.word_count, 8);
        assert_eq!(summary.sections[2].path, vec![1, 0]);
        assert_eq!(summary.sections[2].word_count, 3);
        assert_eq!(summary.total_words, 10);
    }

    #[test]
    fn test_role_histogram() {
        let summary = MetadataAggregator::new().aggregate(&sample());
        assert_eq!(summary.role_count(Role::Heading), 2);
        assert_eq!(summary.role_count(Role::Header), 1);
        assert_eq!(summary.role_count(Role::ListItem), 1);
        assert_eq!(summary.role_count(Role::Caption), 0);
        assert_eq!(summary.role_histogram.len(), Role::ALL.len());
        assert_eq!(summary.fragment_count(), 5);
    }

    #[test]
    fn test_empty_sections_flagged_not_removed() {
        let mut sections = sample();
        sections.push(DocumentSection::untitled());
        let mut holder = DocumentSection::untitled();
        holder.subsections.push(DocumentSection::new("Has title", 1));
        sections.push(holder);

        let summary = MetadataAggregator::new().aggregate(&sections);
        let empty: Vec<_> = summary.empty_sections().map(|s| s.path.clone()).collect();
        assert_eq!(empty, vec![vec![2], vec![3]]);
        assert_eq!(summary.sections.len(), 6);
        assert_eq!(sections.len(), 4);
    }

    #[test]
    fn test_empty_outline() {
        let summary = MetadataAggregator::new().aggregate(&[]);
        assert!(summary.toc.is_empty());
        assert!(summary.sections.is_empty());
        assert_eq!(summary.fragment_count(), 0);
        assert!(summary.role_histogram.values().all(|&count| count == 0));
        assert_eq!(summary.total_words, 0);
    }

    #[test]
    fn test_aggregate_is_idempotent() {
        let sections = sample();
        let aggregator = MetadataAggregator::new();
        assert_eq!(aggregator.aggregate(&sections), aggregator.aggregate(&sections));
    }
}
