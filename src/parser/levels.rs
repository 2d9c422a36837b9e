//! Heading depth resolution.
//!
//! Title and heading font sizes are clustered into outline depths: sizes are
//! sorted largest first and a new depth starts wherever the gap to the
//! previous size reaches the cluster tolerance.

use super::OutlineOptions;
use crate::model::{Role, TextFragment};

/// Outline depth of each title/heading fragment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeadingLevels {
    /// Indexed like the fragment vector; `None` for non-heading fragments
    depths: Vec<Option<usize>>,
    /// Largest font size of each cluster, depth 0 first
    cluster_sizes: Vec<f32>,
}

impl HeadingLevels {
    /// Depth of the fragment at `index`, if it is a title or heading.
    pub fn depth(&self, index: usize) -> Option<usize> {
        self.depths.get(index).copied().flatten()
    }

    /// Number of size clusters found.
    pub fn cluster_count(&self) -> usize {
        self.cluster_sizes.len()
    }

    /// Largest font size of each cluster, shallowest first.
    pub fn cluster_sizes(&self) -> &[f32] {
        &self.cluster_sizes
    }

    /// Whether no fragment received a depth.
    pub fn is_empty(&self) -> bool {
        self.depths.iter().all(Option::is_none)
    }
}

/// Fragments together with their resolved heading depths.
#[derive(Debug, Clone, Default)]
pub struct LeveledFragments {
    /// Fragments in document order
    pub fragments: Vec<TextFragment>,
    /// Depth per fragment
    pub levels: HeadingLevels,
}

/// Clusters heading font sizes into outline depths.
#[derive(Debug, Clone)]
pub struct HeadingLevelResolver {
    tolerance: f32,
}

impl HeadingLevelResolver {
    /// Create a resolver from outline options.
    pub fn new(options: &OutlineOptions) -> Self {
        Self {
            tolerance: options.heading_cluster_tolerance,
        }
    }

    /// Assign a depth to every title/heading fragment.
    ///
    /// Headings without a known font size land at depth 0 and are re-tagged
    /// as [`Role::Heading`], whatever they were classified as before.
    pub fn resolve(&self, mut fragments: Vec<TextFragment>) -> LeveledFragments {
        let mut depths = vec![None; fragments.len()];

        let mut sized: Vec<(usize, f32)> = Vec::new();
        for (i, fragment) in fragments.iter_mut().enumerate() {
            if !fragment.role().is_heading_like() {
                continue;
            }
            match fragment.known_font_size() {
                Some(size) => sized.push((i, size)),
                None => {
                    fragment.set_role(Role::Heading);
                    depths[i] = Some(0);
                }
            }
        }

        // Largest first; stable so equal sizes keep document order.
        sized.sort_by(|a, b| b.1.total_cmp(&a.1));

        let mut cluster_sizes: Vec<f32> = Vec::new();
        let mut previous: Option<f32> = None;
        for (index, size) in sized {
            match previous {
                Some(prev) if prev - size < self.tolerance => {}
                _ => cluster_sizes.push(size),
            }
            depths[index] = Some(cluster_sizes.len() - 1);
            previous = Some(size);
        }

        log::debug!(
            "Resolved {} heading depth cluster(s): {:?}",
            cluster_sizes.len(),
            cluster_sizes
        );

        LeveledFragments {
            fragments,
            levels: HeadingLevels {
                depths,
                cluster_sizes,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BoundingBox;

    fn heading(text: &str, size: Option<f32>, role: Role) -> TextFragment {
        let frag = TextFragment::new(text, BoundingBox::new(72.0, 200.0, 400.0, 220.0), 1)
            .unwrap()
            .classified(role);
        match size {
            Some(size) => frag.with_font_size(size),
            None => frag,
        }
    }

    fn resolver() -> HeadingLevelResolver {
        HeadingLevelResolver::new(&OutlineOptions::default())
    }

    #[test]
    fn test_clusters_by_gap() {
        let fragments = vec![
            heading("A", Some(24.0), Role::Title),
            heading("B", Some(23.8), Role::Heading),
            heading("C", Some(18.0), Role::Heading),
            heading("D", Some(11.0), Role::Heading),
        ];
        let leveled = resolver().resolve(fragments);

        assert_eq!(leveled.levels.depth(0), Some(0));
        assert_eq!(leveled.levels.depth(1), Some(0));
        assert_eq!(leveled.levels.depth(2), Some(1));
        assert_eq!(leveled.levels.depth(3), Some(2));
        assert_eq!(leveled.levels.cluster_count(), 3);
        assert_eq!(leveled.levels.cluster_sizes(), &[24.0, 18.0, 11.0]);
    }

    #[test]
    fn test_gap_equal_to_tolerance_splits() {
        let fragments = vec![
            heading("A", Some(14.0), Role::Heading),
            heading("B", Some(13.5), Role::Heading),
        ];
        let leveled = resolver().resolve(fragments);
        assert_eq!(leveled.levels.depth(0), Some(0));
        assert_eq!(leveled.levels.depth(1), Some(1));
    }

    #[test]
    fn test_order_independent_of_document_position() {
        let fragments = vec![
            heading("small first", Some(14.0), Role::Heading),
            heading("large later", Some(20.0), Role::Heading),
        ];
        let leveled = resolver().resolve(fragments);
        assert_eq!(leveled.levels.depth(0), Some(1));
        assert_eq!(leveled.levels.depth(1), Some(0));
    }

    #[test]
    fn test_unsized_headings_fall_back_to_top_level() {
        let fragments = vec![
            heading("Sized", Some(18.0), Role::Heading),
            heading("Unsized title", None, Role::Title),
            heading("body", None, Role::Paragraph),
        ];
        let leveled = resolver().resolve(fragments);

        assert_eq!(leveled.levels.depth(1), Some(0));
        assert_eq!(leveled.fragments[1].role(), Role::Heading);
        assert_eq!(leveled.levels.depth(2), None);
        assert_eq!(leveled.fragments[2].role(), Role::Paragraph);
    }

    #[test]
    fn test_no_headings() {
        let fragments = vec![heading("body", Some(10.0), Role::Paragraph)];
        let leveled = resolver().resolve(fragments);
        assert!(leveled.levels.is_empty());
        assert_eq!(leveled.levels.cluster_count(), 0);

        let leveled = resolver().resolve(Vec::new());
        assert!(leveled.levels.is_empty());
        assert_eq!(leveled.levels.depth(0), None);
    }
}
