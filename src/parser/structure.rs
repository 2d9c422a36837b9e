//! Section tree construction.
//!
//! A single pass over the classified fragment stream. Open sections live on
//! a stack ordered by ascending depth; a heading at depth `d` closes every
//! open section at depth `d` or deeper, so equal depth always means sibling.
//! Sections are kept in a flat arena and linked by index until the pass is
//! over, then turned into an owned [`DocumentSection`] tree.

use super::LeveledFragments;
use crate::model::{DocumentSection, TextFragment};

#[derive(Debug, Clone)]
struct SectionNode {
    title: String,
    depth: usize,
    blocks: Vec<TextFragment>,
    children: Vec<usize>,
}

impl SectionNode {
    fn new(title: String, depth: usize) -> Self {
        Self {
            title,
            depth,
            blocks: Vec::new(),
            children: Vec::new(),
        }
    }
}

/// Arena of sections produced by [`StructureBuilder`].
///
/// A child is always created after its parent, so child indices are
/// strictly greater than their parent's index.
#[derive(Debug, Clone, Default)]
pub struct SectionTree {
    nodes: Vec<SectionNode>,
    roots: Vec<usize>,
}

impl SectionTree {
    /// Total number of sections.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree has no sections.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of root sections.
    pub fn root_count(&self) -> usize {
        self.roots.len()
    }

    fn push(&mut self, node: SectionNode, parent: Option<usize>) -> usize {
        let index = self.nodes.len();
        self.nodes.push(node);
        match parent {
            Some(parent) => self.nodes[parent].children.push(index),
            None => self.roots.push(index),
        }
        index
    }

    /// Convert the arena into owned, nested sections.
    pub fn into_sections(self) -> Vec<DocumentSection> {
        let SectionTree { nodes, roots } = self;
        let mut built: Vec<Option<DocumentSection>> = Vec::with_capacity(nodes.len());
        built.resize_with(nodes.len(), || None);

        // Children have larger indices, so walking backwards finishes every
        // child before its parent needs it.
        for (index, node) in nodes.into_iter().enumerate().rev() {
            let subsections = node
                .children
                .iter()
                .filter_map(|&child| built[child].take())
                .collect();
            built[index] = Some(DocumentSection {
                title: node.title,
                depth: node.depth,
                blocks: node.blocks,
                subsections,
            });
        }

        roots
            .into_iter()
            .filter_map(|root| built[root].take())
            .collect()
    }
}

/// Builds the section tree from leveled fragments.
#[derive(Debug, Clone, Default)]
pub struct StructureBuilder;

impl StructureBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self
    }

    /// Build the section arena.
    ///
    /// Fragments must be in document order. Content before the first heading
    /// goes into a synthetic untitled root section; with no headings at all
    /// that section holds every fragment.
    pub fn build(&self, input: LeveledFragments) -> SectionTree {
        let LeveledFragments { fragments, levels } = input;

        let mut tree = SectionTree::default();
        let mut stack: Vec<(usize, usize)> = Vec::new();
        let mut orphans: Vec<TextFragment> = Vec::new();

        for (i, fragment) in fragments.into_iter().enumerate() {
            if !fragment.role().is_heading_like() {
                match stack.last() {
                    Some(&(_, top)) => tree.nodes[top].blocks.push(fragment),
                    None => orphans.push(fragment),
                }
                continue;
            }

            let depth = levels.depth(i).unwrap_or(0);
            while stack.last().is_some_and(|&(open, _)| open >= depth) {
                stack.pop();
            }

            if !orphans.is_empty() && stack.is_empty() && tree.roots.is_empty() {
                let mut untitled = SectionNode::new(String::new(), 0);
                untitled.blocks = std::mem::take(&mut orphans);
                tree.push(untitled, None);
            }

            let mut node = SectionNode::new(fragment.text().to_string(), depth);
            node.blocks.push(fragment);
            let parent = stack.last().map(|&(_, index)| index);
            let index = tree.push(node, parent);
            stack.push((depth, index));
        }

        if !orphans.is_empty() {
            let mut untitled = SectionNode::new(String::new(), 0);
            untitled.blocks = orphans;
            tree.push(untitled, None);
        }

        log::debug!(
            "Built {} section(s), {} at root level",
            tree.len(),
            tree.root_count()
        );

        tree
    }

    /// Build and convert straight to owned sections.
    pub fn build_sections(&self, input: LeveledFragments) -> Vec<DocumentSection> {
        self.build(input).into_sections()
    }
}
