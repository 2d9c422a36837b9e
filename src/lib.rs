//! # docoutline
//!
//! Document structure extraction for page-based documents.
//!
//! This library takes pages that an external parser has already decoded into
//! positioned text lines and turns them into a typed, hierarchical outline
//! that can be reflowed into another container format.
//!
//! ## Quick Start
//!
//! ```no_run
//! use docoutline::{outline_from_path, render};
//!
//! fn main() -> docoutline::Result<()> {
//!     // Load a layout dump and build the outline
//!     let outline = outline_from_path("layout.json")?;
//!
//!     // Table of contents
//!     for entry in outline.summary().toc {
//!         println!("{}{}", "  ".repeat(entry.depth), entry.title);
//!     }
//!
//!     println!("{}", render::to_json(&outline, render::JsonFormat::Pretty)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Pipeline
//!
//! 1. **Collect**: read every page into ordered [`TextFragment`]s
//! 2. **Classify**: document-wide font statistics, then one [`Role`] per fragment
//! 3. **Resolve depths**: cluster heading font sizes into outline depths
//! 4. **Build**: turn the fragment stream into a [`DocumentSection`] tree
//! 5. **Summarize**: table of contents, word counts, role histogram

pub mod error;
pub mod model;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use error::{Error, Result};
pub use model::{
    BoundingBox, DocumentSection, LayoutDocument, LayoutPage, Outline, PageSource, RawLine, Role,
    TextFragment,
};
pub use parser::{
    BlockClassifier, DocumentStats, FragmentCollector, HeadingLevelResolver, OutlineOptions,
    StructureBuilder,
};
pub use render::{JsonFormat, MetadataAggregator, OutlineSummary, TocEntry};

use std::path::Path;

/// Build an outline from pages with default options.
///
/// # Example
///
/// ```
/// use docoutline::{extract_outline, BoundingBox, LayoutPage, RawLine};
///
/// let page = LayoutPage::letter()
///     .with_line(RawLine::new("Hello world", BoundingBox::new(72.0, 300.0, 200.0, 312.0)));
/// let outline = extract_outline(&[page]).unwrap();
/// assert_eq!(outline.sections.len(), 1);
/// assert!(outline.sections[0].is_untitled());
/// ```
pub fn extract_outline<P: PageSource + Sync>(pages: &[P]) -> Result<Outline> {
    extract_outline_with_options(pages, &OutlineOptions::default())
}

/// Build an outline from pages with custom options.
pub fn extract_outline_with_options<P: PageSource + Sync>(
    pages: &[P],
    options: &OutlineOptions,
) -> Result<Outline> {
    options.validate()?;

    let collected = FragmentCollector::new(options).collect(pages)?;
    let stats = DocumentStats::compute(&collected.fragments);
    let classified =
        BlockClassifier::new(options).classify(collected.fragments, &collected.pages, &stats);
    let leveled = HeadingLevelResolver::new(options).resolve(classified);
    let sections = StructureBuilder::new().build_sections(leveled);

    Ok(Outline {
        sections,
        stats: Some(stats),
        page_count: collected.pages.len(),
        skipped_fragments: collected.skipped,
    })
}

/// Build an outline from a JSON layout dump.
///
/// # Example
///
/// ```no_run
/// use docoutline::outline_from_path;
///
/// let outline = outline_from_path("layout.json").unwrap();
/// println!("Sections: {}", outline.section_count());
/// ```
pub fn outline_from_path<P: AsRef<Path>>(path: P) -> Result<Outline> {
    let doc = LayoutDocument::from_path(path)?;
    extract_outline(&doc.pages)
}

/// Build an outline from a JSON layout string.
pub fn outline_from_json(json: &str) -> Result<Outline> {
    let doc = LayoutDocument::from_json_str(json)?;
    extract_outline(&doc.pages)
}

/// Builder for configuring and running outline extraction.
///
/// # Example
///
/// ```no_run
/// use docoutline::Outliner;
///
/// let summary = Outliner::new()
///     .with_min_heading_size(14.0)
///     .sequential()
///     .extract_file("layout.json")?
///     .summary();
/// # Ok::<(), docoutline::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Outliner {
    options: OutlineOptions,
}

impl Outliner {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder from existing options.
    pub fn with_options(options: OutlineOptions) -> Self {
        Self { options }
    }

    /// Set the minimum heading font size.
    pub fn with_min_heading_size(mut self, size: f32) -> Self {
        self.options = self.options.with_min_heading_size(size);
        self
    }

    /// Set the header/footer band.
    pub fn with_header_footer_band(mut self, band: f32) -> Self {
        self.options = self.options.with_header_footer_band(band);
        self
    }

    /// Set the heading cluster tolerance.
    pub fn with_heading_cluster_tolerance(mut self, tolerance: f32) -> Self {
        self.options = self.options.with_heading_cluster_tolerance(tolerance);
        self
    }

    /// Set the bold heading word ceiling.
    pub fn with_bold_heading_word_limit(mut self, words: usize) -> Self {
        self.options = self.options.with_bold_heading_word_limit(words);
        self
    }

    /// Set the caption width ratio.
    pub fn with_caption_width_ratio(mut self, ratio: f32) -> Self {
        self.options = self.options.with_caption_width_ratio(ratio);
        self
    }

    /// Disable parallel page collection.
    pub fn sequential(mut self) -> Self {
        self.options = self.options.sequential();
        self
    }

    /// Current options.
    pub fn options(&self) -> &OutlineOptions {
        &self.options
    }

    /// Build an outline from pages.
    pub fn extract<P: PageSource + Sync>(&self, pages: &[P]) -> Result<Outline> {
        extract_outline_with_options(pages, &self.options)
    }

    /// Build an outline from a layout document.
    pub fn extract_document(&self, doc: &LayoutDocument) -> Result<Outline> {
        self.extract(&doc.pages)
    }

    /// Build an outline from a JSON layout file.
    pub fn extract_file<P: AsRef<Path>>(&self, path: P) -> Result<Outline> {
        let doc = LayoutDocument::from_path(path)?;
        self.extract_document(&doc)
    }
}
