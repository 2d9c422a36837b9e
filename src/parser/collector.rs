//! Fragment collection from externally decoded pages.
//!
//! Pages are read independently (optionally on the rayon pool) and the
//! result is re-ordered by page and vertical position before anything
//! downstream looks at it.

use rayon::prelude::*;
use unicode_normalization::UnicodeNormalization;

use super::OutlineOptions;
use crate::error::{Error, Result};
use crate::model::{PageSource, RawLine, TextFragment};

/// Size of a collected page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    /// Page number (1-indexed)
    pub number: u32,
    /// Page width in points
    pub width: f32,
    /// Page height in points
    pub height: f32,
}

/// Output of [`FragmentCollector::collect`].
#[derive(Debug, Clone, Default)]
pub struct CollectedFragments {
    /// Fragments ordered by (page, vertical position)
    pub fragments: Vec<TextFragment>,
    /// Geometry of every page, in page order
    pub pages: Vec<PageGeometry>,
    /// Lines the page source failed to extract
    pub skipped: usize,
    /// Lines dropped because their text was blank
    pub dropped_empty: usize,
}

impl CollectedFragments {
    /// Geometry of a page by number (1-indexed).
    pub fn page(&self, number: u32) -> Option<&PageGeometry> {
        if number == 0 {
            return None;
        }
        self.pages.get((number - 1) as usize)
    }
}

struct PageFragments {
    geometry: PageGeometry,
    fragments: Vec<TextFragment>,
    skipped: usize,
    dropped_empty: usize,
}

/// Turns page sources into an ordered fragment stream.
#[derive(Debug, Clone)]
pub struct FragmentCollector {
    parallel: bool,
    normalize_text: bool,
}

impl FragmentCollector {
    /// Create a collector from outline options.
    pub fn new(options: &OutlineOptions) -> Self {
        Self {
            parallel: options.parallel,
            normalize_text: options.normalize_text,
        }
    }

    /// Collect fragments from every page.
    ///
    /// Fails only when a page reports an unusable size.
    pub fn collect<P: PageSource + Sync>(&self, pages: &[P]) -> Result<CollectedFragments> {
        let per_page: Vec<PageFragments> = if self.parallel && pages.len() > 1 {
            pages
                .par_iter()
                .enumerate()
                .map(|(i, page)| self.collect_page(i as u32 + 1, page))
                .collect::<Result<Vec<_>>>()?
        } else {
            pages
                .iter()
                .enumerate()
                .map(|(i, page)| self.collect_page(i as u32 + 1, page))
                .collect::<Result<Vec<_>>>()?
        };

        let mut collected = CollectedFragments::default();
        for page in per_page {
            collected.pages.push(page.geometry);
            collected.fragments.extend(page.fragments);
            collected.skipped += page.skipped;
            collected.dropped_empty += page.dropped_empty;
        }

        if collected.skipped > 0 {
            log::warn!(
                "Skipped {} line(s) that could not be extracted",
                collected.skipped
            );
        }
        log::debug!(
            "Collected {} fragments from {} pages ({} blank lines dropped)",
            collected.fragments.len(),
            collected.pages.len(),
            collected.dropped_empty
        );

        Ok(collected)
    }

    fn collect_page<P: PageSource>(&self, number: u32, page: &P) -> Result<PageFragments> {
        let (width, height) = (page.width(), page.height());
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(Error::InvalidPageGeometry {
                page: number,
                width,
                height,
            });
        }

        let mut fragments = Vec::new();
        let mut skipped = 0;
        let mut dropped_empty = 0;

        for line in page.raw_lines() {
            match line {
                Ok(line) => match self.to_fragment(line, number) {
                    Some(fragment) => fragments.push(fragment),
                    None => dropped_empty += 1,
                },
                Err(e) => {
                    log::debug!("Skipping line on page {}: {}", number, e);
                    skipped += 1;
                }
            }
        }

        // Stable: lines sharing a top edge keep the page source's order.
        fragments.sort_by(|a, b| a.bbox.y0.total_cmp(&b.bbox.y0));

        Ok(PageFragments {
            geometry: PageGeometry {
                number,
                width,
                height,
            },
            fragments,
            skipped,
            dropped_empty,
        })
    }

    fn to_fragment(&self, line: RawLine, page_number: u32) -> Option<TextFragment> {
        let is_bold = line.is_bold();
        let is_italic = line.is_italic();
        let text = if self.normalize_text {
            line.text.nfc().collect::<String>()
        } else {
            line.text
        };

        let mut fragment = TextFragment::new(text, line.bbox, page_number)?;
        fragment.font_size = line.font_size;
        fragment.font_name = line.font_name;
        fragment.is_bold = is_bold;
        fragment.is_italic = is_italic;
        Some(fragment)
    }
}
