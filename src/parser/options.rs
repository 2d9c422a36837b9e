//! Outline extraction options and configuration.

use crate::error::{Error, Result};

/// Options controlling fragment classification and outline construction.
#[derive(Debug, Clone, PartialEq)]
pub struct OutlineOptions {
    /// Font size floor (points) below which a large-font line is never a heading
    pub min_heading_size: f32,

    /// Fraction of page height treated as header/footer zone
    pub header_footer_band: f32,

    /// Lines with this many words or more are never headers/footers
    pub header_footer_word_limit: usize,

    /// Largest size gap (points) within one heading-depth cluster
    pub heading_cluster_tolerance: f32,

    /// Bold lines shorter than this many words are headings
    pub bold_heading_word_limit: usize,

    /// Max fragment-width / page-width ratio for captions
    pub caption_width_ratio: f32,

    /// Title threshold as a multiple of the average font size
    pub title_size_ratio: f32,

    /// Heading threshold as a multiple of the average font size
    pub heading_size_ratio: f32,

    /// Whether to collect pages in parallel
    pub parallel: bool,

    /// Whether to NFC-normalize fragment text
    pub normalize_text: bool,
}

impl OutlineOptions {
    /// Create new options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum heading font size.
    pub fn with_min_heading_size(mut self, size: f32) -> Self {
        self.min_heading_size = size;
        self
    }

    /// Set the header/footer band as a fraction of page height.
    pub fn with_header_footer_band(mut self, band: f32) -> Self {
        self.header_footer_band = band;
        self
    }

    /// Set the header/footer word ceiling.
    pub fn with_header_footer_word_limit(mut self, words: usize) -> Self {
        self.header_footer_word_limit = words;
        self
    }

    /// Set the heading cluster tolerance in points.
    pub fn with_heading_cluster_tolerance(mut self, tolerance: f32) -> Self {
        self.heading_cluster_tolerance = tolerance;
        self
    }

    /// Set the bold heading word ceiling.
    pub fn with_bold_heading_word_limit(mut self, words: usize) -> Self {
        self.bold_heading_word_limit = words;
        self
    }

    /// Set the caption width ratio.
    pub fn with_caption_width_ratio(mut self, ratio: f32) -> Self {
        self.caption_width_ratio = ratio;
        self
    }

    /// Set the title size ratio.
    pub fn with_title_size_ratio(mut self, ratio: f32) -> Self {
        self.title_size_ratio = ratio;
        self
    }

    /// Set the heading size ratio.
    pub fn with_heading_size_ratio(mut self, ratio: f32) -> Self {
        self.heading_size_ratio = ratio;
        self
    }

    /// Enable or disable parallel page collection.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Enable or disable Unicode normalization of fragment text.
    pub fn with_normalize_text(mut self, normalize: bool) -> Self {
        self.normalize_text = normalize;
        self
    }

    /// Check that every value is usable.
    pub fn validate(&self) -> Result<()> {
        check_positive("min_heading_size", self.min_heading_size)?;
        check_positive("heading_cluster_tolerance", self.heading_cluster_tolerance)?;
        check_positive("title_size_ratio", self.title_size_ratio)?;
        check_positive("heading_size_ratio", self.heading_size_ratio)?;

        if !(0.0..=0.5).contains(&self.header_footer_band) {
            return Err(Error::InvalidOption(format!(
                "header_footer_band must be within [0, 0.5], got {}",
                self.header_footer_band
            )));
        }
        if !(self.caption_width_ratio > 0.0 && self.caption_width_ratio <= 1.0) {
            return Err(Error::InvalidOption(format!(
                "caption_width_ratio must be within (0, 1], got {}",
                self.caption_width_ratio
            )));
        }
        Ok(())
    }
}

impl Default for OutlineOptions {
    fn default() -> Self {
        Self {
            min_heading_size: 12.0,
            header_footer_band: 0.10,
            header_footer_word_limit: 10,
            heading_cluster_tolerance: 0.5,
            bold_heading_word_limit: 20,
            caption_width_ratio: 0.7,
            title_size_ratio: 1.5,
            heading_size_ratio: 1.2,
            parallel: true,
            normalize_text: true,
        }
    }
}

fn check_positive(name: &str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidOption(format!(
            "{} must be a positive number, got {}",
            name, value
        )))
    }
}
