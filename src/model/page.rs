//! Page-level input types.
//!
//! Decoding a page-based file format is left to an external page parser.
//! Anything that can report page dimensions and positioned text lines can
//! feed the outline pipeline by implementing [`PageSource`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::BoundingBox;
use crate::error::Result;

/// A page as seen by the fragment collector.
pub trait PageSource {
    /// Page width in points.
    fn width(&self) -> f32;

    /// Page height in points.
    fn height(&self) -> f32;

    /// Text lines in reading order.
    ///
    /// A line that cannot be decoded is reported as an `Err`; the collector
    /// skips it and counts the failure.
    fn raw_lines(&self) -> Vec<Result<RawLine>>;
}

/// A line of text as reported by a page parser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawLine {
    /// The text content
    pub text: String,

    /// Bounding box in page points
    pub bbox: BoundingBox,

    /// Font size in points
    #[serde(default)]
    pub font_size: Option<f32>,

    /// Font name (e.g., "Helvetica-Bold")
    #[serde(default)]
    pub font_name: Option<String>,

    /// Explicit bold flag
    #[serde(default)]
    pub bold: bool,

    /// Explicit italic flag
    #[serde(default)]
    pub italic: bool,
}

impl RawLine {
    /// Create a new line without font information.
    pub fn new(text: impl Into<String>, bbox: BoundingBox) -> Self {
        Self {
            text: text.into(),
            bbox,
            font_size: None,
            font_name: None,
            bold: false,
            italic: false,
        }
    }

    /// Set the font size.
    pub fn with_font_size(mut self, size: f32) -> Self {
        self.font_size = Some(size);
        self
    }

    /// Set the font name.
    pub fn with_font_name(mut self, name: impl Into<String>) -> Self {
        self.font_name = Some(name.into());
        self
    }

    /// Mark the line bold.
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Whether the line is bold, by flag or by font name.
    pub fn is_bold(&self) -> bool {
        self.bold
            || self.font_name.as_deref().is_some_and(|name| {
                let name = name.to_lowercase();
                name.contains("bold") || name.contains("black") || name.contains("heavy")
            })
    }

    /// Whether the line is italic, by flag or by font name.
    pub fn is_italic(&self) -> bool {
        self.italic
            || self.font_name.as_deref().is_some_and(|name| {
                let name = name.to_lowercase();
                name.contains("italic") || name.contains("oblique")
            })
    }
}

/// An in-memory page with pre-extracted lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutPage {
    /// Page width in points (1 point = 1/72 inch)
    pub width: f32,

    /// Page height in points
    pub height: f32,

    /// Lines on the page
    #[serde(default)]
    pub lines: Vec<RawLine>,
}

impl LayoutPage {
    /// Create a new page with the given dimensions.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            lines: Vec::new(),
        }
    }

    /// Create a new page with standard Letter size (8.5 x 11 inches).
    pub fn letter() -> Self {
        Self::new(612.0, 792.0) // 8.5 * 72, 11 * 72
    }

    /// Create a new page with standard A4 size (210 x 297 mm).
    pub fn a4() -> Self {
        Self::new(595.0, 842.0)
    }

    /// Add a line to the page.
    pub fn add_line(&mut self, line: RawLine) {
        self.lines.push(line);
    }

    /// Builder-style variant of [`add_line`](Self::add_line).
    pub fn with_line(mut self, line: RawLine) -> Self {
        self.lines.push(line);
        self
    }

    /// Get page dimensions as (width, height) tuple.
    pub fn dimensions(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    /// Check if the page is in landscape orientation.
    pub fn is_landscape(&self) -> bool {
        self.width > self.height
    }
}

impl Default for LayoutPage {
    fn default() -> Self {
        Self::letter()
    }
}

impl PageSource for LayoutPage {
    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn raw_lines(&self) -> Vec<Result<RawLine>> {
        self.lines.iter().cloned().map(Ok).collect()
    }
}

/// A page-based document already decoded into positioned lines.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutDocument {
    /// Pages in reading order
    pub pages: Vec<LayoutPage>,
}

impl LayoutDocument {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a page to the document.
    pub fn add_page(&mut self, page: LayoutPage) {
        self.pages.push(page);
    }

    /// Get the number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Check if the document has any pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Parse a layout dump from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a layout dump from a JSON file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&data)
    }
}
