//! Text fragments and their semantic roles.

use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box in page points.
///
/// The origin is the top-left corner of the page; `y` grows downward.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Left edge
    pub x0: f32,
    /// Top edge
    pub y0: f32,
    /// Right edge
    pub x1: f32,
    /// Bottom edge
    pub y1: f32,
}

impl BoundingBox {
    /// Create a new bounding box.
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Width of the box (never negative).
    pub fn width(&self) -> f32 {
        (self.x1 - self.x0).max(0.0)
    }

    /// Height of the box (never negative).
    pub fn height(&self) -> f32 {
        (self.y1 - self.y0).max(0.0)
    }
}

/// Semantic role of a fragment.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Document or chapter title
    Title,
    /// Section heading
    Heading,
    /// Body text
    Paragraph,
    /// Bulleted or numbered list entry
    ListItem,
    /// Short line between other content (figure/table caption)
    Caption,
    /// Running header
    Header,
    /// Running footer
    Footer,
    /// Not yet classified
    #[default]
    Unknown,
}

impl Role {
    /// Every role, in declaration order.
    pub const ALL: [Role; 8] = [
        Role::Title,
        Role::Heading,
        Role::Paragraph,
        Role::ListItem,
        Role::Caption,
        Role::Header,
        Role::Footer,
        Role::Unknown,
    ];

    /// Whether this role opens a section in the outline.
    pub fn is_heading_like(&self) -> bool {
        matches!(self, Role::Title | Role::Heading)
    }

    /// Stable lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Title => "title",
            Role::Heading => "heading",
            Role::Paragraph => "paragraph",
            Role::ListItem => "list_item",
            Role::Caption => "caption",
            Role::Header => "header",
            Role::Footer => "footer",
            Role::Unknown => "unknown",
        }
    }

    /// Suggested markup element for a renderer.
    ///
    /// Heading-like roles map to `h1`..`h6` by outline depth.
    pub fn html_tag(&self, depth: usize) -> &'static str {
        const HEADINGS: [&str; 6] = ["h1", "h2", "h3", "h4", "h5", "h6"];
        match self {
            Role::Title | Role::Heading => HEADINGS[depth.min(HEADINGS.len() - 1)],
            Role::ListItem => "li",
            Role::Caption => "figcaption",
            Role::Header => "header",
            Role::Footer => "footer",
            Role::Paragraph | Role::Unknown => "p",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One line of extracted text with position and font metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextFragment {
    text: String,

    /// Bounding box in page points
    pub bbox: BoundingBox,

    /// Font size in points, if the page parser reported one
    pub font_size: Option<f32>,

    /// Font name (e.g., "Helvetica-Bold")
    pub font_name: Option<String>,

    /// Whether the text is bold
    pub is_bold: bool,

    /// Whether the text is italic
    pub is_italic: bool,

    page_number: u32,

    role: Role,
}

impl TextFragment {
    /// Create an unclassified fragment.
    ///
    /// Returns `None` when the trimmed text is empty or `page_number` is 0.
    pub fn new(text: impl Into<String>, bbox: BoundingBox, page_number: u32) -> Option<Self> {
        let text = text.into();
        let trimmed = text.trim();
        if trimmed.is_empty() || page_number == 0 {
            return None;
        }
        let text = if trimmed.len() == text.len() {
            text
        } else {
            trimmed.to_string()
        };

        Some(Self {
            text,
            bbox,
            font_size: None,
            font_name: None,
            is_bold: false,
            is_italic: false,
            page_number,
            role: Role::Unknown,
        })
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

    /// Mark the fragment bold.
    pub fn bold(mut self) -> Self {
        self.is_bold = true;
        self
    }

    /// Mark the fragment italic.
    pub fn italic(mut self) -> Self {
        self.is_italic = true;
        self
    }

    /// Fragment text (trimmed, never empty).
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Page number (1-indexed).
    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    /// Assigned role; `Unknown` until classified.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Number of whitespace-separated words.
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }

    pub fn width(&self) -> f32 {
        self.bbox.width()
    }

    pub fn height(&self) -> f32 {
        self.bbox.height()
    }

    /// Font size, ignoring non-finite or non-positive values.
    pub(crate) fn known_font_size(&self) -> Option<f32> {
        self.font_size.filter(|s| s.is_finite() && *s > 0.0)
    }

    pub(crate) fn set_role(&mut self, role: Role) {
        self.role = role;
    }

    /// Build an already-classified fragment.
    ///
    /// Useful for feeding a hand-made stream into the structure builder.
    pub fn classified(mut self, role: Role) -> Self {
        self.role = role;
        self
    }
}
