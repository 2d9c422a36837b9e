//! Document model types for outline extraction.
//!
//! This module defines the types that flow through the outline pipeline:
//! positioned input pages, classified text fragments, and the section tree
//! handed to renderers.

mod fragment;
mod outline;
mod page;
mod section;

pub use fragment::{BoundingBox, Role, TextFragment};
pub use outline::Outline;
pub use page::{LayoutDocument, LayoutPage, PageSource, RawLine};
pub use section::DocumentSection;
