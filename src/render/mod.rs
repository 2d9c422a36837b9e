//! Output derived from a finished outline: metadata and JSON.
//!
//! Mapping roles to markup is left to downstream renderers; see
//! [`Role::html_tag`](crate::model::Role::html_tag) for a suggested mapping.

mod json;
mod metadata;

pub use json::{summary_to_json, to_json, JsonFormat};
pub use metadata::{MetadataAggregator, OutlineSummary, SectionSummary, TocEntry};
