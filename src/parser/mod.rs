//! Outline extraction stages.
//!
//! Stages run strictly in order: collect, compute statistics, classify,
//! resolve heading depths, build the section tree.

mod classifier;
mod collector;
mod levels;
mod options;
mod structure;

pub use classifier::{BlockClassifier, DocumentStats};
pub use collector::{CollectedFragments, FragmentCollector, PageGeometry};
pub use levels::{HeadingLevelResolver, HeadingLevels, LeveledFragments};
pub use options::OutlineOptions;
pub use structure::{SectionTree, StructureBuilder};
