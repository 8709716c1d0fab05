//! Duplicate detection: size grouping, pairwise comparison, and the
//! parallel group-processing harness.

pub mod compare;
pub mod finder;
pub mod groups;

pub use compare::{compare, CompareError, CompareOutcome, CHUNK_SIZE};
pub use finder::{DuplicateFinder, FinderConfig, FinderError, FinderSummary};
pub use groups::{group_by_size, group_by_size_structured, GroupingStats, SizeGroup};
