//! Route pattern module
//!
//! Contains the pure parsing and ranking logic shared by the registry,
//! the matcher and the link builder.

pub mod pattern;

pub use pattern::{classify_segment, RoutePattern, Segment, SegmentKind};
