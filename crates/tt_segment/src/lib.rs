//! Splits a normalized source string into ordered, offset-exact
//! segments bounded by a line count and a hard character cap.

mod config;
mod segment;

pub use config::SegmentConfig;
pub use segment::{attach_comment_ranges, split, Segment};
