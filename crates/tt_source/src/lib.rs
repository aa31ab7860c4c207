//! Text normalization and offset-to-line bookkeeping shared by the rest
//! of the typing pipeline. Every offset produced anywhere downstream is
//! an index into the string returned by [`normalize`].

mod line_index;
mod normalize;

pub use line_index::{LineIndex, OneIndexed};
pub use normalize::normalize;
