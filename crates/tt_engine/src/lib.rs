//! The typing state machine: skip-range planning, the keystroke-level
//! engine, and the pure metrics derived from its counters.

mod attempt;
mod config;
mod engine;
pub mod metrics;
mod skip_ranges;

pub use attempt::{Attempt, AttemptContext};
pub use config::{EngineConfig, RawEngineConfig};
pub use engine::{EngineState, Mark};
pub use skip_ranges::{plan_skip_ranges, SkipPolicy};
