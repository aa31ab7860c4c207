use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tt_engine::RawEngineConfig;

/// Exercises the typing-practice core end to end: segmentation for
/// manual inspection, or a scripted keystroke replay against one
/// segment.
#[derive(Debug, Parser)]
#[command(name = "tt", author, version, about)]
pub(crate) struct Args {
    /// Path to a `tt.toml` configuration file. Defaults to `tt.toml` in
    /// the current directory; a missing file is not an error.
    #[arg(long, global = true, default_value = "tt.toml")]
    pub(crate) config: PathBuf,

    #[command(flatten)]
    pub(crate) overrides: ConfigOverrides,

    #[command(subcommand)]
    pub(crate) command: Command,
}

/// The configuration knobs exposed as CLI flags. Every field is
/// `Option` so an unset flag can fall through to the config file, and
/// ultimately to [`tt_engine::EngineConfig::default`].
#[derive(Debug, Clone, Copy, Default, clap::Args)]
pub(crate) struct ConfigOverrides {
    /// Target line count per segment (coerced into `[1, 5000]`).
    #[arg(long, global = true)]
    pub(crate) lines_per_segment: Option<u32>,

    /// Spaces per tab at normalization time; `0` deletes tabs (coerced
    /// into `[0, 16]`).
    #[arg(long, global = true)]
    pub(crate) tab_width: Option<u32>,

    /// Keystrokes of slack allowed after the first mismatch before the
    /// engine locks (coerced into `[0, 50]`).
    #[arg(long, global = true)]
    pub(crate) slack_n: Option<u32>,

    /// Hard per-segment character cap (coerced into `[500, 500000]`).
    #[arg(long, global = true)]
    pub(crate) max_segment_chars: Option<usize>,

    /// Whether comments must be typed rather than skipped.
    #[arg(long, global = true)]
    pub(crate) include_comments: Option<bool>,

    /// Whether each line's leading spaces are skipped.
    #[arg(long, global = true)]
    pub(crate) skip_leading_indentation: Option<bool>,

    /// Whether each line's trailing spaces/tabs are skipped.
    #[arg(long, global = true)]
    pub(crate) trim_trailing_whitespace: Option<bool>,

    /// Whether pressing Enter on a newline collapses the consecutive
    /// blank-line newlines that follow it.
    #[arg(long, global = true)]
    pub(crate) auto_skip_blank_lines: Option<bool>,
}

impl ConfigOverrides {
    pub(crate) fn into_raw(self) -> RawEngineConfig {
        RawEngineConfig {
            lines_per_segment: self.lines_per_segment,
            tab_width: self.tab_width,
            slack_n: self.slack_n,
            max_segment_chars: self.max_segment_chars,
            include_comments: self.include_comments,
            skip_leading_indentation: self.skip_leading_indentation,
            trim_trailing_whitespace: self.trim_trailing_whitespace,
            auto_skip_blank_lines: self.auto_skip_blank_lines,
        }
    }
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Run the Normalizer, Comment Lexer, Segmenter and Skip-Range
    /// Planner over a file and print one line per segment.
    Segment(SegmentArgs),

    /// Replay a literal keystroke script against one segment and print
    /// the resulting counters, optionally assembling and persisting an
    /// `Attempt`.
    Replay(ReplayArgs),
}

#[derive(Debug, Parser)]
pub(crate) struct SegmentArgs {
    /// The source file to segment.
    pub(crate) path: PathBuf,
}

#[derive(Debug, Parser)]
pub(crate) struct ReplayArgs {
    /// The source file to replay against.
    pub(crate) path: PathBuf,

    /// 0-based index of the segment to replay.
    #[arg(long)]
    pub(crate) segment: usize,

    /// The literal keystroke script. Each character is one keystroke;
    /// `backspace_token` (default `<BS>`) stands for one backspace.
    #[arg(long)]
    pub(crate) keys: String,

    /// The token within `--keys` that represents a backspace keystroke
    /// rather than a literal character.
    #[arg(long, default_value = "<BS>")]
    pub(crate) backspace_token: String,

    /// Allow a space keystroke to satisfy an expected newline.
    #[arg(long)]
    pub(crate) allow_whitespace_advance_to_newline: bool,

    /// Start timestamp, milliseconds. Defaults to `0` so replay stays
    /// pure and reproducible without a system clock dependency.
    #[arg(long, default_value_t = 0)]
    pub(crate) start_at: u64,

    /// End timestamp, milliseconds.
    #[arg(long, default_value_t = 0)]
    pub(crate) end_at: u64,

    /// Attempt id to record. Defaults to a freshly generated UUID.
    #[arg(long)]
    pub(crate) id: Option<String>,

    /// Path to the attempt history file to append a completed attempt
    /// to. No file is written if the replay does not complete, or if
    /// this is left unset.
    #[arg(long)]
    pub(crate) history: Option<PathBuf>,
}
