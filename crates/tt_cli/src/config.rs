//! Configuration resolution: an optional TOML file merged with CLI
//! flags, flag-over-file-over-default, then coerced once through
//! [`tt_engine::EngineConfig::coerce`] so an out-of-range or absent
//! value never reaches the core.

use std::path::Path;

use serde::Deserialize;
use tt_engine::{EngineConfig, RawEngineConfig};

use crate::args::ConfigOverrides;
use crate::error::CliError;

/// The shape of `tt.toml`: every field optional, identical in spirit to
/// [`tt_engine::RawEngineConfig`] but kept as its own type since the
/// file format is a boundary this crate owns, not something the engine
/// crate should know how to parse.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
struct FileConfig {
    lines_per_segment: Option<u32>,
    tab_width: Option<u32>,
    slack_n: Option<u32>,
    max_segment_chars: Option<usize>,
    include_comments: Option<bool>,
    skip_leading_indentation: Option<bool>,
    trim_trailing_whitespace: Option<bool>,
    auto_skip_blank_lines: Option<bool>,
}

impl FileConfig {
    fn into_raw(self) -> RawEngineConfig {
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

/// Read `path` (if it exists) as a `FileConfig`, layer `overrides` on
/// top (flags win over file), and coerce the result. A missing config
/// file is not an error — it is simply an all-`None` layer, same as an
/// absent flag.
pub(crate) fn resolve(path: &Path, overrides: &ConfigOverrides) -> Result<EngineConfig, CliError> {
    let file = match std::fs::read_to_string(path) {
        Ok(raw) => {
            toml::from_str::<FileConfig>(&raw).map_err(|source| CliError::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?
        }
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no config file found, using defaults");
            FileConfig::default()
        }
        Err(source) => {
            return Err(CliError::ConfigRead {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let raw = merge(overrides.clone().into_raw(), file.into_raw());
    Ok(EngineConfig::coerce(raw))
}

/// `flag` wins over `file` field by field; a flag left unset by the
/// caller falls through to whatever the file provided (which may itself
/// be unset, in which case [`EngineConfig::coerce`] supplies the
/// default).
fn merge(flag: RawEngineConfig, file: RawEngineConfig) -> RawEngineConfig {
    RawEngineConfig {
        lines_per_segment: flag.lines_per_segment.or(file.lines_per_segment),
        tab_width: flag.tab_width.or(file.tab_width),
        slack_n: flag.slack_n.or(file.slack_n),
        max_segment_chars: flag.max_segment_chars.or(file.max_segment_chars),
        include_comments: flag.include_comments.or(file.include_comments),
        skip_leading_indentation: flag
            .skip_leading_indentation
            .or(file.skip_leading_indentation),
        trim_trailing_whitespace: flag
            .trim_trailing_whitespace
            .or(file.trim_trailing_whitespace),
        auto_skip_blank_lines: flag.auto_skip_blank_lines.or(file.auto_skip_blank_lines),
    }
}
