/// The validated, in-range bundle of configuration knobs that flow into
/// the segmenter, the skip-range planner, and the typing engine. Built
/// once from a raw (possibly out-of-range or partial) layer via
/// [`EngineConfig::coerce`] — the single seam where "configuration
/// domain errors are silently coerced" is implemented, instead of
/// scattering clamps across call sites.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    pub lines_per_segment: u32,
    pub tab_width: u32,
    pub slack_n: u32,
    pub max_segment_chars: usize,
    pub include_comments: bool,
    pub skip_leading_indentation: bool,
    pub trim_trailing_whitespace: bool,
    pub auto_skip_blank_lines: bool,
}

/// Raw, possibly out-of-range values as read from a config file or CLI
/// flags, before [`EngineConfig::coerce`] clamps them.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawEngineConfig {
    pub lines_per_segment: Option<u32>,
    pub tab_width: Option<u32>,
    pub slack_n: Option<u32>,
    pub max_segment_chars: Option<usize>,
    pub include_comments: Option<bool>,
    pub skip_leading_indentation: Option<bool>,
    pub trim_trailing_whitespace: Option<bool>,
    pub auto_skip_blank_lines: Option<bool>,
}

impl EngineConfig {
    /// Coerce `raw` into a fully in-range config, falling back to
    /// [`EngineConfig::default`] for any field `raw` leaves unset.
    #[must_use]
    pub fn coerce(raw: RawEngineConfig) -> Self {
        let default = Self::default();
        Self {
            lines_per_segment: raw
                .lines_per_segment
                .unwrap_or(default.lines_per_segment)
                .clamp(1, 5000),
            tab_width: raw.tab_width.unwrap_or(default.tab_width).min(16),
            slack_n: raw.slack_n.unwrap_or(default.slack_n).min(50),
            max_segment_chars: raw
                .max_segment_chars
                .unwrap_or(default.max_segment_chars)
                .clamp(500, 500_000),
            include_comments: raw.include_comments.unwrap_or(default.include_comments),
            skip_leading_indentation: raw
                .skip_leading_indentation
                .unwrap_or(default.skip_leading_indentation),
            trim_trailing_whitespace: raw
                .trim_trailing_whitespace
                .unwrap_or(default.trim_trailing_whitespace),
            auto_skip_blank_lines: raw
                .auto_skip_blank_lines
                .unwrap_or(default.auto_skip_blank_lines),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            lines_per_segment: 25,
            tab_width: 4,
            slack_n: 5,
            max_segment_chars: 2000,
            include_comments: true,
            skip_leading_indentation: false,
            trim_trailing_whitespace: false,
            auto_skip_blank_lines: false,
        }
    }
}
