/// One completed (or externally assembled) practice session, combining
/// engine counters with the policy values in effect and embedding-layer
/// supplied identity/timing fields. Produced exactly once when the
/// engine reports completion.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Attempt {
    pub id: String,
    pub file_path: String,
    pub file_name: String,
    pub segment_index: usize,
    pub segment_start_line: u32,
    pub segment_end_line: u32,
    pub lines_per_segment: u32,
    pub tab_width: u32,
    pub slack_n: u32,
    pub typeable_chars: usize,
    pub typed_keystrokes: u64,
    pub incorrect: u64,
    pub collateral: u64,
    pub backspaces: u64,
    pub correct_chars: u64,
    pub start_at_ms: u64,
    pub end_at_ms: u64,
    pub duration_ms: u64,
    pub wpm: f64,
    pub unproductive_percent: f64,
}

/// Everything the caller must supply that the engine itself does not
/// track: identity, file/segment provenance, and the two timestamps.
#[derive(Debug, Clone)]
pub struct AttemptContext {
    pub id: String,
    pub file_path: String,
    pub file_name: String,
    pub segment_index: usize,
    pub segment_start_line: u32,
    pub segment_end_line: u32,
    pub lines_per_segment: u32,
    pub tab_width: u32,
    pub slack_n: u32,
    pub start_at_ms: u64,
    pub end_at_ms: u64,
}

impl Attempt {
    /// Assemble an `Attempt` from a completed engine's counters and the
    /// caller-supplied context. `duration_ms` is clamped to
    /// non-negative per the original rule `max(0, endAtMs - startAtMs)`.
    #[must_use]
    pub fn assemble(engine: &crate::EngineState, context: AttemptContext) -> Self {
        let duration_ms = context.end_at_ms.saturating_sub(context.start_at_ms);
        Self {
            id: context.id,
            file_path: context.file_path,
            file_name: context.file_name,
            segment_index: context.segment_index,
            segment_start_line: context.segment_start_line,
            segment_end_line: context.segment_end_line,
            lines_per_segment: context.lines_per_segment,
            tab_width: context.tab_width,
            slack_n: context.slack_n,
            typeable_chars: engine.typeable_chars(),
            typed_keystrokes: engine.typed_keystrokes(),
            incorrect: engine.incorrect(),
            collateral: engine.collateral(),
            backspaces: engine.backspaces(),
            correct_chars: engine.correct_chars(),
            start_at_ms: context.start_at_ms,
            end_at_ms: context.end_at_ms,
            duration_ms,
            wpm: crate::metrics::wpm(engine.correct_chars(), duration_ms as f64),
            unproductive_percent: crate::metrics::unproductive_percent(
                engine.typed_keystrokes(),
                engine.incorrect(),
                engine.collateral(),
                engine.backspaces(),
            ),
        }
    }
}
