use tt_engine::{Attempt, AttemptContext, EngineConfig, EngineState};

use crate::args::ReplayArgs;
use crate::error::CliError;

/// `tt replay <path> --segment <n> --keys <keys>`: build the engine for
/// segment `n`, feed it the keystroke script, print the resulting
/// counters and — if the replay completes — assemble and print an
/// `Attempt` and append it to the attempt history file, if one was
/// given.
pub(crate) fn run(args: &ReplayArgs, config: &EngineConfig) -> Result<(), CliError> {
    let segments = super::prepare(&args.path, config)?;
    let segment = segments
        .get(args.segment)
        .ok_or_else(|| CliError::SegmentOutOfRange {
            path: args.path.clone(),
            index: args.segment,
            len: segments.len(),
        })?;

    let skip_ranges = super::skip_ranges_for(segment, config);
    let mut engine = EngineState::create(
        &segment.text,
        config.slack_n,
        config.auto_skip_blank_lines,
        skip_ranges,
        args.allow_whitespace_advance_to_newline,
    );

    for keystroke in tokenize(&args.keys, &args.backspace_token) {
        match keystroke {
            Keystroke::Backspace => engine.handle_backspace(),
            Keystroke::Char(ch) => engine.handle_key(ch),
        }
    }

    println!(
        "cursor={cursor}\ttyped_end={typed_end}\terror_active={error_active}\tlocked={locked}\tcomplete={complete}",
        cursor = engine.cursor(),
        typed_end = engine.typed_end(),
        error_active = engine.error_active(),
        locked = engine.locked(),
        complete = engine.is_complete(),
    );
    println!(
        "typed_keystrokes={typed}\tincorrect={incorrect}\tcollateral={collateral}\tbackspaces={backspaces}\tcorrect_chars={correct}",
        typed = engine.typed_keystrokes(),
        incorrect = engine.incorrect(),
        collateral = engine.collateral(),
        backspaces = engine.backspaces(),
        correct = engine.correct_chars(),
    );

    if !engine.is_complete() {
        return Ok(());
    }

    let file_name = args
        .path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let context = AttemptContext {
        id: args.id.clone().unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
        file_path: args.path.to_string_lossy().into_owned(),
        file_name,
        segment_index: segment.index,
        segment_start_line: segment.start_line.get(),
        segment_end_line: segment.end_line.get(),
        lines_per_segment: config.lines_per_segment,
        tab_width: config.tab_width,
        slack_n: config.slack_n,
        start_at_ms: args.start_at,
        end_at_ms: args.end_at,
    };
    let attempt = Attempt::assemble(&engine, context);
    println!(
        "wpm={wpm:.2}\tunproductive_percent={unproductive:.2}",
        wpm = attempt.wpm,
        unproductive = attempt.unproductive_percent,
    );

    if let Some(history) = &args.history {
        tt_persist::append(history, attempt)?;
        tracing::info!(path = %history.display(), "appended attempt to history");
    }

    Ok(())
}

enum Keystroke {
    Char(char),
    Backspace,
}

/// Split `keys` into a sequence of keystrokes, recognizing `backspace_token`
/// as a single backspace and every other character as itself.
fn tokenize(keys: &str, backspace_token: &str) -> Vec<Keystroke> {
    if backspace_token.is_empty() {
        return keys.chars().map(Keystroke::Char).collect();
    }

    let mut keystrokes = Vec::new();
    let mut rest = keys;
    while !rest.is_empty() {
        if let Some(stripped) = rest.strip_prefix(backspace_token) {
            keystrokes.push(Keystroke::Backspace);
            rest = stripped;
        } else {
            let ch = rest.chars().next().expect("rest is non-empty");
            keystrokes.push(Keystroke::Char(ch));
            rest = &rest[ch.len_utf8()..];
        }
    }
    keystrokes
}
