use tt_engine::EngineConfig;
use tt_text_size::byte_ranges_to_char_ranges;

use crate::args::SegmentArgs;
use crate::error::CliError;

/// `tt segment <path>`: print one line per segment (index, line range,
/// typeable character count, skip-range count).
pub(crate) fn run(args: &SegmentArgs, config: &EngineConfig) -> Result<(), CliError> {
    let segments = super::prepare(&args.path, config)?;

    for segment in &segments {
        let skip_ranges = super::skip_ranges_for(segment, config);
        // `skip_ranges` are byte offsets; translate to `char` counts so
        // this matches what `EngineState::typeable_chars` reports.
        let char_ranges = byte_ranges_to_char_ranges(&segment.text, &skip_ranges);
        let typeable = segment.text.chars().count()
            - char_ranges.iter().map(|r| usize::from(r.len())).sum::<usize>();
        println!(
            "{index}\t{start}-{end}\ttypeable={typeable}\tskip_ranges={skip_count}",
            index = segment.index,
            start = segment.start_line,
            end = segment.end_line,
            skip_count = skip_ranges.len(),
        );
    }

    Ok(())
}
