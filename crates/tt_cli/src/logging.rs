use tracing_subscriber::EnvFilter;

/// Install a `tracing-subscriber` `fmt` layer filtered by `RUST_LOG`,
/// defaulting to `info` when the variable is unset or unparsable. Only
/// the binary calls this — library crates never initialize a
/// subscriber themselves, so embedding the core in a different host
/// does not fight over global logging state.
pub(crate) fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
