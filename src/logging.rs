//! Logging bootstrap for the `tipsy` binary.
//!
//! The library only emits `log` records; installing a backend is the
//! embedding process's job. Records go to stderr so `--json` output on
//! stdout stays machine-readable.

use log::LevelFilter;

/// Map a `-v` repeat count to a level filter.
pub fn level_for_verbosity(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Install `env_logger` at the level implied by `verbose`.
///
/// `RUST_LOG`, when set, overrides the verbosity flag. Calling this more
/// than once is harmless; later calls are ignored.
pub fn init(verbose: u8) {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(level_for_verbosity(verbose));
    builder.parse_default_env();
    builder.format_timestamp_millis();
    let _ = builder.try_init();
}
