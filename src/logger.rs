//! Logging setup for the `gmvault-build` binary.

use log::LevelFilter;

/// Level for this crate's own records. Per-file detail is shown with
/// `verbose` only.
pub fn crate_level(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Initialises the global logger.
///
/// Progress lines come from this crate alone; other crates are held to
/// warnings. `RUST_LOG` directives are applied last and win.
pub fn init_logger(verbose: bool) {
    env_logger::Builder::new()
        .filter_level(LevelFilter::Warn)
        .filter_module(env!("CARGO_CRATE_NAME"), crate_level(verbose))
        .format_timestamp(None)
        .format_target(verbose)
        .parse_default_env()
        .init();
}
