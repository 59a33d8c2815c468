use log::LevelFilter;

/// Initialize logging for the command line tool.
///
/// Logs at `Info` by default and `Debug` when `verbose` is set; `RUST_LOG` wins when present.
pub fn init_logger(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let mut builder = env_logger::Builder::new();
    builder
        .filter(None, level)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false);

    if let Ok(spec) = std::env::var("RUST_LOG") {
        builder.parse_filters(&spec);
    }

    // a second init (e.g. from tests) is harmless
    if builder.try_init().is_ok() {
        log::debug!("logger initialized at {level:?} level");
    }
}
