use log::LevelFilter;

/// Installs the stderr logger. `COMPASS_LOG` takes env_logger filter syntax
/// and wins unless `--quiet` or `--verbose` is given.
pub fn init(verbose: bool, quiet: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::new().filter_or("COMPASS_LOG", "warn"));
    if quiet {
        builder.filter_level(LevelFilter::Error);
    } else if verbose {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.format_timestamp_secs();
    builder.target(env_logger::Target::Stderr).init();
}
