use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Overrides the level picked from the command line flags.
pub const LOG_ENV: &str = "CWL_SCAFFOLD_LOG";

pub fn level_for(quiet: bool, verbose: bool) -> Level {
    if quiet {
        Level::ERROR
    } else if verbose {
        Level::DEBUG
    } else {
        Level::INFO
    }
}

/// Installs the global subscriber. Logs go to stderr so generated source
/// printed on stdout stays clean.
pub fn init(quiet: bool, verbose: bool) {
    let level = level_for(quiet, verbose);
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_ascii_lowercase()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
