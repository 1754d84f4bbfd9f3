//! Diagnostic logging setup.
//!
//! Log events go to stderr so they never mix with table or JSON output on
//! stdout.

use tracing_subscriber::EnvFilter;

/// Returns the default filter directive for the given verbosity flags.
fn default_directive(verbose: bool, quiet: bool) -> &'static str {
    if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    }
}

/// Initializes the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the verbosity flags. Calling this more
/// than once is harmless; later calls leave the first subscriber in place.
pub fn init(verbose: bool, quiet: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, quiet)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
