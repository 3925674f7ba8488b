//! Tracing setup for the command-line tool.
//!
//! Log output goes to stderr so that `--dry-run` output on stdout stays
//! clean.  `RUST_LOG` wins over the verbosity flags.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global subscriber.  Safe to call more than once; later calls
/// are ignored.
pub fn init(verbose: bool, quiet: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, quiet)));

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}

fn default_directive(verbose: bool, quiet: bool) -> &'static str {
    if verbose {
        "phpdoc_annotator=debug"
    } else if quiet {
        "phpdoc_annotator=error"
    } else {
        "phpdoc_annotator=info"
    }
}
