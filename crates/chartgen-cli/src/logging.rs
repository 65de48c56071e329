//! Diagnostics setup: tracing to stderr and miette error reports
//!
//! Standard output carries the manifest stream, so nothing here writes to it.

use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber
///
/// `--debug` forces debug level; otherwise `RUST_LOG` is honored and the
/// default is `warn`.
pub fn setup_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let result = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
    if let Err(e) = result {
        eprintln!("failed to initialize logging: {e}");
    }
}

/// Report errors without wrapping so command lines stay copy-pasteable
pub fn setup_error_reports() {
    miette::set_panic_hook();
    let hook = miette::set_hook(Box::new(|_| {
        Box::new(miette::MietteHandlerOpts::new().wrap_lines(false).build())
    }));
    if let Err(e) = hook {
        eprintln!("failed to install error report handler: {e}");
    }
}
