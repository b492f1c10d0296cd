use std::io::IsTerminal;

use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise `--verbose` enables debug output for this crate
/// and warnings only are shown by default. Output goes through the stderr buffer so
/// nothing is drawn over the TUI.
pub fn init(verbose: bool) {
    let default_directive = if verbose { "lead_quiz=debug" } else { "lead_quiz=warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let result = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(crate::stderr_buffer::writer)
        .try_init();

    if result.is_err() {
        crate::buffered_eprintln!("Logging was already initialized");
    }
}
