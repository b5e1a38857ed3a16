use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Filter used when neither `CRUMB_LOG` nor `RUST_LOG` is set
pub const DEFAULT_FILTER: &str = "crumb=warn";

/// The filter directive in effect: `CRUMB_LOG`, then `RUST_LOG`, then the default.
pub fn filter_directive() -> String {
    ["CRUMB_LOG", "RUST_LOG"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_FILTER.to_string())
}

/// Initialize tracing to stderr. Stdout stays clean for command output.
pub fn init_tracing() {
    let filter = EnvFilter::try_new(filter_directive())
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_ansi(false)
                .with_writer(std::io::stderr),
        )
        .try_init();
}
