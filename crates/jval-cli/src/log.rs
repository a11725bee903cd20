use std::io;

use tracing_subscriber::{filter::LevelFilter, fmt, prelude::*, EnvFilter};

/// Sets up logging to the standard error output.
///
/// When `colors` is `None`, ANSI output is enabled only if stderr is a
/// terminal. `RUST_LOG` overrides the default `info` filter.
pub fn setup_stderr_logging(log_spans: bool, verbose: bool, colors: Option<bool>) {
    let colors = colors.unwrap_or_else(|| atty::is(atty::Stream::Stderr));

    let span_events = if log_spans {
        fmt::format::FmtSpan::NEW | fmt::format::FmtSpan::CLOSE
    } else {
        fmt::format::FmtSpan::NONE
    };

    let env_filter = match std::env::var("RUST_LOG") {
        Ok(log) => EnvFilter::new(log),
        Err(_) => EnvFilter::default().add_directive(LevelFilter::INFO.into()),
    };

    let registry = tracing_subscriber::registry().with(env_filter);

    if verbose {
        registry
            .with(
                fmt::layer()
                    .with_ansi(colors)
                    .with_span_events(span_events)
                    .event_format(fmt::format().pretty().with_source_location(false))
                    .with_writer(io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_ansi(colors)
                    .with_span_events(span_events)
                    .event_format(fmt::format().compact().without_time())
                    .with_writer(io::stderr),
            )
            .init();
    }
}
