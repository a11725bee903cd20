use clap::{ErrorKind, Parser};
use jval_cli::{execute, log::setup_stderr_logging, AppArgs, Colors};
use std::process::exit;

fn main() {
    // Usage errors exit 1 like any other failure; help and version
    // requests are not failures
    let cli = match AppArgs::try_parse() {
        Ok(cli) => cli,
        Err(error) => {
            let _ = error.print();
            match error.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => exit(0),
                _ => exit(1),
            }
        }
    };
    setup_stderr_logging(
        cli.log_spans,
        cli.verbose,
        match cli.colors {
            Colors::Auto => None,
            Colors::Always => Some(true),
            Colors::Never => Some(false),
        },
    );

    let _span = tracing::info_span!("jval").entered();

    match execute(cli) {
        Ok(_) => {
            exit(0);
        }
        Err(error) => {
            tracing::error!(error = %format!("{error:#}"), "operation failed");
            exit(1);
        }
    }
}
