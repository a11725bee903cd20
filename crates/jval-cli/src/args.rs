use clap::{crate_version, ArgEnum, Parser};
use std::path::PathBuf;

#[derive(Clone, Copy, ArgEnum)]
pub enum Colors {
    /// Determine whether to colorize output automatically.
    Auto,
    /// Always colorize output.
    Always,
    /// Never colorize output.
    Never,
}

#[derive(Clone, Parser)]
#[clap(name = "jval")]
#[clap(bin_name = "jval")]
#[clap(version = crate_version!())]
#[clap(about = "Validate a JSON document against a JSON Schema.")]
pub struct AppArgs {
    /// Path to the JSON document to validate.
    #[clap(long, short)]
    pub input: PathBuf,

    /// Path to the JSON Schema document.
    #[clap(long, short)]
    pub schema: PathBuf,

    /// Maximum schema recursion depth during validation.
    #[clap(long, default_value_t = jval_validator::DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,

    #[clap(long, arg_enum, default_value = "auto")]
    pub colors: Colors,

    /// Enable a verbose logging format.
    #[clap(long)]
    pub verbose: bool,

    /// Enable logging spans.
    #[clap(long)]
    pub log_spans: bool,
}
