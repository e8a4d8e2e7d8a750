// Output format configuration arguments

use crate::output::OutputFormat;
use clap::Args;
use std::path::PathBuf;

/// Report format and display options
#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Report format written to stdout
    #[arg(long = "format", value_enum, default_value_t = OutputFormat::Terminal)]
    pub format: OutputFormat,

    /// Also write the JSON report to a file
    #[arg(long = "json", value_name = "FILE", id = "output_json")]
    pub json: Option<PathBuf>,

    /// Pretty print JSON output
    #[arg(long = "json-pretty")]
    pub json_pretty: bool,

    /// Disable colored output
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Verbose diagnostics (-v debug, -vv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,
}
