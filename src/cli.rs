use std::path::PathBuf;

use clap::Parser;

/// Input value selecting "read standard input, write standard output".
pub const STDIN_SENTINEL: &str = "-";

#[derive(Parser, Debug)]
#[command(
    name = "fixit",
    version,
    about = "Applies compiler fix-it hints to source files"
)]
pub struct Args {
    /// Source file to fix (use "-" to read stdin and write stdout)
    pub input: PathBuf,

    /// JSON diagnostic stream produced by the front end
    #[arg(short = 'd', long, value_name = "FILE")]
    pub diagnostics: PathBuf,

    /// Write the fixed output to FILE instead of the derived sibling path
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Format for forwarded diagnostics
    #[arg(short, long, default_value = "text", value_parser = ["text", "json", "quiet"])]
    pub format: String,

    /// Enable debug output
    #[arg(long)]
    pub debug: bool,
}

impl Args {
    /// True when the input is the stdin/stdout sentinel.
    pub fn is_stdin(&self) -> bool {
        self.input.as_os_str() == STDIN_SENTINEL
    }
}
