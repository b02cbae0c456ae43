use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "cmpvet",
    version,
    about = "Report comparisons of unsigned values that can never be true"
)]
pub struct Options {
    #[arg(required_unless_present = "list", help = "Source files to vet")]
    pub files: Vec<PathBuf>,
    #[arg(
        long,
        value_delimiter = ',',
        help = "Comma-separated names of the checks to run (default: all)"
    )]
    pub checks: Vec<String>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
    pub format: OutputFormat,
    #[arg(long, help = "List the available checks and exit")]
    pub list: bool,
    #[arg(short, long, help = "Log progress and show type errors")]
    pub verbose: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Pretty,
    Short,
    Json,
}
