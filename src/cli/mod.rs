mod args;
mod output;

pub(crate) use args::{BlockArgs, CliArgs, Command, OutputFormat, parse_cli};
pub(crate) use output::{Report, print_report};
