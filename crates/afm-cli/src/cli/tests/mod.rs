//! CLI parse tests.

use clap::Parser;

use super::Cli;

pub(super) fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(args).unwrap()
}
