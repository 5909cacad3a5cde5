use clap::Parser;
use sahamcard::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
