use clap::Parser;
use retaildash::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
