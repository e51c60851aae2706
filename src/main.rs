use clap::Parser;
use geotime_processor::cli::{run, Cli};
use geotime_processor::error::Result;

fn main() -> Result<()> {
    let cli = Cli::parse();
    run(cli)
}
