use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "geotime-processor")]
#[command(about = "Schema inference and time-window filtering for uploaded tabular datasets")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Pipeline configuration file (TOML/JSON)")]
    pub config: Option<PathBuf>,

    #[arg(
        long,
        global = true,
        help = "Override the maximum accepted payload size in bytes"
    )]
    pub max_size: Option<u64>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Ingest a dataset and report its detected structure
    Inspect {
        #[arg(help = "Input delimited file")]
        input: PathBuf,

        #[arg(long, default_value = "false", help = "Emit the report as JSON")]
        json: bool,
    },

    /// Filter a dataset to an inclusive [start, end] time window
    Filter {
        #[arg(help = "Input delimited file")]
        input: PathBuf,

        #[arg(short, long, help = "Window start, YYYY-MM-DD[ HH:MM[:00]]")]
        start: String,

        #[arg(short, long, help = "Window end, YYYY-MM-DD[ HH:MM[:00]]")]
        end: String,

        #[arg(short, long, help = "Write the filtered subset to this CSV file")]
        output: Option<PathBuf>,
    },

    /// Validate geographic coordinates and report plottable points
    Geo {
        #[arg(help = "Input delimited file")]
        input: PathBuf,

        #[arg(short, long, help = "Optional window start, YYYY-MM-DD[ HH:MM[:00]]")]
        start: Option<String>,

        #[arg(short, long, help = "Optional window end, YYYY-MM-DD[ HH:MM[:00]]")]
        end: Option<String>,
    },
}
