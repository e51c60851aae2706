use crate::cli::args::{Cli, Commands};
use crate::config::PipelineConfig;
use crate::error::Result;
use crate::models::{DateTimeParts, NormalizedTable, TimeWindow};
use crate::processors::{GeoResult, Pipeline};
use crate::utils::StageReporter;
use crate::writers::CsvWriter;

pub fn run(cli: Cli) -> Result<()> {
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .init();
    }

    let mut config = match &cli.config {
        Some(path) => PipelineConfig::from_file(path)?,
        None => PipelineConfig::default(),
    };
    if let Some(max_size) = cli.max_size {
        config.max_payload_bytes = max_size;
    }

    let pipeline = Pipeline::new(config)?;

    match cli.command {
        Commands::Inspect { input, json } => {
            let progress = StageReporter::new("Ingesting dataset...", json);
            let (_, report) = pipeline.inspect(&input)?;
            progress.finish_with_message("Ingestion complete");

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
                return Ok(());
            }

            println!("Dataset: {}", input.display());
            println!(
                "Rows: {} raw, {} after normalization",
                report.raw_rows, report.normalized_rows
            );
            match &report.datetime_column {
                Some(column) => println!("Datetime column: {}", column),
                None => println!("Datetime column: none detected"),
            }
            if report.volume_columns.is_empty() {
                println!("Volume columns: none detected");
            } else {
                println!("Volume columns: {}", report.volume_columns.join(", "));
            }
            if let (Some(min), Some(max)) = (report.datetime_min, report.datetime_max) {
                println!("Datetime range: {} to {}", min, max);
            }
            println!(
                "Selectable years: {}",
                report
                    .years
                    .iter()
                    .map(|y| y.to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
        }

        Commands::Filter {
            input,
            start,
            end,
            output,
        } => {
            let progress = StageReporter::new("Ingesting dataset...", false);
            let (normalized, _) = pipeline.inspect(&input)?;

            progress.stage("Filtering...");
            let window = build_window(&pipeline, &start, &end)?;
            let filtered = pipeline.filter(&normalized, &window);
            progress.finish_with_message(&format!(
                "Filtered {} of {} rows into [{}, {}]",
                filtered.row_count(),
                normalized.row_count(),
                window.start(),
                window.end()
            ));

            if filtered.is_empty() {
                println!("No rows fall inside the requested window");
            }

            let writer = CsvWriter::new();
            match output {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    writer.write_table(&filtered, &path)?;
                    println!("Wrote {} rows to {}", filtered.row_count(), path.display());
                }
                None => print!("{}", writer.write_to_string(&filtered)?),
            }
        }

        Commands::Geo { input, start, end } => {
            let progress = StageReporter::new("Ingesting dataset...", false);
            let (normalized, _) = pipeline.inspect(&input)?;

            let table: NormalizedTable = match (&start, &end) {
                (Some(s), Some(e)) => {
                    let window = build_window(&pipeline, s, e)?;
                    pipeline.filter(&normalized, &window)
                }
                _ => normalized,
            };
            progress.finish_with_message(&format!("Checked {} rows", table.row_count()));

            match pipeline.sanitize_geo(&table) {
                GeoResult::Points(points) => {
                    println!("{} plottable points:", points.len());
                    for geo_row in &points {
                        println!(
                            "  row {}: {:.6}, {:.6}",
                            geo_row.row, geo_row.point.latitude, geo_row.point.longitude
                        );
                    }
                }
                GeoResult::MissingColumns => {
                    println!("Longitude and latitude columns are missing from this dataset");
                }
                GeoResult::NoValidPoints => {
                    println!(
                        "No valid geographical data: latitude/longitude values are absent, \
                         non-numeric, or out of range"
                    );
                }
            }
        }
    }

    Ok(())
}

fn build_window(pipeline: &Pipeline, start: &str, end: &str) -> Result<TimeWindow> {
    let step = pipeline.time_filter().step_minutes();
    let start = DateTimeParts::parse(start, step)?;
    let end = DateTimeParts::parse(end, step)?;
    pipeline.build_window(&start, &end)
}
