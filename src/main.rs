use clap::{Parser, Subcommand};
use powerlog_prep::Result;
use powerlog_prep::config::{self, BatchSpec};
use powerlog_prep::model::RepeatedPhases;
use powerlog_prep::{diagnostics, pipeline};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "powerlog-prep")]
#[command(about = "Power/throughput test log preprocessor", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write data, phase, statistics and interface tables for each device.
    Preprocess {
        /// JSON file listing devices and their raw logs.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Extra device, appended after the config entries.
        #[arg(long = "device", value_name = "NAME=PATH")]
        devices: Vec<String>,

        /// Output directory (overrides the config file).
        #[arg(short = 'o', long)]
        out: Option<PathBuf>,

        /// One statistics row per phase interval instead of per label.
        #[arg(long)]
        per_interval: bool,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.cmd {
        Commands::Preprocess {
            config: config_path,
            devices,
            out,
            per_interval,
        } => {
            let mut spec = match &config_path {
                Some(path) => BatchSpec::from_file(path)?,
                None => BatchSpec::default(),
            };
            for d in &devices {
                spec.devices.push(config::parse_device_arg(d)?);
            }
            if let Some(out) = out {
                spec.output_dir = Some(out);
            }
            if per_interval {
                spec.repeated_phases = RepeatedPhases::PerInterval;
            }
            let batch = spec.validate_and_build()?;

            println!("Preprocessing {} device log(s)...", batch.devices.len());
            pipeline::run_batch(&batch, diagnostics::print_result)?;
            println!("Done! Files in {}", batch.output_dir.display());
        }
    }

    Ok(())
}
