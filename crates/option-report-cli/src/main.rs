mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::convert::ConvertArgs;
use commands::report::ReportArgs;

/// Outstanding stock option disclosure reporting
#[derive(Parser)]
#[command(
    name = "odr",
    version,
    about = "Outstanding stock option disclosure reporting",
    long_about = "Computes standard equity-compensation disclosure metrics \
                  (weighted-average exercise price, weighted-average remaining \
                  contractual life, aggregate intrinsic value) for outstanding \
                  and exercisable grants from a tabular grant register, with \
                  decimal precision."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full disclosure report over a grant register
    Report(ReportArgs),
    /// Convert a single exercise price into the reporting currency
    Convert(ConvertArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Report(args) => commands::report::run_report(args),
        Commands::Convert(args) => commands::convert::run_convert(args),
        Commands::Version => {
            println!("odr {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
