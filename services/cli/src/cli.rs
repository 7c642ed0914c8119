use crate::demo::{run_demo, run_patterns, run_phases, run_report, DemoArgs, ReportArgs};
use clap::{Parser, Subcommand};
use ctd_ild::config::AppConfig;
use ctd_ild::error::AppError;
use ctd_ild::telemetry;

#[derive(Parser, Debug)]
#[command(
    name = "ctd-ild",
    about = "Assess connective tissue disease associated interstitial lung disease from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Import answers from CSV, run every phase and print the report
    Report(ReportArgs),
    /// List the assessment phases and the sections each one contains
    Phases,
    /// Print the HRCT pattern reference cards
    Patterns,
    /// Run the synthetic patient through the whole assessment (default command)
    Demo(DemoArgs),
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    tracing::debug!(environment = ?config.environment, "configuration loaded");

    let command = cli
        .command
        .unwrap_or_else(|| Command::Demo(DemoArgs::default()));

    match command {
        Command::Report(args) => run_report(args, &config.report),
        Command::Phases => {
            run_phases();
            Ok(())
        }
        Command::Patterns => {
            run_patterns();
            Ok(())
        }
        Command::Demo(args) => run_demo(args, &config.report),
    }
}
