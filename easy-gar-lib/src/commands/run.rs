//! Command dispatch logic for easy-gar

use super::{
    InitArgs, ListArgs, ReportArgs, ValidateArgs, init_config, list_dimensions, list_metrics, process_report, validate_config,
};
use crate::{Host, Result};
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Parser, Subcommand};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "easy-gar", author, version, long_about = None)]
#[command(about = "Fetch reports from the Google Analytics Reporting API")]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(subcommand)]
    command: GarSubcommand,
}

#[derive(Subcommand, Debug)]
enum GarSubcommand {
    /// Fetch a report and print it or write it to files
    Report(Box<ReportArgs>),
    /// List the catalog metrics
    Metrics(ListArgs),
    /// List the catalog dimensions
    Dimensions(ListArgs),
    /// Generate a default configuration file
    Init(InitArgs),
    /// Validate a configuration file
    Validate(ValidateArgs),
}

/// Dispatch command-line arguments to the appropriate handler
///
/// This function parses the command-line arguments and executes the corresponding
/// subcommand. It's designed to be called from main.rs with the program arguments.
///
/// # Arguments
///
/// * `args` - An iterator of command-line arguments (typically from `std::env::args()`)
///
/// # Errors
///
/// Returns an error if command parsing fails or if the executed command fails
pub async fn run<I, T, H>(host: &mut H, args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
    H: Host,
{
    match &Cli::parse_from(args).command {
        GarSubcommand::Report(report_args) => process_report(host, report_args).await,
        GarSubcommand::Metrics(list_args) => list_metrics(host, list_args),
        GarSubcommand::Dimensions(list_args) => list_dimensions(host, list_args),
        GarSubcommand::Init(init_args) => init_config(host, init_args),
        GarSubcommand::Validate(validate_args) => validate_config(host, validate_args),
    }
}
