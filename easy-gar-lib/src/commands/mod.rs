//! Command-line interface and orchestration for easy-gar
//!
//! This module implements the CLI commands and wires the catalog, the
//! configuration, the reporting pipeline and the output writers together.
//!
//! # Implementation Model
//!
//! ## Commands
//!
//! - **report**: Resolve metric and dimension keys through the catalog, fetch every
//!   page of the report, and print it or write it to CSV/JSON files
//! - **metrics** / **dimensions**: List the catalog, optionally filtered
//! - **init**: Generate a default configuration file
//! - **validate**: Check configuration file syntax and custom catalog entries
//!
//! ## Execution Flow
//!
//! The `run` function parses command-line arguments using clap and routes
//! to the appropriate command handler. All output goes through a [`Host`], so
//! the commands run unchanged under test.
//!
//! The report command installs a Ctrl-C handler that cancels the in-flight
//! fetch; an interrupted report prints nothing and fails.
//!
//! Configuration is a TOML file (`easy_gar.toml` by default) holding the
//! default view, the endpoint, paging and retry settings, and custom catalog
//! entries layered over the built-in ones.

mod common;
mod config;
mod host;
mod init;
mod list;
mod report;
mod run;
mod validate;

#[cfg(debug_assertions)]
pub use config::Config;

pub use host::Host;
pub use init::{InitArgs, init_config};
pub use list::{ListArgs, list_dimensions, list_metrics};
pub use report::{ReportArgs, process_report};
pub use run::run;
pub use validate::{ValidateArgs, validate_config};
