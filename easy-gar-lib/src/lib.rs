#![doc(hidden)]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core library for easy-gar
//!
//! This library fetches reports from the Google Analytics Reporting API v4 and
//! hands them back as fully materialized tables: every page fetched, every value
//! parsed, rows keyed by their dimension values.
//!
//! # Module Organization
//!
//! - [`reporting`]: Typed report declarations, the paginated fetch loop, and table assembly
//! - [`catalog`]: Named metrics and dimensions resolved to wire names
//! - `output`: Console, CSV and JSON rendering of a report
//! - `commands`: Command-line interface and orchestration

pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

pub mod catalog;
pub mod reporting;

#[cfg(any(debug_assertions, test))]
pub mod commands;
#[cfg(not(any(debug_assertions, test)))]
mod commands;

#[cfg(any(debug_assertions, test))]
pub mod output;
#[cfg(not(any(debug_assertions, test)))]
mod output;

pub use crate::commands::{Host, run};
