//! Report rendering for humans and for other programs
//!
//! # Implementation Model
//!
//! Three generators are provided, each accessed through a `generate` function:
//! - **Console**: aligned plain-text table, with a bold coloured header when colours are on
//! - **CSV**: one header row then one line per report row, with RFC-style escaping
//! - **JSON**: `{"name", "index", "columns", "rows"}` for machine consumption
//!
//! All generators take a fetched [`Report`](crate::reporting::Report) and write into any
//! `core::fmt::Write`, so callers can render to a `String` and decide where it goes.
//!
//! Value formatting driven by the metric's formatting type lives in `common`.

mod common;
mod console;
mod csv;
mod json;

pub use console::generate as generate_console;
pub use csv::generate as generate_csv;
pub use json::generate as generate_json;
