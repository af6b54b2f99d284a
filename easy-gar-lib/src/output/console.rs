use super::common::format_value;
use crate::Result;
use crate::reporting::Report;
use core::fmt::Write;
use owo_colors::OwoColorize;

const COLUMN_GAP: &str = "  ";

pub fn generate<W: Write>(report: &Report, use_colors: bool, writer: &mut W) -> Result<()> {
    let table = report.table();

    if let Some(name) = report.name() {
        if use_colors {
            writeln!(writer, "{}", name.bold())?;
        } else {
            writeln!(writer, "{name}")?;
        }
        writeln!(writer)?;
    }

    let headers: Vec<&str> = table
        .index_names()
        .iter()
        .map(String::as_str)
        .chain(table.columns().iter().map(|c| c.name()))
        .collect();

    let cells: Vec<Vec<String>> = table
        .rows()
        .map(|(key, values)| {
            key.iter()
                .cloned()
                .chain(
                    values
                        .iter()
                        .zip(table.columns())
                        .map(|(&value, column)| format_value(value, column.formatting_type())),
                )
                .collect()
        })
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let key_len = table.index_names().len();

    let header_line = headers
        .iter()
        .zip(&widths)
        .enumerate()
        .map(|(i, (header, &width))| pad(header, width, i >= key_len))
        .collect::<Vec<_>>()
        .join(COLUMN_GAP);
    let header_line = header_line.trim_end();

    if use_colors {
        writeln!(writer, "{}", header_line.bold().cyan())?;
    } else {
        writeln!(writer, "{header_line}")?;
    }

    for row in &cells {
        let line = row
            .iter()
            .zip(&widths)
            .enumerate()
            .map(|(i, (cell, &width))| pad(cell, width, i >= key_len))
            .collect::<Vec<_>>()
            .join(COLUMN_GAP);
        writeln!(writer, "{}", line.trim_end())?;
    }

    if table.is_empty() {
        writeln!(writer, "(no rows)")?;
    }

    if report.is_sampled() {
        let note = "Note: the remote service computed this report from sampled data";
        if use_colors {
            writeln!(writer, "{}", note.yellow())?;
        } else {
            writeln!(writer, "{note}")?;
        }
    }

    Ok(())
}

/// Metric values are right-aligned, key components left-aligned.
fn pad(text: &str, width: usize, right: bool) -> String {
    if right {
        format!("{text:>width$}")
    } else {
        format!("{text:<width$}")
    }
}
