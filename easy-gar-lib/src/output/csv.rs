use crate::Result;
use crate::reporting::Report;
use core::fmt::Write;
use std::borrow::Cow;

/// Write the report as CSV: key components first, then one column per metric.
///
/// Values are written unformatted so spreadsheets see plain numbers.
pub fn generate<W: Write>(report: &Report, writer: &mut W) -> Result<()> {
    let table = report.table();

    let headers = table
        .index_names()
        .iter()
        .map(String::as_str)
        .chain(table.columns().iter().map(|c| c.name()))
        .map(escape_csv)
        .collect::<Vec<_>>()
        .join(",");
    writeln!(writer, "{headers}")?;

    for (key, values) in table.rows() {
        let mut first = true;
        for component in key {
            if !first {
                write!(writer, ",")?;
            }
            write!(writer, "{}", escape_csv(component))?;
            first = false;
        }

        for value in values {
            if !first {
                write!(writer, ",")?;
            }
            write!(writer, "{value}")?;
            first = false;
        }
        writeln!(writer)?;
    }

    Ok(())
}

/// Escape a value for RFC compliant CSV output.
///
/// Wraps the value in double quotes if it contains commas, newlines, or double quotes.
/// Internal double quotes are doubled per the RFC.
fn escape_csv(s: &str) -> Cow<'_, str> {
    if s.contains('"') {
        Cow::Owned(format!("\"{}\"", s.replace('"', "\"\"")))
    } else if s.contains(',') || s.contains('\n') || s.contains('\r') {
        Cow::Owned(format!("\"{s}\""))
    } else {
        Cow::Borrowed(s)
    }
}
