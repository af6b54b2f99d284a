use crate::Result;
use crate::reporting::Report;
use core::fmt::Write;
use serde_json::json;

#[expect(unused_results, reason = "Map::insert returns the displaced value, which is never present")]
pub fn generate<W: Write>(report: &Report, writer: &mut W) -> Result<()> {
    let table = report.table();

    let mut rows = Vec::with_capacity(table.row_count());
    for (key, values) in table.rows() {
        let mut row = serde_json::Map::new();
        for (name, component) in table.index_names().iter().zip(key) {
            row.insert(name.clone(), json!(component));
        }
        for (column, value) in table.columns().iter().zip(values) {
            row.insert(column.name().to_string(), json!(value));
        }
        rows.push(json!(row));
    }

    let output = json!({
        "name": report.name(),
        "index": table.index_names(),
        "columns": table.columns().iter().map(|c| c.name()).collect::<Vec<_>>(),
        "sampled": report.is_sampled(),
        "dataGolden": report.is_data_golden(),
        "rows": rows,
    });

    write!(writer, "{}", serde_json::to_string_pretty(&output)?)?;
    Ok(())
}
