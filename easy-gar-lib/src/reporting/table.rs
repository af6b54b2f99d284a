//! Folds fetched rows into a column store keyed by dimension tuples.

use super::{DataError, Dimension, FormattingType, MetricExpr, ReportError, ReportRow};
use std::collections::{HashMap, HashSet};

/// One metric column of a report table.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    formatting_type: Option<FormattingType>,
    values: Vec<f64>,
}

impl Column {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn formatting_type(&self) -> Option<FormattingType> {
        self.formatting_type
    }

    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

/// The materialized rows of a report.
///
/// Rows keep the order in which the remote service returned them, across
/// pages. Keys aren't deduplicated.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportTable {
    index_names: Vec<String>,
    index: Vec<Vec<String>>,
    columns: Vec<Column>,
}

impl ReportTable {
    /// Build a table from the rows of every page.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Configuration`] if two metrics or two dimensions
    /// share a display name, and [`ReportError::Data`] if a row's shape doesn't
    /// match the declarations or a value doesn't parse as a finite number.
    pub fn assemble(metrics: &[MetricExpr], dimensions: &[Dimension], rows: Vec<ReportRow>) -> Result<Self, ReportError> {
        let index_names = unique_names(dimensions.iter().map(Dimension::display_name), "dimension key")?;
        let column_names = unique_names(metrics.iter().map(MetricExpr::display_name), "metric column")?;

        let mut columns: Vec<_> = metrics
            .iter()
            .zip(column_names)
            .map(|(m, name)| Column {
                name,
                formatting_type: m.formatting_type(),
                values: Vec::with_capacity(rows.len()),
            })
            .collect();

        let mut index = Vec::with_capacity(rows.len());

        for (row_number, row) in rows.into_iter().enumerate() {
            if row.dimensions.len() != dimensions.len() {
                return Err(DataError::new(format!(
                    "expected {} dimension value(s), got {}",
                    dimensions.len(),
                    row.dimensions.len()
                ))
                .at_row(row_number)
                .into());
            }

            let values = match row.metrics.as_slice() {
                [range, ..] => &range.values,
                [] => return Err(DataError::new("row has no metric values").at_row(row_number).into()),
            };

            if values.len() != columns.len() {
                return Err(DataError::new(format!("expected {} metric value(s), got {}", columns.len(), values.len()))
                    .at_row(row_number)
                    .into());
            }

            for (column, raw) in columns.iter_mut().zip(values) {
                let value = parse_value(raw).map_err(|e| e.at_row(row_number).in_field(&column.name))?;
                column.values.push(value);
            }

            index.push(row.dimensions);
        }

        Ok(Self {
            index_names,
            index,
            columns,
        })
    }

    /// Names of the key components, in declared dimension order.
    #[must_use]
    pub fn index_names(&self) -> &[String] {
        &self.index_names
    }

    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    #[must_use]
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.index.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// The composite key of row `row`.
    #[must_use]
    pub fn row_key(&self, row: usize) -> Option<&[String]> {
        self.index.get(row).map(Vec::as_slice)
    }

    /// The value of `column` in row `row`.
    #[must_use]
    pub fn value(&self, row: usize, column: &str) -> Option<f64> {
        self.column(column)?.values.get(row).copied()
    }

    /// Iterate rows as `(key, values)` pairs, values in column order.
    pub fn rows(&self) -> impl Iterator<Item = (&[String], Vec<f64>)> + '_ {
        self.index
            .iter()
            .enumerate()
            .map(|(i, key)| (key.as_slice(), self.columns.iter().map(|c| c.values[i]).collect()))
    }

    /// The first row whose key equals `key`, as column name to value.
    #[must_use]
    pub fn lookup<S: AsRef<str>>(&self, key: &[S]) -> Option<HashMap<&str, f64>> {
        let row = self
            .index
            .iter()
            .position(|k| k.len() == key.len() && k.iter().zip(key).all(|(a, b)| a == b.as_ref()))?;

        Some(self.columns.iter().map(|c| (c.name.as_str(), c.values[row])).collect())
    }
}

fn unique_names<'a>(names: impl Iterator<Item = &'a str>, what: &str) -> Result<Vec<String>, ReportError> {
    let mut seen = HashSet::new();
    let mut result = Vec::new();

    for name in names {
        if !seen.insert(name) {
            return Err(ReportError::configuration(format!("{what} name '{name}' is used more than once")));
        }
        result.push(name.to_string());
    }

    Ok(result)
}

fn parse_value(raw: &str) -> Result<f64, DataError> {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        Ok(_) => Err(DataError::new("metric value is not a finite number").with_value(raw)),
        Err(_) => Err(DataError::new("metric value is not numeric").with_value(raw)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporting::WireReport;

    fn metrics() -> Vec<MetricExpr> {
        vec![
            MetricExpr::new("ga:sessions", "Sessions", Some(FormattingType::Integer)),
            MetricExpr::new("ga:bounceRate", "Bounce Rate", Some(FormattingType::Percent)),
        ]
    }

    fn rows<const D: usize, const M: usize>(data: &[([&str; D], [&str; M])]) -> Vec<ReportRow> {
        WireReport::from_rows(data.iter().copied(), None).data.rows
    }

    #[test]
    fn test_assemble_keeps_arrival_order() {
        let dims = [Dimension::new("ga:country", "Country")];
        let table = ReportTable::assemble(
            &metrics(),
            &dims,
            rows(&[(["fr"], ["3", "50.5"]), (["de"], ["1", "12"]), (["fr"], ["2", "0"])]),
        )
        .unwrap();

        assert_eq!(table.row_count(), 3);
        assert_eq!(table.index_names(), ["Country"]);
        assert_eq!(table.row_key(0), Some(["fr".to_string()].as_slice()));
        assert_eq!(table.row_key(2), Some(["fr".to_string()].as_slice()));
        assert_eq!(table.column("Sessions").unwrap().values(), [3.0, 1.0, 2.0]);
        assert_eq!(table.value(0, "Bounce Rate"), Some(50.5));
        assert_eq!(table.column("Bounce Rate").unwrap().formatting_type(), Some(FormattingType::Percent));
    }

    #[test]
    fn test_lookup_returns_first_match() {
        let dims = [Dimension::new("ga:country", "Country"), Dimension::new("ga:city", "City")];
        let table = ReportTable::assemble(
            &metrics(),
            &dims,
            rows(&[(["fr", "Paris"], ["3", "1"]), (["fr", "Lyon"], ["4", "2"])]),
        )
        .unwrap();

        let found = table.lookup(&["fr", "Lyon"]).unwrap();
        assert_eq!(found["Sessions"], 4.0);
        assert!(table.lookup(&["fr"]).is_none());
        assert!(table.lookup(&["de", "Berlin"]).is_none());
    }

    #[test]
    fn test_rows_iterates_in_column_order() {
        let table = ReportTable::assemble(&metrics(), &[], rows(&[([], ["1", "2"])])).unwrap();
        let all: Vec<_> = table.rows().collect();

        assert_eq!(all.len(), 1);
        assert!(all[0].0.is_empty());
        assert_eq!(all[0].1, vec![1.0, 2.0]);
    }

    #[test]
    fn test_empty_input() {
        let table = ReportTable::assemble(&metrics(), &[Dimension::date()], Vec::new()).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.columns().len(), 2);
    }

    #[test]
    fn test_non_numeric_value_reports_row_and_value() {
        let err = ReportTable::assemble(&metrics(), &[Dimension::date()], rows(&[(["d1"], ["1", "2"]), (["d2"], ["1", "n/a"])]))
            .unwrap_err();

        let ReportError::Data(e) = err else {
            panic!("expected a data error, got {err:?}");
        };
        assert_eq!(e.row, Some(1));
        assert_eq!(e.field.as_deref(), Some("Bounce Rate"));
        assert_eq!(e.value.as_deref(), Some("n/a"));
    }

    #[test]
    fn test_non_finite_value_rejected() {
        let err = ReportTable::assemble(&metrics(), &[], rows(&[([], ["NaN", "1"])])).unwrap_err();
        assert!(matches!(err, ReportError::Data(ref e) if e.value.as_deref() == Some("NaN")));
    }

    #[test]
    fn test_dimension_arity_mismatch() {
        let dims = [Dimension::date(), Dimension::new("ga:country", "Country")];
        let err = ReportTable::assemble(&metrics(), &dims, rows(&[(["d1"], ["1", "2"])])).unwrap_err();
        assert!(matches!(err, ReportError::Data(ref e) if e.row == Some(0) && e.message.contains("dimension")));
    }

    #[test]
    fn test_metric_arity_mismatch() {
        let err = ReportTable::assemble(&metrics(), &[], rows(&[([], ["1"])])).unwrap_err();
        assert!(matches!(err, ReportError::Data(ref e) if e.message.contains("2 metric value(s), got 1")));
    }

    #[test]
    fn test_row_without_metric_block() {
        let row = ReportRow {
            dimensions: Vec::new(),
            metrics: Vec::new(),
        };
        let err = ReportTable::assemble(&metrics(), &[], vec![row]).unwrap_err();
        assert!(matches!(err, ReportError::Data(_)));
    }

    #[test]
    fn test_duplicate_column_name_is_configuration_error() {
        let metrics = [MetricExpr::new("ga:a", "Same", None), MetricExpr::new("ga:b", "Same", None)];
        let err = ReportTable::assemble(&metrics, &[], Vec::new()).unwrap_err();
        assert!(err.is_configuration());
    }
}
