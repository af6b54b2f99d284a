use crate::reporting::FormattingType;

/// Render a value the way its formatting type suggests.
///
/// Integers and untyped whole numbers drop the fractional part, percentages
/// and currencies keep two decimals, and time values are shown in seconds.
pub fn format_value(value: f64, formatting_type: Option<FormattingType>) -> String {
    match formatting_type {
        Some(FormattingType::Integer) => format!("{value:.0}"),
        Some(FormattingType::Percent) => format!("{value:.2}%"),
        Some(FormattingType::Currency) => format!("{value:.2}"),
        Some(FormattingType::Time) => format!("{value:.1}s"),
        Some(FormattingType::Float) | None => {
            if value.fract() == 0.0 {
                return format!("{value:.0}");
            }

            let text = format!("{value:.4}");
            match text.trim_end_matches('0').trim_end_matches('.') {
                "-0" => "0".to_string(),
                trimmed => trimmed.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_integer() {
        assert_eq!(format_value(12.0, Some(FormattingType::Integer)), "12");
        assert_eq!(format_value(12.6, Some(FormattingType::Integer)), "13");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_value(45.678, Some(FormattingType::Percent)), "45.68%");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_value(3.5, Some(FormattingType::Currency)), "3.50");
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_value(61.27, Some(FormattingType::Time)), "61.3s");
    }

    #[test]
    fn test_format_untyped() {
        assert_eq!(format_value(10.0, None), "10");
        assert_eq!(format_value(0.25, None), "0.25");
        assert_eq!(format_value(1.5, Some(FormattingType::Float)), "1.5");
    }

    #[test]
    fn test_format_untyped_rounds_away_tiny_fractions() {
        assert_eq!(format_value(1.00001, Some(FormattingType::Float)), "1");
        assert_eq!(format_value(0.00001, None), "0");
        assert_eq!(format_value(-0.00001, None), "0");
        assert_eq!(format_value(2.50001, None), "2.5");
    }

    #[test]
    fn test_format_untyped_large_whole_numbers() {
        assert_eq!(format_value(1e20, None), "100000000000000000000");
        assert_eq!(format_value(-3e15, Some(FormattingType::Float)), "-3000000000000000");
    }
}

#[cfg(test)]
pub mod test_support {
    use crate::reporting::{Dimension, FormattingType, MetricExpr, Report, ReportTable, WireReport};

    /// Two days of sessions and bounce rate, keyed by date.
    pub fn weekly_report() -> Report {
        let metrics = [
            MetricExpr::new("ga:sessions", "Sessions", Some(FormattingType::Integer)),
            MetricExpr::new("ga:bounceRate", "Bounce Rate", Some(FormattingType::Percent)),
        ];
        let page = WireReport::from_rows([(["20240101"], ["10", "45.5"]), (["20240102"], ["12", "50"])], None);
        let table = ReportTable::assemble(&metrics, &[Dimension::date()], page.data.rows).unwrap();
        Report::new(table, Some("weekly".to_string()))
    }

    /// A report whose dimension values need CSV quoting.
    pub fn awkward_report() -> Report {
        let metrics = [MetricExpr::from_expression("ga:pageviews")];
        let dimensions = [Dimension::new("ga:pageTitle", "Page Title")];
        let page = WireReport::from_rows([(["Hello, \"world\""], ["3"]), (["plain"], ["0.5"])], None);
        let table = ReportTable::assemble(&metrics, &dimensions, page.data.rows).unwrap();
        Report::new(table, None)
    }
}
