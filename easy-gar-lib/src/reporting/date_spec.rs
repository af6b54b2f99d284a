use chrono::NaiveDate;
use core::fmt::{self, Display, Formatter};
use core::str::FromStr;

const WIRE_DATE_FORMAT: &str = "%Y-%m-%d";
const DAYS_AGO_SUFFIX: &str = "daysAgo";

/// One end of a report's date range.
///
/// Relative dates are resolved by the remote service in the view's time zone,
/// so they are sent as tokens rather than converted locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateSpec {
    Date(NaiveDate),
    Today,
    Yesterday,
    DaysAgo(u32),
}

impl DateSpec {
    /// Default start of a report: a week back.
    pub const DEFAULT_START: Self = Self::DaysAgo(7);

    /// Default end of a report.
    pub const DEFAULT_END: Self = Self::Today;

    /// The explicit calendar date, if this isn't a relative token.
    #[must_use]
    pub const fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(d) => Some(*d),
            _ => None,
        }
    }
}

impl Display for DateSpec {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Date(d) => write!(f, "{}", d.format(WIRE_DATE_FORMAT)),
            Self::Today => write!(f, "today"),
            Self::Yesterday => write!(f, "yesterday"),
            Self::DaysAgo(n) => write!(f, "{n}{DAYS_AGO_SUFFIX}"),
        }
    }
}

/// Error returned when a date string is neither a calendar date nor a relative token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDateSpecError {
    input: String,
    cause: String,
}

impl ParseDateSpecError {
    fn new(input: &str, cause: impl Display) -> Self {
        Self {
            input: input.to_string(),
            cause: cause.to_string(),
        }
    }
}

impl Display for ParseDateSpecError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid date '{}' ({}): expected YYYY-MM-DD, 'today', 'yesterday', or 'NdaysAgo'",
            self.input, self.cause
        )
    }
}

impl core::error::Error for ParseDateSpecError {}

impl FromStr for DateSpec {
    type Err = ParseDateSpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        if trimmed.eq_ignore_ascii_case("today") {
            return Ok(Self::Today);
        }

        if trimmed.eq_ignore_ascii_case("yesterday") {
            return Ok(Self::Yesterday);
        }

        if let Some(count) = trimmed.strip_suffix(DAYS_AGO_SUFFIX) {
            return count
                .trim_end()
                .parse::<u32>()
                .map(Self::DaysAgo)
                .map_err(|e| ParseDateSpecError::new(s, e));
        }

        NaiveDate::parse_from_str(trimmed, WIRE_DATE_FORMAT)
            .map(Self::Date)
            .map_err(|e| ParseDateSpecError::new(s, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_relative_tokens() {
        assert_eq!("today".parse::<DateSpec>().unwrap(), DateSpec::Today);
        assert_eq!("Yesterday".parse::<DateSpec>().unwrap(), DateSpec::Yesterday);
        assert_eq!("7daysAgo".parse::<DateSpec>().unwrap(), DateSpec::DaysAgo(7));
        assert_eq!("30 daysAgo".parse::<DateSpec>().unwrap(), DateSpec::DaysAgo(30));
    }

    #[test]
    fn test_parse_calendar_date() {
        let spec = "2024-01-31".parse::<DateSpec>().unwrap();
        assert_eq!(spec.as_date(), NaiveDate::from_ymd_opt(2024, 1, 31));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for s in ["", "tomorrow", "-3daysAgo", "daysAgo", "2024-13-01", "01/02/2024"] {
            assert!(s.parse::<DateSpec>().is_err(), "'{s}' should not parse");
        }
    }

    #[test]
    fn test_parse_error_keeps_cause() {
        let err = "-3daysAgo".parse::<DateSpec>().unwrap_err().to_string();
        assert!(err.starts_with("invalid date '-3daysAgo' (invalid digit found in string)"), "{err}");

        let err = "01/02/2024".parse::<DateSpec>().unwrap_err().to_string();
        assert!(err.starts_with("invalid date '01/02/2024' ("), "{err}");
    }

    #[test]
    fn test_wire_form() {
        assert_eq!(DateSpec::DaysAgo(7).to_string(), "7daysAgo");
        assert_eq!(DateSpec::Today.to_string(), "today");
        assert_eq!(
            DateSpec::Date(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()).to_string(),
            "2024-01-02"
        );
    }

    #[test]
    fn test_defaults() {
        assert_eq!(DateSpec::DEFAULT_START.to_string(), "7daysAgo");
        assert_eq!(DateSpec::DEFAULT_END.to_string(), "today");
    }
}
