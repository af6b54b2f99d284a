//! Wire shapes of a `batchGet` response.
//!
//! Every field is defaulted so a sparse page (no rows, no cursor) still decodes.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchGetResponse {
    #[serde(default)]
    pub reports: Vec<WireReport>,
}

impl BatchGetResponse {
    /// A response holding a single report page.
    #[must_use]
    pub fn single(report: WireReport) -> Self {
        Self { reports: vec![report] }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireReport {
    #[serde(default)]
    pub data: ReportData,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

impl WireReport {
    /// Build a page out of `(dimension values, metric values)` pairs.
    pub fn from_rows<I, D, M>(rows: I, next_page_token: Option<&str>) -> Self
    where
        I: IntoIterator<Item = (D, M)>,
        D: IntoIterator,
        D::Item: Into<String>,
        M: IntoIterator,
        M::Item: Into<String>,
    {
        let rows: Vec<_> = rows
            .into_iter()
            .map(|(dims, values)| ReportRow {
                dimensions: dims.into_iter().map(Into::into).collect(),
                metrics: vec![DateRangeValues {
                    values: values.into_iter().map(Into::into).collect(),
                }],
            })
            .collect();

        Self {
            data: ReportData {
                row_count: Some(rows.len() as u64),
                rows,
                ..ReportData::default()
            },
            next_page_token: next_page_token.map(ToString::to_string),
        }
    }

    /// The continuation cursor, treating an empty token as the last page.
    #[must_use]
    pub fn continuation(&self) -> Option<&str> {
        self.next_page_token.as_deref().filter(|t| !t.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportData {
    #[serde(default)]
    pub rows: Vec<ReportRow>,

    /// Total rows matching the query across all pages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_count: Option<u64>,

    /// Present only when the data was sampled; int64-as-string values.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub samples_read_counts: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sampling_space_sizes: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_data_golden: Option<bool>,
}

impl ReportData {
    #[must_use]
    pub fn is_sampled(&self) -> bool {
        !self.samples_read_counts.is_empty() || !self.sampling_space_sizes.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRow {
    #[serde(default)]
    pub dimensions: Vec<String>,

    /// One entry per date range; reports here always use exactly one.
    #[serde(default)]
    pub metrics: Vec<DateRangeValues>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRangeValues {
    #[serde(default)]
    pub values: Vec<String>,
}
