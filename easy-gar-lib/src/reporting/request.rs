//! Turns typed report declarations into the wire request body for one page.

use super::{DateSpec, Dimension, FormattingType, MetricExpr, OrderBy, OrderType, ReportError, SamplingLevel, SortOrder};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Hard upper bound the remote API places on rows per page.
pub const MAX_PAGE_SIZE: u32 = 10_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricFragment {
    pub expression: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatting_type: Option<FormattingType>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionFragment {
    pub name: String,

    /// Bucket boundaries, sent as int64-as-string values.
    #[serde(default)]
    pub histogram_buckets: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderByFragment {
    pub field_name: String,
    pub order_type: OrderType,
    pub sort_order: SortOrder,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start_date: String,
    pub end_date: String,
}

/// The body of one page request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
    pub view_id: String,
    pub date_ranges: Vec<DateRange>,
    pub sampling_level: SamplingLevel,
    pub metrics: Vec<MetricFragment>,
    pub dimensions: Vec<DimensionFragment>,
    pub page_size: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_token: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub order_bys: Vec<OrderByFragment>,
}

impl ReportRequest {
    /// The same request aimed at the page identified by `token`.
    #[must_use]
    pub fn for_page(&self, token: Option<&str>) -> Self {
        Self {
            page_token: token.map(ToString::to_string),
            ..self.clone()
        }
    }
}

/// Declarative inputs for a report request.
#[derive(Debug, Clone, Copy)]
pub struct RequestParams<'a> {
    pub view_id: &'a str,
    pub start_date: DateSpec,
    pub end_date: DateSpec,
    pub sampling_level: SamplingLevel,
    pub metrics: &'a [MetricExpr],
    pub dimensions: &'a [Dimension],
    pub order_by: &'a [OrderBy],

    /// Rows per page; [`MAX_PAGE_SIZE`] when `None`.
    pub page_size: Option<u32>,
}

/// Build the wire body for one page of a report.
///
/// The first page carries no token. The output depends only on the inputs.
///
/// # Errors
///
/// Returns [`ReportError::Configuration`] if the declarations are invalid: no
/// metrics, an empty metric expression, two metrics or two dimensions with the
/// same column name, the same dimension twice, non-ascending histogram buckets,
/// an ordering on a field not in the request, a page size outside
/// `1..=10000`, an empty view id, or an explicit start date after the end date.
pub fn build_request(params: &RequestParams<'_>, page_token: Option<&str>) -> Result<ReportRequest, ReportError> {
    validate(params)?;

    Ok(ReportRequest {
        view_id: params.view_id.to_string(),
        date_ranges: vec![DateRange {
            start_date: params.start_date.to_string(),
            end_date: params.end_date.to_string(),
        }],
        sampling_level: params.sampling_level,
        metrics: params.metrics.iter().map(MetricExpr::request_fragment).collect(),
        dimensions: params.dimensions.iter().map(Dimension::request_fragment).collect(),
        page_size: params.page_size.unwrap_or(MAX_PAGE_SIZE),
        page_token: page_token.map(ToString::to_string),
        order_bys: params.order_by.iter().map(OrderBy::request_fragment).collect(),
    })
}

fn validate(params: &RequestParams<'_>) -> Result<(), ReportError> {
    if params.view_id.trim().is_empty() {
        return Err(ReportError::configuration("view id must not be empty"));
    }

    if let Some(size) = params.page_size
        && !(1..=MAX_PAGE_SIZE).contains(&size)
    {
        return Err(ReportError::configuration(format!(
            "page size must be between 1 and {MAX_PAGE_SIZE}, got {size}"
        )));
    }

    if let (Some(start), Some(end)) = (params.start_date.as_date(), params.end_date.as_date())
        && start > end
    {
        return Err(ReportError::configuration(format!("start date {start} is after end date {end}")));
    }

    if params.metrics.is_empty() {
        return Err(ReportError::configuration("at least one metric is required"));
    }

    let mut metric_names = HashSet::new();
    for metric in params.metrics {
        if metric.expression().trim().is_empty() {
            return Err(ReportError::configuration("metric expression must not be empty"));
        }

        if !metric_names.insert(metric.display_name()) {
            return Err(ReportError::configuration(format!(
                "metric column name '{}' is used more than once",
                metric.display_name()
            )));
        }
    }

    let mut dimension_names = HashSet::new();
    let mut dimension_aliases = HashSet::new();
    for dimension in params.dimensions {
        if !dimension_names.insert(dimension.name()) {
            return Err(ReportError::configuration(format!(
                "dimension '{}' is requested more than once",
                dimension.name()
            )));
        }

        if !dimension_aliases.insert(dimension.display_name()) {
            return Err(ReportError::configuration(format!(
                "dimension key name '{}' is used more than once",
                dimension.display_name()
            )));
        }

        if dimension.histogram_buckets().windows(2).any(|w| w[0] >= w[1]) {
            return Err(ReportError::configuration(format!(
                "histogram buckets of dimension '{}' must be strictly ascending",
                dimension.name()
            )));
        }
    }

    for order in params.order_by {
        let field = order.field_name();
        let known = params
            .metrics
            .iter()
            .any(|m| m.expression() == field || m.alias() == Some(field))
            || params.dimensions.iter().any(|d| d.name() == field);

        if !known {
            return Err(ReportError::configuration(format!(
                "cannot order by '{field}': it is neither a requested metric nor a requested dimension"
            )));
        }
    }

    Ok(())
}
