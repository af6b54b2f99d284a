//! The report-fetching pipeline.
//!
//! This module turns typed metric and dimension declarations into wire
//! requests, drives the paginated request loop against the remote service,
//! and folds the returned pages into a single indexed table.
//!
//! # Implementation Model
//!
//! Data flows one way through four stages:
//!
//! 1. [`MetricExpr`], [`Dimension`] and [`OrderBy`] are immutable values. Derived
//!    metrics come from [`MetricExpr::add`] and friends, which parenthesize each
//!    operand so the remote parser reads the expression unambiguously.
//! 2. [`build_request`] validates the declarations and emits the body of the
//!    first page. Nothing reaches the network if this step fails.
//! 3. [`fetch_all`] sends one page at a time through a [`RequestExecutor`],
//!    following `nextPageToken` until it is absent. Retryable failures back off
//!    for `2^n + jitter` units, at most five attempts per page.
//! 4. [`ReportTable::assemble`] parses every value as `f64` and keys each row by
//!    its dimension values, preserving arrival order.
//!
//! [`ReportingApi::get_report`] ties the stages together. Failures surface as
//! one [`ReportError`].
//!
//! Requests are executed by anything implementing [`RequestExecutor`]; the
//! [`HttpExecutor`] posts them with `reqwest` and classifies the remote error
//! reasons.

mod api;
mod date_spec;
mod dimension;
pub(crate) mod error;
mod executor;
mod fetcher;
mod http_executor;
mod metric;
mod order_by;
mod report;
mod request;
mod response;
mod sampling;
mod table;

pub use api::{ReportQuery, ReportingApi};
pub use date_spec::{DateSpec, ParseDateSpecError};
pub use dimension::{DATE_DIMENSION, Dimension};
pub use error::{DataError, ReportError, TIMEOUT_REASON, TransportError, is_retryable_reason};
pub use executor::RequestExecutor;
pub use fetcher::{DEFAULT_BACKOFF_UNIT, DEFAULT_REQUEST_TIMEOUT, FetchOptions, FetchedRows, MAX_ATTEMPTS_PER_PAGE, backoff_delay, fetch_all};
pub use http_executor::{DEFAULT_ENDPOINT, HttpExecutor};
pub use metric::{FormattingType, MetricExpr, Operator};
pub use order_by::{OrderBy, OrderType, SortOrder};
pub use report::Report;
pub use request::{
    DateRange, DimensionFragment, MAX_PAGE_SIZE, MetricFragment, OrderByFragment, ReportRequest, RequestParams, build_request,
};
pub use response::{BatchGetResponse, DateRangeValues, ReportData, ReportRow, WireReport};
pub use sampling::SamplingLevel;
pub use table::{Column, ReportTable};
