//! The public entry point: declare a report, get it back fully materialized.

use super::fetcher::{FetchOptions, fetch_all};
use super::request::{RequestParams, build_request};
use super::{DateSpec, Dimension, MetricExpr, OrderBy, Report, ReportError, ReportTable, RequestExecutor, SamplingLevel};
use tokio_util::sync::CancellationToken;

const LOG_TARGET: &str = "       api";

/// What to fetch.
///
/// Defaults to the last seven days up to today, at the default sampling
/// level, grouped by date when no dimension is given.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportQuery {
    pub start_date: DateSpec,
    pub end_date: DateSpec,
    pub metrics: Vec<MetricExpr>,
    pub dimensions: Vec<Dimension>,
    pub order_by: Vec<OrderBy>,
    pub sampling_level: SamplingLevel,
    pub name: Option<String>,
}

impl ReportQuery {
    pub fn new(metrics: impl IntoIterator<Item = MetricExpr>) -> Self {
        Self {
            start_date: DateSpec::DEFAULT_START,
            end_date: DateSpec::DEFAULT_END,
            metrics: metrics.into_iter().collect(),
            dimensions: Vec::new(),
            order_by: Vec::new(),
            sampling_level: SamplingLevel::default(),
            name: None,
        }
    }

    #[must_use]
    pub const fn with_dates(mut self, start_date: DateSpec, end_date: DateSpec) -> Self {
        self.start_date = start_date;
        self.end_date = end_date;
        self
    }

    #[must_use]
    pub fn with_dimensions(mut self, dimensions: impl IntoIterator<Item = Dimension>) -> Self {
        self.dimensions = dimensions.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_order_by(mut self, order_by: impl IntoIterator<Item = OrderBy>) -> Self {
        self.order_by = order_by.into_iter().collect();
        self
    }

    #[must_use]
    pub const fn with_sampling_level(mut self, sampling_level: SamplingLevel) -> Self {
        self.sampling_level = sampling_level;
        self
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Fetches reports for one view through a request executor.
#[derive(Debug, Clone)]
pub struct ReportingApi<E> {
    executor: E,
    view_id: String,
    page_size: Option<u32>,
    options: FetchOptions,
}

impl<E: RequestExecutor + Clone + 'static> ReportingApi<E> {
    pub fn new(executor: E, view_id: impl Into<String>) -> Self {
        Self {
            executor,
            view_id: view_id.into(),
            page_size: None,
            options: FetchOptions::default(),
        }
    }

    #[must_use]
    pub const fn with_options(mut self, options: FetchOptions) -> Self {
        self.options = options;
        self
    }

    /// Rows per page; the remote maximum when unset.
    #[must_use]
    pub const fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    #[must_use]
    pub fn view_id(&self) -> &str {
        &self.view_id
    }

    #[must_use]
    pub const fn executor(&self) -> &E {
        &self.executor
    }

    /// Fetch every page of `query` and fold it into a [`Report`].
    ///
    /// # Errors
    ///
    /// Returns the first unrecoverable [`ReportError`]; configuration problems
    /// are reported before any request is sent.
    pub async fn get_report(&self, query: &ReportQuery) -> Result<Report, ReportError> {
        self.get_report_cancellable(query, &CancellationToken::new()).await
    }

    /// Like [`Self::get_report`], aborting with [`ReportError::Cancelled`] once `cancel` fires.
    ///
    /// # Errors
    ///
    /// Returns the first unrecoverable [`ReportError`].
    pub async fn get_report_cancellable(&self, query: &ReportQuery, cancel: &CancellationToken) -> Result<Report, ReportError> {
        let implicit_date;
        let dimensions = if query.dimensions.is_empty() {
            implicit_date = [Dimension::date()];
            implicit_date.as_slice()
        } else {
            query.dimensions.as_slice()
        };

        let params = RequestParams {
            view_id: &self.view_id,
            start_date: query.start_date,
            end_date: query.end_date,
            sampling_level: query.sampling_level,
            metrics: &query.metrics,
            dimensions,
            order_by: &query.order_by,
            page_size: self.page_size,
        };

        let first = build_request(&params, None)?;

        log::info!(
            target: LOG_TARGET,
            "fetching {} metric(s) by {} dimension(s) for view {} from {} to {}",
            query.metrics.len(),
            dimensions.len(),
            self.view_id,
            query.start_date,
            query.end_date
        );

        let fetched = fetch_all(&self.executor, &first, &self.options, cancel).await?;
        let table = ReportTable::assemble(&query.metrics, dimensions, fetched.rows)?;

        log::info!(
            target: LOG_TARGET,
            "assembled {} row(s) from {} page(s)",
            table.row_count(),
            fetched.pages
        );

        Ok(Report::new(table, query.name.clone()).with_sampling(fetched.sampled, fetched.data_golden))
    }
}
