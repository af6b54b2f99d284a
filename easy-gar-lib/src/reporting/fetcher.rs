//! The paginated fetch loop.
//!
//! Pages are requested strictly one after another, since each page's cursor
//! comes from the previous response. Every page request goes through a
//! [`seatbelt`] pipeline: a per-attempt timeout wrapped in a retry layer that
//! repeats retryable failures after an exponential backoff with jitter, up to
//! [`MAX_ATTEMPTS_PER_PAGE`] attempts. The attempt counter starts over for
//! every page.
//!
//! The whole pipeline, backoff sleeps included, races against a
//! [`CancellationToken`]; cancellation aborts the loop with
//! [`ReportError::Cancelled`] and discards any rows collected so far.

use super::{BatchGetResponse, ReportError, ReportRequest, ReportRow, RequestExecutor, TransportError, WireReport};
use core::sync::atomic::{AtomicU32, Ordering};
use core::time::Duration;
use layered::{Execute, Service, Stack};
use seatbelt::retry::{Backoff, Retry};
use seatbelt::timeout::Timeout;
use seatbelt::{RecoveryInfo, ResilienceContext};
use std::sync::Arc;
use tick::Clock;
use tokio_util::sync::CancellationToken;

const LOG_TARGET: &str = "   fetcher";

/// Maximum number of attempts for a single page, the first one included.
pub const MAX_ATTEMPTS_PER_PAGE: u32 = 5;

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

pub const DEFAULT_BACKOFF_UNIT: Duration = Duration::from_secs(1);

type PageOutcome = Result<BatchGetResponse, TransportError>;

/// Tuning knobs for the fetch loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchOptions {
    /// Upper bound on a single page request; exceeding it is a retryable failure.
    pub request_timeout: Duration,

    /// Length of one backoff unit. Retry `n` waits `2^n + jitter` units.
    pub backoff_unit: Duration,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            backoff_unit: DEFAULT_BACKOFF_UNIT,
        }
    }
}

/// Everything collected by a completed fetch loop.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchedRows {
    /// Rows of all pages, in page-then-row order.
    pub rows: Vec<ReportRow>,
    pub pages: usize,

    /// True if any page reported sampled data.
    pub sampled: bool,

    /// False if any page reported data that isn't final yet.
    pub data_golden: bool,
}

/// Delay before retry number `retry` (zero-based) of the current page.
///
/// `jitter` is a fraction of a unit in `[0, 1)`.
#[must_use]
pub fn backoff_delay(retry: u32, unit: Duration, jitter: f64) -> Duration {
    let jitter = if jitter.is_nan() { 0.0 } else { jitter.clamp(0.0, 1.0) };
    let whole = unit.saturating_mul(1_u32 << retry.min(16));
    whole.saturating_add(unit.mul_f64(jitter))
}

/// Number of retries the pipeline allows on top of the first attempt.
const fn max_retry_attempts() -> u32 {
    MAX_ATTEMPTS_PER_PAGE - 1
}

/// Decide whether the outcome of attempt number `attempt` (one-based) is worth repeating.
fn recovery_for(outcome: &PageOutcome, attempt: u32, unit: Duration) -> RecoveryInfo {
    match outcome {
        Err(e) if e.is_retryable() => {
            log::warn!(
                target: LOG_TARGET,
                "attempt {attempt}/{MAX_ATTEMPTS_PER_PAGE} failed with '{}': {}",
                e.reason_code(),
                e.message()
            );
            let delay = backoff_delay(attempt.saturating_sub(1), unit, rand::random::<f64>());
            RecoveryInfo::retry().delay(delay)
        }
        _ => RecoveryInfo::never(),
    }
}

/// Turn the final outcome of a page's pipeline into the page or the error to report.
fn settle_page(outcome: PageOutcome, page: usize, attempts: u32) -> Result<WireReport, ReportError> {
    match outcome {
        Ok(mut response) => {
            if response.reports.is_empty() {
                return Err(super::DataError::new("response contains no report").into());
            }

            Ok(response.reports.swap_remove(0))
        }
        Err(e) if e.is_retryable() => Err(ReportError::RetriesExhausted { page, attempts, last: e }),
        Err(e) => Err(ReportError::Transport(e)),
    }
}

/// Fetch `first` and every page that follows it.
///
/// # Errors
///
/// Returns [`ReportError::Transport`] for a non-retryable failure,
/// [`ReportError::RetriesExhausted`] when a page keeps failing,
/// [`ReportError::Data`] if a response holds no report, and
/// [`ReportError::Cancelled`] if `cancel` fires first.
pub async fn fetch_all<E>(
    executor: &E,
    first: &ReportRequest,
    options: &FetchOptions,
    cancel: &CancellationToken,
) -> Result<FetchedRows, ReportError>
where
    E: RequestExecutor + Clone + 'static,
{
    let clock = Clock::new_tokio();
    let context = ResilienceContext::new(&clock).name("report_page");

    let attempts = Arc::new(AtomicU32::new(0));
    let recovery_attempts = Arc::clone(&attempts);
    let execute_attempts = Arc::clone(&attempts);
    let backoff_unit = options.backoff_unit;
    let request_timeout = options.request_timeout;
    let executor = executor.clone();

    let service = (
        Retry::layer("retry", &context)
            .clone_input()
            .recovery_with(move |outcome: &PageOutcome, _| {
                recovery_for(outcome, recovery_attempts.load(Ordering::SeqCst), backoff_unit)
            })
            .max_retry_attempts(max_retry_attempts())
            .base_delay(backoff_unit)
            .backoff(Backoff::Exponential)
            .on_retry(|_output, args| {
                log::debug!(
                    target: LOG_TARGET,
                    "retrying page request (retry {}, delay {}ms)",
                    args.attempt().index() + 1,
                    args.retry_delay().as_millis(),
                );
            }),
        Timeout::layer("timeout", &context)
            .timeout_error(move |_| TransportError::timeout(request_timeout))
            .timeout(request_timeout),
        Execute::new(move |request: ReportRequest| {
            let executor = executor.clone();
            let attempts = Arc::clone(&execute_attempts);
            async move {
                let attempt = attempts.fetch_add(1, Ordering::SeqCst) + 1;
                log::info!(target: LOG_TARGET, "sending page request (attempt {attempt}/{MAX_ATTEMPTS_PER_PAGE})");
                executor.execute(&request).await
            }
        }),
    )
        .into_service();

    let mut fetched = FetchedRows {
        data_golden: true,
        ..FetchedRows::default()
    };

    let mut request = first.clone();

    loop {
        if cancel.is_cancelled() {
            return Err(ReportError::Cancelled);
        }

        let page = fetched.pages + 1;
        attempts.store(0, Ordering::SeqCst);
        log::info!(target: LOG_TARGET, "requesting page {page}");

        let outcome = tokio::select! {
            biased;
            () = cancel.cancelled() => return Err(ReportError::Cancelled),
            r = service.execute(request.clone()) => r,
        };

        let report = settle_page(outcome, page, attempts.load(Ordering::SeqCst))?;
        fetched.pages = page;

        let data = &report.data;
        log::debug!(
            target: LOG_TARGET,
            "page {page}: {} row(s), {} total reported",
            data.rows.len(),
            data.row_count.map_or_else(|| "unknown".to_string(), |c| c.to_string())
        );

        if data.is_sampled() {
            log::warn!(
                target: LOG_TARGET,
                "page {page} is sampled: read {} of {} sessions",
                data.samples_read_counts.join("+"),
                data.sampling_space_sizes.join("+")
            );
            fetched.sampled = true;
        }

        if data.is_data_golden == Some(false) {
            fetched.data_golden = false;
        }

        let next = report.continuation().map(ToString::to_string);
        fetched.rows.extend(report.data.rows);

        match next {
            Some(token) => {
                log::debug!(target: LOG_TARGET, "continuing with page token '{token}'");
                request = request.for_page(Some(&token));
            }
            None => return Ok(fetched),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::sync::atomic::AtomicUsize;
    use crate::reporting::SamplingLevel;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    type Step = Result<BatchGetResponse, TransportError>;

    /// Replays a fixed script of outcomes, recording every page token it sees.
    struct Scripted {
        steps: Mutex<VecDeque<Step>>,
        tokens: Mutex<Vec<Option<String>>>,
        calls: AtomicUsize,
    }

    impl Scripted {
        fn new(steps: impl IntoIterator<Item = Step>) -> Arc<Self> {
            Arc::new(Self {
                steps: Mutex::new(steps.into_iter().collect()),
                tokens: Mutex::new(Vec::new()),
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl RequestExecutor for Scripted {
        async fn execute(&self, request: &ReportRequest) -> Step {
            let _ = self.calls.fetch_add(1, Ordering::SeqCst);
            self.tokens.lock().unwrap().push(request.page_token.clone());
            self.steps
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(TransportError::new("scriptExhausted", "no more steps")))
        }
    }

    /// Never answers.
    #[derive(Clone, Copy)]
    struct Hanging;

    impl RequestExecutor for Hanging {
        async fn execute(&self, _request: &ReportRequest) -> Step {
            core::future::pending().await
        }
    }

    fn request() -> ReportRequest {
        ReportRequest {
            view_id: "1".into(),
            date_ranges: Vec::new(),
            sampling_level: SamplingLevel::Default,
            metrics: Vec::new(),
            dimensions: Vec::new(),
            page_size: 2,
            page_token: None,
            order_bys: Vec::new(),
        }
    }

    fn page(day: &str, token: Option<&str>) -> Step {
        Ok(BatchGetResponse::single(WireReport::from_rows([([day], ["1"])], token)))
    }

    fn fast() -> FetchOptions {
        FetchOptions {
            request_timeout: Duration::from_secs(5),
            backoff_unit: Duration::from_millis(1),
        }
    }

    #[test]
    fn test_backoff_doubles() {
        let unit = Duration::from_millis(100);
        assert_eq!(backoff_delay(0, unit, 0.0), Duration::from_millis(100));
        assert_eq!(backoff_delay(1, unit, 0.0), Duration::from_millis(200));
        assert_eq!(backoff_delay(3, unit, 0.5), Duration::from_millis(850));
    }

    #[test]
    fn test_retry_budget_covers_five_attempts() {
        assert_eq!(max_retry_attempts() + 1, MAX_ATTEMPTS_PER_PAGE);
    }

    #[test]
    fn test_settle_page_classifies_final_outcome() {
        let busy = TransportError::new("backendError", "busy");
        match settle_page(Err(busy), 3, MAX_ATTEMPTS_PER_PAGE) {
            Err(ReportError::RetriesExhausted { page, attempts, last }) => {
                assert_eq!(page, 3);
                assert_eq!(attempts, MAX_ATTEMPTS_PER_PAGE);
                assert_eq!(last.reason_code(), "backendError");
            }
            other => panic!("unexpected outcome {other:?}"),
        }

        let fatal = TransportError::new("badRequest", "nope");
        assert!(matches!(settle_page(Err(fatal), 1, 1), Err(ReportError::Transport(_))));

        let empty = settle_page(Ok(BatchGetResponse::default()), 1, 1);
        assert!(matches!(empty, Err(ReportError::Data(_))));
    }

    #[test]
    fn test_backoff_jitter_is_clamped() {
        let unit = Duration::from_millis(100);
        assert_eq!(backoff_delay(0, unit, 7.0), Duration::from_millis(200));
        assert_eq!(backoff_delay(0, unit, -1.0), Duration::from_millis(100));
    }

    #[tokio::test]
    async fn test_follows_tokens_in_order() {
        let executor = Scripted::new([page("a", Some("p2")), page("b", Some("p3")), page("c", None)]);
        let fetched = fetch_all(&executor, &request(), &fast(), &CancellationToken::new()).await.unwrap();

        assert_eq!(fetched.pages, 3);
        let days: Vec<_> = fetched.rows.iter().map(|r| r.dimensions[0].as_str()).collect();
        assert_eq!(days, ["a", "b", "c"]);
        assert_eq!(
            *executor.tokens.lock().unwrap(),
            vec![None, Some("p2".to_string()), Some("p3".to_string())]
        );
    }

    #[tokio::test]
    async fn test_attempts_reset_per_page() {
        let busy = || Err(TransportError::new("backendError", "busy"));
        let executor = Scripted::new([
            busy(),
            busy(),
            busy(),
            busy(),
            page("a", Some("p2")),
            busy(),
            busy(),
            busy(),
            busy(),
            page("b", None),
        ]);

        let fetched = fetch_all(&executor, &request(), &fast(), &CancellationToken::new()).await.unwrap();
        assert_eq!(fetched.rows.len(), 2);
        assert_eq!(executor.calls(), 10);
    }

    #[tokio::test]
    async fn test_exhaustion_reports_page_and_last_error() {
        let executor = Scripted::new([
            page("a", Some("p2")),
            Err(TransportError::new("quotaExceeded", "1")),
            Err(TransportError::new("quotaExceeded", "2")),
            Err(TransportError::new("quotaExceeded", "3")),
            Err(TransportError::new("quotaExceeded", "4")),
            Err(TransportError::new("userRateLimitExceeded", "5")),
        ]);

        let err = fetch_all(&executor, &request(), &fast(), &CancellationToken::new()).await.unwrap_err();
        match err {
            ReportError::RetriesExhausted { page, attempts, last } => {
                assert_eq!(page, 2);
                assert_eq!(attempts, MAX_ATTEMPTS_PER_PAGE);
                assert_eq!(last.reason_code(), "userRateLimitExceeded");
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert_eq!(executor.calls(), 6);
    }

    #[tokio::test]
    async fn test_fatal_error_stops_immediately() {
        let executor = Scripted::new([Err(TransportError::new("badRequest", "nope")), page("a", None)]);
        let err = fetch_all(&executor, &request(), &fast(), &CancellationToken::new()).await.unwrap_err();

        assert!(matches!(err, ReportError::Transport(ref e) if e.reason_code() == "badRequest"));
        assert_eq!(executor.calls(), 1);
    }

    #[tokio::test]
    async fn test_missing_report_is_data_error() {
        let executor = Scripted::new([Ok(BatchGetResponse::default())]);
        let err = fetch_all(&executor, &request(), &fast(), &CancellationToken::new()).await.unwrap_err();
        assert!(matches!(err, ReportError::Data(_)));
    }

    #[tokio::test]
    async fn test_sampling_and_golden_flags() {
        let mut sampled = WireReport::from_rows([(["a"], ["1"])], Some("p2"));
        sampled.data.samples_read_counts = vec!["10".into()];
        sampled.data.sampling_space_sizes = vec!["100".into()];

        let mut not_golden = WireReport::from_rows([(["b"], ["1"])], None);
        not_golden.data.is_data_golden = Some(false);

        let executor = Scripted::new([Ok(BatchGetResponse::single(sampled)), Ok(BatchGetResponse::single(not_golden))]);
        let fetched = fetch_all(&executor, &request(), &fast(), &CancellationToken::new()).await.unwrap();

        assert!(fetched.sampled);
        assert!(!fetched.data_golden);
    }

    #[tokio::test]
    async fn test_timeout_is_retried_then_exhausted() {
        let options = FetchOptions {
            request_timeout: Duration::from_millis(50),
            backoff_unit: Duration::from_millis(1),
        };

        let err = fetch_all(&Hanging, &request(), &options, &CancellationToken::new()).await.unwrap_err();
        match err {
            ReportError::RetriesExhausted { attempts, last, .. } => {
                assert_eq!(attempts, MAX_ATTEMPTS_PER_PAGE);
                assert_eq!(last.reason_code(), crate::reporting::error::TIMEOUT_REASON);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_cancel_during_request() {
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        drop(tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            trigger.cancel();
        }));

        let err = fetch_all(&Hanging, &request(), &FetchOptions::default(), &cancel).await.unwrap_err();
        assert!(err.is_cancelled());
    }

    #[tokio::test]
    async fn test_cancel_during_backoff() {
        let options = FetchOptions {
            request_timeout: Duration::from_secs(5),
            backoff_unit: Duration::from_secs(3600),
        };
        let executor = Scripted::new([Err(TransportError::new("quotaExceeded", "wait"))]);

        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        drop(tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            trigger.cancel();
        }));

        let err = fetch_all(&executor, &request(), &options, &cancel).await.unwrap_err();
        assert!(err.is_cancelled());
        assert_eq!(executor.calls(), 1);
    }

    #[tokio::test]
    async fn test_already_cancelled_sends_nothing() {
        let executor = Scripted::new([page("a", None)]);
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = fetch_all(&executor, &request(), &fast(), &cancel).await.unwrap_err();
        assert!(err.is_cancelled());
        assert_eq!(executor.calls(), 0);
    }
}
