use super::{BatchGetResponse, ReportRequest, TransportError};
use std::sync::Arc;

/// An already-authenticated capability that runs one page request.
///
/// Implementations only need to be safe for sequential use by a single fetch
/// loop; the fetcher never issues two requests at once.
pub trait RequestExecutor: Send + Sync {
    fn execute(&self, request: &ReportRequest) -> impl Future<Output = Result<BatchGetResponse, TransportError>> + Send;
}

impl<E: RequestExecutor> RequestExecutor for Arc<E> {
    fn execute(&self, request: &ReportRequest) -> impl Future<Output = Result<BatchGetResponse, TransportError>> + Send {
        (**self).execute(request)
    }
}

impl<E: RequestExecutor> RequestExecutor for &E {
    fn execute(&self, request: &ReportRequest) -> impl Future<Output = Result<BatchGetResponse, TransportError>> + Send {
        (**self).execute(request)
    }
}
