//! The seam where the host performs network I/O.

use async_trait::async_trait;

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};

/// Executes one request and hands back whatever the server answered.
///
/// Non-2xx responses are data, not errors: implementations return them as
/// `Ok(HttpResponse)` and leave status interpretation to `TodoClient`. Only
/// failures that produce no response at all map to `ApiError::Transport`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        (**self).execute(request).await
    }
}
