//! Blocking `ureq` round trips run on tokio's blocking pool.

use std::time::Duration;

use async_trait::async_trait;
use todo_core::{ApiError, HttpMethod, HttpRequest, HttpResponse, Transport};

/// Connecting is always bounded, even with the request timeout turned off.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    /// `timeout` bounds the blocking call itself so an abandoned request does
    /// not pin a blocking thread forever.
    ///
    /// Status-code-as-error is disabled: 4xx/5xx responses come back as data
    /// for `TodoClient` to interpret.
    pub fn new(timeout: Option<Duration>) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(timeout)
            .timeout_connect(Some(CONNECT_TIMEOUT))
            .build()
            .new_agent();
        Self { agent }
    }
}

#[async_trait]
impl Transport for UreqTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let agent = self.agent.clone();
        tokio::task::spawn_blocking(move || execute(&agent, request))
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?
    }
}

fn with_headers<B>(
    mut builder: ureq::RequestBuilder<B>,
    headers: &[(String, String)],
) -> ureq::RequestBuilder<B> {
    for (key, value) in headers {
        builder = builder.header(key.as_str(), value.as_str());
    }
    builder
}

fn execute(agent: &ureq::Agent, req: HttpRequest) -> Result<HttpResponse, ApiError> {
    let url = req.path.as_str();
    let headers = req.headers.as_slice();
    // DELETE carries `{id}` in its body, which ureq only sends on request.
    let result = match (req.method, req.body.as_deref()) {
        (HttpMethod::Get, _) => with_headers(agent.get(url), headers).call(),
        (HttpMethod::Delete, None) => with_headers(agent.delete(url), headers).call(),
        (HttpMethod::Delete, Some(body)) => {
            with_headers(agent.delete(url).force_send_body(), headers).send(body.as_bytes())
        }
        (HttpMethod::Post, body) => {
            with_headers(agent.post(url), headers).send(body.unwrap_or_default().as_bytes())
        }
        (HttpMethod::Put, body) => {
            with_headers(agent.put(url), headers).send(body.unwrap_or_default().as_bytes())
        }
    };
    let mut response = result.map_err(|e| ApiError::Transport(e.to_string()))?;

    let status = response.status().as_u16();
    let body = response
        .body_mut()
        .read_to_string()
        .map_err(|e| ApiError::Transport(e.to_string()))?;
    log::debug!("{} {} -> {status}", req.method, req.path);
    Ok(HttpResponse::new(status, body))
}
