//! Blocking execution of `HttpRequest` values.
//!
//! # Design
//! `Transport` is the seam between the pure request builders and the
//! network. `UreqTransport` disables ureq's status-code-as-error behavior so
//! 4xx/5xx responses come back as data for the caller to judge.

use ureq::{Agent, RequestBuilder};

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

pub trait Transport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

fn with_parts<B>(mut builder: RequestBuilder<B>, request: &HttpRequest) -> RequestBuilder<B> {
    for (name, value) in &request.query {
        builder = builder.query(name, value);
    }
    for (name, value) in &request.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

impl Transport for UreqTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        tracing::debug!(method = request.method.as_str(), path = %request.path, "sending request");
        let url = request.path.as_str();
        let body = request.body.as_deref();

        let mut response = match (request.method, body) {
            (HttpMethod::Get, _) => with_parts(self.agent.get(url), &request).call(),
            (HttpMethod::Delete, None) => with_parts(self.agent.delete(url), &request).call(),
            (HttpMethod::Delete, Some(body)) => {
                with_parts(self.agent.delete(url).force_send_body(), &request).send(body.as_bytes())
            }
            (HttpMethod::Post, Some(body)) => {
                with_parts(self.agent.post(url), &request).send(body.as_bytes())
            }
            (HttpMethod::Post, None) => with_parts(self.agent.post(url), &request).send_empty(),
            (HttpMethod::Put, Some(body)) => {
                with_parts(self.agent.put(url), &request).send(body.as_bytes())
            }
            (HttpMethod::Put, None) => with_parts(self.agent.put(url), &request).send_empty(),
        }?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(k, v)| Some((k.as_str().to_string(), v.to_str().ok()?.to_string())))
            .collect();
        let body = response.body_mut().read_to_string()?;
        tracing::debug!(status, "received response");

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
