//! Authorization-transparent request execution.
//!
//! Every request goes through two explicit steps around the transport call:
//! a request step that attaches the current bearer token, and a response
//! step that decides whether a 401 earns the single permitted retry.

use std::sync::Arc;
use std::time::Duration;

use bon::Builder;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::http::{build_client, status_to_error};
use crate::auth::providers::DEFAULT_BASE_URL;
use crate::auth::{AuthStrategy, Token};
use crate::error::Result;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// A logical request against the resource API.
///
/// Rebuilt into a transport request on every attempt, so a retry never
/// depends on mutable state stored in the request itself.
#[derive(Debug, Clone, Builder)]
pub struct ApiRequest {
    pub method: Method,
    #[builder(into)]
    pub path: String,
    #[builder(default)]
    pub query: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self::builder().method(Method::GET).path(path).build()
    }

    pub fn patch(path: impl Into<String>, body: serde_json::Value) -> Self {
        Self::builder()
            .method(Method::PATCH)
            .path(path)
            .body(body)
            .build()
    }

    pub fn with_query(mut self, key: &str, value: &str) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }
}

/// Per-call retry bookkeeping, kept apart from the request payload.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RequestContext {
    pub attempts: u32,
    pub retried: bool,
}

/// What the response step decided for one attempt.
#[derive(Debug)]
enum Step {
    Complete(Response),
    Retry,
}

/// Wraps the transport so each request carries a valid bearer token and a
/// rejected token is renewed and the request resubmitted at most once.
#[derive(Clone)]
pub struct RequestPipeline {
    http: reqwest::Client,
    base_url: String,
    strategy: Arc<dyn AuthStrategy>,
}

impl std::fmt::Debug for RequestPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestPipeline")
            .field("base_url", &self.base_url)
            .field("strategy", &self.strategy.identifier())
            .finish()
    }
}

impl RequestPipeline {
    pub fn new(strategy: Arc<dyn AuthStrategy>) -> Result<Self> {
        Ok(Self {
            http: build_client(DEFAULT_TIMEOUT)?,
            base_url: DEFAULT_BASE_URL.to_string(),
            strategy,
        })
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http = client;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn strategy(&self) -> &Arc<dyn AuthStrategy> {
        &self.strategy
    }

    /// Execute one logical request and return the successful response.
    ///
    /// Token acquisition failures surface as
    /// [`FlairError::Authentication`](crate::error::FlairError::Authentication);
    /// a 401 on the retried attempt surfaces as the API error unchanged.
    pub async fn execute(&self, request: &ApiRequest) -> Result<Response> {
        let mut context = RequestContext::default();
        loop {
            let token = self.strategy.valid_token().await?;
            context.attempts += 1;
            let response = self.dispatch(request, &token).await?;
            match self.inspect(&mut context, request, &token, response) {
                Step::Complete(response) => return ensure_success(response).await,
                Step::Retry => continue,
            }
        }
    }

    /// Execute a request and deserialize its JSON body.
    pub async fn execute_json<T: DeserializeOwned>(&self, request: &ApiRequest) -> Result<T> {
        let response = self.execute(request).await?;
        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }

    async fn dispatch(&self, request: &ApiRequest, token: &Token) -> Result<Response> {
        let url = format!("{}{}", self.base_url, request.path);
        let mut builder = self
            .http
            .request(request.method.clone(), url)
            .header(AUTHORIZATION, token.authorization())
            .header(ACCEPT, "application/json");
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        Ok(builder.send().await?)
    }

    fn inspect(
        &self,
        context: &mut RequestContext,
        request: &ApiRequest,
        token: &Token,
        response: Response,
    ) -> Step {
        if response.status() != StatusCode::UNAUTHORIZED {
            return Step::Complete(response);
        }
        if context.retried {
            warn!(
                method = %request.method,
                path = %request.path,
                attempts = context.attempts,
                "Request rejected again after token renewal"
            );
            return Step::Complete(response);
        }
        context.retried = true;
        let cleared = self.strategy.invalidate_rejected(token);
        debug!(
            method = %request.method,
            path = %request.path,
            strategy = self.strategy.identifier(),
            cleared,
            "Bearer token rejected, renewing and retrying once"
        );
        Step::Retry
    }
}

async fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(status_to_error(status.as_u16(), &body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_builders_fill_defaults() {
        let request = ApiRequest::get("/api/rooms").with_query("expand", "structure,pucks");
        assert_eq!(request.method, Method::GET);
        assert_eq!(request.path, "/api/rooms");
        assert_eq!(
            request.query,
            vec![("expand".to_string(), "structure,pucks".to_string())]
        );
        assert!(request.body.is_none());

        let request = ApiRequest::patch("/api/vents/1", serde_json::json!({"percent-open": 50}));
        assert_eq!(request.method, Method::PATCH);
        assert!(request.body.is_some());
    }

    #[test]
    fn fresh_context_has_not_retried() {
        let context = RequestContext::default();
        assert_eq!(context.attempts, 0);
        assert!(!context.retried);
    }
}
