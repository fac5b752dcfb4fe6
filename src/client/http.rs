//! HTTP plumbing shared by every endpoint group.

use metrics::{counter, histogram};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

use crate::auth::{provider_from_source, TokenProvider};
use crate::config::ConsoleConfig;
use crate::error::{ConsoleError, ConsoleResult};

/// Client for the CallingBird REST backend.
///
/// Built once per session. The bearer token is asked from the
/// [`TokenProvider`] on every request; no token is cached here.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    tokens: Arc<dyn TokenProvider>,
}

impl ApiClient {
    pub fn new(config: &ConsoleConfig, tokens: Arc<dyn TokenProvider>) -> ConsoleResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            base_url: config.api_base_url.clone(),
            tokens,
        })
    }

    pub fn from_config(config: &ConsoleConfig) -> ConsoleResult<Self> {
        Self::new(config, provider_from_source(&config.token_source))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn request(&self, method: Method, path: &str, request_id: &str) -> ConsoleResult<RequestBuilder> {
        let token = self.tokens.token().await?;

        Ok(self
            .http
            .request(method, self.url(path))
            .bearer_auth(token)
            .header("X-Request-ID", request_id))
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, route: &'static str, path: &str) -> ConsoleResult<T> {
        let request_id = Uuid::new_v4().to_string();
        let request = self.request(Method::GET, path, &request_id).await?;
        let response = self.dispatch(request, Method::GET, route, &request_id).await?;
        Self::decode(response).await
    }

    pub(crate) async fn send_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        method: Method,
        route: &'static str,
        path: &str,
        body: &B,
    ) -> ConsoleResult<T> {
        let response = self.send_body(method, route, path, body).await?;
        Self::decode(response).await
    }

    /// Like [`ApiClient::send_json`] for update endpoints that may answer
    /// `204 No Content` or an empty 2xx body: the sent value stands in for
    /// the echo.
    pub(crate) async fn send_json_or_echo<B>(
        &self,
        method: Method,
        route: &'static str,
        path: &str,
        body: &B,
    ) -> ConsoleResult<B>
    where
        B: Serialize + DeserializeOwned + Clone,
    {
        let response = self.send_body(method, route, path, body).await?;
        let bytes = response.bytes().await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            tracing::debug!(route, "Backend sent no body, keeping the sent value");
            return Ok(body.clone());
        }
        Self::parse(&bytes)
    }

    async fn send_body<B: Serialize + ?Sized>(
        &self,
        method: Method,
        route: &'static str,
        path: &str,
        body: &B,
    ) -> ConsoleResult<Response> {
        let request_id = Uuid::new_v4().to_string();
        let request = self.request(method.clone(), path, &request_id).await?.json(body);
        self.dispatch(request, method, route, &request_id).await
    }

    pub(crate) async fn delete(&self, route: &'static str, path: &str) -> ConsoleResult<()> {
        let request_id = Uuid::new_v4().to_string();
        let request = self.request(Method::DELETE, path, &request_id).await?;
        self.dispatch(request, Method::DELETE, route, &request_id).await?;
        Ok(())
    }

    /// Sends the request, records metrics and turns non-2xx into errors.
    async fn dispatch(
        &self,
        request: RequestBuilder,
        method: Method,
        route: &'static str,
        request_id: &str,
    ) -> ConsoleResult<Response> {
        tracing::debug!(%method, route, request_id, "Calling backend");

        let start = Instant::now();
        let result = request.send().await;
        let status = match &result {
            Ok(response) => response.status().as_u16().to_string(),
            Err(_) => "transport_error".to_string(),
        };

        counter!(
            "console_api_requests_total",
            "method" => method.to_string(),
            "route" => route,
            "status" => status
        )
        .increment(1);

        histogram!(
            "console_api_request_duration_seconds",
            "method" => method.to_string(),
            "route" => route
        )
        .record(start.elapsed().as_secs_f64());

        let response = result.map_err(|e| {
            tracing::error!(error = %e, %method, route, request_id, "Backend request failed");
            ConsoleError::Network(e)
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        tracing::error!(status = %status, body, %method, route, request_id, "Backend returned error");

        Err(match status {
            StatusCode::UNAUTHORIZED => ConsoleError::Unauthorized(body),
            StatusCode::NOT_FOUND => ConsoleError::NotFound(body),
            _ => ConsoleError::Http { status, body },
        })
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> ConsoleResult<T> {
        let bytes = response.bytes().await?;
        Self::parse(&bytes)
    }

    fn parse<T: DeserializeOwned>(bytes: &[u8]) -> ConsoleResult<T> {
        serde_json::from_slice(bytes).map_err(|e| {
            tracing::error!(error = %e, "Failed to parse backend response");
            ConsoleError::Serialization(e)
        })
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}
