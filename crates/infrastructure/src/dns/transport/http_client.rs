//! HTTP round-tripper port and its reqwest adapter.

use async_trait::async_trait;
use bytes::Bytes;
use ferrous_doh_domain::{BoxError, UpstreamConfig};
use std::time::Duration;

/// Streaming body of an HTTP response. Dropping it releases the underlying
/// connection resources.
#[async_trait]
pub trait ResponseBody: Send {
    /// Next chunk of the body, or `None` at the end.
    async fn chunk(&mut self) -> Result<Option<Bytes>, BoxError>;
}

pub type HttpResponse = http::Response<Box<dyn ResponseBody>>;

/// Performs one HTTP request and returns one HTTP response.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn round_trip(&self, request: http::Request<Bytes>) -> Result<HttpResponse, BoxError>;
}

#[async_trait]
impl ResponseBody for reqwest::Response {
    async fn chunk(&mut self) -> Result<Option<Bytes>, BoxError> {
        Ok(reqwest::Response::chunk(self).await?)
    }
}

#[async_trait]
impl HttpClient for reqwest::Client {
    async fn round_trip(&self, request: http::Request<Bytes>) -> Result<HttpResponse, BoxError> {
        let request = reqwest::Request::try_from(request)?;
        let response = self.execute(request).await?;

        let status = response.status();
        let headers = response.headers().clone();

        let body: Box<dyn ResponseBody> = Box::new(response);
        let mut http_response = http::Response::new(body);
        *http_response.status_mut() = status;
        *http_response.headers_mut() = headers;
        Ok(http_response)
    }
}

/// Shared HTTP client for DoH exchanges: rustls, pooled connections.
pub fn build_http_client(config: &UpstreamConfig) -> reqwest::Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder()
        .use_rustls_tls()
        .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
        .pool_max_idle_per_host(config.pool_max_idle_per_host);

    if config.http2_prior_knowledge {
        builder = builder.http2_prior_knowledge();
    }

    builder.build()
}
