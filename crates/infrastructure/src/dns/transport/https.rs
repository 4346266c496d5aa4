//! DNS-over-HTTPS transport (RFC 8484, POST only).
//!
//! One exchange is one HTTP POST whose body is the packed query; the
//! answer comes back as the body of a `200` response.
//!
//! ```text
//! POST /dns-query HTTP/2
//! Content-Type: application/dns-message
//! Accept: application/dns-message
//!
//! <query wire bytes>
//! ```

use super::context::ExchangeContext;
use super::http_client::HttpClient;
use super::request::build_request;
use super::response::read_response;
use super::RawObserver;
use crate::dns::codec::DnsResponse;
use ferrous_doh_domain::{DnsQuery, DomainError};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// DNS-over-HTTPS transport (RFC 8484)
///
/// Holds only immutable configuration, so one instance can serve any number
/// of concurrent exchanges.
#[derive(Clone)]
pub struct HttpsTransport {
    client: Arc<dyn HttpClient>,
    url: Arc<str>,
    observe_raw_query: Option<RawObserver>,
    observe_raw_response: Option<RawObserver>,
}

impl HttpsTransport {
    pub fn new(client: Arc<dyn HttpClient>, url: impl Into<Arc<str>>) -> Self {
        Self {
            client,
            url: url.into(),
            observe_raw_query: None,
            observe_raw_response: None,
        }
    }

    /// Receives a copy of every serialized query before it is sent.
    pub fn with_raw_query_observer(
        mut self,
        observer: impl Fn(Vec<u8>) + Send + Sync + 'static,
    ) -> Self {
        self.observe_raw_query = Some(Arc::new(observer));
        self
    }

    /// Receives a copy of every response body before it is parsed.
    pub fn with_raw_response_observer(
        mut self,
        observer: impl Fn(Vec<u8>) + Send + Sync + 'static,
    ) -> Self {
        self.observe_raw_response = Some(Arc::new(observer));
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Send `query` and receive the matching response.
    ///
    /// Errors from the HTTP client come back as [`DomainError::RoundTrip`]
    /// holding the original error. When `ctx` ends first the result is
    /// [`DomainError::Canceled`] or [`DomainError::DeadlineExceeded`].
    pub async fn exchange(
        &self,
        ctx: &ExchangeContext,
        query: &DnsQuery,
    ) -> Result<DnsResponse, DomainError> {
        let (request, query_message) =
            build_request(query, &self.url, self.observe_raw_query.as_ref())?;

        debug!(
            url = %self.url,
            domain = %query.domain,
            record_type = %query.record_type,
            message_len = request.body().len(),
            "Sending DoH query"
        );

        let response = tokio::select! {
            biased;
            err = ctx.done() => return Err(err),
            result = self.client.round_trip(request) => result.map_err(DomainError::RoundTrip)?,
        };

        debug!(
            url = %self.url,
            status = response.status().as_u16(),
            "DoH response received"
        );

        read_response(
            ctx,
            response,
            &query_message,
            self.observe_raw_response.as_ref(),
        )
        .await
    }
}

impl fmt::Debug for HttpsTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpsTransport")
            .field("url", &self.url)
            .field("observe_raw_query", &self.observe_raw_query.is_some())
            .field("observe_raw_response", &self.observe_raw_response.is_some())
            .finish()
    }
}
