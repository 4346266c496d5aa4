use super::context::ExchangeContext;
use super::http_client::HttpResponse;
use super::io::{read_limited, ReadLimitedError};
use super::request::DNS_MESSAGE_CONTENT_TYPE;
use super::RawObserver;
use crate::dns::codec::{validate_response, DnsResponse, QueryMessage};
use ferrous_doh_domain::{DomainError, QUERY_MAX_RESPONSE_SIZE_TCP};
use hickory_proto::op::Message;
use http::header::CONTENT_TYPE;
use http::StatusCode;
use tracing::{debug, warn};

/// Admit, read, parse and validate a DoH response.
///
/// The response body is owned here and released on every return path.
pub async fn read_response(
    ctx: &ExchangeContext,
    response: HttpResponse,
    query: &QueryMessage,
    observer: Option<&RawObserver>,
) -> Result<DnsResponse, DomainError> {
    let (parts, mut body) = response.into_parts();

    if parts.status != StatusCode::OK {
        warn!(status = parts.status.as_u16(), "DoH server returned non-200 status");
        return Err(DomainError::ServerMisbehaving);
    }

    let content_type = parts.headers.get(CONTENT_TYPE).map(|v| v.as_bytes());
    if content_type != Some(DNS_MESSAGE_CONTENT_TYPE.as_bytes()) {
        warn!(content_type = ?parts.headers.get(CONTENT_TYPE), "DoH server returned unexpected content type");
        return Err(DomainError::ServerMisbehaving);
    }

    let raw_response = match read_limited(
        ctx,
        body.as_mut(),
        usize::from(QUERY_MAX_RESPONSE_SIZE_TCP),
    )
    .await
    {
        Ok(raw) => raw,
        Err(ReadLimitedError::Context(err)) => return Err(err),
        Err(ReadLimitedError::Body(e)) => {
            // A stream error can be the HTTP layer noticing the context first.
            if let Some(err) = ctx.err() {
                return Err(err);
            }
            debug!(error = %e, "Failed to read DoH response body");
            return Err(DomainError::ServerMisbehaving);
        }
    };
    drop(body);

    debug!(response_len = raw_response.len(), "DoH response body read");

    if let Some(observe) = observer {
        observe(raw_response.clone());
    }

    let message = Message::from_vec(&raw_response).map_err(|e| {
        debug!(error = %e, "Failed to parse DoH response");
        DomainError::ServerMisbehaving
    })?;

    validate_response(query, message)
}
