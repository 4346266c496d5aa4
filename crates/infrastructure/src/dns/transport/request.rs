use super::RawObserver;
use crate::dns::codec::QueryMessage;
use bytes::Bytes;
use ferrous_doh_domain::{DnsQuery, DomainError, QueryFlags, QUERY_MAX_RESPONSE_SIZE_TCP};
use http::header::{ACCEPT, CONTENT_TYPE};
use http::{Method, Request, Uri};

/// Content type of DNS wire messages carried over HTTP (RFC 8484 §6)
pub const DNS_MESSAGE_CONTENT_TYPE: &str = "application/dns-message";

/// Shape `query` for DoH and wrap it in a POST request to `url`.
///
/// The caller's query is cloned and the clone gets ID 0, the DO bit, block
/// padding and the stream-sized response class. Returns the request and the
/// message that was serialized into it.
pub fn build_request(
    query: &DnsQuery,
    url: &str,
    observer: Option<&RawObserver>,
) -> Result<(Request<Bytes>, QueryMessage), DomainError> {
    // RFC 8484 §4.1: the HTTP exchange already pairs request and response.
    let mut query = query.clone();
    query.id = 0;
    query.flags |= QueryFlags::DNSSEC | QueryFlags::BLOCK_LENGTH_PADDING;
    query.max_size = QUERY_MAX_RESPONSE_SIZE_TCP;

    let message = QueryMessage::from_query(&query)?;
    let raw_query = message.pack()?;

    if let Some(observe) = observer {
        observe(raw_query.clone());
    }

    let uri = parse_url(url)?;
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, DNS_MESSAGE_CONTENT_TYPE)
        .header(ACCEPT, DNS_MESSAGE_CONTENT_TYPE)
        .body(Bytes::from(raw_query))
        .map_err(|e| DomainError::RequestConstruction(e.to_string()))?;

    Ok((request, message))
}

fn parse_url(url: &str) -> Result<Uri, DomainError> {
    let uri: Uri = url
        .parse()
        .map_err(|e| DomainError::RequestConstruction(format!("Invalid URL '{}': {}", url, e)))?;

    if !matches!(uri.scheme_str(), Some("http" | "https")) || uri.authority().is_none() {
        return Err(DomainError::RequestConstruction(format!(
            "URL must be absolute http(s): '{}'",
            url
        )));
    }

    Ok(uri)
}
