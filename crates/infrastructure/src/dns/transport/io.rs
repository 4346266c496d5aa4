use super::context::ExchangeContext;
use super::http_client::ResponseBody;
use ferrous_doh_domain::{BoxError, DomainError};

#[derive(Debug, thiserror::Error)]
pub enum ReadLimitedError {
    /// The context ended while reading.
    #[error(transparent)]
    Context(DomainError),

    #[error("Failed to read response body: {0}")]
    Body(BoxError),
}

/// Read at most `limit` bytes from `body`.
///
/// Stops pulling chunks once `limit` bytes are collected and drops whatever
/// lies beyond; an oversized body is not an error. Each pull is raced
/// against `ctx`.
pub async fn read_limited(
    ctx: &ExchangeContext,
    body: &mut dyn ResponseBody,
    limit: usize,
) -> Result<Vec<u8>, ReadLimitedError> {
    let mut buf = Vec::new();

    while buf.len() < limit {
        let next = tokio::select! {
            biased;
            err = ctx.done() => return Err(ReadLimitedError::Context(err)),
            chunk = body.chunk() => chunk.map_err(ReadLimitedError::Body)?,
        };

        let Some(chunk) = next else {
            break;
        };

        let room = limit - buf.len();
        buf.extend_from_slice(&chunk[..chunk.len().min(room)]);
    }

    Ok(buf)
}
