pub mod context;
pub mod http_client;
pub mod https;
pub mod io;
pub mod request;
pub mod response;

use std::sync::Arc;

pub use context::ExchangeContext;
pub use http_client::{build_http_client, HttpClient, HttpResponse, ResponseBody};
pub use https::HttpsTransport;
pub use io::{read_limited, ReadLimitedError};
pub use request::{build_request, DNS_MESSAGE_CONTENT_TYPE};
pub use response::read_response;

/// Side-effect-only callback receiving its own copy of raw wire bytes.
pub type RawObserver = Arc<dyn Fn(Vec<u8>) + Send + Sync>;
