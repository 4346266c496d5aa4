pub mod codec;
pub mod transport;

pub use codec::{DnsResponse, QueryMessage};
pub use transport::{build_http_client, ExchangeContext, HttpClient, HttpsTransport, RawObserver};
