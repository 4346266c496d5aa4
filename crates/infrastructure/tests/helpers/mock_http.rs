#![allow(dead_code)]
use async_trait::async_trait;
use bytes::Bytes;
use ferrous_doh_domain::BoxError;
use ferrous_doh_infrastructure::dns::transport::{HttpClient, HttpResponse, ResponseBody};
use http::header::CONTENT_TYPE;
use http::{HeaderValue, StatusCode};
use std::collections::VecDeque;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const DNS_MESSAGE: &str = "application/dns-message";

/// Body that counts how many times it has been released.
pub struct MockBody {
    chunks: VecDeque<Bytes>,
    fail_at_end: bool,
    stall_at_end: bool,
    drops: Arc<AtomicUsize>,
}

impl MockBody {
    pub fn new(body: Vec<u8>, drops: Arc<AtomicUsize>) -> Self {
        // Several chunks so the bounded reader has to loop.
        let chunks = body
            .chunks(100)
            .map(Bytes::copy_from_slice)
            .collect::<VecDeque<_>>();
        Self {
            chunks,
            fail_at_end: false,
            stall_at_end: false,
            drops,
        }
    }

    pub fn failing(mut self) -> Self {
        self.fail_at_end = true;
        self
    }

    pub fn stalling(mut self) -> Self {
        self.stall_at_end = true;
        self
    }
}

#[async_trait]
impl ResponseBody for MockBody {
    async fn chunk(&mut self) -> Result<Option<Bytes>, BoxError> {
        if let Some(chunk) = self.chunks.pop_front() {
            return Ok(Some(chunk));
        }
        if self.fail_at_end {
            return Err("unexpected EOF".into());
        }
        if self.stall_at_end {
            std::future::pending::<()>().await;
        }
        Ok(None)
    }
}

impl Drop for MockBody {
    fn drop(&mut self) {
        self.drops.fetch_add(1, Ordering::SeqCst);
    }
}

/// What the mock server answers with.
#[derive(Debug, Clone)]
pub struct MockReply {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
    pub fail_body: bool,
    pub stall_body: bool,
}

impl MockReply {
    pub fn dns(body: Vec<u8>) -> Self {
        Self {
            status: 200,
            content_type: Some(DNS_MESSAGE.to_string()),
            body,
            fail_body: false,
            stall_body: false,
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    pub fn with_content_type(mut self, content_type: Option<&str>) -> Self {
        self.content_type = content_type.map(str::to_string);
        self
    }

    pub fn failing_body(mut self) -> Self {
        self.fail_body = true;
        self
    }

    pub fn stalling_body(mut self) -> Self {
        self.stall_body = true;
        self
    }

    pub fn into_response(self, drops: Arc<AtomicUsize>) -> HttpResponse {
        let mut body = MockBody::new(self.body, drops);
        if self.fail_body {
            body = body.failing();
        }
        if self.stall_body {
            body = body.stalling();
        }

        let body: Box<dyn ResponseBody> = Box::new(body);
        let mut response = http::Response::new(body);
        *response.status_mut() =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if let Some(content_type) = self.content_type {
            response.headers_mut().insert(
                CONTENT_TYPE,
                HeaderValue::from_str(&content_type).unwrap(),
            );
        }
        response
    }
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: http::Method,
    pub uri: String,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

type Handler = dyn Fn(&[u8]) -> MockReply + Send + Sync;

/// In-process round-tripper answering through a closure over the query bytes.
pub struct MockHttpClient {
    handler: Box<Handler>,
    requests: Mutex<Vec<RecordedRequest>>,
    body_drops: Arc<AtomicUsize>,
}

impl MockHttpClient {
    pub fn new(handler: impl Fn(&[u8]) -> MockReply + Send + Sync + 'static) -> Arc<Self> {
        Arc::new(Self {
            handler: Box::new(handler),
            requests: Mutex::new(Vec::new()),
            body_drops: Arc::new(AtomicUsize::new(0)),
        })
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn body_drops(&self) -> usize {
        self.body_drops.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn round_trip(&self, request: http::Request<Bytes>) -> Result<HttpResponse, BoxError> {
        let recorded = RecordedRequest {
            method: request.method().clone(),
            uri: request.uri().to_string(),
            content_type: request
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string),
            body: request.body().to_vec(),
        };
        let reply = (self.handler)(&recorded.body);
        self.requests.lock().unwrap().push(recorded);
        Ok(reply.into_response(Arc::clone(&self.body_drops)))
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct ConnectionRefused;

impl fmt::Display for ConnectionRefused {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "connection refused")
    }
}

impl std::error::Error for ConnectionRefused {}

/// Round-tripper that always fails with [`ConnectionRefused`].
pub struct FailingHttpClient;

#[async_trait]
impl HttpClient for FailingHttpClient {
    async fn round_trip(&self, _request: http::Request<Bytes>) -> Result<HttpResponse, BoxError> {
        Err(Box::new(ConnectionRefused))
    }
}

/// Round-tripper that never answers.
pub struct StalledHttpClient;

#[async_trait]
impl HttpClient for StalledHttpClient {
    async fn round_trip(&self, _request: http::Request<Bytes>) -> Result<HttpResponse, BoxError> {
        std::future::pending::<Result<HttpResponse, BoxError>>().await
    }
}
