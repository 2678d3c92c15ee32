//! In-memory transport for unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use crate::transport::{Transport, TransportError, TransportResult};

#[derive(Debug, Clone)]
pub(crate) enum Reply {
    Body(String),
    Timeout,
}

/// Answers requests from a fixed script and records what was asked.
#[derive(Debug, Default)]
pub(crate) struct ScriptedTransport {
    replies: Mutex<VecDeque<Reply>>,
    requests: Mutex<Vec<Url>>,
}

impl ScriptedTransport {
    pub(crate) fn new(replies: Vec<Reply>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// A transport that answers every request with `body`.
    pub(crate) fn repeating(body: &str, times: usize) -> Self {
        Self::new(vec![Reply::Body(body.to_string()); times])
    }

    pub(crate) fn requests(&self) -> Vec<Url> {
        self.requests.lock().unwrap().clone()
    }

    fn next(&self, url: &Url) -> TransportResult<String> {
        self.requests.lock().unwrap().push(url.clone());
        match self.replies.lock().unwrap().pop_front() {
            Some(Reply::Body(body)) => Ok(body),
            Some(Reply::Timeout) | None => Err(TransportError::Timeout {
                url: url.to_string(),
                timeout: Duration::from_secs(10),
            }),
        }
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn get(&self, url: &Url) -> TransportResult<String> {
        self.next(url)
    }

    async fn post_json(&self, url: &Url, _payload: &serde_json::Value) -> TransportResult<String> {
        self.next(url)
    }
}
