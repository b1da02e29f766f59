//! In-memory transport with scripted replies.

use async_trait::async_trait;
use blacklistdb::error::ApiError;
use blacklistdb::http::{MultipartPayload, Transport};
use futures::channel::oneshot;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

type Handler = Box<dyn Fn(&[(String, String)]) -> Result<Value, ApiError> + Send + Sync>;

/// A scripted reply for one request.
pub enum Reply {
    /// Answer immediately
    Ready(Result<Value, ApiError>),
    /// Answer when the paired sender fires
    Deferred(oneshot::Receiver<Result<Value, ApiError>>),
}

/// A request the transport received.
#[derive(Debug, Clone)]
pub struct Call {
    pub method: &'static str,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub payload: Option<MultipartPayload>,
}

impl Call {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Replies are queued per path and consumed in order. When a path's queue is
/// empty its handler answers, if one is set; otherwise the request fails
/// with a 404.
#[derive(Default)]
pub struct MockTransport {
    replies: Mutex<HashMap<String, VecDeque<Reply>>>,
    handlers: Mutex<HashMap<String, Handler>>,
    calls: Mutex<Vec<Call>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, path: &str, reply: Reply) {
        self.replies
            .lock()
            .unwrap()
            .entry(path.to_string())
            .or_default()
            .push_back(reply);
    }

    pub fn ok(&self, path: &str, body: Value) {
        self.push(path, Reply::Ready(Ok(body)));
    }

    pub fn fail(&self, path: &str, error: ApiError) {
        self.push(path, Reply::Ready(Err(error)));
    }

    /// Queue a reply that resolves when the returned sender is used.
    pub fn defer(&self, path: &str) -> oneshot::Sender<Result<Value, ApiError>> {
        let (tx, rx) = oneshot::channel();
        self.push(path, Reply::Deferred(rx));
        tx
    }

    pub fn respond_with<F>(&self, path: &str, handler: F)
    where
        F: Fn(&[(String, String)]) -> Result<Value, ApiError> + Send + Sync + 'static,
    {
        self.handlers
            .lock()
            .unwrap()
            .insert(path.to_string(), Box::new(handler));
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, path: &str) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|call| call.path == path)
            .collect()
    }

    fn next_reply(&self, path: &str, query: &[(String, String)]) -> Reply {
        let queued = self
            .replies
            .lock()
            .unwrap()
            .get_mut(path)
            .and_then(VecDeque::pop_front);
        if let Some(reply) = queued {
            return reply;
        }

        let handlers = self.handlers.lock().unwrap();
        match handlers.get(path) {
            Some(handler) => Reply::Ready(handler(query)),
            None => Reply::Ready(Err(ApiError::Status {
                status: 404,
                message: format!("no reply scripted for {}", path),
            })),
        }
    }

    async fn answer(&self, call: Call) -> Result<Value, ApiError> {
        let reply = self.next_reply(&call.path, &call.query);
        self.calls.lock().unwrap().push(call);
        match reply {
            Reply::Ready(result) => result,
            Reply::Deferred(rx) => rx
                .await
                .unwrap_or_else(|_| Err(ApiError::Transport("reply dropped".to_string()))),
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Value, ApiError> {
        let call = Call {
            method: "GET",
            path: path.to_string(),
            query: query
                .iter()
                .map(|(key, value)| (key.to_string(), value.clone()))
                .collect(),
            payload: None,
        };
        self.answer(call).await
    }

    async fn post_multipart(
        &self,
        path: &str,
        payload: MultipartPayload,
    ) -> Result<Value, ApiError> {
        let call = Call {
            method: "POST",
            path: path.to_string(),
            query: Vec::new(),
            payload: Some(payload),
        };
        self.answer(call).await
    }
}
