//! In-memory transport for unit tests.

use std::sync::Mutex;

use serde_json::Value;

use crate::error::ApiError;
use crate::transport::{ApiRequest, ApiResponse, Transport};

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    pub bearer: Option<String>,
}

type Handler = Box<dyn Fn(&ApiRequest, Option<&str>) -> ApiResponse + Send + Sync>;

/// Answers every request through a closure and records what was sent.
pub struct FnTransport {
    handler: Handler,
    calls: Mutex<Vec<RecordedCall>>,
}

impl FnTransport {
    pub fn new(
        handler: impl Fn(&ApiRequest, Option<&str>) -> ApiResponse + Send + Sync + 'static,
    ) -> Self {
        Self {
            handler: Box::new(handler),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl Transport for FnTransport {
    async fn send(
        &self,
        request: &ApiRequest,
        bearer: Option<&str>,
    ) -> Result<ApiResponse, ApiError> {
        self.calls.lock().unwrap().push(RecordedCall {
            path: request.path.clone(),
            query: request.query.clone(),
            body: request.body.clone(),
            bearer: bearer.map(str::to_string),
        });
        Ok((self.handler)(request, bearer))
    }
}
