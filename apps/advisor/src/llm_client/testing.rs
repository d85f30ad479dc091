//! In-process `GenerativeModel` doubles for unit tests.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::errors::EndpointError;
use crate::llm_client::{GenerationRequest, GenerativeModel};

enum Reply {
    Text(String),
    Unreachable,
}

/// Returns a fixed reply and records every request it receives.
pub struct StubModel {
    reply: Reply,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl StubModel {
    pub fn replying(text: impl Into<String>) -> Self {
        Self {
            reply: Reply::Text(text.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn unreachable() -> Self {
        Self {
            reply: Reply::Unreachable,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> GenerationRequest {
        self.requests()
            .pop()
            .expect("stub model was never called")
    }
}

#[async_trait]
impl GenerativeModel for StubModel {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, EndpointError> {
        self.requests.lock().unwrap().push(request.clone());
        match &self.reply {
            Reply::Text(text) => Ok(text.clone()),
            Reply::Unreachable => Err(EndpointError::Api {
                status: 503,
                message: "service unavailable".to_string(),
            }),
        }
    }
}
