use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use tolk_core::Result;
use tolk_core::session::{GenerateClient, GenerateRequest, GenerateResponse};

/// Replays canned replies in order and records every request it receives.
pub struct ScriptedClient {
    replies: Mutex<VecDeque<Result<GenerateResponse>>>,
    requests: Mutex<Vec<GenerateRequest>>,
}

impl ScriptedClient {
    pub fn new(replies: Vec<Result<GenerateResponse>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<GenerateRequest> {
        self.requests.lock().unwrap().clone()
    }
}

pub fn reply(response: &str, context: &[i64]) -> Result<GenerateResponse> {
    Ok(GenerateResponse {
        response: response.to_string(),
        context: context.to_vec(),
    })
}

#[async_trait]
impl GenerateClient for ScriptedClient {
    fn endpoint(&self) -> &str {
        "http://scripted/api/generate"
    }

    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse> {
        self.requests.lock().unwrap().push(request.clone());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(tolk_core::TolkError::internal("no reply scripted")))
    }
}
