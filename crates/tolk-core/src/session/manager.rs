use std::sync::Arc;
use std::time::Instant;

use super::client::GenerateClient;
use super::model::{ContextState, TurnReply};
use super::options::DecodingOptions;
use super::request::GenerateRequest;
use crate::error::Result;

const CODE_FENCE: &str = "```";

/// Issues turn-by-turn requests to the inference endpoint.
///
/// The manager itself is stateless: the caller passes the context to replay
/// and decides what to do with the context that comes back. The console
/// extends its own buffer; the form records the turn on its `Session`.
pub struct SessionManager {
    client: Arc<dyn GenerateClient>,
    system: String,
}

impl SessionManager {
    /// Creates a manager that sends `system` as the system instruction on every turn.
    pub fn new(client: Arc<dyn GenerateClient>, system: impl Into<String>) -> Self {
        Self {
            client,
            system: system.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        self.client.endpoint()
    }

    pub fn system(&self) -> &str {
        &self.system
    }

    /// Builds the request body for one turn.
    pub fn build_request(
        &self,
        prompt: &str,
        input_text: &str,
        model: &str,
        options: Option<DecodingOptions>,
        context: &ContextState,
    ) -> GenerateRequest {
        GenerateRequest {
            model: model.to_string(),
            prompt: format!("{prompt}{input_text}"),
            stream: false,
            context: context.to_vec(),
            system: self.system.clone(),
            options,
        }
    }

    /// Performs one exchange with the inference server.
    ///
    /// `context` is only read. On error nothing about the caller's state has
    /// changed, so a failed turn leaves the conversation exactly as it was.
    pub async fn send_turn(
        &self,
        prompt: &str,
        input_text: &str,
        model: &str,
        options: Option<DecodingOptions>,
        context: &ContextState,
    ) -> Result<TurnReply> {
        let request = self.build_request(prompt, input_text, model, options, context);

        tracing::debug!(
            model = %request.model,
            prompt_len = request.prompt.len(),
            context_len = request.context.len(),
            "[SessionManager] Sending turn to {}",
            self.client.endpoint()
        );

        let started = Instant::now();
        let response = match self.client.generate(&request).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("[SessionManager] Turn failed: {}", e);
                return Err(e);
            }
        };
        let duration = started.elapsed();

        tracing::info!(
            model = %request.model,
            returned_context = response.context.len(),
            elapsed_ms = duration.as_millis() as u64,
            "[SessionManager] Turn completed"
        );

        Ok(TurnReply {
            output: strip_code_fences(&response.response),
            context: response.context,
            duration,
        })
    }
}

/// Removes every literal triple-backtick sequence from model output.
pub fn strip_code_fences(text: &str) -> String {
    text.replace(CODE_FENCE, "")
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use async_trait::async_trait;

    use crate::error::{Result, TolkError};
    use crate::session::client::GenerateClient;
    use super::{SessionManager, strip_code_fences};
    use crate::session::model::{ContextState, Session, Turn};
    use crate::session::options::DecodingOptions;
    use crate::session::request::{GenerateRequest, GenerateResponse};

    // Mock client that replays scripted replies and records every request
    struct ScriptedClient {
        replies: Mutex<VecDeque<Result<GenerateResponse>>>,
        requests: Mutex<Vec<GenerateRequest>>,
    }

    impl ScriptedClient {
        fn new(replies: Vec<Result<GenerateResponse>>) -> Self {
            Self {
                replies: Mutex::new(replies.into()),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn sent(&self) -> Vec<GenerateRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl GenerateClient for ScriptedClient {
        fn endpoint(&self) -> &str {
            "http://localhost:11434/api/generate"
        }

        async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse> {
            self.requests.lock().unwrap().push(request.clone());
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(TolkError::internal("no scripted reply left")))
        }
    }

    fn ok(response: &str, context: &[i64]) -> Result<GenerateResponse> {
        Ok(GenerateResponse {
            response: response.to_string(),
            context: context.to_vec(),
        })
    }

    fn recorded(model: &str, prompt: &str, input: &str, output: &str) -> Turn {
        Turn {
            model: model.to_string(),
            prompt: prompt.to_string(),
            input: input.to_string(),
            output: output.to_string(),
            elapsed: Duration::ZERO,
            score: None,
        }
    }

    #[tokio::test]
    async fn test_context_sent_is_concatenation_of_all_previous_replies() {
        let client = Arc::new(ScriptedClient::new(vec![
            ok("one", &[1, 2]),
            ok("two", &[3]),
            ok("three", &[4, 5, 6]),
            ok("four", &[]),
        ]));
        let manager = SessionManager::new(client.clone(), "You are a helpful assistant.");

        let mut context = ContextState::new();
        for line in ["a", "b", "c", "d"] {
            let reply = manager
                .send_turn(line, "", "phi3:mini", None, &context)
                .await
                .unwrap();
            context.extend_from(&reply.context);
        }

        let sent: Vec<Vec<i64>> = client.sent().into_iter().map(|r| r.context).collect();
        assert_eq!(
            sent,
            vec![vec![], vec![1, 2], vec![1, 2, 3], vec![1, 2, 3, 4, 5, 6]]
        );
        assert_eq!(context.as_slice(), &[1, 2, 3, 4, 5, 6]);
    }

    #[tokio::test]
    async fn test_failed_turn_leaves_context_untouched() {
        let client = Arc::new(ScriptedClient::new(vec![
            ok("first", &[9, 8]),
            Err(TolkError::api(500, "{\"error\":\"model not found\"}")),
            ok("third", &[7]),
        ]));
        let manager = SessionManager::new(client.clone(), "sys");
        let mut session = Session::new(manager.endpoint());

        let reply = manager
            .send_turn("p", "i", "m", None, session.context())
            .await
            .unwrap();
        session.record(recorded("m", "p", "i", &reply.output), &reply.context);
        let before = session.context().clone();

        let err = manager
            .send_turn("p", "i", "m", None, session.context())
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(500));
        assert_eq!(session.context(), &before);
        assert_eq!(session.turns().len(), 1);

        manager
            .send_turn("p", "i", "m", None, session.context())
            .await
            .unwrap();
        assert_eq!(client.sent()[2].context, vec![9, 8]);
    }

    #[tokio::test]
    async fn test_form_turn_replays_prior_context_and_stores_extension() {
        let client = Arc::new(ScriptedClient::new(vec![ok("Salut", &[4, 5])]));
        let manager = SessionManager::new(client.clone(), "translate only");
        let mut session = Session::new(manager.endpoint());
        session.record(recorded("phi3:mini", "p", "i", "Bonjour"), &[1, 2, 3]);

        let reply = manager
            .send_turn("p", "i", "phi3:mini", None, session.context())
            .await
            .unwrap();
        session.record(recorded("phi3:mini", "p", "i", &reply.output), &reply.context);

        assert_eq!(client.sent()[0].context, vec![1, 2, 3]);
        assert_eq!(session.context().as_slice(), &[1, 2, 3, 4, 5]);
    }

    #[tokio::test]
    async fn test_request_shape() {
        let client = Arc::new(ScriptedClient::new(vec![ok("Bonjour", &[1])]));
        let manager = SessionManager::new(client.clone(), "translate only");
        let options = DecodingOptions {
            temperature: Some(0.8),
            top_k: Some(40),
            top_p: Some(0.9),
        };

        manager
            .send_turn(
                "Translate to French:\n",
                "Hello\n",
                "phi3:mini",
                Some(options),
                &ContextState::new(),
            )
            .await
            .unwrap();

        let request = &client.sent()[0];
        assert_eq!(request.model, "phi3:mini");
        assert_eq!(request.prompt, "Translate to French:\nHello\n");
        assert!(!request.stream);
        assert_eq!(request.system, "translate only");
        assert_eq!(request.options, Some(options));
    }

    #[tokio::test]
    async fn test_prompt_is_plain_concatenation() {
        let client = Arc::new(ScriptedClient::new(vec![ok("x", &[])]));
        let manager = SessionManager::new(client.clone(), "sys");

        manager
            .send_turn("Translate:", "Hello", "m", None, &ContextState::new())
            .await
            .unwrap();

        assert_eq!(client.sent()[0].prompt, "Translate:Hello");
        assert_eq!(client.sent()[0].options, None);
    }

    #[tokio::test]
    async fn test_output_is_fence_stripped() {
        let client = Arc::new(ScriptedClient::new(vec![ok("```print(1)```", &[1])]));
        let manager = SessionManager::new(client, "sys");

        let reply = manager
            .send_turn("p", "", "m", None, &ContextState::new())
            .await
            .unwrap();

        assert_eq!(reply.output, "print(1)");
    }

    #[test]
    fn test_strip_code_fences_anywhere() {
        assert_eq!(strip_code_fences("```print(1)```"), "print(1)");
        assert_eq!(
            strip_code_fences("Voici:\n```python\nx = 1\n```\nfin"),
            "Voici:\npython\nx = 1\n\nfin"
        );
        assert_eq!(strip_code_fences("no fences"), "no fences");
        assert_eq!(strip_code_fences("````"), "`");
    }
}
