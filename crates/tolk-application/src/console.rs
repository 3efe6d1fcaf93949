//! Console read-eval-print session.

use std::sync::Arc;

use tolk_core::Result;
use tolk_core::config::ConsoleConfig;
use tolk_core::session::{ContextState, GenerateClient, SessionManager, TurnReply};

/// One conversation driven from the terminal.
///
/// Unlike the form, the console keeps its own context buffer and extends it
/// itself after each successful reply. No decoding options are sent and
/// nothing is written to a transcript.
pub struct ConsoleSession {
    manager: SessionManager,
    model: String,
    context: ContextState,
}

impl ConsoleSession {
    pub fn new(client: Arc<dyn GenerateClient>, config: &ConsoleConfig) -> Self {
        Self {
            manager: SessionManager::new(client, config.system_prompt.clone()),
            model: config.model.clone(),
            context: ContextState::new(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn context(&self) -> &ContextState {
        &self.context
    }

    /// Sends what the user typed as the whole prompt.
    pub async fn submit(&mut self, prompt: &str) -> Result<TurnReply> {
        let reply = self
            .manager
            .send_turn(prompt, "", &self.model, None, &self.context)
            .await?;
        self.context.extend_from(&reply.context);
        tracing::debug!(
            "[ConsoleSession] Context now holds {} tokens",
            self.context.len()
        );
        Ok(reply)
    }
}
