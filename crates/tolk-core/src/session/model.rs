use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::options::DecodingOptions;

/// Opaque conversational memory returned by the inference server.
///
/// Only ever grows: each successful turn appends the server's returned
/// context, in order, to what was sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContextState(Vec<i64>);

impl ContextState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_slice(&self) -> &[i64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Appends the context returned by the server for the latest turn.
    pub fn extend_from(&mut self, returned: &[i64]) {
        self.0.extend_from_slice(returned);
    }

    pub fn to_vec(&self) -> Vec<i64> {
        self.0.clone()
    }
}

impl From<Vec<i64>> for ContextState {
    fn from(tokens: Vec<i64>) -> Self {
        Self(tokens)
    }
}

/// What the session manager hands back for one successful exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnReply {
    /// Model output with code fences removed.
    pub output: String,
    /// Context returned by the server for this turn only.
    pub context: Vec<i64>,
    pub duration: Duration,
}

/// One completed exchange. Never mutated after it is recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub model: String,
    pub prompt: String,
    pub input: String,
    pub output: String,
    pub elapsed: Duration,
    pub score: Option<f64>,
}

/// In-memory state of a single front-end session.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub endpoint: String,
    pub model: String,
    pub options: DecodingOptions,
    context: ContextState,
    turns: Vec<Turn>,
}

impl Session {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }

    pub fn context(&self) -> &ContextState {
        &self.context
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn last_turn(&self) -> Option<&Turn> {
        self.turns.last()
    }

    /// Records a successful turn and folds its returned context into the session.
    pub fn record(&mut self, turn: Turn, returned_context: &[i64]) -> &Turn {
        self.context.extend_from(returned_context);
        self.turns.push(turn);
        // just pushed
        &self.turns[self.turns.len() - 1]
    }
}

/// User-supplied reference translations used only for scoring.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceSet {
    references: Vec<String>,
}

impl ReferenceSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, reference: impl Into<String>) {
        self.references.push(reference.into());
    }

    pub fn clear(&mut self) {
        self.references.clear();
    }

    pub fn len(&self) -> usize {
        self.references.len()
    }

    pub fn is_empty(&self) -> bool {
        self.references.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.references
    }
}
