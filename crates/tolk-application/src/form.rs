//! Form controller state machine.
//!
//! The controller is the only owner of the form's [`Session`], its
//! [`ReferenceSet`] and the transcript. A translation is split in three:
//!
//! 1. [`FormController::begin_turn`] validates the form, marks the controller
//!    busy and snapshots everything the request needs into a [`PendingTurn`].
//! 2. [`PendingTurn::run`] performs the HTTP exchange. It owns its data, so it
//!    can run on a worker task without borrowing the controller.
//! 3. [`FormController::complete_turn`] folds the outcome back in: context,
//!    score, transcript, and the busy flag.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tolk_core::scoring::{ScoreBand, Scorer, display_value};
use tolk_core::session::{
    ContextState, DecodingOptions, OptionFields, ReferenceSet, Session, SessionManager, Turn,
    TurnReply,
};
use tolk_core::{Result, TolkError};
use tolk_infrastructure::TranscriptLogger;

/// Raw contents of the form when Translate is pressed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormInput {
    pub model: String,
    pub prompt: String,
    pub input: String,
    #[serde(flatten)]
    pub options: OptionFields,
}

/// Snapshot of one turn, detached from the controller.
#[derive(Debug, Clone)]
pub struct PendingTurn {
    model: String,
    prompt: String,
    input: String,
    options: DecodingOptions,
    context: ContextState,
}

impl PendingTurn {
    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn context(&self) -> &ContextState {
        &self.context
    }

    pub async fn run(&self, manager: &SessionManager) -> Result<TurnReply> {
        manager
            .send_turn(
                &self.prompt,
                &self.input,
                &self.model,
                Some(self.options),
                &self.context,
            )
            .await
    }
}

/// Score as shown next to the output box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreReport {
    /// Display value in 0.0–1.0, absent when no score applies.
    pub value: Option<f64>,
    pub band: Option<ScoreBand>,
    pub color: Option<String>,
    pub label: String,
}

impl ScoreReport {
    pub fn from_raw(score: Option<f64>) -> Self {
        match score {
            Some(raw) => {
                let value = display_value(raw);
                let band = ScoreBand::from_display(value);
                Self {
                    value: Some(value),
                    band: Some(band),
                    color: Some(band.color().to_string()),
                    label: format!("BLEU Score: {}", value),
                }
            }
            None => Self {
                value: None,
                band: None,
                color: None,
                label: "BLEU Score: N/A".to_string(),
            },
        }
    }
}

/// Everything the form renders once a turn succeeds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnReport {
    pub output: String,
    pub elapsed_secs: f64,
    pub elapsed_label: String,
    pub score: ScoreReport,
}

pub struct FormController {
    session: Session,
    references: ReferenceSet,
    scorer: Arc<dyn Scorer>,
    transcript: TranscriptLogger,
    /// Text in the output box; cleared while a turn runs and after a failure.
    current_output: Option<String>,
    busy: bool,
}

impl FormController {
    pub fn new(
        endpoint: impl Into<String>,
        scorer: Arc<dyn Scorer>,
        transcript: TranscriptLogger,
    ) -> Self {
        Self {
            session: Session::new(endpoint),
            references: ReferenceSet::new(),
            scorer,
            transcript,
            current_output: None,
            busy: false,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn references(&self) -> &ReferenceSet {
        &self.references
    }

    pub fn transcript(&self) -> &TranscriptLogger {
        &self.transcript
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn current_output(&self) -> Option<&str> {
        self.current_output.as_deref()
    }

    /// Validates the form and reserves the controller for one turn.
    ///
    /// Rejected forms leave the controller idle, so the caller can simply
    /// re-enable its controls and report the error.
    pub fn begin_turn(&mut self, form: &FormInput) -> Result<PendingTurn> {
        if self.busy {
            return Err(TolkError::TurnInFlight);
        }
        let options = form.options.parse()?;

        self.session.model = form.model.clone();
        self.session.options = options;
        self.current_output = None;
        self.busy = true;

        tracing::info!(
            model = %form.model,
            context_len = self.session.context().len(),
            "[FormController] Turn started"
        );

        Ok(PendingTurn {
            model: form.model.clone(),
            prompt: form.prompt.clone(),
            input: form.input.clone(),
            options,
            context: self.session.context().clone(),
        })
    }

    /// Applies the outcome of a turn started with [`begin_turn`](Self::begin_turn).
    ///
    /// Always releases the controller. A failed turn is returned unchanged
    /// and touches neither the context nor the transcript.
    pub async fn complete_turn(
        &mut self,
        pending: PendingTurn,
        outcome: Result<TurnReply>,
    ) -> Result<TurnReport> {
        self.busy = false;

        let reply = match outcome {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!("[FormController] Turn failed: {}", e);
                return Err(e);
            }
        };

        let score = self.scorer.score(&reply.output, self.references.as_slice());
        let turn = Turn {
            model: pending.model,
            prompt: pending.prompt,
            input: pending.input,
            output: reply.output,
            elapsed: reply.duration,
            score,
        };
        let turn = self.session.record(turn, &reply.context).clone();
        self.current_output = Some(turn.output.clone());

        if let Err(e) = self.transcript.append_turn(&turn).await {
            tracing::error!("[FormController] Failed to write transcript: {}", e);
        }
        if let Err(e) = self.transcript.append_score(score).await {
            tracing::error!("[FormController] Failed to write transcript: {}", e);
        }

        Ok(TurnReport {
            elapsed_secs: turn.elapsed.as_secs_f64(),
            elapsed_label: elapsed_label(turn.elapsed),
            score: ScoreReport::from_raw(score),
            output: turn.output,
        })
    }

    /// Adds one file's full contents as a single reference.
    pub fn import_reference(&mut self, text: impl Into<String>) -> usize {
        self.references.add(text);
        tracing::info!(
            "[FormController] Imported reference ({} total)",
            self.references.len()
        );
        self.references.len()
    }

    pub fn clear_references(&mut self) {
        self.references.clear();
        tracing::info!("[FormController] Cleared references");
    }

    /// Re-scores the output currently shown against the current references
    /// and logs the new score block.
    pub async fn recalculate_score(&mut self) -> ScoreReport {
        let candidate = self.current_output.as_deref().unwrap_or("");
        let score = self.scorer.score(candidate, self.references.as_slice());

        if let Err(e) = self.transcript.append_score(score).await {
            tracing::error!("[FormController] Failed to write transcript: {}", e);
        }
        ScoreReport::from_raw(score)
    }

    pub async fn export_transcript(&self, destination: &Path) -> Result<()> {
        self.transcript.export_to(destination).await
    }
}

pub fn elapsed_label(elapsed: Duration) -> String {
    format!("Translation Time (Seconds): {}", elapsed.as_secs_f64())
}
