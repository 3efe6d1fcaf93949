//! Controller task for the desktop form.
//!
//! [`FormRuntime::spawn`] moves a [`FormController`] onto its own task and
//! returns a cloneable [`FormHandle`]. Each translation runs on a fresh
//! worker task; its outcome comes back over the same channel as UI commands,
//! so every mutation of session, references and transcript happens on the
//! controller task.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tolk_core::session::{SessionManager, TurnReply};
use tolk_core::{Result, TolkError};

use crate::form::{FormController, FormInput, PendingTurn, ScoreReport, TurnReport};

const CHANNEL_CAPACITY: usize = 32;

/// Receives turn notifications from the controller task.
///
/// Implementations forward to the UI: the desktop app emits events and shows
/// dialogs, tests collect into a channel.
pub trait FormListener: Send + Sync + 'static {
    /// A turn was accepted; controls should be disabled and output cleared.
    fn turn_started(&self);

    fn turn_completed(&self, report: &TurnReport);

    /// The request failed; controls should be re-enabled.
    fn turn_failed(&self, error: &TolkError);
}

enum FormEvent {
    Translate {
        form: FormInput,
        reply: oneshot::Sender<Result<()>>,
    },
    Completed {
        pending: PendingTurn,
        outcome: Result<TurnReply>,
    },
    ImportReference {
        text: String,
        reply: oneshot::Sender<usize>,
    },
    ClearReferences {
        reply: oneshot::Sender<()>,
    },
    RecalculateScore {
        reply: oneshot::Sender<ScoreReport>,
    },
    ExportTranscript {
        destination: PathBuf,
        reply: oneshot::Sender<Result<()>>,
    },
    IsBusy {
        reply: oneshot::Sender<bool>,
    },
}

pub struct FormRuntime {
    controller: FormController,
    manager: Arc<SessionManager>,
    listener: Arc<dyn FormListener>,
    /// Weak so the task ends once every handle and worker is dropped.
    events_tx: mpsc::WeakSender<FormEvent>,
    events_rx: mpsc::Receiver<FormEvent>,
}

impl FormRuntime {
    /// Starts the controller task on the current tokio runtime.
    pub fn spawn(
        controller: FormController,
        manager: Arc<SessionManager>,
        listener: Arc<dyn FormListener>,
    ) -> FormHandle {
        let (events_tx, events_rx) = mpsc::channel(CHANNEL_CAPACITY);
        let runtime = Self {
            controller,
            manager,
            listener,
            events_tx: events_tx.downgrade(),
            events_rx,
        };
        let handle = FormHandle { events_tx };
        tokio::spawn(runtime.run());
        handle
    }

    async fn run(mut self) {
        tracing::debug!("[FormRuntime] Controller task started");
        while let Some(event) = self.events_rx.recv().await {
            self.handle(event).await;
        }
        tracing::debug!("[FormRuntime] Controller task stopped");
    }

    async fn handle(&mut self, event: FormEvent) {
        match event {
            FormEvent::Translate { form, reply } => {
                let accepted = self.dispatch(&form);
                let _ = reply.send(accepted);
            }
            FormEvent::Completed { pending, outcome } => {
                match self.controller.complete_turn(pending, outcome).await {
                    Ok(report) => self.listener.turn_completed(&report),
                    Err(e) => self.listener.turn_failed(&e),
                }
            }
            FormEvent::ImportReference { text, reply } => {
                let _ = reply.send(self.controller.import_reference(text));
            }
            FormEvent::ClearReferences { reply } => {
                self.controller.clear_references();
                let _ = reply.send(());
            }
            FormEvent::RecalculateScore { reply } => {
                let _ = reply.send(self.controller.recalculate_score().await);
            }
            FormEvent::ExportTranscript { destination, reply } => {
                let _ = reply.send(self.controller.export_transcript(&destination).await);
            }
            FormEvent::IsBusy { reply } => {
                let _ = reply.send(self.controller.is_busy());
            }
        }
    }

    /// Validates and starts a turn on a worker task.
    fn dispatch(&mut self, form: &FormInput) -> Result<()> {
        let events_tx = self
            .events_tx
            .upgrade()
            .ok_or_else(|| TolkError::internal("form controller is shutting down"))?;
        let pending = self.controller.begin_turn(form)?;
        self.listener.turn_started();

        let manager = Arc::clone(&self.manager);
        let request = pending.clone();
        tokio::spawn(async move {
            let worker = tokio::spawn(async move { request.run(&manager).await });
            let outcome = match worker.await {
                Ok(outcome) => outcome,
                Err(e) => {
                    tracing::error!("[FormRuntime] Translation worker failed: {}", e);
                    Err(TolkError::internal(format!("translation worker failed: {}", e)))
                }
            };
            if events_tx
                .send(FormEvent::Completed { pending, outcome })
                .await
                .is_err()
            {
                tracing::warn!("[FormRuntime] Controller gone before turn completed");
            }
        });
        Ok(())
    }
}

/// Cloneable front door to the controller task.
#[derive(Clone)]
pub struct FormHandle {
    events_tx: mpsc::Sender<FormEvent>,
}

impl FormHandle {
    async fn request<T>(
        &self,
        make: impl FnOnce(oneshot::Sender<T>) -> FormEvent,
    ) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.events_tx
            .send(make(reply_tx))
            .await
            .map_err(|_| TolkError::internal("form controller stopped"))?;
        reply_rx
            .await
            .map_err(|_| TolkError::internal("form controller dropped the request"))
    }

    /// Starts a translation. Returns once the turn is accepted or rejected;
    /// the result arrives through the [`FormListener`].
    pub async fn translate(&self, form: FormInput) -> Result<()> {
        self.request(|reply| FormEvent::Translate { form, reply })
            .await?
    }

    pub async fn import_reference(&self, text: String) -> Result<usize> {
        self.request(|reply| FormEvent::ImportReference { text, reply })
            .await
    }

    pub async fn clear_references(&self) -> Result<()> {
        self.request(|reply| FormEvent::ClearReferences { reply })
            .await
    }

    pub async fn recalculate_score(&self) -> Result<ScoreReport> {
        self.request(|reply| FormEvent::RecalculateScore { reply })
            .await
    }

    pub async fn export_transcript(&self, destination: PathBuf) -> Result<()> {
        self.request(|reply| FormEvent::ExportTranscript { destination, reply })
            .await?
    }

    pub async fn is_busy(&self) -> Result<bool> {
        self.request(|reply| FormEvent::IsBusy { reply }).await
    }
}
