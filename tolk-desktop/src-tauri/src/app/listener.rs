use serde::Serialize;
use tauri::{AppHandle, Emitter};
use tauri_plugin_dialog::{DialogExt, MessageDialogKind};
use tolk_application::{FormListener, TurnReport};
use tolk_core::TolkError;

pub const EVENT_TURN_STARTED: &str = "translation:started";
pub const EVENT_TURN_COMPLETED: &str = "translation:completed";
pub const EVENT_TURN_FAILED: &str = "translation:failed";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct TurnFailure {
    message: String,
    status: Option<u16>,
}

/// Forwards controller notifications to the webview and shows the error dialog.
pub struct TauriFormListener {
    app: AppHandle,
}

impl TauriFormListener {
    pub fn new(app: AppHandle) -> Self {
        Self { app }
    }

    fn emit<S: Serialize + Clone>(&self, event: &str, payload: S) {
        if let Err(e) = self.app.emit(event, payload) {
            tracing::error!("[TauriFormListener] Failed to emit {}: {}", event, e);
        }
    }
}

impl FormListener for TauriFormListener {
    fn turn_started(&self) {
        self.emit(EVENT_TURN_STARTED, ());
    }

    fn turn_completed(&self, report: &TurnReport) {
        self.emit(EVENT_TURN_COMPLETED, report.clone());
    }

    fn turn_failed(&self, error: &TolkError) {
        let title = if error.is_api() { "API Error" } else { "Translation Failed" };
        self.app
            .dialog()
            .message(error.to_string())
            .title(title)
            .kind(MessageDialogKind::Error)
            .show(|_| {});

        self.emit(
            EVENT_TURN_FAILED,
            TurnFailure {
                message: error.to_string(),
                status: error.status(),
            },
        );
    }
}
