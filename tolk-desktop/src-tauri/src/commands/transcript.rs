use tauri::{AppHandle, State};
use tauri_plugin_dialog::DialogExt;
use tokio::sync::oneshot;

use crate::app::AppState;

/// Saves a full copy of the transcript wherever the user chooses.
///
/// Returns `false` when the dialog was cancelled.
#[tauri::command]
pub async fn export_transcript(app: AppHandle, state: State<'_, AppState>) -> Result<bool, String> {
    let (tx, rx) = oneshot::channel();
    app.dialog()
        .file()
        .add_filter("TXT Files", &["txt"])
        .set_file_name("transcript.txt")
        .save_file(move |path| {
            let _ = tx.send(path);
        });

    let Some(path) = rx.await.map_err(|e| e.to_string())? else {
        return Ok(false);
    };
    let destination = path.into_path().map_err(|e| e.to_string())?;
    state
        .form
        .export_transcript(destination)
        .await
        .map_err(|e| e.to_string())?;
    Ok(true)
}
