use tauri::{AppHandle, State};
use tauri_plugin_dialog::{DialogExt, MessageDialogKind};
use tokio::sync::oneshot;
use tolk_infrastructure::documents;

use crate::app::AppState;

/// Asks for a `.txt` file and adds its full contents as one reference.
///
/// Returns the new reference count, or `None` when the dialog was cancelled.
#[tauri::command]
pub async fn import_reference(
    app: AppHandle,
    state: State<'_, AppState>,
) -> Result<Option<usize>, String> {
    let (tx, rx) = oneshot::channel();
    app.dialog()
        .file()
        .add_filter("TXT Files", &["txt"])
        .pick_file(move |path| {
            let _ = tx.send(path);
        });

    let Some(path) = rx.await.map_err(|e| e.to_string())? else {
        return Ok(None);
    };
    let path = path.into_path().map_err(|e| e.to_string())?;
    let text = documents::read_reference(&path)
        .await
        .map_err(|e| e.to_string())?;
    let count = state
        .form
        .import_reference(text)
        .await
        .map_err(|e| e.to_string())?;

    app.dialog()
        .message("Text files successfully imported.")
        .title("Files Imported")
        .kind(MessageDialogKind::Info)
        .show(|_| {});
    Ok(Some(count))
}

#[tauri::command]
pub async fn clear_references(app: AppHandle, state: State<'_, AppState>) -> Result<(), String> {
    state
        .form
        .clear_references()
        .await
        .map_err(|e| e.to_string())?;

    app.dialog()
        .message("Text files successfully cleared.")
        .title("Files Cleared")
        .kind(MessageDialogKind::Info)
        .show(|_| {});
    Ok(())
}
