use tauri::{AppHandle, State};
use tauri_plugin_dialog::{DialogExt, MessageDialogKind};
use tolk_infrastructure::documents;

use crate::app::AppState;

/// Shows the prompting tips file verbatim.
#[tauri::command]
pub async fn show_prompting_tips(app: AppHandle, state: State<'_, AppState>) -> Result<(), String> {
    let tips = documents::read_tips(&state.tips_path)
        .await
        .map_err(|e| e.to_string())?;

    app.dialog()
        .message(tips)
        .title("Prompting Tips")
        .kind(MessageDialogKind::Info)
        .show(|_| {});
    Ok(())
}
