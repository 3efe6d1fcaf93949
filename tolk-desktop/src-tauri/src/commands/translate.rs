use serde::Serialize;
use tauri::State;
use tolk_application::{FormInput, ScoreReport};
use tolk_core::session::OptionFields;

use crate::app::AppState;

/// What the form needs to render its controls on first load.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormDefaults {
    pub models: Vec<String>,
    pub options: OptionFields,
}

#[tauri::command]
pub async fn get_form_defaults(state: State<'_, AppState>) -> Result<FormDefaults, String> {
    Ok(FormDefaults {
        models: state.models.clone(),
        options: state.option_defaults.clone(),
    })
}

/// Starts a translation.
///
/// Returns as soon as the turn is accepted. The output arrives through the
/// `translation:completed` or `translation:failed` event. A rejected form
/// (busy, or a non-numeric option) is returned as an error and no event fires.
#[tauri::command]
pub async fn translate(form: FormInput, state: State<'_, AppState>) -> Result<(), String> {
    state.form.translate(form).await.map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn recalculate_score(state: State<'_, AppState>) -> Result<ScoreReport, String> {
    state
        .form
        .recalculate_score()
        .await
        .map_err(|e| e.to_string())
}
