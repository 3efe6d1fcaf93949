use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tauri::AppHandle;
use tolk_application::{FormController, FormRuntime};
use tolk_core::scoring::BleuScorer;
use tolk_core::session::SessionManager;
use tolk_infrastructure::{BackendLauncher, ConfigService, TranscriptLogger, list_installed_models};
use tolk_interaction::OllamaApiClient;

use crate::app::{AppState, TauriFormListener};

/// Starts the backend, discovers models, opens the transcript and spawns the
/// form controller.
///
/// Must run inside the async runtime so the controller task can be spawned.
pub async fn bootstrap(app: AppHandle) -> Result<AppState> {
    let config = ConfigService::new().get_config();

    match BackendLauncher::from_config(&config).launch().await {
        Ok(_child) => tracing::info!("[Bootstrap] Ollama server started successfully."),
        Err(e) => tracing::error!("[Bootstrap] Failed to start Ollama server: {}", e),
    }

    let models = match list_installed_models(&config.backend_command).await {
        Ok(models) => models,
        Err(e) => {
            tracing::warn!("[Bootstrap] Could not list installed models: {}", e);
            Vec::new()
        }
    };

    let transcript = TranscriptLogger::create(&config.transcript_path)
        .await
        .with_context(|| format!("Failed to create transcript at {}", config.transcript_path))?;

    let client = Arc::new(OllamaApiClient::new(config.endpoint.clone()));
    let manager = Arc::new(SessionManager::new(client, config.form.system_prompt.clone()));
    let controller = FormController::new(
        config.endpoint.clone(),
        Arc::new(BleuScorer::new()),
        transcript,
    );
    let form = FormRuntime::spawn(controller, manager, Arc::new(TauriFormListener::new(app)));

    tracing::info!(
        "[Bootstrap] Ready with {} models, endpoint {}",
        models.len(),
        config.endpoint
    );

    Ok(AppState {
        form,
        models,
        option_defaults: config.form.option_fields(),
        tips_path: PathBuf::from(&config.tips_path),
    })
}
