use std::path::PathBuf;

use tolk_application::FormHandle;
use tolk_core::session::OptionFields;

/// Application state shared across Tauri commands.
pub struct AppState {
    pub form: FormHandle,
    /// Installed models, listed once at start-up.
    pub models: Vec<String>,
    pub option_defaults: OptionFields,
    pub tips_path: PathBuf,
}
