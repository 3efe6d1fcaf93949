//! Filesystem and process plumbing shared by both front-ends.

pub mod backend;
pub mod config_service;
pub mod documents;
pub mod models;
pub mod paths;
pub mod transcript_logger;

pub use backend::BackendLauncher;
pub use config_service::ConfigService;
pub use models::{list_installed_models, parse_model_list};
pub use paths::TolkPaths;
pub use transcript_logger::TranscriptLogger;
