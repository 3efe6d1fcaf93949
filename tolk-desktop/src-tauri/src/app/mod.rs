pub mod bootstrap;
pub mod listener;
pub mod state;

pub use bootstrap::bootstrap;
pub use listener::TauriFormListener;
pub use state::AppState;
