pub mod references;
pub mod tips;
pub mod transcript;
pub mod translate;

pub fn handlers() -> impl Fn(tauri::ipc::Invoke<tauri::Wry>) -> bool + Send + Sync + 'static {
    tauri::generate_handler![
        translate::get_form_defaults,
        translate::translate,
        translate::recalculate_score,
        references::import_reference,
        references::clear_references,
        transcript::export_transcript,
        tips::show_prompting_tips,
    ]
}
