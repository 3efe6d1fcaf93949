//! Installed-model discovery via `ollama list`.

use std::process::Stdio;

use tokio::process::Command;
use tolk_core::{Result, TolkError};

/// Extracts model identifiers from `ollama list` output.
///
/// Indented and blank rows carry no identifier. The first remaining row is
/// the column header and is dropped.
pub fn parse_model_list(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .filter(|line| !line.starts_with(char::is_whitespace))
        .filter_map(|line| line.split_whitespace().next())
        .skip(1)
        .map(str::to_string)
        .collect()
}

/// Runs `<command> list` and returns the installed model identifiers.
pub async fn list_installed_models(command: &str) -> Result<Vec<String>> {
    let output = Command::new(command)
        .arg("list")
        .stdin(Stdio::null())
        .output()
        .await
        .map_err(|e| TolkError::backend_launch(format!("{} list: {}", command, e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        tracing::warn!(
            "[Models] `{} list` exited with {}: {}",
            command,
            output.status,
            stderr.trim()
        );
    }

    let models = parse_model_list(&String::from_utf8_lossy(&output.stdout));
    tracing::info!("[Models] Found {} installed models", models.len());
    Ok(models)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_row_is_dropped() {
        let stdout = "NAME            ID              SIZE      MODIFIED\n\
                      phi3:mini       4f2222927938    2.2 GB    3 days ago\n\
                      llama3:latest   365c0bd3c000    4.7 GB    2 weeks ago\n";

        assert_eq!(parse_model_list(stdout), vec!["phi3:mini", "llama3:latest"]);
    }

    #[test]
    fn test_blank_and_indented_rows_are_skipped() {
        let stdout = "NAME   ID\n\n  continuation\nphi3:mini   abc\n\n";

        assert_eq!(parse_model_list(stdout), vec!["phi3:mini"]);
    }

    #[test]
    fn test_empty_output_yields_no_models() {
        assert!(parse_model_list("").is_empty());
        assert!(parse_model_list("NAME ID SIZE MODIFIED\n").is_empty());
    }

    #[tokio::test]
    async fn test_missing_executable_is_reported() {
        let err = list_installed_models("tolk-definitely-not-installed")
            .await
            .unwrap_err();

        assert!(err.is_backend_launch());
    }
}
