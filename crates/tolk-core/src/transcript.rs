//! Plain-text layout of the transcript log.

use crate::scoring::display_value;
use crate::session::Turn;

pub const TRANSCRIPT_HEADER: &str = "Transcript\n\n";

/// Appends `value` as a field that always ends the line.
fn push_field(block: &mut String, label: &str, value: &str) {
    block.push_str(label);
    block.push_str(value);
    if !value.ends_with('\n') {
        block.push('\n');
    }
}

/// Block written for every completed turn.
pub fn turn_block(turn: &Turn) -> String {
    let mut block = String::new();
    push_field(&mut block, "Output: ", &turn.output);
    push_field(&mut block, "Model: ", &turn.model);
    push_field(&mut block, "Input: ", &turn.input);
    push_field(&mut block, "Prompt: ", &turn.prompt);
    push_field(
        &mut block,
        "Time (Seconds): ",
        &turn.elapsed.as_secs_f64().to_string(),
    );
    block
}

/// Score block that follows each turn block (and each recalculation).
pub fn score_block(score: Option<f64>) -> String {
    match score {
        Some(score) => format!("BLEU: {}\n\n", display_value(score)),
        None => "BLEU: N/A\n\n".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_turn_block_layout() {
        let turn = Turn {
            model: "phi3:mini".to_string(),
            prompt: "Translate to French:".to_string(),
            input: "Hello".to_string(),
            output: "Bonjour".to_string(),
            elapsed: Duration::from_millis(1500),
            score: None,
        };

        assert_eq!(
            turn_block(&turn),
            "Output: Bonjour\nModel: phi3:mini\nInput: Hello\nPrompt: Translate to French:\nTime (Seconds): 1.5\n"
        );
    }

    #[test]
    fn test_fields_with_trailing_newline_are_not_doubled() {
        let turn = Turn {
            model: "m".to_string(),
            prompt: "p\n".to_string(),
            input: "i\n".to_string(),
            output: "o".to_string(),
            elapsed: Duration::from_secs(2),
            score: None,
        };

        assert_eq!(
            turn_block(&turn),
            "Output: o\nModel: m\nInput: i\nPrompt: p\nTime (Seconds): 2\n"
        );
    }

    #[test]
    fn test_score_block() {
        assert_eq!(score_block(Some(50.0)), "BLEU: 0.5\n\n");
        assert_eq!(score_block(None), "BLEU: N/A\n\n");
    }
}
