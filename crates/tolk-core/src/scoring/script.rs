use serde::{Deserialize, Serialize};

/// Script family used to pick a tokenizer for scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Script {
    Chinese,
    Japanese,
    Korean,
    Other,
}

fn is_cjk_ideograph(c: char) -> bool {
    matches!(c, '\u{4E00}'..='\u{9FFF}')
}

fn is_kana(c: char) -> bool {
    // Hiragana (U+3040-U+309F) and Katakana (U+30A0-U+30FF)
    matches!(c, '\u{3040}'..='\u{30FF}')
}

fn is_hangul_syllable(c: char) -> bool {
    matches!(c, '\u{AC00}'..='\u{D7A3}')
}

/// Classifies `text` by the first matching test, in priority order:
/// ideographs, then kana, then Hangul syllables.
///
/// Japanese text containing kanji is therefore classified as Chinese; the
/// order is part of the scoring contract.
pub fn detect_script(text: &str) -> Script {
    if text.chars().any(is_cjk_ideograph) {
        Script::Chinese
    } else if text.chars().any(is_kana) {
        Script::Japanese
    } else if text.chars().any(is_hangul_syllable) {
        Script::Korean
    } else {
        Script::Other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ideograph_wins_over_hangul() {
        assert_eq!(detect_script("你好 안녕"), Script::Chinese);
    }

    #[test]
    fn test_single_scripts() {
        assert_eq!(detect_script("今天天气很好"), Script::Chinese);
        assert_eq!(detect_script("こんにちは"), Script::Japanese);
        assert_eq!(detect_script("カタカナ"), Script::Japanese);
        assert_eq!(detect_script("안녕하세요"), Script::Korean);
        assert_eq!(detect_script("Bonjour le monde"), Script::Other);
        assert_eq!(detect_script(""), Script::Other);
    }

    #[test]
    fn test_kanji_with_kana_is_classified_chinese() {
        assert_eq!(detect_script("日本語を話します"), Script::Chinese);
    }

    #[test]
    fn test_kana_wins_over_hangul() {
        assert_eq!(detect_script("안녕 こんにちは"), Script::Japanese);
    }

    #[test]
    fn test_range_boundaries() {
        assert_eq!(detect_script("\u{4E00}"), Script::Chinese);
        assert_eq!(detect_script("\u{9FFF}"), Script::Chinese);
        assert_eq!(detect_script("\u{3040}"), Script::Japanese);
        assert_eq!(detect_script("\u{30FF}"), Script::Japanese);
        assert_eq!(detect_script("\u{AC00}"), Script::Korean);
        assert_eq!(detect_script("\u{D7A3}"), Script::Korean);
        // Hangul Jamo are not syllables
        assert_eq!(detect_script("\u{1100}"), Script::Other);
    }
}
