//! Tokenizers used to split text into scoring units.
//!
//! All tokenizers share the same punctuation/number splitting pass as the
//! mteval `13a` tokenizer; the script-specific ones first isolate the units
//! that whitespace does not delimit in that script. Japanese and Korean are
//! segmented with lindera's embedded MeCab dictionaries.

use lindera::dictionary::load_dictionary;
use lindera::mode::Mode;
use lindera::segmenter::Segmenter;
use lindera::tokenizer::Tokenizer as MorphemeAnalyzer;
use once_cell::sync::Lazy;
use regex::Regex;

use super::script::Script;

/// Splits a sentence into tokens for n-gram matching.
pub trait Tokenizer: Send + Sync {
    fn name(&self) -> &'static str;

    fn tokenize(&self, text: &str) -> Vec<String>;
}

/// Returns the tokenizer for a detected script family.
pub fn tokenizer_for(script: Script) -> &'static dyn Tokenizer {
    match script {
        Script::Chinese => &TokenizerZh,
        Script::Japanese => &TokenizerJa,
        Script::Korean => &TokenizerKo,
        Script::Other => &Tokenizer13a,
    }
}

static PUNCTUATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([\{-~\[-` -&\(-\+:-@/])").expect("valid regex"));
static PERIOD_COMMA_AFTER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([^0-9])([\.,])").expect("valid regex"));
static PERIOD_COMMA_BEFORE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([\.,])([^0-9])").expect("valid regex"));
static DASH_AFTER_DIGIT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([0-9])(-)").expect("valid regex"));

/// Punctuation split shared by every tokenizer.
///
/// Symbols are always separated; periods and commas are separated unless
/// they sit between digits; a dash following a digit is separated.
fn split_punctuation(text: &str) -> Vec<String> {
    let text = PUNCTUATION.replace_all(text, " $1 ");
    let text = PERIOD_COMMA_AFTER.replace_all(&text, "$1 $2 ");
    let text = PERIOD_COMMA_BEFORE.replace_all(&text, " $1 $2");
    let text = DASH_AFTER_DIGIT.replace_all(&text, "$1 $2 ");
    text.split_whitespace().map(str::to_string).collect()
}

/// Default tokenizer for Latin and other space-delimited scripts.
pub struct Tokenizer13a;

impl Tokenizer for Tokenizer13a {
    fn name(&self) -> &'static str {
        "13a"
    }

    fn tokenize(&self, text: &str) -> Vec<String> {
        let mut line = text
            .replace("<skipped>", "")
            .replace("-\n", "")
            .replace('\n', " ");
        if line.contains('&') {
            line = line
                .replace("&quot;", "\"")
                .replace("&amp;", "&")
                .replace("&lt;", "<")
                .replace("&gt;", ">");
        }
        split_punctuation(&format!(" {line} "))
    }
}

/// Chinese: every Han character (and CJK symbol) is its own token.
pub struct TokenizerZh;

fn is_chinese_char(c: char) -> bool {
    matches!(
        c,
        '\u{3400}'..='\u{4DB5}'
            | '\u{4E00}'..='\u{9FA5}'
            | '\u{9FA6}'..='\u{9FBB}'
            | '\u{F900}'..='\u{FA2D}'
            | '\u{FA30}'..='\u{FA6A}'
            | '\u{FA70}'..='\u{FAD9}'
            | '\u{20000}'..='\u{2A6D6}'
            | '\u{2F800}'..='\u{2FA1D}'
            | '\u{FF00}'..='\u{FFEF}'
            | '\u{2E80}'..='\u{2EFF}'
            | '\u{3000}'..='\u{303F}'
            | '\u{31C0}'..='\u{31EF}'
            | '\u{2F00}'..='\u{2FDF}'
            | '\u{2FF0}'..='\u{2FFF}'
            | '\u{3100}'..='\u{312F}'
            | '\u{31A0}'..='\u{31BF}'
            | '\u{FE10}'..='\u{FE1F}'
            | '\u{FE30}'..='\u{FE4F}'
            | '\u{2600}'..='\u{26FF}'
            | '\u{2700}'..='\u{27BF}'
            | '\u{3200}'..='\u{32FF}'
            | '\u{3300}'..='\u{33FF}'
    )
}

impl Tokenizer for TokenizerZh {
    fn name(&self) -> &'static str {
        "zh"
    }

    fn tokenize(&self, text: &str) -> Vec<String> {
        let mut spaced = String::with_capacity(text.len() * 2);
        for c in text.trim().chars() {
            if is_chinese_char(c) {
                spaced.push(' ');
                spaced.push(c);
                spaced.push(' ');
            } else {
                spaced.push(c);
            }
        }
        split_punctuation(&spaced)
    }
}

fn load_analyzer(dictionary_uri: &str) -> Option<MorphemeAnalyzer> {
    match load_dictionary(dictionary_uri) {
        Ok(dictionary) => {
            let segmenter = Segmenter::new(Mode::Normal, dictionary, None);
            Some(MorphemeAnalyzer::new(segmenter))
        }
        Err(e) => {
            tracing::error!(
                "[Tokenizer] Failed to load dictionary {}: {}",
                dictionary_uri,
                e
            );
            None
        }
    }
}

static IPADIC: Lazy<Option<MorphemeAnalyzer>> = Lazy::new(|| load_analyzer("embedded://ipadic"));
static KO_DIC: Lazy<Option<MorphemeAnalyzer>> = Lazy::new(|| load_analyzer("embedded://ko-dic"));

/// Joins the morphemes of `text` with spaces.
///
/// Falls back to the text as given when the dictionary is unavailable, which
/// leaves only whitespace and punctuation boundaries.
fn segment(analyzer: &Option<MorphemeAnalyzer>, text: &str) -> String {
    let Some(analyzer) = analyzer else {
        return text.to_string();
    };
    match analyzer.tokenize(text) {
        Ok(tokens) => tokens
            .iter()
            .map(|token| token.surface.as_ref())
            .filter(|surface| !surface.trim().is_empty())
            .collect::<Vec<_>>()
            .join(" "),
        Err(e) => {
            tracing::warn!("[Tokenizer] Morphological analysis failed: {}", e);
            text.to_string()
        }
    }
}

/// Japanese: morphemes from the MeCab IPADIC dictionary.
pub struct TokenizerJa;

impl Tokenizer for TokenizerJa {
    fn name(&self) -> &'static str {
        "ja-ipadic"
    }

    fn tokenize(&self, text: &str) -> Vec<String> {
        split_punctuation(&segment(&IPADIC, text.trim()))
    }
}

/// Korean: morphemes from the mecab-ko-dic dictionary, so particles and
/// endings are separated from their stems.
pub struct TokenizerKo;

impl Tokenizer for TokenizerKo {
    fn name(&self) -> &'static str {
        "ko-dic"
    }

    fn tokenize(&self, text: &str) -> Vec<String> {
        split_punctuation(&segment(&KO_DIC, text.trim()))
    }
}
