use serde::{Deserialize, Serialize};

use crate::session::OptionFields;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434/api/generate";
pub const DEFAULT_CONSOLE_MODEL: &str = "phi3:mini";

pub const CONSOLE_SYSTEM_PROMPT: &str = "You are Phi 3, a general-use large language model.";

pub const TRANSLATOR_SYSTEM_PROMPT: &str = "You are an expert translator who translates text \
that the user gives you into a language of their choosing.When translating text, DO NOT add any \
additional comments, explanations, or pronunciations. This includes quotes explanations of the \
translations, parentheticals, etc. Just give the translated text.Unless prompted otherwise, do \
not give multiple translations for a text. Just give one translation.";

/// Root configuration. Every field has a default, so an absent or partial
/// `config.toml` behaves like the built-in settings.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct TolkConfig {
    /// URL of the generate endpoint.
    pub endpoint: String,
    /// Executable that serves models locally.
    pub backend_command: String,
    pub backend_args: Vec<String>,
    /// Grace period after launching the backend, in milliseconds.
    pub startup_delay_ms: u64,
    pub transcript_path: String,
    pub tips_path: String,
    pub console: ConsoleConfig,
    pub form: FormConfig,
}

impl Default for TolkConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            backend_command: "ollama".to_string(),
            backend_args: vec!["serve".to_string()],
            startup_delay_ms: 2000,
            transcript_path: "transcript.txt".to_string(),
            tips_path: "prompting_tips.txt".to_string(),
            console: ConsoleConfig::default(),
            form: FormConfig::default(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ConsoleConfig {
    pub model: String,
    pub system_prompt: String,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_CONSOLE_MODEL.to_string(),
            system_prompt: CONSOLE_SYSTEM_PROMPT.to_string(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct FormConfig {
    pub system_prompt: String,
    pub temperature: String,
    pub top_k: String,
    pub top_p: String,
}

impl Default for FormConfig {
    fn default() -> Self {
        let fields = OptionFields::default();
        Self {
            system_prompt: TRANSLATOR_SYSTEM_PROMPT.to_string(),
            temperature: fields.temperature,
            top_k: fields.top_k,
            top_p: fields.top_p,
        }
    }
}

impl FormConfig {
    /// Initial contents of the three option fields.
    pub fn option_fields(&self) -> OptionFields {
        OptionFields {
            temperature: self.temperature.clone(),
            top_k: self.top_k.clone(),
            top_p: self.top_p.clone(),
        }
    }
}
