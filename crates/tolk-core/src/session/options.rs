use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TolkError};

pub const DEFAULT_TEMPERATURE: &str = "0.8";
pub const DEFAULT_TOP_K: &str = "40";
pub const DEFAULT_TOP_P: &str = "0.9";

/// Sampling parameters forwarded to the model.
///
/// Absent values are left out of the request so the model default applies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DecodingOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
}

impl DecodingOptions {
    pub fn is_empty(&self) -> bool {
        self.temperature.is_none() && self.top_k.is_none() && self.top_p.is_none()
    }
}

/// Identifies one of the decoding-option input fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionField {
    Temperature,
    TopK,
    TopP,
}

impl fmt::Display for OptionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            OptionField::Temperature => "Temperature",
            OptionField::TopK => "Top-K",
            OptionField::TopP => "Top-P",
        };
        f.write_str(label)
    }
}

/// Raw text of the three decoding-option fields as typed by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionFields {
    pub temperature: String,
    pub top_k: String,
    pub top_p: String,
}

impl Default for OptionFields {
    fn default() -> Self {
        Self {
            temperature: DEFAULT_TEMPERATURE.to_string(),
            top_k: DEFAULT_TOP_K.to_string(),
            top_p: DEFAULT_TOP_P.to_string(),
        }
    }
}

impl OptionFields {
    /// Validates every field and builds the typed options.
    ///
    /// Fields are checked in on-screen order; the first bad field is reported.
    pub fn parse(&self) -> Result<DecodingOptions> {
        Ok(DecodingOptions {
            temperature: Some(parse_float(OptionField::Temperature, &self.temperature)?),
            top_k: Some(parse_integer(OptionField::TopK, &self.top_k)?),
            top_p: Some(parse_float(OptionField::TopP, &self.top_p)?),
        })
    }
}

fn parse_float(field: OptionField, raw: &str) -> Result<f64> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| TolkError::input_parse(field, raw, "expected a number"))?;
    if !value.is_finite() {
        return Err(TolkError::input_parse(field, raw, "expected a finite number"));
    }
    Ok(value)
}

fn parse_integer(field: OptionField, raw: &str) -> Result<i64> {
    raw.trim()
        .parse()
        .map_err(|_| TolkError::input_parse(field, raw, "expected a whole number"))
}
