//! Wire types for the `/api/generate` endpoint.

use serde::{Deserialize, Serialize};

use super::options::DecodingOptions;

/// Request body for a single non-streaming generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub model: String,
    pub prompt: String,
    pub stream: bool,
    pub context: Vec<i64>,
    pub system: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<DecodingOptions>,
}

/// The subset of the success body the session protocol relies on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub response: String,
    pub context: Vec<i64>,
}
