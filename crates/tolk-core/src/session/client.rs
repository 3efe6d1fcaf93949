use async_trait::async_trait;

use super::request::{GenerateRequest, GenerateResponse};
use crate::error::Result;

/// Transport seam between the session manager and the inference server.
///
/// Implementations must return `TolkError::Api` for any non-200 status,
/// carrying the status code and the raw body.
#[async_trait]
pub trait GenerateClient: Send + Sync {
    /// URL requests are sent to.
    fn endpoint(&self) -> &str;

    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse>;
}
