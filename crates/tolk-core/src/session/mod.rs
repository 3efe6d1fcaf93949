//! Conversation protocol with the inference server.

pub mod client;
pub mod manager;
pub mod model;
pub mod options;
pub mod request;

pub use client::GenerateClient;
pub use manager::{SessionManager, strip_code_fences};
pub use model::{ContextState, ReferenceSet, Session, Turn, TurnReply};
pub use options::{DecodingOptions, OptionField, OptionFields};
pub use request::{GenerateRequest, GenerateResponse};
