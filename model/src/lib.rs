pub mod config;
pub mod openai;
pub mod provider;
pub mod types;

pub use config::{OpenAIConfig, DEFAULT_OPENAI_BASE_URL};
pub use openai::OpenAIProvider;
pub use provider::{ModelError, ModelProvider, ModelResult};
pub use types::{ChatMessage, ChatRequest, ChatResponse, Choice, FinishReason, MessageRole, Usage};

pub mod prelude {
    pub use crate::config::*;
    pub use crate::openai::*;
    pub use crate::provider::*;
    pub use crate::types::*;
}
