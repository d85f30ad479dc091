pub mod advice;
pub mod config;
pub mod contract;
pub mod errors;
pub mod guidance;
pub mod llm_client;
pub mod wellness;

pub use advice::Advisor;
pub use config::{Config, GeminiSettings};
pub use errors::{AdviceError, EndpointError, FailureKind, ParseError};
pub use llm_client::{GeminiClient, GenerativeModel};
