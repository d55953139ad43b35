mod gemini;
mod traits;
mod types;

pub use gemini::GeminiClient;
pub use traits::ModelProvider;
pub use types::{GenerationRequest, ModelError};
