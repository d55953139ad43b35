mod error;
mod interface;
mod webhook;

pub use error::ToolError;
pub use interface::{DocumentTools, SearchCall};
pub use webhook::WebhookToolClient;
