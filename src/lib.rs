pub mod application;
pub mod config;
pub mod infrastructure;

pub use application::{agent, tooling};
pub use config::AppConfig;
pub use infrastructure::{model, server};
