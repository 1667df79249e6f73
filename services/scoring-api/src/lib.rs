pub mod config;
pub mod database;
pub mod dispatch;
pub mod errors;
pub mod handlers;
pub mod metrics;
pub mod models;

// Re-exports for convenience
pub use dispatch::DecisionDispatcher;
pub use errors::{ApiError, ApiResult};
