//! Reasoning-service boundary
//!
//! The loop engine sees only the [`ReasoningService`] trait; everything about
//! transport, prompting, and timeouts lives behind it.

use std::sync::Arc;

use tracing::debug;

mod error;
mod openai;
mod service;
mod types;

pub use error::ReasoningError;
pub use openai::OpenAiService;
#[cfg(test)]
pub use service::mock;
pub use service::ReasoningService;
pub use types::{TaskAnalysis, TaskContext};

use crate::config::ModelSettings;

/// Create a reasoning service for a goal based on the provider in settings
///
/// Currently only "openai" (and compatible endpoints) is supported.
pub fn create_service(goal: &str, settings: &ModelSettings) -> Result<Arc<dyn ReasoningService>, ReasoningError> {
    debug!(provider = %settings.provider, model = %settings.model, "create_service: called");
    match settings.provider.as_str() {
        "openai" => Ok(Arc::new(OpenAiService::from_settings(goal, settings)?)),
        other => Err(ReasoningError::Config(format!(
            "Unknown reasoning provider: '{other}'. Supported: openai"
        ))),
    }
}
