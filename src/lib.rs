pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::adapters::anthropic::AnthropicClient;
pub use crate::config::AppConfig;
pub use crate::core::generator::{GenerationSettings, PlanGenerator};
pub use crate::domain::model::{BusinessPlan, QuestionnaireResponses};
pub use crate::utils::error::{PlanError, Result};
