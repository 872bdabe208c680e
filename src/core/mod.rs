pub mod generator;
pub mod prompt;
pub mod render;
pub mod schema;

pub use crate::domain::model::{BusinessPlan, QuestionnaireResponses};
pub use crate::domain::ports::{ConfigProvider, ModelClient, StructuredRequest};
pub use crate::utils::error::Result;
