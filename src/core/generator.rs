use crate::core::prompt::build_business_plan_prompt;
use crate::core::schema::{business_plan_schema, BUSINESS_PLAN_SCHEMA_NAME};
use crate::domain::model::{BusinessPlan, QuestionnaireResponses};
use crate::domain::ports::{ConfigProvider, ModelClient, StructuredRequest};
use crate::utils::error::{PlanError, Result};

pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
pub const DEFAULT_MAX_TOKENS: u32 = 8000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationSettings {
    pub model: String,
    pub max_tokens: u32,
    pub require_all_fields: bool,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            require_all_fields: false,
        }
    }
}

impl GenerationSettings {
    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        Self {
            model: config.model().to_string(),
            max_tokens: config.max_tokens(),
            require_all_fields: config.require_all_fields(),
        }
    }
}

/// Turns questionnaire answers into a validated `BusinessPlan`.
///
/// Holds no per-request state; one instance serves any number of concurrent
/// requests.
pub struct PlanGenerator<M: ModelClient> {
    client: M,
    settings: GenerationSettings,
}

impl<M: ModelClient> PlanGenerator<M> {
    pub fn new(client: M, settings: GenerationSettings) -> Self {
        Self { client, settings }
    }

    pub fn settings(&self) -> &GenerationSettings {
        &self.settings
    }

    pub fn validate(&self, responses: &QuestionnaireResponses) -> Result<()> {
        validate_questionnaire(responses, self.settings.require_all_fields)
    }

    /// The exact request that `generate` would send for these answers.
    pub fn build_request(&self, responses: &QuestionnaireResponses) -> StructuredRequest {
        StructuredRequest {
            model: self.settings.model.clone(),
            max_tokens: self.settings.max_tokens,
            prompt: build_business_plan_prompt(responses),
            schema_name: BUSINESS_PLAN_SCHEMA_NAME.to_string(),
            schema: business_plan_schema(),
        }
    }

    pub async fn generate(&self, responses: &QuestionnaireResponses) -> Result<BusinessPlan> {
        self.validate(responses)?;

        let request = self.build_request(responses);
        tracing::info!("Generating business plan with {}", request.model);
        tracing::debug!(
            "Company: '{}', prompt length: {} characters",
            responses.company_name,
            request.prompt.len()
        );

        let raw = self.client.generate_structured(request).await?;
        let plan = parse_business_plan(&raw)?;

        tracing::info!(
            "Business plan ready: {} priorities, {} action plans, {} risks",
            plan.strategic_priorities.len(),
            plan.action_plans.len(),
            plan.risk_mitigation.len()
        );
        Ok(plan)
    }
}

/// Reject answers missing a required field. Shared by the endpoint and the CLI.
pub fn validate_questionnaire(
    responses: &QuestionnaireResponses,
    require_all_fields: bool,
) -> Result<()> {
    let missing = responses.missing_fields(require_all_fields);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(PlanError::missing_fields(missing))
    }
}

/// Decode raw model output. Any mismatch with the contract fails the whole plan.
pub fn parse_business_plan(raw: &str) -> Result<BusinessPlan> {
    let plan: BusinessPlan = serde_json::from_str(raw)?;
    Ok(plan)
}
