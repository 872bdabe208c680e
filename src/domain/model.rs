use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompanyStage {
    #[default]
    Startup,
    Growth,
    Established,
    Enterprise,
}

impl CompanyStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompanyStage::Startup => "startup",
            CompanyStage::Growth => "growth",
            CompanyStage::Established => "established",
            CompanyStage::Enterprise => "enterprise",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CompanyStage::Startup => "Startup",
            CompanyStage::Growth => "Growth Stage",
            CompanyStage::Established => "Established",
            CompanyStage::Enterprise => "Enterprise",
        }
    }
}

impl fmt::Display for CompanyStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Questionnaire answers as submitted by the user.
///
/// Text fields that are absent or `null` decode to the empty string so that
/// missing answers surface from validation rather than from decoding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionnaireResponses {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub company_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub industry: String,
    #[serde(default)]
    pub company_stage: CompanyStage,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub goals: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub strengths: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub weaknesses: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub opportunities: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub threats: String,
}

impl QuestionnaireResponses {
    /// Names (wire spelling) of required answers that are empty.
    ///
    /// Company name, industry and goals are always required. The four SWOT
    /// answers are only checked when `require_all_fields` is set.
    pub fn missing_fields(&self, require_all_fields: bool) -> Vec<&'static str> {
        let mut checks = vec![
            ("companyName", &self.company_name),
            ("industry", &self.industry),
            ("goals", &self.goals),
        ];
        if require_all_fields {
            checks.extend([
                ("strengths", &self.strengths),
                ("weaknesses", &self.weaknesses),
                ("opportunities", &self.opportunities),
                ("threats", &self.threats),
            ]);
        }

        checks
            .into_iter()
            .filter(|(_, value)| value.is_empty())
            .map(|(name, _)| name)
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwotAlignment {
    Strength,
    Weakness,
    Opportunity,
    Threat,
}

impl SwotAlignment {
    pub fn as_str(&self) -> &'static str {
        match self {
            SwotAlignment::Strength => "strength",
            SwotAlignment::Weakness => "weakness",
            SwotAlignment::Opportunity => "opportunity",
            SwotAlignment::Threat => "threat",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriorityLevel {
    High,
    Medium,
    Low,
}

impl PriorityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            PriorityLevel::High => "high",
            PriorityLevel::Medium => "medium",
            PriorityLevel::Low => "low",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategicPriority {
    pub id: String,
    pub title: String,
    pub description: String,
    pub swot_alignment: SwotAlignment,
    pub priority: PriorityLevel,
    pub rationale: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionPlan {
    pub id: String,
    pub initiative: String,
    pub objective: String,
    pub timeline: String,
    pub resources: String,
    pub success_metrics: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risks: Option<Vec<String>>,
}

impl ActionPlan {
    pub fn risks(&self) -> &[String] {
        self.risks.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImplementationRoadmap {
    pub immediate: Vec<String>,
    pub short_term: Vec<String>,
    pub medium_term: Vec<String>,
    pub long_term: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskMitigation {
    pub risk: String,
    pub mitigation: String,
}

/// The structured plan returned by the model. Decoding is all-or-nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessPlan {
    pub executive_summary: String,
    pub strategic_priorities: Vec<StrategicPriority>,
    pub action_plans: Vec<ActionPlan>,
    pub implementation_roadmap: ImplementationRoadmap,
    pub risk_mitigation: Vec<RiskMitigation>,
}

/// Success envelope of the generation endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratePlanResponse {
    pub success: bool,
    pub plan: BusinessPlan,
}

impl GeneratePlanResponse {
    pub fn new(plan: BusinessPlan) -> Self {
        Self {
            success: true,
            plan,
        }
    }
}

/// Error envelope of the generation endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}
