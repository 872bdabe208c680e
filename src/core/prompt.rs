use crate::domain::model::QuestionnaireResponses;

/// Build the instruction text sent to the model.
///
/// Every answer is interpolated verbatim; callers validate beforehand.
pub fn build_business_plan_prompt(responses: &QuestionnaireResponses) -> String {
    format!(
        "You are an expert strategic business consultant. Generate a comprehensive, actionable business plan based on the following company assessment.

Company Information:
- Company Name: {company_name}
- Industry: {industry}
- Company Stage: {company_stage}

Strategic Goals:
{goals}

SWOT Analysis:

Strengths:
{strengths}

Weaknesses:
{weaknesses}

Opportunities:
{opportunities}

Threats:
{threats}

Instructions:
1. Create a compelling executive summary that synthesizes the company's position and the strategic plan
2. Identify 3-5 strategic priorities that leverage strengths, address weaknesses, capitalize on opportunities, and mitigate threats
3. Develop detailed action plans with clear timelines, resource requirements, and success metrics
4. Create a phased implementation roadmap (immediate, short-term, medium-term, long-term)
5. Identify key risks and provide specific mitigation strategies

Make the plan:
- Specific to this company's situation
- Actionable with clear next steps
- Realistic given the stated strengths and weaknesses
- Focused on achieving the stated goals
- Professional and suitable for presentation to stakeholders

Generate the business plan now.",
        company_name = responses.company_name,
        industry = responses.industry,
        company_stage = responses.company_stage,
        goals = responses.goals,
        strengths = responses.strengths,
        weaknesses = responses.weaknesses,
        opportunities = responses.opportunities,
        threats = responses.threats,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::CompanyStage;

    fn acme() -> QuestionnaireResponses {
        QuestionnaireResponses {
            company_name: "Acme".to_string(),
            industry: "SaaS".to_string(),
            company_stage: CompanyStage::Startup,
            goals: "Grow revenue 2x".to_string(),
            strengths: "Strong team".to_string(),
            weaknesses: "Low brand awareness".to_string(),
            opportunities: "Market expansion".to_string(),
            threats: "New competitor".to_string(),
        }
    }

    #[test]
    fn test_prompt_embeds_every_answer() {
        let prompt = build_business_plan_prompt(&acme());

        for expected in [
            "Acme",
            "SaaS",
            "startup",
            "Grow revenue 2x",
            "Strong team",
            "Low brand awareness",
            "Market expansion",
            "New competitor",
        ] {
            assert!(prompt.contains(expected), "prompt is missing {:?}", expected);
        }
    }

    #[test]
    fn test_prompt_layout() {
        let prompt = build_business_plan_prompt(&acme());

        assert!(prompt.starts_with("You are an expert strategic business consultant."));
        assert!(prompt.contains("- Company Name: Acme\n- Industry: SaaS\n- Company Stage: startup\n"));
        assert!(prompt.contains("Strategic Goals:\nGrow revenue 2x\n"));
        assert!(prompt.contains("SWOT Analysis:\n\nStrengths:\nStrong team\n\nWeaknesses:\n"));
        assert!(prompt.contains("Threats:\nNew competitor\n\nInstructions:\n1. "));
        assert!(prompt.contains("\n5. Identify key risks and provide specific mitigation strategies\n"));
        assert!(prompt.ends_with("Generate the business plan now."));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let responses = acme();
        assert_eq!(
            build_business_plan_prompt(&responses),
            build_business_plan_prompt(&responses)
        );
    }

    #[test]
    fn test_prompt_keeps_multiline_and_special_text_verbatim() {
        let mut responses = acme();
        responses.goals = "1) Reach {profit}\n2) Hire \"senior\" engineers & <ops>".to_string();
        responses.company_stage = CompanyStage::Enterprise;

        let prompt = build_business_plan_prompt(&responses);
        assert!(prompt.contains("1) Reach {profit}\n2) Hire \"senior\" engineers & <ops>"));
        assert!(prompt.contains("- Company Stage: enterprise"));
    }
}
