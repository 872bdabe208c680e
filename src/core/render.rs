use crate::domain::model::{BusinessPlan, QuestionnaireResponses};
use chrono::{DateTime, Utc};
use std::fmt::{self, Write};

/// Render a plan as a Markdown document for the company that requested it.
pub fn render_markdown(
    responses: &QuestionnaireResponses,
    plan: &BusinessPlan,
    generated_at: DateTime<Utc>,
) -> String {
    let mut out = String::new();
    // Writing into a String never fails.
    let _ = write_document(&mut out, responses, plan, generated_at);
    out
}

fn bullet_list(out: &mut String, items: &[String]) -> fmt::Result {
    for item in items {
        writeln!(out, "- {}", item)?;
    }
    Ok(())
}

fn write_document(
    out: &mut String,
    responses: &QuestionnaireResponses,
    plan: &BusinessPlan,
    generated_at: DateTime<Utc>,
) -> fmt::Result {
    writeln!(out, "# Business Plan for {}\n", responses.company_name)?;
    writeln!(
        out,
        "_{} · {} · generated {}_\n",
        responses.industry,
        responses.company_stage.label(),
        generated_at.format("%Y-%m-%d")
    )?;

    writeln!(out, "## Executive Summary\n")?;
    writeln!(out, "{}\n", plan.executive_summary)?;

    writeln!(out, "## Strategic Priorities")?;
    for priority in &plan.strategic_priorities {
        writeln!(
            out,
            "\n### {} [{}]\n",
            priority.title,
            priority.priority.as_str().to_uppercase()
        )?;
        writeln!(out, "{}\n", priority.description)?;
        writeln!(out, "**SWOT Alignment:** {}\n", priority.swot_alignment.as_str())?;
        writeln!(out, "**Rationale:** {}", priority.rationale)?;
    }
    writeln!(out)?;

    writeln!(out, "## Action Plans")?;
    for action in &plan.action_plans {
        writeln!(out, "\n### {}\n", action.initiative)?;
        writeln!(out, "{}\n", action.objective)?;
        writeln!(out, "**Timeline:** {}\n", action.timeline)?;
        writeln!(out, "**Resources:** {}\n", action.resources)?;
        writeln!(out, "**Success Metrics:**\n")?;
        bullet_list(out, &action.success_metrics)?;
        if !action.risks().is_empty() {
            writeln!(out, "\n**Risks:**\n")?;
            bullet_list(out, action.risks())?;
        }
    }
    writeln!(out)?;

    let roadmap = &plan.implementation_roadmap;
    writeln!(out, "## Implementation Roadmap")?;
    for (heading, items) in [
        ("Immediate (0-3 months)", &roadmap.immediate),
        ("Short-term (3-6 months)", &roadmap.short_term),
        ("Medium-term (6-12 months)", &roadmap.medium_term),
        ("Long-term (12+ months)", &roadmap.long_term),
    ] {
        writeln!(out, "\n### {}\n", heading)?;
        bullet_list(out, items)?;
    }
    writeln!(out)?;

    writeln!(out, "## Risk Mitigation")?;
    for item in &plan.risk_mitigation {
        writeln!(out, "\n**Risk:** {}\n", item.risk)?;
        writeln!(out, "**Mitigation:** {}", item.mitigation)?;
    }
    Ok(())
}
