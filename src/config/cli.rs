use crate::core::generator::validate_questionnaire;
use crate::domain::model::QuestionnaireResponses;
use crate::utils::error::{PlanError, Result};
use std::fs;
use std::path::Path;

/// Read questionnaire answers from a `.json` or `.toml` file.
pub fn load_questionnaire<P: AsRef<Path>>(path: P) -> Result<QuestionnaireResponses> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => serde_json::from_str(&content).map_err(|e| PlanError::InvalidBodyError {
            message: format!("{}: {}", path.display(), e),
        }),
        Some("toml") => toml::from_str(&content).map_err(|e| PlanError::InvalidBodyError {
            message: format!("{}: {}", path.display(), e),
        }),
        _ => Err(PlanError::InvalidBodyError {
            message: format!(
                "{}: unsupported questionnaire format (expected .json or .toml)",
                path.display()
            ),
        }),
    }
}

/// Load answers and apply the same required-field rules as the HTTP endpoint.
pub fn load_validated_questionnaire<P: AsRef<Path>>(
    path: P,
    require_all_fields: bool,
) -> Result<QuestionnaireResponses> {
    let responses = load_questionnaire(path)?;
    validate_questionnaire(&responses, require_all_fields)?;
    Ok(responses)
}

/// Write a rendered document, creating parent directories as needed.
pub fn write_output<P: AsRef<Path>>(path: P, data: &str) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    fs::write(path, data)?;
    tracing::debug!("Wrote {} bytes to {}", data.len(), path.display());
    Ok(())
}
