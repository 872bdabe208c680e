use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlanError {
    #[error("Missing required fields: {}", .fields.join(", "))]
    MissingFieldsError { fields: Vec<String> },

    #[error("Invalid request body: {message}")]
    InvalidBodyError { message: String },

    #[error("Model request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Model API error (status {status}): {message}")]
    ModelApiError { status: u16, message: String },

    #[error("Unexpected model response: {message}")]
    ModelResponseError { message: String },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration value: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid configuration value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

/// Coarse grouping of errors, used for HTTP status codes and CLI exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The caller sent something unusable; fixable by resubmitting.
    InvalidRequest,
    /// The model call or the decoding of its output failed.
    Generation,
    /// Local setup problem (config file, credentials, filesystem).
    Configuration,
}

impl PlanError {
    pub fn missing_fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::MissingFieldsError {
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    pub fn model_response<S: Into<String>>(message: S) -> Self {
        Self::ModelResponseError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            PlanError::MissingFieldsError { .. } | PlanError::InvalidBodyError { .. } => {
                ErrorCategory::InvalidRequest
            }
            PlanError::ApiError(_)
            | PlanError::ModelApiError { .. }
            | PlanError::ModelResponseError { .. }
            | PlanError::SerializationError(_) => ErrorCategory::Generation,
            PlanError::IoError(_)
            | PlanError::ConfigError { .. }
            | PlanError::MissingConfigError { .. }
            | PlanError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn is_client_error(&self) -> bool {
        self.category() == ErrorCategory::InvalidRequest
    }

    /// Short, stable message suitable for the `error` member of a response payload.
    pub fn user_friendly_message(&self) -> &'static str {
        match self {
            PlanError::MissingFieldsError { .. } => "Missing required fields",
            PlanError::InvalidBodyError { .. } => "Invalid request body",
            _ => match self.category() {
                ErrorCategory::Configuration => "Configuration problem",
                _ => "Failed to generate business plan",
            },
        }
    }

    /// Diagnostic detail attached next to the friendly message.
    pub fn details(&self) -> String {
        match self {
            PlanError::MissingFieldsError { fields } => fields.join(", "),
            PlanError::InvalidBodyError { message } => message.clone(),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::InvalidRequest => {
                "Fill in company name, industry and goals, then submit again"
            }
            ErrorCategory::Generation => {
                "Check the API key and network access, then resubmit the questionnaire"
            }
            ErrorCategory::Configuration => {
                "Check the configuration file and the ANTHROPIC_API_KEY environment variable"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, PlanError>;
