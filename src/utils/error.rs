use thiserror::Error;

/// 表單驗證失敗，訊息直接顯示給訪客
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormError {
    #[error("Veuillez entrer votre prénom.")]
    MissingFirstName,

    #[error("Veuillez entrer un email valide.")]
    InvalidEmail,

    #[error("Veuillez compléter votre date de naissance.")]
    IncompleteDate,

    #[error("La date saisie n'est pas valide.")]
    InvalidDate,
}

#[derive(Error, Debug)]
pub enum LeadError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("{0}")]
    Form(#[from] FormError),

    #[error("Upstream service returned {status}: {message}")]
    UpstreamError { status: u16, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    Network,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl LeadError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            LeadError::Form(_) => ErrorCategory::Input,
            LeadError::MissingConfigError { .. }
            | LeadError::InvalidConfigValueError { .. }
            | LeadError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            LeadError::Http(_) | LeadError::UpstreamError { .. } => ErrorCategory::Network,
            LeadError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Low,
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            LeadError::Form(_) => "Correct the highlighted field and submit again".to_string(),
            LeadError::MissingConfigError { field } => {
                format!("Set {} in the environment or configuration file", field)
            }
            LeadError::InvalidConfigValueError { field, .. }
            | LeadError::ConfigValidationError { field, .. } => {
                format!("Check the value configured for {}", field)
            }
            LeadError::Http(_) => "Check network connectivity and the endpoint URL".to_string(),
            LeadError::UpstreamError { .. } => {
                "Check the upstream service status and API key".to_string()
            }
            LeadError::IoError(_) => "Check file paths and permissions".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            LeadError::Form(e) => e.to_string(),
            LeadError::Http(_) => "Impossible de joindre le service distant.".to_string(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LeadError>;
