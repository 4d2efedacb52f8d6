use crate::utils::output::OutputStyle;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AppError {
    #[error("Admission ID already exists: {0}")]
    DuplicateIdentifier(String),

    #[error("{item_type} '{identifier}' not found")]
    NotFound {
        item_type: String,
        identifier: String,
    },

    #[error("{0} is required")]
    MissingField(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("System error: {0}")]
    System(String),

    #[error("IO error: {0}")]
    Io(String),
}

impl AppError {
    pub fn not_found(item_type: &str, identifier: impl Into<String>) -> Self {
        AppError::NotFound {
            item_type: item_type.to_string(),
            identifier: identifier.into(),
        }
    }
}

/// Result type alias for consistent error handling across the application
pub type AppResult<T> = Result<T, AppError>;

pub enum FlowResult {
    NotFound {
        item_type: String,
        search_term: String,
    },
    EmptyList {
        item_type: String,
    },
    Cancelled(String),
    Success(String),
}

pub fn report_error(err: &AppError) {
    match err {
        AppError::DuplicateIdentifier(_) | AppError::MissingField(_) => {
            eprintln!("❌ {}", OutputStyle::error(&err.to_string()));
        }
        AppError::NotFound { .. } => {
            eprintln!("⚠️  {}", OutputStyle::warning(&err.to_string()));
        }
        AppError::Io(e) => {
            eprintln!("❌ {}", OutputStyle::error(e));
        }
        AppError::Parse(msg) | AppError::System(msg) => {
            eprintln!("❌ {}", OutputStyle::error(msg));
        }
    }
}

pub fn handle_flow(flow: FlowResult) {
    match flow {
        FlowResult::NotFound {
            item_type,
            search_term,
        } => {
            let msg = format!("{} '{}' not found", item_type, search_term);
            println!("⚠️  {}", OutputStyle::warning(&msg));
        }
        FlowResult::EmptyList { item_type } => {
            let msg = format!("No {} found", item_type);
            println!("{}", OutputStyle::muted(&msg));
        }
        FlowResult::Cancelled(msg) => {
            println!("⏹️  {}", OutputStyle::muted(&msg));
        }
        FlowResult::Success(msg) => {
            println!("✅ {}", OutputStyle::success(&msg));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = AppError::DuplicateIdentifier("ADM-2023-001".to_string());
        assert_eq!(err.to_string(), "Admission ID already exists: ADM-2023-001");

        let err = AppError::not_found("Student", "ADM-9");
        assert_eq!(err.to_string(), "Student 'ADM-9' not found");

        let err = AppError::MissingField("Subject".to_string());
        assert_eq!(err.to_string(), "Subject is required");
    }
}
