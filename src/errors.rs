use std::fmt;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("date not supported: {what}")]
    OutOfRange {
        what: String,
    },

    #[error("invalid date: {message}")]
    InvalidDate {
        message: String,
    },

    #[error("invalid input for {field}: {message}")]
    InvalidInput {
        field: String,
        message: String,
    },
}

impl LedgerError {
    pub fn out_of_range(what: impl Into<String>) -> Self {
        LedgerError::OutOfRange { what: what.into() }
    }

    pub fn invalid_date(message: impl Into<String>) -> Self {
        LedgerError::InvalidDate { message: message.into() }
    }

    pub fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        LedgerError::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }

    /// true when the request fell outside the almanac
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, LedgerError::OutOfRange { .. })
    }

    /// short text shown to the user
    pub fn user_message(&self) -> String {
        match self {
            LedgerError::OutOfRange { .. } => "date not supported".to_string(),
            LedgerError::InvalidDate { message } => format!("invalid date: {}", message),
            LedgerError::InvalidInput { field, message } => format!("{}: {}", field, message),
        }
    }

    /// offending field, if the error names one
    pub fn field(&self) -> Option<&str> {
        match self {
            LedgerError::InvalidInput { field, .. } => Some(field),
            _ => None,
        }
    }
}

/// every offending field found while validating one input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<LedgerError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    pub fn push(&mut self, error: LedgerError) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn errors(&self) -> &[LedgerError] {
        &self.errors
    }

    /// fields that failed, in the order they were checked
    pub fn fields(&self) -> Vec<&str> {
        self.errors.iter().filter_map(|e| e.field()).collect()
    }

    /// Ok if nothing was recorded, otherwise the collected errors
    pub fn into_result(self) -> std::result::Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    /// first recorded error, for fail-fast callers
    pub fn into_first(self) -> Option<LedgerError> {
        self.errors.into_iter().next()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.errors.iter().map(|e| e.to_string()).collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

pub type Result<T> = std::result::Result<T, LedgerError>;
