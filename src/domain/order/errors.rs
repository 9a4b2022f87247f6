use serde::{Deserialize, Serialize};

// ============================================================================
// Order Errors
// ============================================================================
//
// Two kinds only:
// - Validation: the candidate value breaks the schema (first violation wins)
// - Domain: the value is well-formed but the transition is not allowed
//
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(tag = "type", content = "message")]
pub enum OrderError {
    #[error("{0}")]
    #[serde(rename = "ValidationError")]
    Validation(String),

    #[error("{0}")]
    #[serde(rename = "DomainError")]
    Domain(String),
}

impl OrderError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn domain(message: impl Into<String>) -> Self {
        Self::Domain(message.into())
    }

    /// Error kind name, as used in logs and metric labels
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "ValidationError",
            Self::Domain(_) => "DomainError",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Validation(message) | Self::Domain(message) => message,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn is_domain(&self) -> bool {
        matches!(self, Self::Domain(_))
    }
}
