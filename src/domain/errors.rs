use thiserror::Error;

use super::order::DraftField;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("ValidationError: missing required field(s): {}", join_fields(.missing))]
    Validation { missing: Vec<DraftField> },
}

impl DomainError {
    /// Fields named by a validation failure, in declaration order.
    pub fn missing_fields(&self) -> &[DraftField] {
        match self {
            DomainError::Validation { missing } => missing,
        }
    }
}

fn join_fields(fields: &[DraftField]) -> String {
    fields
        .iter()
        .map(|f| f.name())
        .collect::<Vec<_>>()
        .join(", ")
}
