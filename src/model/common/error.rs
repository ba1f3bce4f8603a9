use thiserror::Error;

/// Validation failures raised by the survey domain.
///
/// Every variant is a deterministic, synchronous rejection of bad input;
/// the API layer translates them into user-visible responses.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("value cannot be empty or whitespace")]
    EmptyValue,
    #[error("a survey needs at least one respondent")]
    InsufficientRespondents,
    #[error("duplicate option: {0}")]
    DuplicateOption(String),
    #[error("preferred votes exceed the respondent budget")]
    PreferenceExceedsBudget,
    #[error("cannot calculate the outcome of a survey with no options")]
    NoOptions,
}
