use std::fmt::{self, Display, Formatter};
use std::ops::Deref;

use serde::{Deserialize, Serialize};

use super::DomainError;

/// A string value that is guaranteed to contain at least one
/// non-whitespace character.
///
/// Deserialisation goes through the same validation as [`NonEmptyString::new`],
/// so a value of this type is well-formed wherever it came from.
#[derive(Debug, Clone, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Validate and wrap the given value.
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(DomainError::EmptyValue);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for NonEmptyString {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for NonEmptyString {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for NonEmptyString {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<NonEmptyString> for String {
    fn from(value: NonEmptyString) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_regular_text() {
        let value = NonEmptyString::new("Very awesome").unwrap();
        assert_eq!(value.as_str(), "Very awesome");
    }

    #[test]
    fn rejects_empty_and_whitespace() {
        assert_eq!(NonEmptyString::new(""), Err(DomainError::EmptyValue));
        assert_eq!(NonEmptyString::new("   "), Err(DomainError::EmptyValue));
        assert_eq!(NonEmptyString::new("\t\n"), Err(DomainError::EmptyValue));
    }

    #[test]
    fn equality_is_ordinal() {
        let lower = NonEmptyString::new("yes").unwrap();
        let upper = NonEmptyString::new("Yes").unwrap();
        assert_ne!(lower, upper);
        assert_eq!(lower, NonEmptyString::new("yes").unwrap());
    }
}
