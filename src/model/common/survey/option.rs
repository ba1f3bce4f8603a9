use serde::{Deserialize, Serialize};

use crate::model::common::NonEmptyString;

/// A single selectable answer within a survey.
///
/// Options only exist as members of a survey's option list; the constructors
/// and the vote mutator are deliberately scoped to the aggregate so that
/// vote counts can only change via a distribution strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyOption {
    option_text: NonEmptyString,
    number_of_votes: u32,
    preferred_number_of_votes: u32,
}

impl SurveyOption {
    /// An option with no vote preference.
    pub(super) fn new(option_text: NonEmptyString) -> Self {
        Self::with_preference(option_text, 0)
    }

    /// An option that should receive exactly `preferred_number_of_votes`.
    /// The owning survey validates the preference against its respondent
    /// budget; this constructor does not.
    pub(super) fn with_preference(
        option_text: NonEmptyString,
        preferred_number_of_votes: u32,
    ) -> Self {
        Self {
            option_text,
            number_of_votes: 0,
            preferred_number_of_votes,
        }
    }

    pub fn option_text(&self) -> &NonEmptyString {
        &self.option_text
    }

    pub fn number_of_votes(&self) -> u32 {
        self.number_of_votes
    }

    pub fn preferred_number_of_votes(&self) -> u32 {
        self.preferred_number_of_votes
    }

    /// Whether this option declared a preferred vote count.
    pub fn is_rigged(&self) -> bool {
        self.preferred_number_of_votes > 0
    }

    /// Record a single vote.
    pub(super) fn add_vote(&mut self) {
        self.number_of_votes += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: &str) -> NonEmptyString {
        NonEmptyString::new(value).unwrap()
    }

    #[test]
    fn starts_with_zero_votes() {
        let option = SurveyOption::new(text("Tabs"));
        assert_eq!(option.number_of_votes(), 0);
        assert_eq!(option.preferred_number_of_votes(), 0);
        assert!(!option.is_rigged());
    }

    #[test]
    fn preference_marks_option_as_rigged() {
        let option = SurveyOption::with_preference(text("Tabs"), 600);
        assert!(option.is_rigged());
        assert_eq!(option.preferred_number_of_votes(), 600);
        assert_eq!(option.number_of_votes(), 0);
    }

    #[test]
    fn add_vote_increments_by_one() {
        let mut option = SurveyOption::new(text("Spaces"));
        option.add_vote();
        option.add_vote();
        assert_eq!(option.number_of_votes(), 2);
    }
}
