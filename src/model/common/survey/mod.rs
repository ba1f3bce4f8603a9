mod distribution;
mod option;

pub use option::SurveyOption;

use rand::Rng;
use serde::{Deserialize, Serialize};

use distribution::VoteDistribution;

use super::{DomainError, NonEmptyString};

/// Core survey data: the respondent budget plus an ordered list of options,
/// unique by text (case-insensitive).
///
/// A survey starts empty, accumulates options, and is then decided exactly
/// once by one of the outcome calculations, which distribute the respondent
/// votes across the options in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyCore {
    topic: NonEmptyString,
    respondent_type: NonEmptyString,
    number_of_respondents: u32,
    options: Vec<SurveyOption>,
}

impl SurveyCore {
    /// Create a new survey with no options.
    pub fn new(
        topic: NonEmptyString,
        number_of_respondents: u32,
        respondent_type: NonEmptyString,
    ) -> Result<Self, DomainError> {
        if number_of_respondents < 1 {
            return Err(DomainError::InsufficientRespondents);
        }
        Ok(Self {
            topic,
            respondent_type,
            number_of_respondents,
            options: Vec::new(),
        })
    }

    pub fn topic(&self) -> &NonEmptyString {
        &self.topic
    }

    pub fn respondent_type(&self) -> &NonEmptyString {
        &self.respondent_type
    }

    pub fn number_of_respondents(&self) -> u32 {
        self.number_of_respondents
    }

    pub fn options(&self) -> &[SurveyOption] {
        &self.options
    }

    /// Whether any option declared a preferred vote count.
    pub fn is_rigged(&self) -> bool {
        self.options.iter().any(SurveyOption::is_rigged)
    }

    /// Append an option with no vote preference.
    pub fn add_option(&mut self, option_text: NonEmptyString) -> Result<(), DomainError> {
        self.check_duplicate(&option_text)?;
        self.options.push(SurveyOption::new(option_text));
        Ok(())
    }

    /// Append an option that should receive exactly `preferred_number_of_votes`.
    ///
    /// The preferred counts across all options can never exceed the
    /// respondent budget.
    pub fn add_option_with_preference(
        &mut self,
        option_text: NonEmptyString,
        preferred_number_of_votes: u32,
    ) -> Result<(), DomainError> {
        self.check_duplicate(&option_text)?;
        let preferred_total = self.preferred_votes_total() + u64::from(preferred_number_of_votes);
        if preferred_total > u64::from(self.number_of_respondents) {
            return Err(DomainError::PreferenceExceedsBudget);
        }
        self.options.push(SurveyOption::with_preference(
            option_text,
            preferred_number_of_votes,
        ));
        Ok(())
    }

    /// Append several options in sequence order, stopping at the first
    /// failure. Options added before the failing element remain.
    pub fn add_options(
        &mut self,
        options: impl IntoIterator<Item = (NonEmptyString, u32)>,
    ) -> Result<(), DomainError> {
        for (option_text, preferred_number_of_votes) in options {
            self.add_option_with_preference(option_text, preferred_number_of_votes)?;
        }
        Ok(())
    }

    /// Calculate the survey outcome: the fixed distribution when any option
    /// is rigged, the random distribution otherwise.
    ///
    /// Not idempotent: strategies only ever add votes, so calculating twice
    /// stacks a second distribution on top of the first.
    pub fn calculate_outcome(&mut self, rng: &mut impl Rng) -> Result<(), DomainError> {
        self.distribute(VoteDistribution::select(&self.options), rng)
    }

    /// Calculate a landslide outcome: one random option takes every vote,
    /// regardless of declared preferences.
    pub fn calculate_one_sided_outcome(&mut self, rng: &mut impl Rng) -> Result<(), DomainError> {
        self.distribute(VoteDistribution::OneSided, rng)
    }

    fn distribute(
        &mut self,
        distribution: VoteDistribution,
        rng: &mut impl Rng,
    ) -> Result<(), DomainError> {
        if self.options.is_empty() {
            return Err(DomainError::NoOptions);
        }
        distribution.distribute(self.number_of_respondents, &mut self.options, rng);
        Ok(())
    }

    fn check_duplicate(&self, option_text: &NonEmptyString) -> Result<(), DomainError> {
        let lowered = option_text.to_lowercase();
        if self
            .options
            .iter()
            .any(|option| option.option_text().to_lowercase() == lowered)
        {
            return Err(DomainError::DuplicateOption(option_text.to_string()));
        }
        Ok(())
    }

    fn preferred_votes_total(&self) -> u64 {
        self.options
            .iter()
            .map(|option| u64::from(option.preferred_number_of_votes()))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn text(value: &str) -> NonEmptyString {
        NonEmptyString::new(value).unwrap()
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    fn total_votes(survey: &SurveyCore) -> u32 {
        survey
            .options()
            .iter()
            .map(SurveyOption::number_of_votes)
            .sum()
    }

    fn awesomeness_survey() -> SurveyCore {
        let mut survey =
            SurveyCore::new(text("How awesome is this?"), 350, text("Individuals")).unwrap();
        survey.add_option(text("Very awesome")).unwrap();
        survey.add_option(text("Not so much")).unwrap();
        survey
    }

    #[test]
    fn rejects_zero_respondents() {
        assert_eq!(
            SurveyCore::new(text("Tabs or spaces?"), 0, text("Developers")),
            Err(DomainError::InsufficientRespondents),
        );
    }

    #[test]
    fn accepts_a_single_respondent() {
        let survey = SurveyCore::new(text("Tabs or spaces?"), 1, text("Developers")).unwrap();
        assert_eq!(survey.number_of_respondents(), 1);
        assert!(survey.options().is_empty());
    }

    #[test]
    fn rejects_duplicate_options_case_insensitively() {
        let mut survey = awesomeness_survey();
        survey.add_option(text("Yes")).unwrap();
        assert_eq!(
            survey.add_option(text("yes")),
            Err(DomainError::DuplicateOption("yes".to_string())),
        );
        assert_eq!(survey.options().len(), 3);
    }

    #[test]
    fn rejects_a_preference_over_the_budget() {
        let mut survey = SurveyCore::new(text("Tabs or spaces?"), 100, text("Developers")).unwrap();
        assert_eq!(
            survey.add_option_with_preference(text("Tabs"), 101),
            Err(DomainError::PreferenceExceedsBudget),
        );
    }

    #[test]
    fn rejects_preferences_summing_over_the_budget() {
        let mut survey = SurveyCore::new(text("Tabs or spaces?"), 100, text("Developers")).unwrap();
        survey.add_option_with_preference(text("Tabs"), 60).unwrap();
        assert_eq!(
            survey.add_option_with_preference(text("Spaces"), 41),
            Err(DomainError::PreferenceExceedsBudget),
        );
        // Exactly filling the budget is fine.
        survey
            .add_option_with_preference(text("Spaces"), 40)
            .unwrap();
    }

    #[test]
    fn bulk_add_short_circuits_and_keeps_earlier_options() {
        let mut survey = SurveyCore::new(text("Tabs or spaces?"), 100, text("Developers")).unwrap();
        let result = survey.add_options(vec![
            (text("Tabs"), 0),
            (text("tabs"), 0),
            (text("Spaces"), 0),
        ]);
        assert_eq!(result, Err(DomainError::DuplicateOption("tabs".to_string())));
        // Partial application: the first option survives, the rest were never added.
        assert_eq!(survey.options().len(), 1);
        assert_eq!(survey.options()[0].option_text().as_str(), "Tabs");
    }

    #[test]
    fn outcome_needs_at_least_one_option() {
        let mut survey = SurveyCore::new(text("Tabs or spaces?"), 100, text("Developers")).unwrap();
        assert_eq!(
            survey.calculate_outcome(&mut rng()),
            Err(DomainError::NoOptions),
        );
        assert_eq!(
            survey.calculate_one_sided_outcome(&mut rng()),
            Err(DomainError::NoOptions),
        );
    }

    #[test]
    fn random_outcome_consumes_every_vote() {
        let mut survey = awesomeness_survey();
        survey.calculate_outcome(&mut rng()).unwrap();
        assert_eq!(total_votes(&survey), 350);
        assert_eq!(survey.topic().as_str(), "How awesome is this?");
        assert!(!survey.is_rigged());
    }

    #[test]
    fn rigged_outcome_matches_preferences_exactly() {
        let mut survey =
            SurveyCore::new(text("Tabs or spaces?"), 1000, text("Developers")).unwrap();
        survey.add_option_with_preference(text("Tabs"), 600).unwrap();
        survey
            .add_option_with_preference(text("Spaces"), 400)
            .unwrap();
        assert!(survey.is_rigged());

        survey.calculate_outcome(&mut rng()).unwrap();
        assert_eq!(survey.options()[0].number_of_votes(), 600);
        assert_eq!(survey.options()[1].number_of_votes(), 400);
    }

    #[test]
    fn mixed_preferences_only_fill_declared_options() {
        let mut survey = SurveyCore::new(text("Favourite colour?"), 500, text("Artists")).unwrap();
        survey.add_option_with_preference(text("Red"), 300).unwrap();
        survey.add_option(text("Green")).unwrap();

        survey.calculate_outcome(&mut rng()).unwrap();
        assert_eq!(survey.options()[0].number_of_votes(), 300);
        assert_eq!(survey.options()[1].number_of_votes(), 0);
    }

    #[test]
    fn one_sided_outcome_has_a_single_winner() {
        let mut survey = SurveyCore::new(text("Favourite colour?"), 500, text("Artists")).unwrap();
        survey
            .add_options(vec![(text("Red"), 0), (text("Green"), 0), (text("Blue"), 0)])
            .unwrap();

        survey.calculate_one_sided_outcome(&mut rng()).unwrap();
        let winners: Vec<_> = survey
            .options()
            .iter()
            .filter(|option| option.number_of_votes() > 0)
            .collect();
        assert_eq!(winners.len(), 1);
        assert_eq!(winners[0].number_of_votes(), 500);
        assert_eq!(total_votes(&survey), 500);
    }

    #[test]
    fn repeat_calculation_accumulates_votes() {
        // Outcome calculation is knowingly not idempotent: strategies only
        // ever increment, so a second run doubles the vote mass.
        let mut survey = awesomeness_survey();
        survey.calculate_outcome(&mut rng()).unwrap();
        survey.calculate_outcome(&mut rng()).unwrap();
        assert_eq!(total_votes(&survey), 700);
    }
}
