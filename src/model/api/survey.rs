use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::model::{
    common::{
        survey::{SurveyCore, SurveyOption},
        DomainError, NonEmptyString,
    },
    db::Survey,
};

/// A survey creation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurveySpec {
    /// What the survey asks.
    pub topic: String,
    /// Who the imaginary respondents are.
    pub respondent_type: String,
    /// How many votes to distribute.
    pub number_of_respondents: u32,
    /// The available answers, in display order.
    pub options: Vec<SurveyOptionSpec>,
    /// Give every vote to a single random option instead of the usual
    /// distribution.
    #[serde(default)]
    pub one_sided: bool,
}

/// A single option within a survey creation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurveyOptionSpec {
    pub option_text: String,
    /// Exact number of votes this option should receive; zero means no
    /// preference.
    #[serde(default)]
    pub preferred_number_of_votes: u32,
}

impl SurveySpec {
    /// Validate this spec into a survey and calculate its outcome.
    pub fn into_decided_survey(self, rng: &mut impl Rng) -> Result<SurveyCore, DomainError> {
        let mut survey = SurveyCore::new(
            NonEmptyString::new(self.topic)?,
            self.number_of_respondents,
            NonEmptyString::new(self.respondent_type)?,
        )?;
        let options = self
            .options
            .into_iter()
            .map(|option| {
                Ok((
                    NonEmptyString::new(option.option_text)?,
                    option.preferred_number_of_votes,
                ))
            })
            .collect::<Result<Vec<_>, DomainError>>()?;
        survey.add_options(options)?;

        if self.one_sided {
            survey.calculate_one_sided_outcome(rng)?;
        } else {
            survey.calculate_outcome(rng)?;
        }
        Ok(survey)
    }
}

/// An API-friendly view of a decided survey, vote counts included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyDescription {
    /// Unique ID, serialised as a hex string.
    pub id: String,
    pub owner_id: String,
    pub topic: String,
    pub respondent_type: String,
    pub number_of_respondents: u32,
    pub is_rigged: bool,
    pub options: Vec<SurveyOptionResult>,
    pub created_at: DateTime<Utc>,
}

/// One option's share of the outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyOptionResult {
    pub option_text: String,
    pub number_of_votes: u32,
    pub preferred_number_of_votes: u32,
}

impl From<Survey> for SurveyDescription {
    fn from(survey: Survey) -> Self {
        Self {
            id: survey.id.to_string(),
            owner_id: survey.owner_id.to_string(),
            topic: survey.topic().to_string(),
            respondent_type: survey.respondent_type().to_string(),
            number_of_respondents: survey.number_of_respondents(),
            is_rigged: survey.is_rigged(),
            options: survey.options().iter().map(Into::into).collect(),
            created_at: survey.created_at,
        }
    }
}

impl From<&SurveyOption> for SurveyOptionResult {
    fn from(option: &SurveyOption) -> Self {
        Self {
            option_text: option.option_text().to_string(),
            number_of_votes: option.number_of_votes(),
            preferred_number_of_votes: option.preferred_number_of_votes(),
        }
    }
}

/// A compact view for survey lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveySummary {
    /// Unique ID, serialised as a hex string.
    pub id: String,
    pub owner_id: String,
    pub topic: String,
    pub number_of_respondents: u32,
    pub is_rigged: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Survey> for SurveySummary {
    fn from(survey: Survey) -> Self {
        Self {
            id: survey.id.to_string(),
            owner_id: survey.owner_id.to_string(),
            topic: survey.topic().to_string(),
            number_of_respondents: survey.number_of_respondents(),
            is_rigged: survey.is_rigged(),
            created_at: survey.created_at,
        }
    }
}
