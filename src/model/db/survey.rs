use std::ops::{Deref, DerefMut};

use chrono::{DateTime, Utc};
use mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime;
use serde::{Deserialize, Serialize};

use crate::model::{common::survey::SurveyCore, mongodb::Id};

/// A survey without an ID, ready for insertion.
///
/// Surveys are inserted fully decided (outcome already calculated) and never
/// updated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSurvey {
    /// The user who created this survey.
    pub owner_id: Id,
    /// When the survey was created.
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    /// The survey itself.
    #[serde(flatten)]
    pub survey: SurveyCore,
}

impl NewSurvey {
    /// Wrap a decided survey for the given owner.
    pub fn new(owner_id: Id, survey: SurveyCore) -> Self {
        Self {
            owner_id,
            created_at: Utc::now(),
            survey,
        }
    }
}

impl Deref for NewSurvey {
    type Target = SurveyCore;

    fn deref(&self) -> &Self::Target {
        &self.survey
    }
}

impl DerefMut for NewSurvey {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.survey
    }
}

/// A survey from the database, with its unique ID.
#[derive(Debug, Serialize, Deserialize)]
pub struct Survey {
    #[serde(rename = "_id")]
    pub id: Id,
    #[serde(flatten)]
    pub survey: NewSurvey,
}

impl Deref for Survey {
    type Target = NewSurvey;

    fn deref(&self) -> &Self::Target {
        &self.survey
    }
}

impl DerefMut for Survey {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.survey
    }
}
