use mongodb::{
    bson::{doc, Document},
    options::FindOptions,
};
use rocket::{futures::TryStreamExt, serde::json::Json, Route, State};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::events::{EventDispatcher, SurveyEvent};
use crate::model::{
    api::{
        pagination::{Paginated, PaginationRequest},
        survey::{SurveyDescription, SurveySpec, SurveySummary},
    },
    db::{NewSurvey, Survey, User},
    mongodb::{Coll, Id},
};

pub fn routes() -> Vec<Route> {
    routes![create_survey, get_survey, list_surveys, list_user_surveys]
}

#[post("/users/<user_id>/surveys", data = "<spec>", format = "json")]
async fn create_survey(
    user_id: Id,
    spec: Json<SurveySpec>,
    users: Coll<User>,
    new_surveys: Coll<NewSurvey>,
    surveys: Coll<Survey>,
    events: &State<EventDispatcher>,
) -> Result<Json<SurveyDescription>> {
    // The owner must exist.
    users
        .find_one(user_id.as_doc(), None)
        .await?
        .ok_or_else(|| Error::not_found(format!("User {}", user_id)))?;

    // Build the survey and calculate its outcome.
    // The scoped block is needed to force `rng` to be dropped before the next `await`.
    let survey = {
        let mut rng = rand::thread_rng();
        spec.0.into_decided_survey(&mut rng)?
    };

    // Insert it.
    let new_survey = NewSurvey::new(user_id, survey);
    let new_id: Id = new_surveys
        .insert_one(&new_survey, None)
        .await?
        .inserted_id
        .as_object_id()
        .unwrap() // Valid because the ID comes directly from the DB.
        .into();

    // Retrieve the full survey information including ID.
    let survey = surveys.find_one(new_id.as_doc(), None).await?.unwrap();

    // Raise the created event for asynchronous side effects.
    events.dispatch(SurveyEvent::created(&survey));

    Ok(Json(survey.into()))
}

#[get("/surveys/<survey_id>")]
async fn get_survey(survey_id: Id, surveys: Coll<Survey>) -> Result<Json<SurveyDescription>> {
    let survey = surveys
        .find_one(survey_id.as_doc(), None)
        .await?
        .ok_or_else(|| Error::not_found(format!("Survey {}", survey_id)))?;
    Ok(Json(survey.into()))
}

#[get("/surveys?<pagination..>")]
async fn list_surveys(
    pagination: PaginationRequest,
    config: &State<Config>,
    surveys: Coll<Survey>,
) -> Result<Json<Paginated<SurveySummary>>> {
    let pagination = pagination.clamped(config.max_page_size());
    paginated_summaries(doc! {}, pagination, &surveys).await
}

#[get("/users/<user_id>/surveys?<pagination..>")]
async fn list_user_surveys(
    user_id: Id,
    pagination: PaginationRequest,
    config: &State<Config>,
    users: Coll<User>,
    surveys: Coll<Survey>,
) -> Result<Json<Paginated<SurveySummary>>> {
    // The owner must exist.
    users
        .find_one(user_id.as_doc(), None)
        .await?
        .ok_or_else(|| Error::not_found(format!("User {}", user_id)))?;

    let pagination = pagination.clamped(config.max_page_size());
    let filter = doc! { "owner_id": *user_id };
    paginated_summaries(filter, pagination, &surveys).await
}

/// One page of survey summaries matching the filter, newest first.
async fn paginated_summaries(
    filter: Document,
    pagination: PaginationRequest,
    surveys: &Coll<Survey>,
) -> Result<Json<Paginated<SurveySummary>>> {
    let total = surveys.count_documents(filter.clone(), None).await?;
    // Newest first; the ID breaks ties between same-millisecond inserts.
    let options = FindOptions::builder()
        .sort(doc! { "created_at": -1, "_id": -1 })
        .skip(pagination.skip())
        .limit(pagination.page_size() as i64)
        .build();
    let items = surveys
        .find(filter, options)
        .await?
        .map_ok(SurveySummary::from)
        .try_collect()
        .await?;
    Ok(Json(Paginated {
        items,
        pagination: pagination.into_result(total),
    }))
}
