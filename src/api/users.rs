use mongodb::bson::doc;
use rocket::{http::Status, serde::json::Json, Route};

use crate::error::{Error, Result};
use crate::model::{
    api::user::{UserDescription, UserSpec},
    db::{NewUser, User},
    mongodb::{Coll, Id},
};

pub fn routes() -> Vec<Route> {
    routes![register_user, get_user, find_user]
}

#[post("/users", data = "<spec>", format = "json")]
async fn register_user(
    spec: Json<UserSpec>,
    new_users: Coll<NewUser>,
    users: Coll<User>,
) -> Result<Json<UserDescription>> {
    // Check external ID uniqueness.
    let filter = doc! {
        "external_id": &spec.external_id,
    };
    let existing = users.find_one(filter, None).await?;
    if existing.is_some() {
        return Err(Error::Status(
            Status::BadRequest,
            format!("External ID already registered: {}", spec.external_id),
        ));
    }

    // Validate and insert the user.
    let user: NewUser = spec.0.try_into()?;
    let new_id: Id = new_users
        .insert_one(&user, None)
        .await?
        .inserted_id
        .as_object_id()
        .unwrap() // Valid because the ID comes directly from the DB.
        .into();

    // Retrieve the full user information including ID.
    let user = users.find_one(new_id.as_doc(), None).await?.unwrap();
    Ok(Json(user.into()))
}

#[get("/users/<user_id>")]
async fn get_user(user_id: Id, users: Coll<User>) -> Result<Json<UserDescription>> {
    let user = users
        .find_one(user_id.as_doc(), None)
        .await?
        .ok_or_else(|| Error::not_found(format!("User {}", user_id)))?;
    Ok(Json(user.into()))
}

#[get("/users?<external_id>")]
async fn find_user(external_id: String, users: Coll<User>) -> Result<Json<UserDescription>> {
    let filter = doc! {
        "external_id": &external_id,
    };
    let user = users
        .find_one(filter, None)
        .await?
        .ok_or_else(|| Error::not_found(format!("User with external ID '{}'", external_id)))?;
    Ok(Json(user.into()))
}

#[cfg(test)]
mod tests {
    use mongodb::Database;
    use rocket::{
        http::{ContentType, Status},
        local::asynchronous::Client,
        serde::json::serde_json,
    };

    use super::*;

    #[backend_test]
    async fn register_and_fetch_user(client: Client, db: Database) {
        // Register a user.
        let description = register(&client, &UserSpec::example1()).await;
        assert_eq!(description.external_id, UserSpec::example1().external_id);
        assert_eq!(description.display_name, UserSpec::example1().display_name);

        // Ensure the user has been inserted.
        let users = Coll::<User>::from_db(&db);
        let filter = doc! { "external_id": &UserSpec::example1().external_id };
        let inserted = users.find_one(filter, None).await.unwrap().unwrap();
        assert_eq!(inserted.id.to_string(), description.id);

        // Fetch by ID.
        let id = description.id.parse::<Id>().unwrap();
        let response = client.get(uri!(get_user(id))).dispatch().await;
        assert_eq!(Status::Ok, response.status());
        let fetched: UserDescription =
            serde_json::from_str(&response.into_string().await.unwrap()).unwrap();
        assert_eq!(description, fetched);

        // Look up by external ID.
        let response = client
            .get(uri!(find_user(&UserSpec::example1().external_id)))
            .dispatch()
            .await;
        assert_eq!(Status::Ok, response.status());
        let found: UserDescription =
            serde_json::from_str(&response.into_string().await.unwrap()).unwrap();
        assert_eq!(description, found);
    }

    #[backend_test]
    async fn bad_register(client: Client, db: Database) {
        // Try a blank display name.
        register_expect_status(&client, &UserSpec::blank_name(), Status::BadRequest).await;

        // Try a duplicate external ID.
        register(&client, &UserSpec::example1()).await;
        register_expect_status(&client, &UserSpec::example1(), Status::BadRequest).await;

        // Ensure only the one valid user was created.
        let users = Coll::<User>::from_db(&db);
        let count = users.count_documents(None, None).await.unwrap();
        assert_eq!(count, 1);
    }

    #[backend_test]
    async fn missing_user(client: Client) {
        let response = client.get(uri!(get_user(Id::new()))).dispatch().await;
        assert_eq!(Status::NotFound, response.status());

        let response = client.get(uri!(find_user("auth0|nobody"))).dispatch().await;
        assert_eq!(Status::NotFound, response.status());
    }

    async fn register(client: &Client, spec: &UserSpec) -> UserDescription {
        let response = client
            .post(uri!(register_user))
            .header(ContentType::JSON)
            .body(serde_json::to_string(spec).unwrap())
            .dispatch()
            .await;
        assert_eq!(Status::Ok, response.status());
        serde_json::from_str(&response.into_string().await.unwrap()).unwrap()
    }

    async fn register_expect_status(client: &Client, spec: &UserSpec, status: Status) {
        let response = client
            .post(uri!(register_user))
            .header(ContentType::JSON)
            .body(serde_json::to_string(spec).unwrap())
            .dispatch()
            .await;
        assert_eq!(status, response.status());
    }
}
