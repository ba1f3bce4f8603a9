use rocket::{http::Status, response::Responder};
use thiserror::Error;

use crate::model::common::DomainError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Db(#[from] mongodb::error::Error),
    #[error("Bad request: {0}")]
    Domain(#[from] DomainError),
    #[error("{0}: {1}")]
    Status(Status, String),
}

impl Error {
    /// A 404 for the given missing resource.
    pub fn not_found(what: String) -> Self {
        Self::Status(Status::NotFound, format!("{} not found", what))
    }
}

impl<'r, 'o: 'r> Responder<'r, 'o> for Error {
    fn respond_to(self, _: &'r rocket::Request<'_>) -> rocket::response::Result<'o> {
        Err(match self {
            Self::Db(err) => {
                error!("Database error: {err}");
                Status::InternalServerError
            }
            Self::Domain(err) => {
                warn!("Rejected by domain validation: {err}");
                Status::BadRequest
            }
            Self::Status(status, msg) => {
                warn!("{msg}");
                status
            }
        })
    }
}
