use std::{fmt::Display, num::ParseIntError, sync::Arc};

use actix_web::{HttpResponse, ResponseError};
use diesel::{
    r2d2::{ConnectionManager, Pool},
    PgConnection,
};
use serde_json::json;

use crate::database::db_utils::psql_connect_to_db;

/** Used for storing the database connection when handling requests */
pub struct AppState {
    pub psql_pool: Arc<Pool<ConnectionManager<PgConnection>>>,
}

impl Clone for AppState {
    fn clone(&self) -> Self {
        Self {
            psql_pool: self.psql_pool.clone(),
        }
    }
}

impl AppState {
    /// Builds the state from `database_url`, falling back to the
    /// `DATABASE_URL` environment variable when `None` is given.
    /// Tests pass an isolated database here.
    pub fn new(database_url: Option<&str>) -> Self {
        Self {
            psql_pool: psql_connect_to_db(database_url),
        }
    }
}

/** Holds the errors we will use during request processing */
#[derive(Debug, PartialEq)]
pub enum AppError {
    /// Malformed or missing request data, including path ids that do not
    /// parse as integers. Responds 400.
    InvalidInput,
    /// A `sort_by`/`order` value outside the allow-lists. Responds 404 like
    /// `NotFound`, but stays a separate variant so the rejection cause is
    /// visible in logs and tests.
    InvalidQuery,
    /// The referenced row does not exist, or a category filter matched
    /// nothing. Responds 404.
    NotFound,
    /// Anything unclassified, database connectivity included. Responds 500.
    InternalServerError,
}

impl Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::InvalidInput => f.write_str("Bad request"),
            AppError::InvalidQuery => f.write_str("Invalid query parameter"),
            AppError::NotFound => f.write_str("Not found"),
            AppError::InternalServerError => f.write_str("Internal server error"),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        match self {
            AppError::InvalidInput => actix_web::http::StatusCode::BAD_REQUEST,
            AppError::InvalidQuery => actix_web::http::StatusCode::NOT_FOUND,
            AppError::NotFound => actix_web::http::StatusCode::NOT_FOUND,
            AppError::InternalServerError => actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            AppError::InvalidInput => "Bad request",
            AppError::InvalidQuery | AppError::NotFound => "Not found",
            AppError::InternalServerError => {
                log::error!("unclassified failure reached the error translator");
                "A server error has occurred."
            }
        };

        HttpResponse::build(self.status_code()).json(json!({ "message": message }))
    }
}

impl std::error::Error for AppError {}

impl From<diesel::result::Error> for AppError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::NotFound => AppError::NotFound,
            // 22P02, e.g. a non-numeric value reaching an integer column
            diesel::result::Error::DatabaseError(_, ref info)
                if info.message().contains("invalid input syntax") =>
            {
                AppError::InvalidInput
            }
            diesel::result::Error::SerializationError(_)
            | diesel::result::Error::DeserializationError(_) => AppError::InvalidInput,
            _ => AppError::InternalServerError,
        }
    }
}

impl From<ParseIntError> for AppError {
    fn from(_: ParseIntError) -> Self {
        Self::InvalidInput
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        match err.classify() {
            serde_json::error::Category::Io => AppError::InternalServerError,
            _ => AppError::InvalidInput,
        }
    }
}

impl From<diesel::r2d2::PoolError> for AppError {
    fn from(_: diesel::r2d2::PoolError) -> Self {
        AppError::InternalServerError
    }
}
