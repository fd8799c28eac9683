pub mod response;
pub mod settings;

use std::{fmt::Display, sync::Arc};

use actix_web::{http::StatusCode, web, HttpResponse, ResponseError};
use log::error;

use crate::database::store::{BlogStore, StoreError};
use response::Envelope;

/** Used for sharing the persistence handle when handling requests */
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn BlogStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn BlogStore>) -> AppState {
        AppState { store }
    }

    /// Runs blocking store calls on actix's blocking thread pool.
    pub async fn run<F, T>(&self, query: F) -> Result<T, StoreError>
    where
        F: FnOnce(&dyn BlogStore) -> Result<T, StoreError> + Send + 'static,
        T: Send + 'static,
    {
        let store = Arc::clone(&self.store);

        web::block(move || query(store.as_ref()))
            .await
            .map_err(|err| StoreError::Unavailable(err.to_string()))?
    }
}

/** Holds the errors we use during request processing */
#[derive(Debug, PartialEq, Eq)]
pub enum AppError {
    /// Malformed or missing input
    Validation(&'static str),
    /// Entity absent, or not owned by the caller
    NotFound(&'static str),
    /// Write rejected because the entity already exists
    Conflict(&'static str),
    InternalServerError,
}

impl AppError {
    /// Logs `err` under `context` and hides it from the caller.
    pub fn internal(context: &str, err: impl Display) -> AppError {
        error!("{}: {}", context, err);
        AppError::InternalServerError
    }
}

impl Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Validation(message)
            | AppError::NotFound(message)
            | AppError::Conflict(message) => f.write_str(message),
            AppError::InternalServerError => f.write_str("Internal server error"),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::Conflict(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(Envelope::<()>::failure(self.to_string()))
    }
}

impl std::error::Error for AppError {}
