use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::{database::DatabaseError, models::ModelError, providers::ProviderError};

/// Body sent with every failed request. Callers get no detail.
pub const FAILURE_BODY: &str = "Nope!";

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Database(#[from] DatabaseError),
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error("No results for {0:?}")]
    NoResults(String),
    #[error("Bad query: {0}")]
    BadQuery(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!("Request failed: {}", self);
        (StatusCode::INTERNAL_SERVER_ERROR, FAILURE_BODY).into_response()
    }
}
