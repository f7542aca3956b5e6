use axum::{
    Json,
    extract::rejection::{FormRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use log::error;
use serde::Serialize;

use liftjournal::LiftError;
use liftjournal::model::ExerciseName;

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    /// Present when an exercise name was rejected, so the client can re-prompt.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exercise_names: Option<Vec<&'static str>>,
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorResponse,
}

impl ApiError {
    pub fn new(status: StatusCode, error: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorResponse {
                error: error.into(),
                exercise_names: None,
            },
        }
    }

    pub fn internal<E: std::fmt::Display>(e: E) -> Self {
        error!("Request failed: {}", e);
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<LiftError> for ApiError {
    fn from(e: LiftError) -> Self {
        match &e {
            LiftError::NotFound { .. } => Self::new(StatusCode::NOT_FOUND, e.to_string()),
            LiftError::InvalidExerciseName { .. } => Self {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                body: ErrorResponse {
                    error: e.to_string(),
                    exercise_names: Some(ExerciseName::names()),
                },
            },
            LiftError::InvalidSetValue { .. } => {
                Self::new(StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
            }
            LiftError::Conflict { .. } => Self::new(StatusCode::CONFLICT, e.to_string()),
            LiftError::Storage(_) => Self::internal(&e),
        }
    }
}

// Malformed input keeps axum's status (400 or 422) but gets the JSON body.
impl From<FormRejection> for ApiError {
    fn from(rejection: FormRejection) -> Self {
        Self::new(rejection.status(), rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::new(rejection.status(), rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::new(rejection.status(), rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
