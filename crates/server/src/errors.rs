use abroad_rag::QueryError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{error, warn};

/// A custom error type for the server application.
///
/// Query errors are the user's to fix and keep their status message; anything
/// else is logged and reported as a generic internal error.
pub enum AppError {
    /// A rejected query step, e.g. an unknown major or an empty question.
    Query(QueryError),
    /// Generic internal server errors.
    Internal(anyhow::Error),
}

impl From<QueryError> for AppError {
    fn from(err: QueryError) -> Self {
        AppError::Query(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status_code, error_message) = match self {
            AppError::Query(err) => {
                warn!("Query rejected: {err}");
                let status = match err {
                    QueryError::NoMajorSelected
                    | QueryError::NoProgramSelected
                    | QueryError::EmptyQuestion
                    | QueryError::ProgramNotInMajor { .. } => StatusCode::BAD_REQUEST,
                    QueryError::UnknownMajor(_)
                    | QueryError::NoProgramsForMajor(_)
                    | QueryError::ProgramNotFound(_) => StatusCode::NOT_FOUND,
                    QueryError::DataIntegrity { .. } => StatusCode::CONFLICT,
                };
                (status, err.to_string())
            }
            AppError::Internal(err) => {
                error!("Internal server error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred.".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status_code, body).into_response()
    }
}
