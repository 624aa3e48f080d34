use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use contacts_wire::problem::Problem;
use contacts_wire::IdentifierError;
use tracing::{error, trace, warn};
use uuid::Uuid;

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Invalid request: {0}")]
    Validation(#[from] validator::ValidationErrors),
    #[error("Invalid request: {0}")]
    Json(#[from] JsonRejection),
    #[error("Malformed Identifier: {0}")]
    Identifier(#[from] IdentifierError),
    #[error("Object not found")]
    NotFound,
    #[error("Bad request: {0}")]
    BadRequest(&'static str),
    #[error("Method not allowed")]
    MethodNotAllowed,
    #[error("Internal error: {0}")]
    Internal(&'static str),
    #[cfg(feature = "mongodb")]
    #[error("Could not reach the database: {0}")]
    Connection(mongodb::error::Error),
    #[cfg(feature = "mongodb")]
    #[error("Database error: {0}")]
    Database(mongodb::error::Error),
}

#[cfg(feature = "mongodb")]
impl From<mongodb::error::Error> for AppError {
    fn from(err: mongodb::error::Error) -> Self {
        use mongodb::error::ErrorKind;

        match *err.kind {
            ErrorKind::ServerSelection { .. }
            | ErrorKind::Io(_)
            | ErrorKind::DnsResolve { .. }
            | ErrorKind::ConnectionPoolCleared { .. } => Self::Connection(err),
            _ => Self::Database(err),
        }
    }
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_)
            | AppError::Json(_)
            | AppError::Identifier(_)
            | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            #[cfg(feature = "mongodb")]
            AppError::Connection(_) => StatusCode::SERVICE_UNAVAILABLE,
            #[cfg(feature = "mongodb")]
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn into_problem(self) -> Problem {
        let reference = Uuid::new_v4();
        let status = self.status();

        let detail = match &self {
            AppError::Validation(err) => {
                trace!(%reference, "Received invalid request: {}", err);
                Some(err.to_string())
            }
            AppError::Json(err) => {
                trace!(%reference, "Received invalid JSON in request: {}", err);
                Some(err.to_string())
            }
            AppError::Identifier(err) => {
                trace!(%reference, "Malformed identifier: {}", err);
                Some(err.to_string())
            }
            AppError::NotFound => {
                trace!(%reference, "Object not found");
                None
            }
            AppError::BadRequest(err) => {
                trace!(%reference, "Received invalid request: {}", err);
                Some(err.to_string())
            }
            AppError::MethodNotAllowed => {
                trace!(%reference, "Method not allowed");
                None
            }
            AppError::Internal(err) => {
                error!(%reference, "Internal error: {}", err);
                Some(err.to_string())
            }
            #[cfg(feature = "mongodb")]
            AppError::Connection(err) => {
                warn!(%reference, "Could not reach the database: {}", err);
                Some("The database is not reachable".to_string())
            }
            #[cfg(feature = "mongodb")]
            AppError::Database(err) => {
                error!(%reference, "Database error: {}", err);
                Some("A database error occurred".to_string())
            }
        };

        Problem {
            r#type: Default::default(),
            title: Some(status.to_string()),
            status,
            detail,
            instance: Some(reference.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let problem = self.into_problem();
        (problem.status, Json(problem)).into_response()
    }
}
