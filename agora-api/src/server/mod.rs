use agora_db::{error::DbError, service::ThreadService};
use axum::{
    Router,
    extract::{
        FromRef, Request,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
};
use axum_extra::typed_header::TypedHeaderRejection;
use json::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

mod json;
mod query;
pub mod reader;
mod routes;

pub type ServerRouter = Router<ServerState>;

#[derive(Clone, Debug, FromRef)]
pub struct ServerState {
    pub threads: ThreadService,
}

pub fn routes() -> ServerRouter {
    routes::routes().fallback(fallback)
}

pub async fn fallback(request: Request) -> ServerError {
    ServerError::UnknownRoute(request.into_parts().0.uri)
}

pub type Result<T, E = ServerError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Unknown route requested: {0}")]
    UnknownRoute(Uri),
    #[error("Path rejected: {0}")]
    PathRejection(#[from] PathRejection),
    #[error("Query string rejected: {0}")]
    QueryRejection(#[from] QueryRejection),
    #[error("Incoming JSON rejected: {0}")]
    JsonRejection(#[from] JsonRejection),
    #[error("JSON response could not be serialized: {0}")]
    JsonResponse(#[from] serde_json::Error),
    #[error("Reader header was missing or invalid: {0}")]
    InvalidReaderHeader(TypedHeaderRejection),
    #[error(transparent)]
    Database(#[from] DbError),
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::UnknownRoute(_) | ServerError::PathRejection(_) => StatusCode::NOT_FOUND,
            ServerError::InvalidReaderHeader(rejection) if rejection.is_missing() => {
                StatusCode::UNAUTHORIZED
            }
            ServerError::QueryRejection(_) | ServerError::InvalidReaderHeader(_) => {
                StatusCode::BAD_REQUEST
            }
            ServerError::JsonRejection(rejection) => rejection.status(),
            ServerError::JsonResponse(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServerError::Database(err) => database_status(err),
        }
    }
}

fn database_status(err: &DbError) -> StatusCode {
    match err {
        DbError::UserNotFound(_) | DbError::ThreadNotFound(_) => StatusCode::NOT_FOUND,
        DbError::Validation(_) | DbError::Dependency(_) => StatusCode::UNPROCESSABLE_ENTITY,
        DbError::Conflict(_) => StatusCode::CONFLICT,
        DbError::Data(_) | DbError::Migrate(_) | DbError::Store(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
struct ErrorResponse {
    status: u16,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();

        error!(error = %self, %status, "Replying with error");

        let error_response = ErrorResponse {
            status: status.as_u16(),
        };
        (status, Json(error_response)).into_response()
    }
}
