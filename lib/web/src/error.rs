use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use surfcast_aggregate::AggregateError;

#[derive(thiserror::Error, Debug)]
pub enum ServerError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("no data found at <{0}>")]
    NotFound(String),
    #[error("upstream data failure: {0}")]
    Upstream(AggregateError),
    #[error("internal server error: {0}")]
    Internal(anyhow::Error),
}

impl From<AggregateError> for ServerError {
    fn from(error: AggregateError) -> Self {
        match error {
            AggregateError::NotFound { iri } => ServerError::NotFound(iri),
            other => ServerError::Upstream(other),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = match self {
            ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::NotFound(_) => StatusCode::NOT_FOUND,
            ServerError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ServerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, self.to_string()).into_response()
    }
}
