use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use derive_more::{Display, Error};
use serde_json::json;

/// Failure taxonomy of the analytics engine.
///
/// Deliberately narrow: an unknown user/role/organization in a query is not
/// an error (it matches nothing and yields empty results), and malformed
/// record data is evaluated as-is. The only thing that can actually fail is
/// reaching the record store, and that failure is propagated; retry policy
/// belongs to the caller.
#[derive(Debug, Display, Error)]
pub enum EngineError {
    #[display(fmt = "record store unavailable: {}", source)]
    StoreUnavailable { source: sqlx::Error },
}

impl From<sqlx::Error> for EngineError {
    fn from(source: sqlx::Error) -> Self {
        Self::StoreUnavailable { source }
    }
}

impl ResponseError for EngineError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::StoreUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({
            "message": self.to_string()
        }))
    }
}
