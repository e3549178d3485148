//! The HTTP error boundary.
//!
//! Every handler returns `Result<_, ApiError>`; feature-level errors convert
//! into [`ApiError`] at this boundary and surface as a structured JSON body.
//! Internal details are logged, never sent to the client.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use camp_database::DatabaseError;
use camp_derive::api_model;
use std::borrow::Cow;
use tracing::{debug, error};

use crate::query::QueryError;

/// Wire shape of every error response.
#[api_model]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
}

#[camp_derive::api_error]
pub enum ApiError {
    #[error("Not found{}: {message}", format_context(.context))]
    NotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Bad request{}: {message}", format_context(.context))]
    BadRequest { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Unauthorized{}: {message}", format_context(.context))]
    Unauthorized { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Forbidden{}: {message}", format_context(.context))]
    Forbidden { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal server error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl ApiError {
    pub fn not_found(message: impl Into<Cow<'static, str>>) -> Self {
        Self::NotFound { message: message.into(), context: None }
    }

    pub fn bad_request(message: impl Into<Cow<'static, str>>) -> Self {
        Self::BadRequest { message: message.into(), context: None }
    }

    pub fn unauthorized(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Unauthorized { message: message.into(), context: None }
    }

    pub fn forbidden(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Forbidden { message: message.into(), context: None }
    }

    pub fn internal(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Internal { message: message.into(), context: None }
    }

    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            Self::Forbidden { .. } => StatusCode::FORBIDDEN,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The message sent to the client. Internal faults are masked.
    fn client_message(&self) -> String {
        match self {
            Self::Internal { .. } => "Server error".to_owned(),
            Self::NotFound { message, .. }
            | Self::BadRequest { message, .. }
            | Self::Unauthorized { message, .. }
            | Self::Forbidden { message, .. } => message.clone().into_owned(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            error!(error = %self, "Request failed");
        } else {
            debug!(error = %self, "Request rejected");
        }

        let body = ErrorBody { success: false, error: self.client_message() };
        (status, Json(body)).into_response()
    }
}

impl From<QueryError> for ApiError {
    fn from(err: QueryError) -> Self {
        match err {
            QueryError::UnknownField { message, context }
            | QueryError::InvalidParameter { message, context } => {
                Self::BadRequest { message, context }
            },
            other => Self::Internal { message: other.to_string().into(), context: None },
        }
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        Self::Internal { message: err.to_string().into(), context: None }
    }
}

impl From<surrealdb::Error> for ApiError {
    fn from(err: surrealdb::Error) -> Self {
        Self::Internal { message: err.to_string().into(), context: None }
    }
}

impl From<super::state::ApiStateError> for ApiError {
    fn from(err: super::state::ApiStateError) -> Self {
        Self::Internal { message: err.to_string().into(), context: None }
    }
}

impl From<crate::security::RecordIdError> for ApiError {
    fn from(err: crate::security::RecordIdError) -> Self {
        let crate::security::RecordIdError::Validation { message, context } = err;
        Self::BadRequest { message, context }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_match_the_taxonomy() {
        assert_eq!(ApiError::not_found("x").status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::bad_request("x").status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::unauthorized("x").status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::forbidden("x").status(), StatusCode::FORBIDDEN);
        assert_eq!(ApiError::internal("x").status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn internal_details_are_masked() {
        let err = ApiError::internal("connection string leaked");
        assert_eq!(err.client_message(), "Server error");

        let err = ApiError::not_found("Bootcamp abc not found");
        assert_eq!(err.client_message(), "Bootcamp abc not found");
    }

    #[test]
    fn unknown_field_maps_to_bad_request() {
        let err: ApiError = QueryError::UnknownField { message: "'x'".into(), context: None }.into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }
}
