use camp_kernel::query::QueryError;
use camp_kernel::server::ApiError;
use std::borrow::Cow;

/// Courses slice error type.
#[camp_derive::api_error]
pub enum CourseError {
    #[error("Course not found{}: {message}", format_context(context))]
    NotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Database error{}: {source}", format_context(context))]
    Database { source: surrealdb::Error, context: Option<Cow<'static, str>> },

    #[error("Query error{}: {source}", format_context(context))]
    Query { source: QueryError, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl From<CourseError> for ApiError {
    fn from(err: CourseError) -> Self {
        match err {
            CourseError::NotFound { message, context } => Self::NotFound { message, context },
            CourseError::Query { source, .. } => source.into(),
            other => Self::internal(other.to_string()),
        }
    }
}
