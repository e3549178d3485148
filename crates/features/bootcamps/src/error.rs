use camp_database::DatabaseError;
use camp_geocoder::GeocoderError;
use camp_kernel::query::QueryError;
use camp_kernel::server::ApiError;
use camp_storage::StorageError;
use std::borrow::Cow;

/// Bootcamps slice error type.
#[camp_derive::api_error]
pub enum BootcampError {
    #[error("Bootcamp not found{}: {message}", format_context(context))]
    NotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Database error{}: {source}", format_context(context))]
    Database { source: surrealdb::Error, context: Option<Cow<'static, str>> },

    #[error("Connection error{}: {source}", format_context(context))]
    Connection { source: DatabaseError, context: Option<Cow<'static, str>> },

    #[error("Query error{}: {source}", format_context(context))]
    Query { source: QueryError, context: Option<Cow<'static, str>> },

    #[error("Storage error{}: {source}", format_context(context))]
    Storage { source: StorageError, context: Option<Cow<'static, str>> },

    #[error("Geocoding error{}: {source}", format_context(context))]
    Geocode { source: GeocoderError, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl From<BootcampError> for ApiError {
    fn from(err: BootcampError) -> Self {
        match err {
            BootcampError::NotFound { message, context } => Self::NotFound { message, context },
            // Query faults keep their bad-request/internal split.
            BootcampError::Query { source, .. } => source.into(),
            other => Self::internal(other.to_string()),
        }
    }
}
