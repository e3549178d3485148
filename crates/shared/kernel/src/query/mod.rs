//! List-query engine: query-string translation, pagination math, and execution.
//!
//! The flow mirrors an inbound list request: [`filter::FilterExpr`] turns the
//! query string into a typed, allow-listed filter; [`pagination::PageWindow`]
//! computes the record window; [`list::execute_list`] composes both with field
//! selection and sort order and runs the two store queries (count + fetch).

pub mod filter;
pub mod list;
pub mod pagination;

use camp_database::DatabaseError;
use std::borrow::Cow;

/// Errors produced while translating or executing a list query.
#[camp_derive::api_error]
pub enum QueryError {
    /// A filter/sort/select parameter referenced a field outside the allow-list.
    #[error("Unknown field{}: {message}", format_context(.context))]
    UnknownField { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A recognized parameter carried a value that cannot be interpreted.
    #[error("Invalid parameter{}: {message}", format_context(.context))]
    InvalidParameter { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Database error{}: {source}", format_context(.context))]
    Database { source: DatabaseError, context: Option<Cow<'static, str>> },

    #[error("Serialization error{}: {source}", format_context(.context))]
    Serialize { source: serde_json::Error, context: Option<Cow<'static, str>> },

    #[error("Internal query error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

/// Serializes a record for a `CONTENT`/`MERGE` clause, dropping the `id` key.
///
/// Record identity travels in the statement target (`type::thing($tb, $id)`),
/// never inside the document body.
///
/// # Errors
/// Returns [`QueryError::Serialize`] if the record cannot be serialized and
/// [`QueryError::Internal`] if it does not serialize to an object.
pub fn content_without_id<T: serde::Serialize>(record: &T) -> Result<serde_json::Value, QueryError> {
    let mut value = serde_json::to_value(record)?;

    let Some(object) = value.as_object_mut() else {
        return Err(QueryError::Internal {
            message: "Record content must serialize to an object".into(),
            context: None,
        });
    };
    object.remove("id");

    Ok(value)
}
