use std::borrow::Cow;

/// Database error type covering connection, authentication, and query faults.
#[camp_derive::api_error]
pub enum DatabaseError {
    #[error("SurrealDB error{}: {source}", format_context(context))]
    Surreal { source: surrealdb::Error, context: Option<Cow<'static, str>> },

    #[error("Connection error{}: {message}", format_context(context))]
    Connection { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Validation error{}: {message}", format_context(context))]
    Validation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Authentication error{}: {message}", format_context(context))]
    Auth { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
