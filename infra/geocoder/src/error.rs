use std::borrow::Cow;

/// Errors surfaced by the geocoding collaborator.
#[camp_derive::api_error]
pub enum GeocoderError {
    #[error("Geocoder transport error{}: {source}", format_context(context))]
    Transport { source: reqwest::Error, context: Option<Cow<'static, str>> },

    #[error("Postal code could not be resolved{}: {message}", format_context(context))]
    Unresolved { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Malformed geocoder response{}: {message}", format_context(context))]
    Malformed { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal geocoder error{}: {message}", format_context(context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
