//! Identity feature slice: bearer-token verification for protected routes.
//!
//! Tokens are issued by the external identity collaborator and only verified
//! here. Handlers opt into protection by taking a [`CurrentUser`] argument;
//! the extractor rejects missing or invalid tokens with a 401 before the
//! handler body runs.

mod extract;

pub use extract::{Claims, CurrentUser, verify_token};
