#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros for the CampHub infrastructure.
//! This crate provides attribute macros that remove the boilerplate shared by
//! every slice: error enums with context support, API data models with a
//! uniform Serde policy, documented Axum handlers, and feature-slice handles.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, ItemFn, ItemStruct, parse_macro_input};

/// Attribute macro to define a standard API data model.
///
/// Ensures consistency across all DTOs in the platform by injecting common
/// derives and a uniform Serde policy.
///
/// # Injected Behaviors
///
/// * **Derives**: `Debug`, `Clone`, `Serialize`, `Deserialize`, and `utoipa::ToSchema`.
/// * **Serde Policy**:
///     * `rename_all = "camelCase"` by default (can be overridden).
///     * `deny_unknown_fields` by default (can be disabled).
///
/// # Arguments
///
/// * `rename_all = "..."` - Overrides the default Serde rename policy.
/// * `deny_unknown_fields = false` - Disables strict field checking.
///
/// # Example
///
/// ```rust,ignore
/// use camp_derive::api_model;
///
/// #[api_model(deny_unknown_fields = false)]
/// pub struct BootcampSummary {
///     pub id: String,
///     pub name: String,
/// }
/// ```
#[proc_macro_attribute]
pub fn api_model(attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemStruct);
    macros::api::expand_api_model(attr.into(), input).into()
}

/// Attribute macro to bridge Axum handlers with `OpenAPI` documentation.
///
/// Wraps a standard async function and registers its metadata via
/// `utoipa::path`. Accepts the usual `utoipa::path` arguments (`get`, `post`,
/// `path = "..."`, `params(...)`, `responses(...)`, `tag = "..."`, ...).
///
/// # Example
///
/// ```rust,ignore
/// use camp_derive::api_handler;
///
/// #[api_handler(
///     get,
///     path = "/health",
///     responses((status = OK, body = HealthResponse)),
///     tag = "System"
/// )]
/// pub async fn health_handler() -> Result<(), ()> {
///     Ok(())
/// }
/// ```
#[proc_macro_attribute]
pub fn api_handler(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    macros::api::expand_api_handler(args.into(), input).into()
}

/// A high-level attribute macro for defining domain-specific error enums.
///
/// Transforms a standard enum into a fully-featured error type integrated with
/// the CampHub infrastructure.
///
/// # Features
///
/// * **Automatic Derives**: Injects `#[derive(Debug, thiserror::Error)]`.
/// * **Context Support**: Generates a companion `...Ext` trait that adds `.context()`
///   to any `Result` that can be converted into this error type.
/// * **Standard Conversions**: Implements `From<T>` for variants containing a `source`
///   field, enabling the use of the `?` operator for upstream errors.
/// * **Internal Fallback**: Provides `From<&str>` and `From<String>` implementations
///   if an `Internal` variant is present.
///
/// # Requirements
///
/// 1. The macro must be applied to an **enum** with named-field variants.
/// 2. Variants must include a `context: Option<Cow<'static, str>>` field.
/// 3. Variants wrapping external errors name the wrapped field `source` (or
///    mark it with `#[source]`/`#[from]`).
///
/// # Example
///
/// ```rust,ignore
/// use camp_derive::api_error;
/// use std::borrow::Cow;
///
/// #[api_error]
/// pub enum GeocoderError {
///     #[error("Transport error{}: {source}", format_context(.context))]
///     Transport { source: reqwest::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Internal fault{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
/// ```
#[proc_macro_attribute]
pub fn api_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand_derive(input).into()
}

/// Attribute macro to define a Vertical Slice handle.
///
/// Transforms a struct into the full Slice pattern:
/// 1. Generates a thread-safe `Arc` wrapper.
/// 2. Implements `Deref` for transparent access to the inner state.
/// 3. Implements `FeatureSlice` for registration in the Kernel.
///
/// # Example
/// ```rust,ignore
/// #[camp_derive::camp_slice]
/// pub struct Bootcamps {
///     pub uploads_dir: std::path::PathBuf,
/// }
///
/// fn init() -> Bootcamps {
///     Bootcamps::new(BootcampsInner { uploads_dir: "public/uploads".into() })
/// }
/// ```
#[proc_macro_attribute]
pub fn camp_slice(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemStruct);
    macros::slice::expand_slice(input).into()
}
