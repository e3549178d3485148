use proc_macro2::TokenStream;
use quote::quote;
use syn::parse::Parser;
use syn::{ItemFn, ItemStruct, Lit, LitStr, Meta};

/// Expands the `#[api_model]` attribute macro.
///
/// Adds the common derives (`Debug`, `Clone`, `Serialize`, `Deserialize`,
/// `ToSchema`) and configures Serde for camelCase and strict field checking.
pub fn expand_api_model(args: TokenStream, input: ItemStruct) -> TokenStream {
    let ApiModelArgs { rename_all, deny_unknown_fields } = match parse_api_model_args(args) {
        Ok(args) => args,
        Err(err) => return err,
    };

    let rename_all =
        rename_all.unwrap_or_else(|| LitStr::new("camelCase", proc_macro2::Span::call_site()));
    let deny_attr = if deny_unknown_fields.unwrap_or(true) {
        quote! { #[serde(deny_unknown_fields)] }
    } else {
        quote! {}
    };

    quote! {
        #[derive(Debug, Clone, ::serde::Serialize, ::serde::Deserialize, ::utoipa::ToSchema)]
        #[serde(rename_all = #rename_all)]
        #deny_attr
        #input
    }
}

/// Expands the `#[api_handler]` attribute macro.
///
/// Integrates with `utoipa::path` for `OpenAPI` documentation while keeping
/// handler signatures clean.
pub fn expand_api_handler(args: TokenStream, input: ItemFn) -> TokenStream {
    let body = &input.block;
    let sig = &input.sig;
    let vis = &input.vis;
    let attrs = &input.attrs;

    quote! {
        #(#attrs)*
        #[allow(clippy::unused_async)]
        #[::utoipa::path(#args)]
        #vis #sig {
            #body
        }
    }
}

struct ApiModelArgs {
    rename_all: Option<LitStr>,
    deny_unknown_fields: Option<bool>,
}

fn parse_api_model_args(args: TokenStream) -> Result<ApiModelArgs, TokenStream> {
    let parser = syn::punctuated::Punctuated::<Meta, syn::Token![,]>::parse_terminated;
    let metas = parser.parse2(args).map_err(|err| err.to_compile_error())?;

    let mut rename_all = None;
    let mut deny_unknown_fields = None;

    for meta in metas {
        let name_value = match meta {
            Meta::NameValue(name_value) => name_value,
            other => {
                return Err(syn::Error::new_spanned(
                    other,
                    "Expected name-value arguments like `rename_all = \"...\"`",
                )
                .to_compile_error());
            },
        };
        let lit = match &name_value.value {
            syn::Expr::Lit(expr_lit) => expr_lit.lit.clone(),
            other => {
                return Err(syn::Error::new_spanned(other, "Expected a literal value")
                    .to_compile_error());
            },
        };
        match (&name_value.path, lit) {
            (path, Lit::Str(value)) if path.is_ident("rename_all") => {
                rename_all = Some(value);
            },
            (path, Lit::Bool(value)) if path.is_ident("deny_unknown_fields") => {
                deny_unknown_fields = Some(value.value);
            },
            _ => {
                return Err(syn::Error::new_spanned(
                    &name_value.path,
                    "Unsupported argument; expected rename_all or deny_unknown_fields",
                )
                .to_compile_error());
            },
        }
    }

    Ok(ApiModelArgs { rename_all, deny_unknown_fields })
}
