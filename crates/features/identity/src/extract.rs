use axum::extract::{FromRef, FromRequestParts};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use camp_domain::config::{ApiConfig, JwtConfig};
use camp_domain::roles::UserRole;
use camp_kernel::server::ApiError;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// The claim set the external issuer signs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user id.
    pub sub: String,
    /// Access role; tokens without one act as plain users.
    #[serde(default)]
    pub role: UserRole,
    /// Expiry as a unix timestamp.
    pub exp: i64,
    /// Issuer, matched against the configured value.
    pub iss: String,
}

/// The verified identity behind a request.
///
/// Any handler taking this as an argument becomes a protected route.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: String,
    pub role: UserRole,
}

impl CurrentUser {
    /// Whether this user may modify a record owned by `owner`.
    ///
    /// Owners may touch their own records; admins may touch anything.
    #[must_use]
    pub fn can_modify(&self, owner: &str) -> bool {
        self.role.is_admin() || self.id == owner
    }
}

/// Verifies a bearer token against the configured secret and issuer.
///
/// # Errors
/// Returns [`ApiError::Unauthorized`] for any verification failure; the
/// specific reason is logged, not sent to the client.
pub fn verify_token(token: &str, cfg: &JwtConfig) -> Result<CurrentUser, ApiError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[&cfg.issuer]);
    validation.leeway = cfg.clock_skew_seconds;

    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(cfg.secret.as_bytes()),
        &validation,
    )
    .map_err(|e| {
        debug!(error = %e, "Bearer token rejected");
        ApiError::unauthorized("Not authorized to access this route")
    })?;

    Ok(CurrentUser { id: data.claims.sub, role: data.claims.role })
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
    ApiConfig: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let config = ApiConfig::from_ref(state);

        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or_else(|| ApiError::unauthorized("Not authorized to access this route"))?;

        verify_token(token, &config.security.jwt)
    }
}
