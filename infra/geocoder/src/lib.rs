//! # Geocoder Infrastructure
//!
//! A thin client for the external postal-code lookup collaborator. Resolved
//! coordinates are cached with a TTL so a popular postal code does not hit the
//! provider on every radius search.
//!
//! ## Example
//!
//! ```rust,no_run
//! use camp_geocoder::Geocoder;
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), camp_geocoder::GeocoderError> {
//! let geocoder = Geocoder::builder()
//!     .endpoint("https://nominatim.openstreetmap.org/search")
//!     .timeout(Duration::from_secs(10))
//!     .cache(10_000, Duration::from_secs(86_400))
//!     .build()?;
//!
//! let point = geocoder.resolve_postal_code("02118").await?;
//! println!("{}, {}", point.latitude, point.longitude);
//! # Ok(())
//! # }
//! ```

mod error;

use camp_domain::geo::GeoPoint;
pub use error::{GeocoderError, GeocoderErrorExt};
use moka::future::Cache;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_CACHE_CAPACITY: u64 = 10_000;
const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(86_400);

/// A single candidate returned by the lookup provider.
///
/// Coordinates arrive as strings; the provider quotes its numbers.
#[derive(Debug, Deserialize)]
struct Candidate {
    lat: String,
    lon: String,
}

fn parse_candidates(candidates: &[Candidate]) -> Result<GeoPoint, GeocoderError> {
    let Some(first) = candidates.first() else {
        return Err(GeocoderError::Unresolved { message: "No matches returned".into(), context: None });
    };

    let latitude: f64 = first.lat.parse().map_err(|_| GeocoderError::Malformed {
        message: format!("Invalid latitude '{}'", first.lat).into(),
        context: None,
    })?;
    let longitude: f64 = first.lon.parse().map_err(|_| GeocoderError::Malformed {
        message: format!("Invalid longitude '{}'", first.lon).into(),
        context: None,
    })?;

    Ok(GeoPoint::new(longitude, latitude))
}

#[derive(Debug)]
struct GeocoderInner {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    cache: Cache<String, GeoPoint>,
}

/// A thread-safe handle to the geocoding client.
#[derive(Debug, Clone)]
pub struct Geocoder {
    inner: Arc<GeocoderInner>,
}

impl Geocoder {
    /// Creates a new [`GeocoderBuilder`].
    pub fn builder() -> GeocoderBuilder {
        GeocoderBuilder::default()
    }

    /// Resolves a postal code to a coordinate pair.
    ///
    /// Results are cached; repeated lookups for the same code are served from
    /// memory until the TTL expires.
    ///
    /// # Errors
    /// * [`GeocoderError::Transport`] if the provider is unreachable or answers
    ///   with a non-success status.
    /// * [`GeocoderError::Unresolved`] if the provider has no match.
    /// * [`GeocoderError::Malformed`] if the response cannot be interpreted.
    #[instrument(skip(self))]
    pub async fn resolve_postal_code(&self, code: &str) -> Result<GeoPoint, GeocoderError> {
        self.inner
            .cache
            .try_get_with(code.to_owned(), async {
                let mut query: Vec<(&str, &str)> =
                    vec![("postalcode", code), ("format", "jsonv2"), ("limit", "1")];
                if let Some(key) = &self.inner.api_key {
                    query.push(("key", key.as_str()));
                }

                let candidates: Vec<Candidate> = self
                    .inner
                    .client
                    .get(&self.inner.endpoint)
                    .query(&query)
                    .send()
                    .await
                    .context("Requesting postal-code lookup")?
                    .error_for_status()
                    .context("Lookup provider returned an error status")?
                    .json()
                    .await
                    .context("Decoding lookup response")?;

                let point = parse_candidates(&candidates)?;
                debug!(code, latitude = point.latitude, longitude = point.longitude, "Postal code resolved");
                Ok(point)
            })
            .await
            .map_err(|e: Arc<GeocoderError>| {
                Arc::try_unwrap(e).unwrap_or_else(|arc| GeocoderError::Internal {
                    message: arc.to_string().into(),
                    context: Some("Cache loader returned an error, but it was shared (Arc)".into()),
                })
            })
    }
}

/// A fluent builder for configuring the [`Geocoder`].
#[must_use = "builders do nothing unless you call .build()"]
#[derive(Debug, Default)]
pub struct GeocoderBuilder {
    endpoint: Option<String>,
    api_key: Option<String>,
    timeout: Option<Duration>,
    cache_capacity: Option<u64>,
    cache_ttl: Option<Duration>,
}

impl GeocoderBuilder {
    /// Sets the provider endpoint URL.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Sets the provider API key, if the provider requires one.
    pub fn api_key(mut self, key: Option<String>) -> Self {
        self.api_key = key;
        self
    }

    /// Sets the per-request timeout.
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the result cache capacity and TTL.
    pub const fn cache(mut self, capacity: u64, ttl: Duration) -> Self {
        self.cache_capacity = Some(capacity);
        self.cache_ttl = Some(ttl);
        self
    }

    /// Consumes the builder and constructs the HTTP client.
    ///
    /// # Errors
    /// Returns [`GeocoderError::Internal`] if the endpoint is missing or the
    /// HTTP client cannot be constructed.
    pub fn build(self) -> Result<Geocoder, GeocoderError> {
        let endpoint = self.endpoint.ok_or(GeocoderError::Internal {
            message: "Endpoint is required".into(),
            context: None,
        })?;

        let client = reqwest::Client::builder()
            .timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT))
            .user_agent(concat!("camphub/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GeocoderError::Internal {
                message: e.to_string().into(),
                context: Some("Building HTTP client".into()),
            })?;

        let cache = Cache::builder()
            .max_capacity(self.cache_capacity.unwrap_or(DEFAULT_CACHE_CAPACITY))
            .time_to_live(self.cache_ttl.unwrap_or(DEFAULT_CACHE_TTL))
            .build();

        Ok(Geocoder { inner: Arc::new(GeocoderInner { client, endpoint, api_key: self.api_key, cache }) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_candidate_wins() {
        let candidates: Vec<Candidate> = serde_json::from_str(
            r#"[
                { "lat": "42.3383", "lon": "-71.0765", "display_name": "Boston, MA" },
                { "lat": "0", "lon": "0" }
            ]"#,
        )
        .expect("fixture parses");

        let point = parse_candidates(&candidates).expect("resolvable");
        assert!((point.latitude - 42.3383).abs() < f64::EPSILON);
        assert!((point.longitude + 71.0765).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_response_is_unresolved() {
        let err = parse_candidates(&[]).unwrap_err();
        assert!(matches!(err, GeocoderError::Unresolved { .. }));
    }

    #[test]
    fn garbage_coordinates_are_malformed() {
        let candidates =
            vec![Candidate { lat: "not-a-number".to_owned(), lon: "-71.0".to_owned() }];
        let err = parse_candidates(&candidates).unwrap_err();
        assert!(matches!(err, GeocoderError::Malformed { .. }));
    }

    #[test]
    fn missing_endpoint_fails_build() {
        let err = Geocoder::builder().build().unwrap_err();
        assert!(matches!(err, GeocoderError::Internal { .. }));
    }
}
