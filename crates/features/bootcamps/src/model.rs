use camp_derive::api_model;
use camp_domain::geo::GeoPoint;
use chrono::{DateTime, Utc};

/// Fields a client may filter, sort, or select on.
///
/// Anything outside this list is rejected as a bad request before it reaches
/// the store; arbitrary client keys never become statement fragments.
pub const FILTERABLE_FIELDS: &[&str] = &[
    "name",
    "slug",
    "description",
    "website",
    "phone",
    "email",
    "careers",
    "housing",
    "jobAssistance",
    "jobGuarantee",
    "acceptGi",
    "photo",
    "averageCost",
    "createdAt",
    "user",
];

/// Geocoded place attached to a bootcamp.
#[api_model(deny_unknown_fields = false)]
pub struct Location {
    /// GeoJSON-ordered `[longitude, latitude]`.
    pub coordinates: [f64; 2],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatted_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zipcode: Option<String>,
}

impl Location {
    #[must_use]
    pub fn from_point(point: GeoPoint, address: Option<String>, zipcode: String) -> Self {
        Self {
            coordinates: point.coordinates(),
            formatted_address: address,
            zipcode: Some(zipcode),
        }
    }
}

/// A bootcamp record as stored and served.
///
/// `averageCost` is derived from the owned courses' tuitions and is only ever
/// written by the course slice's recompute; client payloads cannot set it.
#[api_model(deny_unknown_fields = false)]
pub struct Bootcamp {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub careers: Vec<String>,
    #[serde(default)]
    pub housing: bool,
    #[serde(default)]
    pub job_assistance: bool,
    #[serde(default)]
    pub job_guarantee: bool,
    #[serde(default)]
    pub accept_gi: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_cost: Option<u64>,
    pub location: Location,
    /// Id of the creating user.
    pub user: String,
    pub created_at: DateTime<Utc>,
}

/// Payload for creating a bootcamp.
#[api_model]
pub struct CreateBootcamp {
    pub name: String,
    pub description: String,
    /// Postal code, resolved through the geocoding collaborator.
    pub zipcode: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub careers: Vec<String>,
    #[serde(default)]
    pub housing: bool,
    #[serde(default)]
    pub job_assistance: bool,
    #[serde(default)]
    pub job_guarantee: bool,
    #[serde(default)]
    pub accept_gi: bool,
}

/// Partial update payload; only present fields are merged.
#[api_model]
pub struct UpdateBootcamp {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zipcode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub careers: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub housing: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_assistance: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_guarantee: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accept_gi: Option<bool>,
}

/// Derives a URL-friendly slug from a bootcamp name.
///
/// Lowercases, maps runs of non-alphanumeric characters to single dashes, and
/// trims dangling dashes.
#[must_use]
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;

    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}
