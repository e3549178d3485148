//! Bootcamps feature slice.
//!
//! Owns the bootcamp directory: CRUD with list filtering, geospatial radius
//! search through the geocoding collaborator, and photo upload into the
//! sandboxed storage engine.

mod error;
mod handlers;
mod model;
mod photo;
mod repository;

pub use error::{BootcampError, BootcampErrorExt};
pub use handlers::RadiusEnvelope;
pub use model::{
    Bootcamp, CreateBootcamp, FILTERABLE_FIELDS, Location, UpdateBootcamp, slugify,
};
pub use photo::{UPLOADS_DIR, photo_file_name};
pub use repository::BootcampRepository;

use camp_domain::config::ApiConfig;
use camp_domain::registry::InitializedSlice;
use camp_geocoder::Geocoder;
use camp_kernel::server::ApiState;
use camp_storage::Storage;
use std::time::Duration;
use utoipa_axum::router::OpenApiRouter;

/// Bootcamps feature state.
#[camp_derive::camp_slice]
pub struct Bootcamps {
    pub storage: Storage,
    pub geocoder: Geocoder,
    pub max_file_size: u64,
}

/// Initialize the bootcamps feature.
///
/// Connects the upload storage sandbox and builds the geocoding client.
///
/// # Errors
/// Returns an error if the storage root cannot be prepared or the geocoder
/// client cannot be constructed.
pub async fn init(config: &ApiConfig) -> Result<InitializedSlice, BootcampError> {
    let storage =
        Storage::builder().root(&config.storage.static_dir).create(true).connect().await?;

    let geocoder = Geocoder::builder()
        .endpoint(&config.geocoder.endpoint)
        .api_key(config.geocoder.api_key.clone())
        .timeout(Duration::from_secs(config.geocoder.timeout_seconds))
        .cache(config.geocoder.cache_capacity, Duration::from_secs(config.geocoder.cache_ttl_seconds))
        .build()?;

    tracing::info!("Bootcamps slice initialized");

    let inner =
        BootcampsInner { storage, geocoder, max_file_size: config.uploads.max_file_size };

    Ok(InitializedSlice::new(Bootcamps::new(inner)))
}

/// Routes owned by this slice.
pub fn router() -> OpenApiRouter<ApiState> {
    handlers::router()
}
