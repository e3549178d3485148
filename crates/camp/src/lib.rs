//! Facade crate for CampHub features and shared modules.
//! Re-exports domain/kernel primitives and aggregates feature initialization.
//! Keep this crate thin: it should compose other crates, not implement business logic.
//!
//! ## Usage
//! - Call [`init`] to build the feature slices, then register them on the API
//!   state; extend as new slices appear.

pub use camp_domain as domain;
pub use camp_kernel as kernel;

use camp_domain::config::ApiConfig;
use camp_domain::registry::InitializedSlice;

pub mod server {
    pub mod router {
        pub use camp_kernel::server::router::system_router;
    }
}

/// Feature registry for runtime introspection.
pub mod features {
    pub use camp_bootcamps as bootcamps;
    pub use camp_courses as courses;
    pub use camp_identity as identity;

    /// Features compiled into this build.
    pub const ENABLED: &[&str] = &["bootcamps", "courses", "identity"];

    #[must_use]
    pub fn is_enabled(name: &str) -> bool {
        ENABLED.contains(&name)
    }
}

/// Initialize all enabled features.
///
/// # Errors
/// Returns an error if any feature initialization fails.
pub async fn init(
    config: &ApiConfig,
) -> Result<Vec<InitializedSlice>, Box<dyn std::error::Error + Send + Sync>> {
    let mut slices = Vec::new();

    // Bootcamps (storage sandbox + geocoding client)
    slices.push(features::bootcamps::init(config).await?);

    // Courses
    slices.push(features::courses::init()?);

    Ok(slices)
}
