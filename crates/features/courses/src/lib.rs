//! Courses feature slice.
//!
//! Courses live under a parent bootcamp. Every write path (create, update,
//! delete) ends with an explicit, synchronous recompute of the parent's
//! `averageCost` aggregate; a recompute failure fails the triggering write.

mod average;
mod error;
mod handlers;
mod model;
mod repository;

pub use average::recompute_average;
pub use error::{CourseError, CourseErrorExt};
pub use model::{Course, CreateCourse, FILTERABLE_FIELDS, MinimumSkill, UpdateCourse};
pub use repository::CourseRepository;

use camp_domain::registry::InitializedSlice;
use camp_kernel::server::ApiState;
use utoipa_axum::router::OpenApiRouter;

/// Courses feature state.
#[camp_derive::camp_slice]
pub struct Courses {}

/// Initialize the courses feature.
///
/// # Errors
/// Infallible today; kept fallible to match the slice lifecycle.
pub fn init() -> Result<InitializedSlice, CourseError> {
    tracing::info!("Courses slice initialized");

    let inner = CoursesInner {};

    let slice = Courses::new(inner);
    Ok(InitializedSlice::new(slice))
}

/// Routes owned by this slice.
pub fn router() -> OpenApiRouter<ApiState> {
    handlers::router()
}
