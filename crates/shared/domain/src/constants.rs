//! Shared identifiers used across slices: table names and `OpenAPI` tags.

/// `OpenAPI` tag for system endpoints (health, docs).
pub const SYSTEM_TAG: &str = "System";

/// `OpenAPI` tag for bootcamp endpoints.
pub const BOOTCAMPS_TAG: &str = "Bootcamps";

/// `OpenAPI` tag for course endpoints.
pub const COURSES_TAG: &str = "Courses";

/// Table holding bootcamp records.
pub const BOOTCAMP_TABLE: &str = "bootcamp";

/// Table holding course records.
pub const COURSE_TABLE: &str = "course";
