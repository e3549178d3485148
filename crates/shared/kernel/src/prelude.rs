//! Ergonomic re-exports for handler code.

pub use crate::query::QueryError;
pub use crate::query::list::{ListParams, ListResult, execute_list};
pub use crate::query::pagination::{PageWindow, Pagination};
pub use crate::security::verify_record_id;
pub use crate::server::{ApiError, ApiState, ErrorBody, ListEnvelope, RecordEnvelope};
