//! Success-response envelopes shared by every endpoint.

use crate::query::list::ListResult;
use crate::query::pagination::Pagination;
use camp_derive::api_model;

/// Envelope for a single record.
#[api_model(deny_unknown_fields = false)]
pub struct RecordEnvelope<T> {
    pub success: bool,
    pub data: T,
}

impl<T> RecordEnvelope<T> {
    pub const fn new(data: T) -> Self {
        Self { success: true, data }
    }
}

/// Envelope for a list of records with pagination metadata.
#[api_model(deny_unknown_fields = false)]
pub struct ListEnvelope<T> {
    pub success: bool,
    pub count: usize,
    pub total: u64,
    pub pagination: Pagination,
    pub data: Vec<T>,
}

impl<T> From<ListResult<T>> for ListEnvelope<T> {
    fn from(result: ListResult<T>) -> Self {
        Self {
            success: true,
            count: result.records.len(),
            total: result.total,
            pagination: result.pagination,
            data: result.records,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::pagination::PageWindow;

    #[test]
    fn record_envelope_serializes_flat() {
        let json = serde_json::to_value(RecordEnvelope::new(serde_json::json!({"name": "x"})))
            .expect("to json");
        assert_eq!(json, serde_json::json!({"success": true, "data": {"name": "x"}}));
    }

    #[test]
    fn list_envelope_carries_pagination() {
        let window = PageWindow::new(1, 2);
        let result = ListResult {
            records: vec![serde_json::json!({"n": 1}), serde_json::json!({"n": 2})],
            total: 5,
            pagination: window.describe(5),
        };

        let json = serde_json::to_value(ListEnvelope::from(result)).expect("to json");
        assert_eq!(json["count"], 2);
        assert_eq!(json["total"], 5);
        assert_eq!(json["pagination"]["next"], serde_json::json!({"page": 2, "limit": 2}));
        assert!(json["pagination"].get("prev").is_none());
    }
}
