//! End-to-end list execution: parse, compose, and run against the store.

use crate::query::QueryError;
use crate::query::filter::FilterExpr;
use crate::query::pagination::{PageWindow, Pagination};
use camp_database::Database;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::instrument;
use url::form_urlencoded;

/// One sort key, e.g. `-createdAt` → descending on `createdAt`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub field: String,
    pub descending: bool,
}

/// A fully parsed list request.
#[derive(Debug, Clone)]
pub struct ListParams {
    pub filter: FilterExpr,
    pub select: Option<Vec<String>>,
    pub sort: Vec<SortKey>,
    pub window: PageWindow,
}

/// Records plus the pagination metadata for the response envelope.
#[derive(Debug)]
pub struct ListResult<T> {
    pub records: Vec<T>,
    pub total: u64,
    pub pagination: Pagination,
}

impl ListParams {
    /// Parses a raw query string (`select=...&sort=...&price[lte]=...`).
    ///
    /// Every field referenced by `select`, `sort`, or a filter must appear in
    /// `allowed`; anything else is rejected before it can reach the store.
    ///
    /// # Errors
    /// * [`QueryError::UnknownField`] for fields outside the allow-list.
    /// * [`QueryError::InvalidParameter`] for malformed `page`/`limit` values
    ///   or unsupported filter operators.
    pub fn parse(query: &str, allowed: &'static [&'static str]) -> Result<Self, QueryError> {
        let params: Vec<(String, String)> =
            form_urlencoded::parse(query.as_bytes()).into_owned().collect();

        let filter = FilterExpr::from_params(&params, allowed)?;

        let mut select = None;
        let mut sort = Vec::new();
        let mut page = 0u64;
        let mut limit = 0u64;

        for (key, value) in &params {
            match key.as_str() {
                "select" => {
                    let fields = split_fields(value, allowed)?;
                    select = Some(fields);
                },
                "sort" => {
                    sort = value
                        .split(',')
                        .filter(|part| !part.is_empty())
                        .map(|part| {
                            let (field, descending) = match part.strip_prefix('-') {
                                Some(rest) => (rest, true),
                                None => (part, false),
                            };
                            if allowed.contains(&field) {
                                Ok(SortKey { field: field.to_owned(), descending })
                            } else {
                                Err(QueryError::UnknownField {
                                    message: format!("'{field}' is not sortable").into(),
                                    context: None,
                                })
                            }
                        })
                        .collect::<Result<Vec<_>, _>>()?;
                },
                "page" => page = parse_number(key, value)?,
                "limit" => limit = parse_number(key, value)?,
                _ => {},
            }
        }

        Ok(Self { filter, select, sort, window: PageWindow::new(page, limit) })
    }

    /// Outer projection when a `select` is present; the record id is always
    /// included.
    fn projection(&self) -> Option<String> {
        self.select.as_ref().map(|fields| {
            let mut parts = vec!["id".to_owned()];
            parts.extend(fields.iter().filter(|f| *f != "id").cloned());
            parts.join(", ")
        })
    }

    fn order_by(&self) -> String {
        if self.sort.is_empty() {
            return "createdAt DESC".to_owned();
        }

        self.sort
            .iter()
            .map(|key| {
                format!("{} {}", key.field, if key.descending { "DESC" } else { "ASC" })
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn split_fields(
    value: &str,
    allowed: &'static [&'static str],
) -> Result<Vec<String>, QueryError> {
    value
        .split(',')
        .filter(|part| !part.is_empty())
        .map(|field| {
            if field == "id" || allowed.contains(&field) {
                Ok(field.to_owned())
            } else {
                Err(QueryError::UnknownField {
                    message: format!("'{field}' is not selectable").into(),
                    context: None,
                })
            }
        })
        .collect()
}

fn parse_number(key: &str, value: &str) -> Result<u64, QueryError> {
    value.parse().map_err(|_| QueryError::InvalidParameter {
        message: format!("'{key}' must be a non-negative integer, got '{value}'").into(),
        context: None,
    })
}

/// Executes a list request against `table`.
///
/// Two statements run per request: an unwindowed `count()` for the pagination
/// math and the windowed fetch. They are not bound by a transaction, so the
/// total and the returned page can be inconsistent under concurrent writes.
/// Field selection and sorting apply in the same statement as the window, so
/// they always take effect before windowing.
///
/// # Errors
/// Returns [`QueryError::Database`] if either statement fails.
#[instrument(skip(db, params), fields(table = table))]
pub async fn execute_list<T: DeserializeOwned>(
    db: &Database,
    table: &str,
    params: &ListParams,
) -> Result<ListResult<T>, QueryError> {
    let rendered = params.filter.render();

    let count_sql = format!(
        "SELECT count() AS total FROM type::table($table) {} GROUP ALL",
        rendered.clause
    );
    let mut count_query = db.query(count_sql).bind(("table", table.to_owned()));
    for (slot, value) in &rendered.binds {
        count_query = count_query.bind((slot.clone(), value.clone()));
    }
    let total: Option<CountRow> = count_query
        .await
        .map_err(camp_database::DatabaseError::from)?
        .take(0)
        .map_err(camp_database::DatabaseError::from)?;
    let total = total.map_or(0, |row| row.total);

    // Sorting operates on the projected output, so a `select` that omits the
    // sort key would break ordering. Sort and window over the full documents
    // in a subquery, then project.
    let windowed = format!(
        "SELECT *, record::id(id) AS id FROM type::table($table) {} ORDER BY {} LIMIT $limit START $start",
        rendered.clause,
        params.order_by(),
    );
    let fetch_sql = match params.projection() {
        Some(projection) => format!("SELECT {projection} FROM ({windowed})"),
        None => windowed,
    };
    let mut fetch_query = db
        .query(fetch_sql)
        .bind(("table", table.to_owned()))
        .bind(("limit", params.window.limit))
        .bind(("start", params.window.start_index()));
    for (slot, value) in rendered.binds {
        fetch_query = fetch_query.bind((slot, value));
    }
    let records: Vec<T> = fetch_query
        .await
        .map_err(camp_database::DatabaseError::from)?
        .take(0)
        .map_err(camp_database::DatabaseError::from)?;

    Ok(ListResult { records, total, pagination: params.window.describe(total) })
}

/// Row shape of the unwindowed count statement.
#[derive(Debug, Deserialize)]
struct CountRow {
    total: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALLOWED: &[&str] = &["name", "website", "createdAt", "averageCost"];

    #[test]
    fn defaults_apply_when_query_is_empty() {
        let params = ListParams::parse("", ALLOWED).expect("empty query parses");
        assert!(params.filter.is_empty());
        assert!(params.select.is_none());
        assert_eq!(params.order_by(), "createdAt DESC");
        assert_eq!(params.window, PageWindow::default());
    }

    #[test]
    fn select_and_sort_are_validated_and_parsed() {
        let params = ListParams::parse(
            "select=name,website&sort=-averageCost,name&page=2&limit=10",
            ALLOWED,
        )
        .expect("query parses");

        assert_eq!(params.projection().as_deref(), Some("id, name, website"));
        assert_eq!(params.order_by(), "averageCost DESC, name ASC");
        assert_eq!(params.window.start_index(), 10);
    }

    #[test]
    fn id_is_never_projected_twice() {
        let params = ListParams::parse("select=id,name", ALLOWED).expect("query parses");
        assert_eq!(params.projection().as_deref(), Some("id, name"));
    }

    #[test]
    fn no_select_means_no_outer_projection() {
        let params = ListParams::parse("", ALLOWED).expect("query parses");
        assert!(params.projection().is_none());
    }

    #[test]
    fn unknown_sort_field_is_rejected() {
        let err = ListParams::parse("sort=-password", ALLOWED).unwrap_err();
        assert!(matches!(err, QueryError::UnknownField { .. }));
    }

    #[test]
    fn malformed_page_is_rejected() {
        let err = ListParams::parse("page=two", ALLOWED).unwrap_err();
        assert!(matches!(err, QueryError::InvalidParameter { .. }));
    }

    #[test]
    fn filters_pass_through_to_the_expression() {
        let params =
            ListParams::parse("averageCost[gte]=5000&name=Devworks", ALLOWED).expect("parses");
        let rendered = params.filter.render();
        assert_eq!(rendered.clause, "WHERE averageCost >= $f0 AND name = $f1");
    }
}
