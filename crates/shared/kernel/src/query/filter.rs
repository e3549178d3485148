//! Query-string filter translation.
//!
//! Incoming parameters like `averageCost[lte]=10000` or `housing=true` become
//! a typed [`FilterExpr`]. Field names are checked against the endpoint's
//! allow-list before they are ever interpolated into a statement; values only
//! ever travel as bind parameters.

use crate::query::QueryError;
use serde_json::Value;

/// Parameter names consumed by the list machinery itself; they never become
/// store filters.
pub const RESERVED_PARAMS: &[&str] = &["select", "sort", "page", "limit"];

/// A comparison operator parsed from a bracketed field qualifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Eq,
    Gt,
    Gte,
    Lt,
    Lte,
    In,
}

impl Comparison {
    fn from_qualifier(qualifier: &str) -> Option<Self> {
        match qualifier {
            "gt" => Some(Self::Gt),
            "gte" => Some(Self::Gte),
            "lt" => Some(Self::Lt),
            "lte" => Some(Self::Lte),
            "in" => Some(Self::In),
            _ => None,
        }
    }

    const fn token(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Gt => ">",
            Self::Gte => ">=",
            Self::Lt => "<",
            Self::Lte => "<=",
            Self::In => "IN",
        }
    }
}

/// A single allow-listed condition.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub field: String,
    pub op: Comparison,
    pub value: Value,
}

/// A typed conjunction of conditions, ready to render as a `WHERE` clause.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterExpr {
    conditions: Vec<Condition>,
}

/// A rendered `WHERE` clause and its bind parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedFilter {
    /// Either empty or `WHERE <cond> [AND <cond>]*`.
    pub clause: String,
    pub binds: Vec<(String, Value)>,
}

impl FilterExpr {
    /// Builds a filter from decoded query parameters.
    ///
    /// Reserved parameter names are skipped. A bare `field=value` becomes an
    /// equality condition; `field[op]=value` maps `op` onto the matching
    /// [`Comparison`]. Values are interpreted as JSON scalars where possible
    /// (numbers, booleans) and fall back to plain strings; `in` splits its
    /// value on commas into a list. No deeper type validation happens here;
    /// a type-mismatched value simply matches nothing at the store.
    ///
    /// # Errors
    /// * [`QueryError::UnknownField`] for fields outside `allowed`.
    /// * [`QueryError::InvalidParameter`] for unrecognized bracket qualifiers.
    pub fn from_params(
        params: &[(String, String)],
        allowed: &'static [&'static str],
    ) -> Result<Self, QueryError> {
        let mut conditions = Vec::new();

        for (key, raw) in params {
            if RESERVED_PARAMS.contains(&key.as_str()) {
                continue;
            }

            let (field, op) = parse_key(key)?;
            if !allowed.contains(&field) {
                return Err(QueryError::UnknownField {
                    message: format!("'{field}' is not filterable").into(),
                    context: None,
                });
            }

            let value = if op == Comparison::In {
                Value::Array(raw.split(',').map(parse_scalar).collect())
            } else {
                parse_scalar(raw)
            };

            conditions.push(Condition { field: field.to_owned(), op, value });
        }

        Ok(Self { conditions })
    }

    /// Appends a server-side condition (e.g. scoping a nested route to its
    /// parent). Not subject to the client allow-list.
    pub fn push(&mut self, field: impl Into<String>, op: Comparison, value: Value) {
        self.conditions.push(Condition { field: field.into(), op, value });
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    #[must_use]
    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// Renders the filter into a parameterized clause.
    ///
    /// Rendering is pure: the same expression always yields the same clause
    /// and binds, and operator tokens are never rewritten twice.
    #[must_use]
    pub fn render(&self) -> RenderedFilter {
        if self.conditions.is_empty() {
            return RenderedFilter { clause: String::new(), binds: Vec::new() };
        }

        let mut parts = Vec::with_capacity(self.conditions.len());
        let mut binds = Vec::with_capacity(self.conditions.len());

        for (index, condition) in self.conditions.iter().enumerate() {
            let slot = format!("f{index}");
            parts.push(format!("{} {} ${slot}", condition.field, condition.op.token()));
            binds.push((slot, condition.value.clone()));
        }

        RenderedFilter { clause: format!("WHERE {}", parts.join(" AND ")), binds }
    }
}

/// Splits `field[qualifier]` into its parts; a bare key is an equality filter.
fn parse_key(key: &str) -> Result<(&str, Comparison), QueryError> {
    let Some((field, qualifier)) = key.strip_suffix(']').and_then(|k| k.split_once('[')) else {
        return Ok((key, Comparison::Eq));
    };

    Comparison::from_qualifier(qualifier).map(|op| (field, op)).ok_or_else(|| {
        QueryError::InvalidParameter {
            message: format!("Unsupported filter operator '{qualifier}'").into(),
            context: None,
        }
    })
}

/// Interprets a raw query value as a JSON scalar, falling back to a string.
fn parse_scalar(raw: &str) -> Value {
    match serde_json::from_str::<Value>(raw) {
        Ok(value @ (Value::Number(_) | Value::Bool(_))) => value,
        _ => Value::String(raw.to_owned()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALLOWED: &[&str] = &["averageCost", "housing", "careers", "name"];

    fn params(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect()
    }

    #[test]
    fn reserved_params_are_excluded() {
        let filter = FilterExpr::from_params(
            &params(&[("select", "name"), ("sort", "-name"), ("page", "2"), ("limit", "10")]),
            ALLOWED,
        )
        .expect("reserved params alone yield an empty filter");
        assert!(filter.is_empty());
        assert_eq!(filter.render().clause, "");
    }

    #[test]
    fn bracket_qualifiers_map_to_comparisons() {
        let filter = FilterExpr::from_params(
            &params(&[("averageCost[lte]", "10000"), ("housing", "true")]),
            ALLOWED,
        )
        .expect("valid filter");

        let rendered = filter.render();
        assert_eq!(rendered.clause, "WHERE averageCost <= $f0 AND housing = $f1");
        assert_eq!(rendered.binds[0].1, serde_json::json!(10000));
        assert_eq!(rendered.binds[1].1, serde_json::json!(true));
    }

    #[test]
    fn in_qualifier_splits_on_commas() {
        let filter = FilterExpr::from_params(
            &params(&[("careers", "Web Development,UI/UX")]),
            ALLOWED,
        )
        .expect("valid filter");
        assert_eq!(filter.conditions()[0].op, Comparison::Eq);

        let filter = FilterExpr::from_params(
            &params(&[("careers[in]", "Web Development,UI/UX")]),
            ALLOWED,
        )
        .expect("valid filter");
        let rendered = filter.render();
        assert_eq!(rendered.clause, "WHERE careers IN $f0");
        assert_eq!(rendered.binds[0].1, serde_json::json!(["Web Development", "UI/UX"]));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = FilterExpr::from_params(&params(&[("password[gt]", "x")]), ALLOWED).unwrap_err();
        assert!(matches!(err, QueryError::UnknownField { .. }));
    }

    #[test]
    fn unknown_qualifiers_are_rejected() {
        let err =
            FilterExpr::from_params(&params(&[("name[regex]", ".*")]), ALLOWED).unwrap_err();
        assert!(matches!(err, QueryError::InvalidParameter { .. }));
    }

    #[test]
    fn rendering_is_stable() {
        let filter = FilterExpr::from_params(
            &params(&[("averageCost[gte]", "5000"), ("name", "Devworks")]),
            ALLOWED,
        )
        .expect("valid filter");

        assert_eq!(filter.render(), filter.render());

        let again = FilterExpr::from_params(
            &params(&[("averageCost[gte]", "5000"), ("name", "Devworks")]),
            ALLOWED,
        )
        .expect("valid filter");
        assert_eq!(filter, again);
    }

    #[test]
    fn unquoted_strings_survive_as_strings() {
        let filter =
            FilterExpr::from_params(&params(&[("name", "Devworks Bootcamp")]), ALLOWED)
                .expect("valid filter");
        assert_eq!(filter.conditions()[0].value, serde_json::json!("Devworks Bootcamp"));
    }
}
