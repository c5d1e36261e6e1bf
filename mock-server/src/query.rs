//! Server-side evaluation of list queries against in-memory JSON records.

use std::cmp::Ordering;
use std::str::FromStr;

use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ListQuery {
    pub filters: Vec<FilterQuery>,
    pub filter_sets: Vec<FilterSetQuery>,
    pub order: String,
    pub order_descending: bool,
    pub limit: u64,
    pub offset: u64,
    pub include_inactives: bool,
}

#[derive(Debug, Deserialize)]
pub struct FilterQuery {
    pub field: String,
    pub operator: String,
    #[serde(default)]
    pub value: Value,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FilterSetQuery {
    pub filters: Vec<FilterQuery>,
    pub or: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operator {
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
    In,
    Contains,
}

impl FromStr for Operator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "=" | "eq" => Ok(Operator::Eq),
            "!=" | "ne" => Ok(Operator::Ne),
            ">" | "gt" => Ok(Operator::Gt),
            ">=" | "gte" => Ok(Operator::Gte),
            "<" | "lt" => Ok(Operator::Lt),
            "<=" | "lte" => Ok(Operator::Lte),
            "in" => Ok(Operator::In),
            "contains" => Ok(Operator::Contains),
            other => Err(format!("unknown operator {other:?}")),
        }
    }
}

/// A filter with its operator resolved up front, so unknown operators are
/// reported before any record is touched.
struct Predicate<'a> {
    field: &'a str,
    operator: Operator,
    value: &'a Value,
}

impl<'a> Predicate<'a> {
    fn compile(filter: &'a FilterQuery) -> Result<Self, String> {
        Ok(Self {
            field: &filter.field,
            operator: filter.operator.parse()?,
            value: &filter.value,
        })
    }

    fn matches(&self, record: &Value) -> bool {
        let field = lookup(record, self.field);
        match self.operator {
            Operator::Eq => equals(field, self.value),
            Operator::Ne => !equals(field, self.value),
            Operator::Gt => compare_field(field, self.value) == Some(Ordering::Greater),
            Operator::Gte => matches!(compare_field(field, self.value), Some(Ordering::Greater | Ordering::Equal)),
            Operator::Lt => compare_field(field, self.value) == Some(Ordering::Less),
            Operator::Lte => matches!(compare_field(field, self.value), Some(Ordering::Less | Ordering::Equal)),
            Operator::In => self
                .value
                .as_array()
                .is_some_and(|candidates| candidates.iter().any(|c| equals(field, c))),
            Operator::Contains => match (field, self.value) {
                (Some(Value::String(haystack)), Value::String(needle)) => haystack.contains(needle.as_str()),
                (Some(Value::Array(items)), needle) => items.iter().any(|item| equals(Some(item), needle)),
                _ => false,
            },
        }
    }
}

/// Filter, sort and paginate `records` according to `query`.
///
/// Top-level filters are ANDed; each filter set is ORed or ANDed inside and
/// ANDed with everything else. A `limit` of zero means no limit.
pub fn apply(query: &ListQuery, records: &[Value]) -> Result<Vec<Value>, String> {
    let filters = query
        .filters
        .iter()
        .map(Predicate::compile)
        .collect::<Result<Vec<_>, _>>()?;
    let sets = query
        .filter_sets
        .iter()
        .map(|set| -> Result<(bool, Vec<Predicate<'_>>), String> {
            let predicates = set
                .filters
                .iter()
                .map(Predicate::compile)
                .collect::<Result<Vec<_>, _>>()?;
            Ok((set.or, predicates))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut selected: Vec<&Value> = records
        .iter()
        .filter(|record| query.include_inactives || !is_inactive(record))
        .filter(|record| filters.iter().all(|p| p.matches(record)))
        .filter(|record| {
            sets.iter().all(|(or, predicates)| {
                if predicates.is_empty() {
                    true
                } else if *or {
                    predicates.iter().any(|p| p.matches(record))
                } else {
                    predicates.iter().all(|p| p.matches(record))
                }
            })
        })
        .collect();

    if !query.order.is_empty() {
        selected.sort_by(|a, b| {
            let ordering = sort_order(lookup(a, &query.order), lookup(b, &query.order));
            if query.order_descending {
                ordering.reverse()
            } else {
                ordering
            }
        });
    }

    let offset = usize::try_from(query.offset).unwrap_or(usize::MAX);
    let limit = match query.limit {
        0 => usize::MAX,
        n => usize::try_from(n).unwrap_or(usize::MAX),
    };
    Ok(selected.into_iter().skip(offset).take(limit).cloned().collect())
}

fn is_inactive(record: &Value) -> bool {
    record.get("inactive").and_then(Value::as_bool).unwrap_or(false)
}

/// Resolve a dotted path such as `customer.email`.
fn lookup<'a>(record: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(record, |value, key| value.get(key))
}

fn equals(field: Option<&Value>, expected: &Value) -> bool {
    match field {
        None => expected.is_null(),
        Some(actual) => compare(actual, expected) == Some(Ordering::Equal) || actual == expected,
    }
}

fn compare_field(field: Option<&Value>, expected: &Value) -> Option<Ordering> {
    compare(field?, expected)
}

fn compare(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64()?.partial_cmp(&y.as_f64()?),
        (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
        (Value::Bool(x), Value::Bool(y)) => Some(x.cmp(y)),
        _ => None,
    }
}

// Missing values sort first; mixed types fall back to their JSON text.
fn sort_order(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => compare(a, b).unwrap_or_else(|| a.to_string().cmp(&b.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn records() -> Vec<Value> {
        vec![
            json!({"_id": "a", "ref": 3, "status": "paid", "customer": {"email": "ada@shop.test"}, "totals": {"grandTotal": 1500}}),
            json!({"_id": "b", "ref": 1, "status": "shipped", "customer": {"email": "bob@shop.test"}, "totals": {"grandTotal": 9900}}),
            json!({"_id": "c", "ref": 2, "status": "paid", "customer": {"email": "cy@shop.test"}, "totals": {"grandTotal": 250}}),
            json!({"_id": "d", "ref": 4, "status": "paid", "inactive": true}),
        ]
    }

    fn query(raw: Value) -> ListQuery {
        serde_json::from_value(raw).unwrap()
    }

    fn ids(values: &[Value]) -> Vec<&str> {
        values.iter().map(|v| v["_id"].as_str().unwrap()).collect()
    }

    #[test]
    fn empty_query_hides_inactive_records() {
        let out = apply(&ListQuery::default(), &records()).unwrap();
        assert_eq!(ids(&out), ["a", "b", "c"]);
    }

    #[test]
    fn include_inactives_shows_everything() {
        let out = apply(&query(json!({"includeInactives": true})), &records()).unwrap();
        assert_eq!(out.len(), 4);
    }

    #[test]
    fn top_level_filters_are_anded() {
        let q = query(json!({"filters": [
            {"field": "status", "operator": "=", "value": "paid"},
            {"field": "totals.grandTotal", "operator": ">", "value": 1000}
        ]}));
        assert_eq!(ids(&apply(&q, &records()).unwrap()), ["a"]);
    }

    #[test]
    fn or_filter_set() {
        let q = query(json!({"filterSets": [{"or": true, "filters": [
            {"field": "customer.email", "operator": "=", "value": "bob@shop.test"},
            {"field": "ref", "operator": "<=", "value": 2}
        ]}]}));
        assert_eq!(ids(&apply(&q, &records()).unwrap()), ["b", "c"]);
    }

    #[test]
    fn in_and_contains() {
        let q = query(json!({"filters": [{"field": "ref", "operator": "in", "value": [1, 3]}]}));
        assert_eq!(ids(&apply(&q, &records()).unwrap()), ["a", "b"]);

        let q = query(json!({"filters": [{"field": "customer.email", "operator": "contains", "value": "cy@"}]}));
        assert_eq!(ids(&apply(&q, &records()).unwrap()), ["c"]);
    }

    #[test]
    fn order_and_pagination() {
        let q = query(json!({"order": "ref", "orderDescending": true, "limit": 2, "offset": 1}));
        assert_eq!(ids(&apply(&q, &records()).unwrap()), ["c", "b"]);
    }

    #[test]
    fn numeric_equality_ignores_representation() {
        let q = query(json!({"filters": [{"field": "ref", "operator": "=", "value": 2.0}]}));
        assert_eq!(ids(&apply(&q, &records()).unwrap()), ["c"]);
    }

    #[test]
    fn unknown_operator_is_rejected() {
        let q = query(json!({"filters": [{"field": "ref", "operator": "~", "value": 1}]}));
        assert!(apply(&q, &records()).unwrap_err().contains("unknown operator"));
    }
}
