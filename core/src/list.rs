//! List query descriptor sent as the body of every list request.
//!
//! # Design
//! `ListSpec` is passed through to the server untouched: the client does not
//! validate operators, field names or the pagination window. How filter sets
//! combine with the top-level filters is decided server-side.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A filtered, ordered, paginated query.
///
/// Field order matters for the wire form: `limit`, `offset` and
/// `orderDescending` serialize next to each other.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ListSpec {
    /// ANDed together.
    pub filters: Vec<Filter>,
    pub filter_sets: Vec<FilterSet>,
    /// Sort field; empty leaves ordering to the server.
    pub order: String,
    pub limit: u64,
    pub offset: u64,
    pub order_descending: bool,
    /// Also return soft-deleted records.
    pub include_inactives: bool,
}

impl ListSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn with_filter_set(mut self, set: FilterSet) -> Self {
        self.filter_sets.push(set);
        self
    }

    pub fn ordered_by(mut self, field: impl Into<String>, descending: bool) -> Self {
        self.order = field.into();
        self.order_descending = descending;
        self
    }

    pub fn page(mut self, limit: u64, offset: u64) -> Self {
        self.limit = limit;
        self.offset = offset;
        self
    }

    pub fn including_inactives(mut self, include: bool) -> Self {
        self.include_inactives = include;
        self
    }
}

/// A single `field operator value` predicate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    pub field: String,
    pub operator: String,
    #[serde(default)]
    pub value: Value,
}

impl Filter {
    pub fn new(field: impl Into<String>, operator: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            operator: operator.into(),
            value: value.into(),
        }
    }

    pub fn equals(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(field, "=", value)
    }
}

/// A group of filters combined with OR when `or` is set, AND otherwise.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSet {
    pub filters: Vec<Filter>,
    pub or: bool,
}

impl FilterSet {
    pub fn any(filters: Vec<Filter>) -> Self {
        Self { filters, or: true }
    }

    pub fn all(filters: Vec<Filter>) -> Self {
        Self { filters, or: false }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn pagination_fields_serialize_verbatim() {
        let spec = ListSpec {
            limit: 10,
            offset: 20,
            order_descending: true,
            ..ListSpec::default()
        };
        let json = serde_json::to_string(&spec).unwrap();
        assert!(
            json.contains(r#""limit":10,"offset":20,"orderDescending":true"#),
            "{json}"
        );
    }

    #[test]
    fn uses_camel_case_keys() {
        let spec = ListSpec::new()
            .with_filter(Filter::equals("status", "paid"))
            .with_filter_set(FilterSet::any(vec![
                Filter::new("totals.grandTotal", ">", 1000),
                Filter::equals("customer.email", "vip@shop.test"),
            ]))
            .ordered_by("ref", false)
            .including_inactives(true);
        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(json["filters"][0]["field"], "status");
        assert_eq!(json["filters"][0]["operator"], "=");
        assert_eq!(json["filters"][0]["value"], "paid");
        assert_eq!(json["filterSets"][0]["or"], true);
        assert_eq!(json["filterSets"][0]["filters"][0]["value"], 1000);
        assert_eq!(json["order"], "ref");
        assert_eq!(json["includeInactives"], true);
    }

    #[test]
    fn missing_keys_take_defaults() {
        let spec: ListSpec = serde_json::from_str(r#"{"limit":5}"#).unwrap();
        assert_eq!(spec.limit, 5);
        assert_eq!(spec.offset, 0);
        assert!(spec.filters.is_empty());
        assert!(!spec.include_inactives);

        let filter: Filter = serde_json::from_str(r#"{"field":"ref","operator":"exists"}"#).unwrap();
        assert_eq!(filter.value, Value::Null);
    }

    #[test]
    fn negative_pagination_is_rejected_by_type() {
        let result: Result<ListSpec, _> = serde_json::from_str(r#"{"limit":-1}"#);
        assert!(result.is_err());
    }

    fn scalar() -> impl Strategy<Value = Value> {
        prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::from),
            any::<i64>().prop_map(Value::from),
            "[a-zA-Z0-9 ]{0,12}".prop_map(Value::from),
            prop::collection::vec(any::<i32>().prop_map(Value::from), 0..4).prop_map(Value::from),
        ]
    }

    fn filter() -> impl Strategy<Value = Filter> {
        ("[a-z][a-zA-Z.]{0,10}", prop_oneof!["=", "!=", ">", "<=", "in"], scalar())
            .prop_map(|(field, op, value)| Filter::new(field, op, value))
    }

    fn list_spec() -> impl Strategy<Value = ListSpec> {
        (
            prop::collection::vec(filter(), 0..4),
            prop::collection::vec(
                (prop::collection::vec(filter(), 0..3), any::<bool>())
                    .prop_map(|(filters, or)| FilterSet { filters, or }),
                0..3,
            ),
            "[a-zA-Z]{0,8}",
            any::<u64>(),
            any::<u64>(),
            any::<bool>(),
            any::<bool>(),
        )
            .prop_map(
                |(filters, filter_sets, order, limit, offset, order_descending, include_inactives)| ListSpec {
                    filters,
                    filter_sets,
                    order,
                    limit,
                    offset,
                    order_descending,
                    include_inactives,
                },
            )
    }

    proptest! {
        #[test]
        fn json_round_trip_is_identity(spec in list_spec()) {
            let json = serde_json::to_string(&spec).unwrap();
            let back: ListSpec = serde_json::from_str(&json).unwrap();
            prop_assert_eq!(back, spec);
        }
    }
}
