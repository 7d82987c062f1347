//! Metadata filtering for search requests.
//!
//! Evaluates [`MetadataFilter`] predicates against stored entry metadata.
//! `must` conditions are AND-ed, `must_not` conditions are AND-NOT-ed, with
//! operators `eq`, `ne`, `gt`, `lt`, `gte`, `lte`, `in`.

use crate::error::{Result, VectorStoreError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterOperator {
    Eq,
    Ne,
    Gt,
    Lt,
    Gte,
    Lte,
    In,
}

/// A single condition over one metadata field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterCondition {
    pub field: String,
    pub op: FilterOperator,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<Value>>,
}

impl FilterCondition {
    fn with_value(field: impl Into<String>, op: FilterOperator, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            op,
            value: Some(value.into()),
            values: None,
        }
    }

    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::with_value(field, FilterOperator::Eq, value)
    }

    pub fn ne(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::with_value(field, FilterOperator::Ne, value)
    }

    pub fn gt(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::with_value(field, FilterOperator::Gt, value)
    }

    pub fn lt(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::with_value(field, FilterOperator::Lt, value)
    }

    pub fn gte(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::with_value(field, FilterOperator::Gte, value)
    }

    pub fn lte(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::with_value(field, FilterOperator::Lte, value)
    }

    pub fn is_in(field: impl Into<String>, values: Vec<Value>) -> Self {
        Self {
            field: field.into(),
            op: FilterOperator::In,
            value: None,
            values: Some(values),
        }
    }
}

/// Conjunction of conditions a candidate's metadata must (not) satisfy.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetadataFilter {
    #[serde(default)]
    pub must: Vec<FilterCondition>,
    #[serde(default)]
    pub must_not: Vec<FilterCondition>,
}

impl MetadataFilter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn must(mut self, condition: FilterCondition) -> Self {
        self.must.push(condition);
        self
    }

    #[must_use]
    pub fn must_not(mut self, condition: FilterCondition) -> Self {
        self.must_not.push(condition);
        self
    }

    /// Reject malformed conditions (an operator without its operand) before
    /// any candidate is evaluated. The error is scoped to the failing search
    /// call; store state is untouched.
    pub fn validate(&self) -> Result<()> {
        for cond in self.must.iter().chain(self.must_not.iter()) {
            match cond.op {
                FilterOperator::In => {
                    if cond.values.is_none() {
                        return Err(VectorStoreError::InvalidFilter(format!(
                            "'in' condition on field '{}' is missing its values list",
                            cond.field
                        )));
                    }
                }
                _ => {
                    if cond.value.is_none() {
                        return Err(VectorStoreError::InvalidFilter(format!(
                            "condition on field '{}' is missing its value",
                            cond.field
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    /// Check whether a candidate's metadata matches this filter.
    /// A condition on a missing field fails that condition.
    #[must_use]
    pub fn matches(&self, metadata: &HashMap<String, Value>) -> bool {
        for cond in &self.must {
            if !evaluate_condition(metadata, cond) {
                return false;
            }
        }
        for cond in &self.must_not {
            if evaluate_condition(metadata, cond) {
                return false;
            }
        }
        true
    }
}

fn evaluate_condition(metadata: &HashMap<String, Value>, cond: &FilterCondition) -> bool {
    let Some(field_value) = metadata.get(&cond.field) else {
        return false;
    };

    match cond.op {
        FilterOperator::Eq => cond.value.as_ref().is_some_and(|v| value_eq(field_value, v)),
        FilterOperator::Ne => cond.value.as_ref().is_some_and(|v| !value_eq(field_value, v)),
        FilterOperator::Gt => cond.value.as_ref().is_some_and(|v| {
            value_cmp(field_value, v).is_some_and(|o| o == std::cmp::Ordering::Greater)
        }),
        FilterOperator::Lt => cond.value.as_ref().is_some_and(|v| {
            value_cmp(field_value, v).is_some_and(|o| o == std::cmp::Ordering::Less)
        }),
        FilterOperator::Gte => cond.value.as_ref().is_some_and(|v| {
            value_cmp(field_value, v).is_some_and(|o| o != std::cmp::Ordering::Less)
        }),
        FilterOperator::Lte => cond.value.as_ref().is_some_and(|v| {
            value_cmp(field_value, v).is_some_and(|o| o != std::cmp::Ordering::Greater)
        }),
        FilterOperator::In => cond
            .values
            .as_ref()
            .is_some_and(|vals| vals.iter().any(|v| value_eq(field_value, v))),
    }
}

/// Equality with numeric widening, so integer metadata matches float
/// operands and vice versa.
fn value_eq(a: &Value, b: &Value) -> bool {
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x == y,
        _ => a == b,
    }
}

/// Ordering is defined for numeric operands only.
fn value_cmp(a: &Value, b: &Value) -> Option<std::cmp::Ordering> {
    a.as_f64()?.partial_cmp(&b.as_f64()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn meta(pairs: Vec<(&str, Value)>) -> HashMap<String, Value> {
        pairs
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = MetadataFilter::new();
        assert!(filter.matches(&meta(vec![])));
        assert!(filter.matches(&meta(vec![("a", json!(1))])));
    }

    #[test]
    fn test_eq_and_ne() {
        let metadata = meta(vec![("source", json!("upload")), ("page", json!(3))]);

        assert!(MetadataFilter::new()
            .must(FilterCondition::eq("source", "upload"))
            .matches(&metadata));
        assert!(!MetadataFilter::new()
            .must(FilterCondition::eq("source", "crawl"))
            .matches(&metadata));
        assert!(MetadataFilter::new()
            .must(FilterCondition::ne("source", "crawl"))
            .matches(&metadata));
        // Numeric widening: 3 matches 3.0.
        assert!(MetadataFilter::new()
            .must(FilterCondition::eq("page", 3.0))
            .matches(&metadata));
    }

    #[test]
    fn test_ordering_operators() {
        let metadata = meta(vec![("chunk_index", json!(2))]);

        assert!(MetadataFilter::new()
            .must(FilterCondition::gt("chunk_index", 1))
            .matches(&metadata));
        assert!(MetadataFilter::new()
            .must(FilterCondition::lte("chunk_index", 2))
            .matches(&metadata));
        assert!(!MetadataFilter::new()
            .must(FilterCondition::lt("chunk_index", 2))
            .matches(&metadata));
        // Ordering against a non-numeric field never matches.
        let strings = meta(vec![("chunk_index", json!("two"))]);
        assert!(!MetadataFilter::new()
            .must(FilterCondition::gt("chunk_index", 1))
            .matches(&strings));
    }

    #[test]
    fn test_in_operator() {
        let metadata = meta(vec![("lang", json!("zh"))]);

        assert!(MetadataFilter::new()
            .must(FilterCondition::is_in("lang", vec![json!("zh"), json!("en")]))
            .matches(&metadata));
        assert!(!MetadataFilter::new()
            .must(FilterCondition::is_in("lang", vec![json!("de")]))
            .matches(&metadata));
    }

    #[test]
    fn test_must_not() {
        let metadata = meta(vec![("source", json!("upload"))]);

        assert!(!MetadataFilter::new()
            .must_not(FilterCondition::eq("source", "upload"))
            .matches(&metadata));
        assert!(MetadataFilter::new()
            .must_not(FilterCondition::eq("source", "crawl"))
            .matches(&metadata));
    }

    #[test]
    fn test_missing_field_fails_condition() {
        let metadata = meta(vec![]);
        assert!(!MetadataFilter::new()
            .must(FilterCondition::eq("source", "upload"))
            .matches(&metadata));
        // ...which makes a must_not on a missing field pass.
        assert!(MetadataFilter::new()
            .must_not(FilterCondition::eq("source", "upload"))
            .matches(&metadata));
    }

    #[test]
    fn test_validate_rejects_missing_operands() {
        let malformed = MetadataFilter::new().must(FilterCondition {
            field: "source".to_string(),
            op: FilterOperator::Eq,
            value: None,
            values: None,
        });
        assert!(malformed.validate().is_err());

        let malformed_in = MetadataFilter::new().must(FilterCondition {
            field: "lang".to_string(),
            op: FilterOperator::In,
            value: None,
            values: None,
        });
        assert!(malformed_in.validate().is_err());

        assert!(MetadataFilter::new()
            .must(FilterCondition::eq("a", 1))
            .validate()
            .is_ok());
    }
}
