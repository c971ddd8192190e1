//! Condition matching.
//!
//! A condition is a map from attribute name to a required value. A scalar
//! requirement matches only on exact equality (no type coercion), an array
//! requirement matches when the item's value is a member, and an item that
//! lacks the attribute never matches. An empty condition matches every item.

use serde_json::Value;

use crate::catalog::Item;
use crate::profile::Condition;

/// Evaluate whether one item satisfies one condition.
pub fn matches(item: &Item, condition: &Condition) -> bool {
    condition.iter().all(|(key, required)| match item.get(key) {
        None => false,
        Some(actual) => match required {
            Value::Array(allowed) => allowed.contains(actual),
            scalar => actual == scalar,
        },
    })
}
