//! Rule normalization.
//!
//! A profile object may declare preferences under four section names:
//! `rules`, `prefer`, `avoid`, and `optional_micro_bonus`. All four are
//! normalized into the same [`Rule`] shape; only the `rules` section may
//! mark an entry as a hard filter. The `avoid` section is not subtractive:
//! its score is applied exactly as authored, sign included.
//!
//! Profile documents are untrusted, partially malformed input. An entry
//! that does not deserialize (not a mapping, condition field missing,
//! wrong field type) is skipped, never fatal.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

/// A condition over item attributes: scalar values require exact equality,
/// array values require membership. An empty condition matches every item.
pub type Condition = Map<String, Value>;

/// One atomic preference from a profile document.
///
/// When the condition matches an item, either the item is excluded outright
/// (`hard_filter`) or `score` is added to its total and `reason` appended
/// to its explanation trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub when: Condition,
    pub score: f64,
    pub reason: String,
    pub hard_filter: bool,
}

/// Entry shape of the `rules` section.
#[derive(Debug, Deserialize)]
struct RuleEntry {
    when: Condition,
    #[serde(default)]
    score: f64,
    #[serde(default)]
    reason: String,
    #[serde(default)]
    hard_filter: bool,
}

/// Entry shape of the `prefer`, `avoid`, and `optional_micro_bonus`
/// sections. Always soft; a stray `hard_filter` field is ignored.
#[derive(Debug, Deserialize)]
struct SoftEntry {
    #[serde(rename = "if")]
    when: Condition,
    #[serde(default)]
    score: f64,
    #[serde(default)]
    reason: String,
}

const SOFT_SECTIONS: [&str; 3] = ["prefer", "avoid", "optional_micro_bonus"];

/// Normalize one profile object into an ordered rule list.
///
/// Output order is `rules`, then `prefer`, then `avoid`, then
/// `optional_micro_bonus`, each in document order. Order only affects the
/// reason trail; scoring is additive.
pub fn parse_rules(profile: &Value) -> Vec<Rule> {
    let mut rules = Vec::new();

    for entry in section_entries(profile, "rules") {
        match serde_json::from_value::<RuleEntry>(entry.clone()) {
            Ok(parsed) => rules.push(Rule {
                when: parsed.when,
                score: parsed.score,
                reason: parsed.reason,
                hard_filter: parsed.hard_filter,
            }),
            Err(err) => debug!(section = "rules", %err, "skipping malformed rule entry"),
        }
    }

    for section in SOFT_SECTIONS {
        for entry in section_entries(profile, section) {
            match serde_json::from_value::<SoftEntry>(entry.clone()) {
                Ok(parsed) => rules.push(Rule {
                    when: parsed.when,
                    score: parsed.score,
                    reason: parsed.reason,
                    hard_filter: false,
                }),
                Err(err) => debug!(section, %err, "skipping malformed rule entry"),
            }
        }
    }

    rules
}

/// Entries of a section, or nothing when the section is absent or not a
/// list.
fn section_entries<'a>(profile: &'a Value, section: &str) -> impl Iterator<Item = &'a Value> {
    profile
        .get(section)
        .and_then(Value::as_array)
        .map(|entries| entries.iter())
        .into_iter()
        .flatten()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sections_normalize_in_fixed_order() {
        let profile = json!({
            "optional_micro_bonus": [
                {"if": {"pleated": true}, "score": 0.5, "reason": "micro"}
            ],
            "avoid": [
                {"if": {"length": "mini"}, "score": -2, "reason": "avoid"}
            ],
            "rules": [
                {"when": {"length": "short"}, "score": 2, "reason": "first"},
                {"when": {"fit": "slim"}, "score": 1, "reason": "second", "hard_filter": true}
            ],
            "prefer": [
                {"if": {"silhouette": "a-line"}, "score": 3, "reason": "prefer"}
            ]
        });

        let rules = parse_rules(&profile);
        let reasons: Vec<&str> = rules.iter().map(|r| r.reason.as_str()).collect();
        assert_eq!(reasons, ["first", "second", "prefer", "avoid", "micro"]);
        assert!(rules[1].hard_filter);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let profile = json!({"rules": [{"when": {"length": "short"}}]});
        let rules = parse_rules(&profile);

        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].score, 0.0);
        assert_eq!(rules[0].reason, "");
        assert!(!rules[0].hard_filter);
    }

    #[test]
    fn test_malformed_entries_are_skipped() {
        let profile = json!({
            "rules": [
                "not a mapping",
                {"score": 5, "reason": "no condition"},
                {"when": "not a map", "score": 5},
                {"when": {"length": "short"}, "score": "not a number"},
                {"when": {"length": "short"}, "score": 2, "reason": "kept"}
            ],
            "prefer": [
                {"score": 1, "reason": "missing if"},
                {"if": {"fit": "slim"}, "score": 1, "reason": "kept too"}
            ]
        });

        let rules = parse_rules(&profile);
        let reasons: Vec<&str> = rules.iter().map(|r| r.reason.as_str()).collect();
        assert_eq!(reasons, ["kept", "kept too"]);
    }

    #[test]
    fn test_soft_sections_never_hard_filter() {
        let profile = json!({
            "avoid": [
                {"if": {"exposure": "high"}, "score": -5, "hard_filter": true}
            ]
        });

        let rules = parse_rules(&profile);
        assert_eq!(rules.len(), 1);
        assert!(!rules[0].hard_filter);
    }

    #[test]
    fn test_avoid_scores_are_not_negated() {
        let profile = json!({
            "avoid": [
                {"if": {"length": "mini"}, "score": 3.5, "reason": "as authored"},
                {"if": {"length": "maxi"}, "score": -1.5, "reason": "as authored"}
            ]
        });

        let rules = parse_rules(&profile);
        assert_eq!(rules[0].score, 3.5);
        assert_eq!(rules[1].score, -1.5);
    }

    #[test]
    fn test_non_list_sections_are_ignored() {
        let profile = json!({
            "rules": {"when": {"length": "short"}},
            "prefer": "oops",
            "avoid": null
        });

        assert!(parse_rules(&profile).is_empty());
    }

    #[test]
    fn test_empty_condition_is_a_valid_rule() {
        let profile = json!({"rules": [{"when": {}, "score": 1, "reason": "base"}]});
        let rules = parse_rules(&profile);

        assert_eq!(rules.len(), 1);
        assert!(rules[0].when.is_empty());
    }

    #[test]
    fn test_unknown_entry_fields_are_tolerated() {
        let profile = json!({
            "rules": [
                {"when": {"length": "short"}, "score": 1, "note": "annotation", "author": "kim"}
            ]
        });

        assert_eq!(parse_rules(&profile).len(), 1);
    }
}
