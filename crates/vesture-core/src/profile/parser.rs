//! Profile document loading and profile-map extraction.
//!
//! Profile authors ship documents in one of three recognized top-level
//! shapes:
//!
//! 1. `{"profiles": [{"profile_id": ..., ...}, ...]}` — a list of tagged
//!    objects, keyed by the first non-empty id field per object
//!    (`profile_id`, then `style_id`, then `body_id`).
//! 2. `{"profiles": {"key": {...}, ...}}` — a map keyed directly.
//! 3. A flat document whose direct sub-mappings are the profiles. When any
//!    of the known style keys is present the map is restricted to those;
//!    otherwise every sub-mapping is taken.
//!
//! The shapes are tried in that order and the first non-empty result wins.
//! A document matching no shape yields an empty set; the lookup that
//! follows fails with an unknown-key error, not the load.

use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Style keys recognized by the flat document shape.
const STYLE_KEYS: [&str; 3] = ["straight", "wave", "natural"];

/// Id fields recognized by the tagged list shape, in precedence order.
const ID_FIELDS: [&str; 3] = ["profile_id", "style_id", "body_id"];

/// Errors that can occur when loading a profile document.
#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("Failed to read profile file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// A named bundle of profiles, keyed by body-type or style-type.
#[derive(Debug, Clone, Default)]
pub struct ProfileSet {
    profiles: BTreeMap<String, Value>,
}

impl ProfileSet {
    /// Extract the profile map from an already-parsed document.
    pub fn from_value(document: &Value) -> Self {
        Self {
            profiles: extract_profile_map(document),
        }
    }

    /// Parse a profile document from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ProfileError> {
        let document: Value = serde_json::from_str(json)?;
        Ok(Self::from_value(&document))
    }

    /// Parse a profile document from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ProfileError> {
        let document: Value = serde_yaml::from_str(yaml)?;
        Ok(Self::from_value(&document))
    }

    /// Parse a profile document from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ProfileError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Parse a profile document from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ProfileError> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.profiles.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.profiles.contains_key(key)
    }

    /// Available profile keys, in sorted order.
    pub fn keys(&self) -> Vec<String> {
        self.profiles.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

/// Try each document shape in order; the first non-empty map wins.
fn extract_profile_map(document: &Value) -> BTreeMap<String, Value> {
    let strategies: [(&str, fn(&Value) -> BTreeMap<String, Value>); 3] = [
        ("tagged list", tagged_list_profiles),
        ("keyed map", keyed_map_profiles),
        ("flat document", flat_document_profiles),
    ];

    for (shape, strategy) in strategies {
        let profiles = strategy(document);
        if !profiles.is_empty() {
            debug!(shape, count = profiles.len(), "resolved profile document");
            return profiles;
        }
    }

    debug!("document matched no recognized shape, profile set is empty");
    BTreeMap::new()
}

/// Shape 1: `{"profiles": [{"profile_id": ..., ...}, ...]}`.
fn tagged_list_profiles(document: &Value) -> BTreeMap<String, Value> {
    let mut out = BTreeMap::new();
    let Some(entries) = document.get("profiles").and_then(Value::as_array) else {
        return out;
    };

    for profile in entries {
        if !profile.is_object() {
            continue;
        }
        if let Some(id) = profile_tag(profile) {
            out.insert(id, profile.clone());
        }
    }
    out
}

/// First non-empty id field wins; numeric ids are rendered as strings.
fn profile_tag(profile: &Value) -> Option<String> {
    ID_FIELDS.iter().find_map(|field| match profile.get(*field) {
        Some(Value::String(id)) if !id.is_empty() => Some(id.clone()),
        Some(Value::Number(id)) => Some(id.to_string()),
        _ => None,
    })
}

/// Shape 2: `{"profiles": {"key": {...}, ...}}`; non-mapping values are
/// dropped.
fn keyed_map_profiles(document: &Value) -> BTreeMap<String, Value> {
    document
        .get("profiles")
        .and_then(Value::as_object)
        .map(|profiles| {
            profiles
                .iter()
                .filter(|(_, profile)| profile.is_object())
                .map(|(key, profile)| (key.clone(), profile.clone()))
                .collect()
        })
        .unwrap_or_default()
}

/// Shape 3: a flat document whose direct sub-mappings are profiles.
fn flat_document_profiles(document: &Value) -> BTreeMap<String, Value> {
    let Some(top) = document.as_object() else {
        return BTreeMap::new();
    };

    let direct: BTreeMap<String, Value> = top
        .iter()
        .filter(|(_, value)| value.is_object())
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    if STYLE_KEYS.iter().any(|key| direct.contains_key(*key)) {
        STYLE_KEYS
            .iter()
            .filter_map(|key| direct.get(*key).map(|v| (key.to_string(), v.clone())))
            .collect()
    } else {
        direct
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tagged_list_shape() {
        let set = ProfileSet::from_value(&json!({
            "profiles": [
                {"profile_id": "pear", "rules": []},
                {"style_id": "wave", "rules": []},
                {"body_id": "apple", "rules": []}
            ]
        }));

        assert_eq!(set.keys(), ["apple", "pear", "wave"]);
    }

    #[test]
    fn test_tagged_list_id_field_precedence() {
        let set = ProfileSet::from_value(&json!({
            "profiles": [
                {"profile_id": "first", "style_id": "second", "body_id": "third"}
            ]
        }));

        assert!(set.contains("first"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_tagged_list_empty_id_falls_through() {
        let set = ProfileSet::from_value(&json!({
            "profiles": [
                {"profile_id": "", "style_id": "wave"}
            ]
        }));

        assert!(set.contains("wave"));
    }

    #[test]
    fn test_tagged_list_numeric_id_is_stringified() {
        let set = ProfileSet::from_value(&json!({
            "profiles": [{"profile_id": 7}]
        }));

        assert!(set.contains("7"));
    }

    #[test]
    fn test_tagged_list_skips_untagged_and_non_mapping_entries() {
        let set = ProfileSet::from_value(&json!({
            "profiles": [
                "not a mapping",
                {"rules": []},
                {"profile_id": "kept"}
            ]
        }));

        assert_eq!(set.keys(), ["kept"]);
    }

    #[test]
    fn test_keyed_map_shape() {
        let set = ProfileSet::from_value(&json!({
            "profiles": {
                "pear": {"rules": []},
                "broken": "not a mapping"
            }
        }));

        assert_eq!(set.keys(), ["pear"]);
    }

    #[test]
    fn test_flat_shape_restricted_to_style_keys() {
        let set = ProfileSet::from_value(&json!({
            "straight": {"rules": []},
            "wave": {"rules": []},
            "extra": {"rules": []}
        }));

        assert_eq!(set.keys(), ["straight", "wave"]);
    }

    #[test]
    fn test_flat_shape_takes_all_sub_mappings_without_style_keys() {
        let set = ProfileSet::from_value(&json!({
            "pear": {"rules": []},
            "apple": {"rules": []},
            "version": 2
        }));

        assert_eq!(set.keys(), ["apple", "pear"]);
    }

    #[test]
    fn test_tagged_list_wins_over_flat_shape() {
        let set = ProfileSet::from_value(&json!({
            "profiles": [{"profile_id": "tagged"}],
            "wave": {"rules": []}
        }));

        assert_eq!(set.keys(), ["tagged"]);
    }

    #[test]
    fn test_empty_shapes_fall_through() {
        // An empty tagged list and a non-mapping `profiles` value both cede
        // to the flat shape.
        let set = ProfileSet::from_value(&json!({
            "profiles": [],
            "wave": {"rules": []}
        }));

        assert_eq!(set.keys(), ["wave"]);
    }

    #[test]
    fn test_unrecognized_document_yields_empty_set() {
        assert!(ProfileSet::from_value(&json!("just a string")).is_empty());
        assert!(ProfileSet::from_value(&json!(["a", "b"])).is_empty());
        assert!(ProfileSet::from_value(&json!({"version": 2})).is_empty());
    }

    #[test]
    fn test_from_json_and_yaml() {
        let from_json =
            ProfileSet::from_json(r#"{"profiles": {"pear": {"rules": []}}}"#).unwrap();
        assert!(from_json.contains("pear"));

        let from_yaml = ProfileSet::from_yaml("profiles:\n  pear:\n    rules: []\n").unwrap();
        assert!(from_yaml.contains("pear"));
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(matches!(
            ProfileSet::from_json("{nope"),
            Err(ProfileError::JsonError(_))
        ));
    }
}
