//! Profile document parsing.
//!
//! Body and style profiles are externally authored JSON/YAML documents.
//! This module extracts the profile map from the document's top-level shape
//! and normalizes each profile's rule sections into a uniform rule list.

mod parser;
mod rules;
mod schema;

pub use parser::{ProfileError, ProfileSet};
pub use rules::{parse_rules, Condition, Rule};
pub use schema::{is_valid_profile, validate_profile_schema};
