//! Scoring engine.
//!
//! Applies a body rule set and a style rule set against every catalog item.
//! Hard filters from either set apply globally: one match excludes the item
//! outright, whichever profile the rule came from. Soft scores are purely
//! additive across both sets, with no clamping or normalization, and every
//! scoring rule with a reason leaves a tagged entry in the item's
//! explanation trail.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::catalog::{Catalog, Item};
use crate::matcher::matches;
use crate::profile::{parse_rules, ProfileSet, Rule};
use crate::rank::rank;

/// Errors from a recommendation call.
#[derive(Error, Debug)]
pub enum RecommendError {
    #[error("Unknown body type `{requested}`. Available: {}", .available.join(", "))]
    UnknownBodyType {
        requested: String,
        available: Vec<String>,
    },

    #[error("Unknown style type `{requested}`. Available: {}", .available.join(", "))]
    UnknownStyleType {
        requested: String,
        available: Vec<String>,
    },
}

/// Parameters of one recommendation call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendRequest {
    pub body_type: String,
    pub style_type: String,
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    #[serde(default)]
    pub min_score: Option<f64>,
}

fn default_top_k() -> usize {
    5
}

impl RecommendRequest {
    pub fn new(body_type: impl Into<String>, style_type: impl Into<String>) -> Self {
        Self {
            body_type: body_type.into(),
            style_type: style_type.into(),
            top_k: default_top_k(),
            min_score: None,
        }
    }
}

/// A catalog item with its accumulated score and reason trail.
///
/// Serializes as the original flat record plus `combo_score` and `reasons`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredItem {
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
    pub combo_score: f64,
    pub reasons: Vec<String>,
}

/// Ranked response for one recommendation call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub body_type: String,
    pub style_type: String,
    pub generated_at: DateTime<Utc>,
    pub items: Vec<ScoredItem>,
}

/// Rule-based recommender over an immutable catalog and two profile maps.
///
/// All state is read-only after construction and every call allocates fresh
/// outputs, so one instance may be shared across threads.
pub struct Recommender {
    catalog: Catalog,
    body_profiles: ProfileSet,
    style_profiles: ProfileSet,
}

impl Recommender {
    pub fn new(catalog: Catalog, body_profiles: ProfileSet, style_profiles: ProfileSet) -> Self {
        Self {
            catalog,
            body_profiles,
            style_profiles,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Available body type keys, sorted.
    pub fn body_types(&self) -> Vec<String> {
        self.body_profiles.keys()
    }

    /// Available style type keys, sorted.
    pub fn style_types(&self) -> Vec<String> {
        self.style_profiles.keys()
    }

    /// Score the whole catalog against the requested profiles and return
    /// the ranked top-K.
    pub fn recommend(&self, request: &RecommendRequest) -> Result<Recommendation, RecommendError> {
        let body = self.body_profiles.get(&request.body_type).ok_or_else(|| {
            RecommendError::UnknownBodyType {
                requested: request.body_type.clone(),
                available: self.body_profiles.keys(),
            }
        })?;
        let style = self.style_profiles.get(&request.style_type).ok_or_else(|| {
            RecommendError::UnknownStyleType {
                requested: request.style_type.clone(),
                available: self.style_profiles.keys(),
            }
        })?;

        let body_rules = parse_rules(body);
        let style_rules = parse_rules(style);

        let scored = score_items(
            self.catalog.items(),
            &body_rules,
            &style_rules,
            request.min_score,
        );

        Ok(Recommendation {
            body_type: request.body_type.clone(),
            style_type: request.style_type.clone(),
            generated_at: Utc::now(),
            items: rank(scored, request.top_k),
        })
    }
}

/// Score every item against both rule sets, in catalog order.
///
/// The hard-filter pass runs first over the concatenation of both sets and
/// short-circuits on the first match. The soft pass then walks body rules,
/// then style rules; a matching hard rule cannot reach it. The minimum-score
/// filter applies after scoring completes, so it never changes which rules
/// are evaluated.
pub fn score_items(
    items: &[Item],
    body_rules: &[Rule],
    style_rules: &[Rule],
    min_score: Option<f64>,
) -> Vec<ScoredItem> {
    let mut results = Vec::new();

    'items: for item in items {
        for rule in body_rules.iter().chain(style_rules) {
            if rule.hard_filter && matches(item, &rule.when) {
                continue 'items;
            }
        }

        let mut combo_score = 0.0;
        let mut reasons = Vec::new();

        apply_soft_rules(item, body_rules, "[BODY]", &mut combo_score, &mut reasons);
        apply_soft_rules(item, style_rules, "[STYLE]", &mut combo_score, &mut reasons);

        if let Some(min) = min_score {
            if combo_score < min {
                continue;
            }
        }

        results.push(ScoredItem {
            attributes: item.attributes().clone(),
            combo_score,
            reasons,
        });
    }

    results
}

fn apply_soft_rules(
    item: &Item,
    rules: &[Rule],
    tag: &str,
    combo_score: &mut f64,
    reasons: &mut Vec<String>,
) {
    for rule in rules {
        if !matches(item, &rule.when) {
            continue;
        }
        *combo_score += rule.score;
        if !rule.reason.is_empty() {
            // f64 Display already trims trailing zeros: 2.0 renders as "2".
            reasons.push(format!("{tag} {} (+{})", rule.reason, rule.score));
        }
    }
}
