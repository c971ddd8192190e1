//! # vesture-core
//!
//! Rule-based outfit recommendation engine.
//!
//! Vesture combines two independently authored rule profiles (a body-type
//! profile and a style-type profile) and scores a catalog of garment
//! records against the union of both rule sets, answering:
//! - Which items must be excluded outright?
//! - How well does each remaining item fit?
//! - Why?
//!
//! ## Key Guarantees
//!
//! 1. **Deterministic**: the same catalog, profiles, and request always
//!    produce the same ranking
//! 2. **Lenient input**: malformed rule entries are skipped, never fatal
//! 3. **Explainable**: every score carries a tagged reason trail
//! 4. **Read-only**: a recommender never mutates shared state and may be
//!    reused across threads
//!
//! ## Example
//!
//! ```rust,ignore
//! use vesture_core::{Catalog, ProfileSet, RecommendRequest, Recommender};
//!
//! let catalog = Catalog::from_json_file("data/items.json")?;
//! let body = ProfileSet::from_json_file("data/body_profile.json")?;
//! let style = ProfileSet::from_json_file("data/style_profile.json")?;
//! let recommender = Recommender::new(catalog, body, style);
//!
//! let recommendation = recommender.recommend(&RecommendRequest::new("pear", "wave"))?;
//! for item in &recommendation.items {
//!     println!("{} {:.3}", item.attributes["mesh_id"], item.combo_score);
//! }
//! ```

pub mod catalog;
pub mod engine;
pub mod matcher;
pub mod profile;
pub mod rank;
pub mod survey;

// Re-export main types at crate root
pub use catalog::{Catalog, CatalogError, Item};
pub use engine::{
    score_items, Recommendation, RecommendError, RecommendRequest, Recommender, ScoredItem,
};
pub use matcher::matches;
pub use profile::{
    is_valid_profile, parse_rules, validate_profile_schema, Condition, ProfileError, ProfileSet,
    Rule,
};
pub use rank::rank;
pub use survey::{infer_style_type, StyleType, SurveyQuestion, STYLE_SURVEY};
