//! Console report and outfit payload output.

use chrono::SecondsFormat;
use serde_json::{json, Value};
use vesture_core::{Recommendation, ScoredItem};

const REPORT_ATTRS: [&str; 4] = ["category_main", "length", "silhouette", "fit"];
const MAX_REASONS_SHOWN: usize = 8;

/// Print the ranked recommendations to the console.
pub fn print_ranking(recommendation: &Recommendation) {
    println!("\n=== Recommendations ===");
    if recommendation.items.is_empty() {
        println!("No items matched.");
        return;
    }

    for (index, item) in recommendation.items.iter().enumerate() {
        println!(
            "\n[{}] mesh_id={}  score={:.3}",
            index + 1,
            display_attr(item, "mesh_id"),
            item.combo_score
        );

        let attrs: Vec<String> = REPORT_ATTRS
            .iter()
            .map(|key| format!("{key}={}", display_attr(item, key)))
            .collect();
        println!("    {}", attrs.join(" "));

        for reason in item.reasons.iter().take(MAX_REASONS_SHOWN) {
            println!("    - {reason}");
        }
    }
}

fn display_attr(item: &ScoredItem, key: &str) -> String {
    match item.attributes.get(key) {
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
        None => "-".to_string(),
    }
}

/// Build the outfit payload written by `--output`.
pub fn outfit_payload(
    recommendation: &Recommendation,
    avatar_id: &str,
    age_group: u32,
    survey_answers: Option<&[u8]>,
) -> Value {
    let outfits: Vec<Value> = recommendation
        .items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            json!({
                "rank": index + 1,
                "mesh_id": item.attributes.get("mesh_id"),
                "category_main": item.attributes.get("category_main"),
                "length": item.attributes.get("length"),
                "silhouette": item.attributes.get("silhouette"),
                "fit": item.attributes.get("fit"),
                "waist_emphasis": item.attributes.get("waist_emphasis"),
                "exposure": item.attributes.get("exposure"),
                "score": item.combo_score,
                "reasons": item.reasons,
            })
        })
        .collect();

    json!({
        "meta": {
            "created_at": recommendation
                .generated_at
                .to_rfc3339_opts(SecondsFormat::Secs, true),
            "engine": "rule_based",
        },
        "avatar": {
            "avatar_id": avatar_id,
            "age_group": age_group,
            "body_type": recommendation.body_type,
            "style_type": recommendation.style_type,
            "style_survey_answers": survey_answers,
        },
        "outfits": outfits,
    })
}
