//! Result ranking.

use std::cmp::Ordering;

use crate::engine::ScoredItem;

/// Order scored items descending by combo score and truncate to `top_k`.
///
/// The sort is stable: equal scores keep the relative order the scoring
/// pass produced, which is catalog order. `top_k` of zero yields an empty
/// result, not an error.
pub fn rank(mut items: Vec<ScoredItem>, top_k: usize) -> Vec<ScoredItem> {
    items.sort_by(|a, b| {
        b.combo_score
            .partial_cmp(&a.combo_score)
            .unwrap_or(Ordering::Equal)
    });
    items.truncate(top_k);
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::{Map, Value};

    fn scored(scores: &[f64]) -> Vec<ScoredItem> {
        scores
            .iter()
            .enumerate()
            .map(|(index, &score)| {
                let mut attributes = Map::new();
                attributes.insert("idx".to_string(), Value::from(index));
                ScoredItem {
                    attributes,
                    combo_score: score,
                    reasons: Vec::new(),
                }
            })
            .collect()
    }

    fn index_of(item: &ScoredItem) -> u64 {
        item.attributes["idx"].as_u64().unwrap()
    }

    #[test]
    fn test_descending_with_truncation() {
        let ranked = rank(scored(&[1.0, 5.0, 3.0, 4.0]), 2);
        let scores: Vec<f64> = ranked.iter().map(|i| i.combo_score).collect();
        assert_eq!(scores, [5.0, 4.0]);
    }

    #[test]
    fn test_top_k_zero_is_empty() {
        assert!(rank(scored(&[1.0, 2.0]), 0).is_empty());
    }

    #[test]
    fn test_top_k_beyond_len_returns_everything() {
        assert_eq!(rank(scored(&[1.0, 2.0]), 10).len(), 2);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let ranked = rank(scored(&[2.0, 3.0, 2.0, 3.0, 2.0]), 10);
        let indices: Vec<u64> = ranked.iter().map(index_of).collect();
        assert_eq!(indices, [1, 3, 0, 2, 4]);
    }

    proptest! {
        #[test]
        fn prop_length_is_min_of_k_and_len(
            scores in prop::collection::vec(-100.0f64..100.0, 0..40),
            top_k in 0usize..50,
        ) {
            let ranked = rank(scored(&scores), top_k);
            prop_assert_eq!(ranked.len(), scores.len().min(top_k));
        }

        #[test]
        fn prop_scores_are_non_increasing(
            scores in prop::collection::vec(-100.0f64..100.0, 0..40),
        ) {
            let ranked = rank(scored(&scores), scores.len());
            for pair in ranked.windows(2) {
                prop_assert!(pair[0].combo_score >= pair[1].combo_score);
            }
        }

        #[test]
        fn prop_truncation_is_a_prefix_of_the_full_order(
            scores in prop::collection::vec(-100.0f64..100.0, 0..40),
            top_k in 0usize..50,
        ) {
            let full = rank(scored(&scores), scores.len());
            let truncated = rank(scored(&scores), top_k);
            prop_assert_eq!(&full[..truncated.len()], &truncated[..]);
        }

        #[test]
        fn prop_equal_scores_keep_input_order(len in 1usize..30) {
            let ranked = rank(scored(&vec![1.0; len]), len);
            let indices: Vec<u64> = ranked.iter().map(index_of).collect();
            let expected: Vec<u64> = (0..len as u64).collect();
            prop_assert_eq!(indices, expected);
        }
    }
}
