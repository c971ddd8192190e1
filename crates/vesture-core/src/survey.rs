//! Style-type survey and inference.
//!
//! The survey asks eleven questions about build and proportion. Each
//! question offers three choices, and choice N is evidence for the style
//! type mapped from answer N (1=straight, 2=wave, 3=natural). Inference is
//! a plurality vote with a fixed tie-break.

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Aesthetic style classification selecting a style profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleType {
    Straight,
    Wave,
    Natural,
}

impl StyleType {
    /// Map a survey answer (1/2/3) to its style type.
    pub fn from_answer(answer: u8) -> Option<Self> {
        match answer {
            1 => Some(StyleType::Straight),
            2 => Some(StyleType::Wave),
            3 => Some(StyleType::Natural),
            _ => None,
        }
    }

    /// The profile key this style selects.
    pub fn as_str(&self) -> &'static str {
        match self {
            StyleType::Straight => "straight",
            StyleType::Wave => "wave",
            StyleType::Natural => "natural",
        }
    }
}

impl fmt::Display for StyleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One survey question with its three answer choices.
#[derive(Debug, Clone)]
pub struct SurveyQuestion {
    pub title: &'static str,
    pub choices: [&'static str; 3],
}

lazy_static! {
    /// The eleven-question style survey.
    pub static ref STYLE_SURVEY: Vec<SurveyQuestion> = vec![
        SurveyQuestion {
            title: "Where weight settles",
            choices: [
                "Upper body gains first (back, belly, upper arms, thighs)",
                "Upper body stays slim, weight settles on thighs and hips",
                "Weight spreads evenly, with broad shoulders and a larger frame",
            ],
        },
        SurveyQuestion {
            title: "Torso depth",
            choices: [
                "The side profile looks thick and rounded",
                "The side profile looks flat",
                "The side profile shows a heavy bone structure",
            ],
        },
        SurveyQuestion {
            title: "Flesh texture",
            choices: [
                "Firm flesh that reads as muscle",
                "Soft, yielding flesh",
                "Dry, tough-feeling flesh",
            ],
        },
        SurveyQuestion {
            title: "Hands",
            choices: [
                "Fleshy backs of the hands, bones barely visible",
                "Slender fingers and thin hands",
                "Large, thick bone structure in the hands",
            ],
        },
        SurveyQuestion {
            title: "Head shape",
            choices: [
                "Small, rounded head relative to the face",
                "Flat at the back of the head",
                "Large head relative to the face, uneven contours",
            ],
        },
        SurveyQuestion {
            title: "Neck",
            choices: [
                "Full neck with pronounced trapezius",
                "Thin, slender neck",
                "Sturdy neck with prominent bones",
            ],
        },
        SurveyQuestion {
            title: "Collarbone",
            choices: [
                "Collarbone barely shows",
                "Thin, finely drawn collarbone",
                "Large, thick collarbone",
            ],
        },
        SurveyQuestion {
            title: "Shoulders",
            choices: [
                "Rounded shoulders",
                "Narrow, thin, sloping shoulders",
                "Thick, wide shoulders that sit high",
            ],
        },
        SurveyQuestion {
            title: "Chest",
            choices: [
                "High, full chest set toward the top of the torso",
                "Hollow upper chest with a long, flat line",
                "Prominent breastbone, pigeon-chested",
            ],
        },
        SurveyQuestion {
            title: "Hips",
            choices: [
                "Rounded, protruding seat",
                "Teardrop-shaped seat",
                "Flat seat",
            ],
        },
        SurveyQuestion {
            title: "Waist",
            choices: [
                "Little to no waist definition",
                "Narrow waist with wide hips",
                "Straight waist with a flat belly",
            ],
        },
    ];
}

/// Infer a style type from survey answers by plurality vote.
///
/// Ties break toward natural, then wave, then straight: a deliberate,
/// fixed priority, not an accident of iteration order. Answers outside
/// 1..=3 are ignored by the tally; returns `None` when nothing tallies.
pub fn infer_style_type(answers: &[u8]) -> Option<StyleType> {
    let mut tally = [0usize; 3];
    for &answer in answers {
        if (1..=3).contains(&answer) {
            tally[usize::from(answer) - 1] += 1;
        }
    }

    let max = *tally.iter().max().unwrap_or(&0);
    if max == 0 {
        return None;
    }

    [3u8, 2, 1]
        .into_iter()
        .find(|&answer| tally[usize::from(answer) - 1] == max)
        .and_then(StyleType::from_answer)
}
