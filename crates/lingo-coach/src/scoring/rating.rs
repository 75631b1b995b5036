use serde::{Deserialize, Serialize};

use super::rules::SCALE_MAX;

const STAR_GLYPH: &str = "⭐";
const HALF_STAR_GLYPH: &str = "½";

/// Qualitative band derived from the percentage of the scale earned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatingTier {
    NeedsWork,
    KeepPracticing,
    GoodEffort,
    Excellent,
    Outstanding,
}

impl RatingTier {
    pub fn from_total(total: f64) -> Self {
        let percent = total * 100.0 / SCALE_MAX;
        if percent >= 90.0 {
            Self::Outstanding
        } else if percent >= 80.0 {
            Self::Excellent
        } else if percent >= 70.0 {
            Self::GoodEffort
        } else if percent >= 60.0 {
            Self::KeepPracticing
        } else {
            Self::NeedsWork
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RatingTier::Outstanding => "outstanding",
            RatingTier::Excellent => "excellent",
            RatingTier::GoodEffort => "good effort",
            RatingTier::KeepPracticing => "keep practicing",
            RatingTier::NeedsWork => "needs work",
        }
    }

    /// Encouragement shown under the breakdown.
    pub fn message(&self, subject: &str) -> String {
        match self {
            RatingTier::Outstanding => {
                format!("Outstanding work! Your response shows excellent understanding of {subject}!")
            }
            RatingTier::Excellent => {
                format!("Excellent work! Great use of {subject} terms and concepts!")
            }
            RatingTier::GoodEffort => format!("Good effort! Keep exploring {subject}!"),
            RatingTier::KeepPracticing => {
                format!("Keep practicing! Try to incorporate more specific terms about {subject}.")
            }
            RatingTier::NeedsWork => {
                format!("Needs work. Focus on the required words and key ideas of {subject}.")
            }
        }
    }
}

/// Five-star projection of the 0-100 total, rounded to one decimal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StarRating {
    pub value: f64,
    pub glyphs: String,
}

impl StarRating {
    pub fn from_total(total: f64) -> Self {
        let scaled = (total.clamp(0.0, SCALE_MAX) / (SCALE_MAX / 5.0) * 10.0).round() / 10.0;
        let whole = scaled.floor();
        let mut glyphs = STAR_GLYPH.repeat(whole as usize);
        if scaled - whole > f64::EPSILON {
            glyphs.push_str(HALF_STAR_GLYPH);
        }

        Self {
            value: scaled,
            glyphs,
        }
    }
}
