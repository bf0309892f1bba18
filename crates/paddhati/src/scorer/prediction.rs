use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::bodies::Body;
use crate::scorer::Scorer;
use crate::significators::HouseSignificators;

pub const STRONG_CUTOFF: f64 = 1.0;
pub const MILD_CUTOFF: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PredictionLabel {
    StronglyBearish,
    Bearish,
    Neutral,
    Bullish,
    StronglyBullish,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ConfidenceTier {
    Low,
    Medium,
    High,
}

/// Score cutoffs for the five labels, symmetric around zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bands {
    pub strong: f64,
    pub mild: f64,
}

impl Default for Bands {
    fn default() -> Self {
        Self {
            strong: STRONG_CUTOFF,
            mild: MILD_CUTOFF,
        }
    }
}

impl Bands {
    /// Cutoffs are exclusive: a score equal to a cutoff takes the weaker band.
    pub fn classify(&self, score: f64) -> (PredictionLabel, ConfidenceTier) {
        if score > self.strong {
            (PredictionLabel::StronglyBullish, ConfidenceTier::High)
        } else if score > self.mild {
            (PredictionLabel::Bullish, ConfidenceTier::Medium)
        } else if score < -self.strong {
            (PredictionLabel::StronglyBearish, ConfidenceTier::High)
        } else if score < -self.mild {
            (PredictionLabel::Bearish, ConfidenceTier::Medium)
        } else {
            (PredictionLabel::Neutral, ConfidenceTier::Low)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub score: f64,
    pub label: PredictionLabel,
    pub confidence: ConfidenceTier,
    pub significators: BTreeSet<Body>,
}

impl Scorer {
    /// Point-in-time label from the given houses (normally the 2nd and 11th).
    pub fn predict(&self, houses: &[&HouseSignificators]) -> Prediction {
        let significators = Self::combined_significators(houses);
        let score = self.weights().score(&significators);
        let (label, confidence) = self.bands().classify(score);
        Prediction {
            score,
            label,
            confidence,
            significators,
        }
    }
}
