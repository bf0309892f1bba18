//! Descriptive scoring of house significators against prices.
//!
//! A deterministic weighted sum, nothing more. The backtest accuracy is a
//! replay statistic, not a validated predictive metric.

pub mod backtest;
pub mod prediction;
pub mod weights;

pub use backtest::{BacktestReport, DayRecord, PricePoint, MIN_BACKTEST_POINTS};
pub use prediction::{Bands, ConfidenceTier, Prediction, PredictionLabel};
pub use weights::{WeightTable, DEFAULT_WEIGHTS};

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::bodies::Body;
use crate::significators::HouseSignificators;

/// Houses read for wealth and gains.
pub const WEALTH_HOUSES: [u8; 2] = [2, 11];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    /// Zero counts as up.
    pub fn of(value: f64) -> Self {
        if value >= 0.0 {
            Direction::Up
        } else {
            Direction::Down
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Scorer {
    weights: WeightTable,
    bands: Bands,
}

impl Scorer {
    pub fn new(weights: WeightTable, bands: Bands) -> Self {
        Self { weights, bands }
    }

    pub fn weights(&self) -> &WeightTable {
        &self.weights
    }

    pub fn bands(&self) -> &Bands {
        &self.bands
    }

    /// Union of the significators of several houses.
    pub fn combined_significators(houses: &[&HouseSignificators]) -> BTreeSet<Body> {
        houses.iter().flat_map(|h| h.all.iter().copied()).collect()
    }

    /// Pick out the 2nd and 11th house from a full set.
    pub fn wealth_houses(all: &[HouseSignificators]) -> Vec<&HouseSignificators> {
        all.iter()
            .filter(|h| WEALTH_HOUSES.contains(&h.house))
            .collect()
    }

    pub fn astro_score(&self, houses: &[&HouseSignificators]) -> f64 {
        self.weights.score(&Self::combined_significators(houses))
    }
}
