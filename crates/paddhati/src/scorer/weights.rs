//! Static per-body influence weights.
//!
//! Benefics carry positive weight, malefics negative. The magnitudes are
//! configuration with no empirical derivation behind them.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::bodies::Body;

pub const DEFAULT_WEIGHTS: &[(Body, f64)] = &[
    (Body::Jupiter, 0.9),
    (Body::Venus, 0.8),
    (Body::Mercury, 0.6),
    (Body::Moon, 0.5),
    (Body::Sun, 0.3),
    (Body::Ketu, -0.5),
    (Body::Mars, -0.6),
    (Body::Rahu, -0.7),
    (Body::Saturn, -0.8),
    (Body::Uranus, 0.0),
    (Body::Neptune, 0.0),
    (Body::Pluto, 0.0),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightTable {
    weights: BTreeMap<Body, f64>,
}

impl Default for WeightTable {
    fn default() -> Self {
        Self::from_pairs(DEFAULT_WEIGHTS.iter().copied())
    }
}

impl WeightTable {
    pub fn from_pairs(pairs: impl IntoIterator<Item = (Body, f64)>) -> Self {
        Self {
            weights: pairs.into_iter().collect(),
        }
    }

    /// Weight of `body`; bodies missing from the table weigh nothing.
    pub fn weight(&self, body: Body) -> f64 {
        self.weights.get(&body).copied().unwrap_or(0.0)
    }

    pub fn score(&self, bodies: &BTreeSet<Body>) -> f64 {
        bodies.iter().map(|body| self.weight(*body)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights() {
        let table = WeightTable::default();
        assert_eq!(table.weight(Body::Jupiter), 0.9);
        assert_eq!(table.weight(Body::Saturn), -0.8);
        assert_eq!(table.weight(Body::Pluto), 0.0);
    }

    #[test]
    fn test_score_sums_set() {
        let table = WeightTable::default();
        let bodies = BTreeSet::from([Body::Jupiter, Body::Venus]);
        assert!((table.score(&bodies) - 1.7).abs() < 1e-12);
        assert_eq!(table.score(&BTreeSet::new()), 0.0);
    }

    #[test]
    fn test_missing_bodies_weigh_nothing() {
        let table = WeightTable::from_pairs([(Body::Sun, 1.0)]);
        assert_eq!(table.weight(Body::Moon), 0.0);
    }
}
