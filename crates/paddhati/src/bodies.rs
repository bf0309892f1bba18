//! Tracked bodies and their Swiss Ephemeris identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A body that can act as a significator.
///
/// The first nine variants are the canonical KP vocabulary. The outer
/// planets are optional extras: they can occupy houses but never rule a
/// sign, star or sub.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Body {
    Sun,
    Moon,
    Mars,
    Mercury,
    Jupiter,
    Venus,
    Saturn,
    Rahu,
    Ketu,
    Uranus,
    Neptune,
    Pluto,
}

/// Which lunar node the ephemeris is asked for when resolving Rahu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    #[default]
    Mean,
    True,
}

pub const CANONICAL_BODIES: [Body; 9] = [
    Body::Sun,
    Body::Moon,
    Body::Mars,
    Body::Mercury,
    Body::Jupiter,
    Body::Venus,
    Body::Saturn,
    Body::Rahu,
    Body::Ketu,
];

pub const OUTER_PLANETS: [Body; 3] = [Body::Uranus, Body::Neptune, Body::Pluto];

// Swiss Ephemeris planet numbers. Ketu has none: it is derived from Rahu.
const SWISS_IDS: &[(Body, u32)] = &[
    (Body::Sun, 0),
    (Body::Moon, 1),
    (Body::Mercury, 2),
    (Body::Venus, 3),
    (Body::Mars, 4),
    (Body::Jupiter, 5),
    (Body::Saturn, 6),
    (Body::Uranus, 7),
    (Body::Neptune, 8),
    (Body::Pluto, 9),
];

const SWISS_MEAN_NODE: u32 = 10;
const SWISS_TRUE_NODE: u32 = 11;

impl Body {
    pub fn name(&self) -> &'static str {
        match self {
            Body::Sun => "Sun",
            Body::Moon => "Moon",
            Body::Mars => "Mars",
            Body::Mercury => "Mercury",
            Body::Jupiter => "Jupiter",
            Body::Venus => "Venus",
            Body::Saturn => "Saturn",
            Body::Rahu => "Rahu",
            Body::Ketu => "Ketu",
            Body::Uranus => "Uranus",
            Body::Neptune => "Neptune",
            Body::Pluto => "Pluto",
        }
    }

    /// Case-insensitive lookup by name.
    pub fn from_name(name: &str) -> Option<Self> {
        let lower = name.to_lowercase();
        CANONICAL_BODIES
            .iter()
            .chain(OUTER_PLANETS.iter())
            .copied()
            .find(|body| body.name().to_lowercase() == lower)
    }

    /// Whether the body is observed rather than derived.
    pub fn is_queried(&self) -> bool {
        *self != Body::Ketu
    }

    /// Swiss Ephemeris identifier, `None` for the derived node.
    pub fn swiss_id(&self, node: NodeKind) -> Option<u32> {
        match self {
            Body::Ketu => None,
            Body::Rahu => Some(match node {
                NodeKind::Mean => SWISS_MEAN_NODE,
                NodeKind::True => SWISS_TRUE_NODE,
            }),
            other => SWISS_IDS
                .iter()
                .find(|(body, _)| body == other)
                .map(|(_, id)| *id),
        }
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Bodies tracked for a chart: the canonical nine, optionally with the outer planets.
pub fn tracked_bodies(include_outer_planets: bool) -> Vec<Body> {
    let mut bodies = CANONICAL_BODIES.to_vec();
    if include_outer_planets {
        bodies.extend_from_slice(&OUTER_PLANETS);
    }
    bodies
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swiss_ids() {
        assert_eq!(Body::Sun.swiss_id(NodeKind::Mean), Some(0));
        assert_eq!(Body::Mars.swiss_id(NodeKind::Mean), Some(4));
        assert_eq!(Body::Rahu.swiss_id(NodeKind::Mean), Some(10));
        assert_eq!(Body::Rahu.swiss_id(NodeKind::True), Some(11));
        assert_eq!(Body::Ketu.swiss_id(NodeKind::True), None);
    }

    #[test]
    fn test_from_name() {
        assert_eq!(Body::from_name("jupiter"), Some(Body::Jupiter));
        assert_eq!(Body::from_name("KETU"), Some(Body::Ketu));
        assert_eq!(Body::from_name("chiron"), None);
    }

    #[test]
    fn test_tracked_bodies() {
        assert_eq!(tracked_bodies(false).len(), 9);
        let all = tracked_bodies(true);
        assert_eq!(all.len(), 12);
        assert!(all.contains(&Body::Pluto));
    }

    #[test]
    fn test_serializes_by_name() {
        let json = serde_json::to_string(&Body::Rahu).unwrap();
        assert_eq!(json, "\"Rahu\"");
    }
}
