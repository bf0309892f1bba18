//! House membership of a longitude.

use std::collections::{BTreeMap, BTreeSet};

use crate::bodies::Body;
use crate::ephemeris::{BodyPosition, HouseCusps};
use crate::tables::normalize_degrees;

/// House assumed when no cusp interval contains a longitude.
pub const FALLBACK_HOUSE: u8 = 1;

/// First house `i` (1-12) with `cusp[i] <= lon < cusp[i+1]`, wrapping when
/// the next cusp is smaller. `None` when no interval matches.
pub fn house_for_longitude(cusps: &HouseCusps, longitude: f64) -> Option<u8> {
    let lon = normalize_degrees(longitude);
    for i in 0..12 {
        let start = cusps.cusps[i];
        let end = cusps.cusps[(i + 1) % 12];
        let inside = if end < start {
            lon >= start || lon < end
        } else {
            start <= lon && lon < end
        };
        if inside {
            return Some(i as u8 + 1);
        }
    }
    None
}

/// Classify every body. Bodies that match no interval land in
/// [`FALLBACK_HOUSE`] and are reported in the returned set.
pub fn classify_positions(
    cusps: &HouseCusps,
    positions: &BTreeMap<Body, BodyPosition>,
) -> (BTreeMap<Body, u8>, BTreeSet<Body>) {
    let mut house_of = BTreeMap::new();
    let mut unplaced = BTreeSet::new();

    for (body, position) in positions {
        let house = match house_for_longitude(cusps, position.longitude) {
            Some(house) => house,
            None => {
                log::warn!(
                    "{} at {:.4}° matched no house cusp interval; defaulting to house {}",
                    body,
                    position.longitude,
                    FALLBACK_HOUSE
                );
                unplaced.insert(*body);
                FALLBACK_HOUSE
            }
        };
        house_of.insert(*body, house);
    }

    (house_of, unplaced)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn equal_cusps(start: f64) -> HouseCusps {
        let mut cusps = [0.0; 12];
        for (i, c) in cusps.iter_mut().enumerate() {
            *c = start + i as f64 * 30.0;
        }
        HouseCusps::new(cusps, start, start + 270.0)
    }

    #[test]
    fn test_house_for_longitude_aligned() {
        let cusps = equal_cusps(0.0);
        assert_eq!(house_for_longitude(&cusps, 0.0), Some(1));
        assert_eq!(house_for_longitude(&cusps, 29.999), Some(1));
        assert_eq!(house_for_longitude(&cusps, 30.0), Some(2));
        assert_eq!(house_for_longitude(&cusps, 359.0), Some(12));
    }

    #[test]
    fn test_house_for_longitude_wraps() {
        // House 1 runs 350° -> 20°, across the 0° point
        let cusps = equal_cusps(350.0);
        assert_eq!(house_for_longitude(&cusps, 355.0), Some(1));
        assert_eq!(house_for_longitude(&cusps, 5.0), Some(1));
        assert_eq!(house_for_longitude(&cusps, 20.0), Some(2));
        assert_eq!(house_for_longitude(&cusps, 349.0), Some(12));
        assert_eq!(house_for_longitude(&cusps, 365.0), Some(1));
    }

    #[test]
    fn test_unequal_cusps() {
        let cusps = HouseCusps::new(
            [
                100.0, 128.0, 157.0, 190.0, 225.0, 255.0, 280.0, 308.0, 337.0, 10.0, 45.0, 75.0,
            ],
            100.0,
            10.0,
        );
        assert_eq!(house_for_longitude(&cusps, 127.9), Some(1));
        assert_eq!(house_for_longitude(&cusps, 0.0), Some(9));
        assert_eq!(house_for_longitude(&cusps, 9.99), Some(9));
        assert_eq!(house_for_longitude(&cusps, 10.0), Some(10));
        assert_eq!(house_for_longitude(&cusps, 99.0), Some(12));
    }

    #[test]
    fn test_degenerate_cusps_fall_back() {
        let cusps = HouseCusps::new([42.0; 12], 42.0, 42.0);
        assert_eq!(house_for_longitude(&cusps, 10.0), None);

        let mut positions = BTreeMap::new();
        positions.insert(
            Body::Sun,
            BodyPosition {
                body: Body::Sun,
                longitude: 10.0,
                latitude: 0.0,
                distance: 1.0,
                speed: 1.0,
            },
        );
        let (house_of, unplaced) = classify_positions(&cusps, &positions);
        assert_eq!(house_of[&Body::Sun], FALLBACK_HOUSE);
        assert!(unplaced.contains(&Body::Sun));
    }
}
