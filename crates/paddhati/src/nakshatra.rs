//! Nakshatra placement of a longitude.
//!
//! Nakshatras are 27 lunar mansions, each spanning 13°20' (360/27 degrees).
//! Each nakshatra is divided into 4 padas (quarters).

use serde::{Deserialize, Serialize};

use crate::bodies::Body;
use crate::tables::{nakshatra_index, normalize_degrees, NAKSHATRAS, NAKSHATRA_SPAN, PADA_SPAN};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NakshatraRecord {
    pub id: String,
    pub name: String,
    pub lord: Body,
    pub start: f64,
    pub end: f64,
    pub index: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NakshatraPlacement {
    #[serde(flatten)]
    pub base: NakshatraRecord,
    pub longitude: f64,
    pub offset: f64,
    pub progress: f64,
    pub pada: u8,
}

fn build_nakshatra_table() -> Vec<NakshatraRecord> {
    NAKSHATRAS
        .iter()
        .enumerate()
        .map(|(idx, (slug, display_name, lord))| {
            let start = idx as f64 * NAKSHATRA_SPAN;
            NakshatraRecord {
                id: slug.to_string(),
                name: display_name.to_string(),
                lord: *lord,
                start,
                end: start + NAKSHATRA_SPAN,
                index: idx,
            }
        })
        .collect()
}

lazy_static::lazy_static! {
    static ref NAKSHATRA_TABLE: Vec<NakshatraRecord> = build_nakshatra_table();
}

/// Return the nakshatra containing the given longitude, with pada and progress.
pub fn nakshatra_for_longitude(longitude: f64) -> NakshatraPlacement {
    let lon = normalize_degrees(longitude);
    let entry = &NAKSHATRA_TABLE[nakshatra_index(lon)];

    let offset = (lon - entry.start).max(0.0);
    let pada = ((offset / PADA_SPAN) as u8 + 1).min(4);

    NakshatraPlacement {
        base: entry.clone(),
        longitude: lon,
        offset,
        progress: offset / NAKSHATRA_SPAN,
        pada,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nakshatra_for_longitude() {
        let meta = nakshatra_for_longitude(0.0);
        assert_eq!(meta.base.id, "ashwini");
        assert_eq!(meta.base.lord, Body::Ketu);
        assert_eq!(meta.pada, 1);

        let meta = nakshatra_for_longitude(13.33);
        assert_eq!(meta.base.id, "ashwini");
        assert_eq!(meta.pada, 4);
    }

    #[test]
    fn test_magha() {
        let meta = nakshatra_for_longitude(125.0);
        assert_eq!(meta.base.name, "Magha");
        assert_eq!(meta.base.index, 9);
        // 125 - 120 = 5 degrees in, second pada starts at 3°20'
        assert_eq!(meta.pada, 2);
        assert!((meta.progress - 0.375).abs() < 1e-9);
    }

    #[test]
    fn test_wraps_negative_longitude() {
        let meta = nakshatra_for_longitude(-1.0);
        assert_eq!(meta.base.id, "revati");
        assert!((meta.longitude - 359.0).abs() < 1e-9);
    }
}
