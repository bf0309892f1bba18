//! Fixed zodiacal lookup tables.
//!
//! Sign rulerships, the 27 nakshatras and the Vimshottari cycle of nine
//! lords. None of these change at runtime.

use crate::bodies::Body;

pub const SIGN_SPAN: f64 = 30.0;
pub const NAKSHATRA_SPAN: f64 = 360.0 / 27.0;
pub const PADA_SPAN: f64 = NAKSHATRA_SPAN / 4.0;

// (slug, display_name, ruler)
pub const SIGNS: [(&str, &str, Body); 12] = [
    ("aries", "Aries", Body::Mars),
    ("taurus", "Taurus", Body::Venus),
    ("gemini", "Gemini", Body::Mercury),
    ("cancer", "Cancer", Body::Moon),
    ("leo", "Leo", Body::Sun),
    ("virgo", "Virgo", Body::Mercury),
    ("libra", "Libra", Body::Venus),
    ("scorpio", "Scorpio", Body::Mars),
    ("sagittarius", "Sagittarius", Body::Jupiter),
    ("capricorn", "Capricorn", Body::Saturn),
    ("aquarius", "Aquarius", Body::Saturn),
    ("pisces", "Pisces", Body::Jupiter),
];

/// Lords in Vimshottari order. Used directly for the sub lord.
pub const VIMSHOTTARI_CYCLE: [Body; 9] = [
    Body::Ketu,
    Body::Venus,
    Body::Sun,
    Body::Moon,
    Body::Mars,
    Body::Rahu,
    Body::Jupiter,
    Body::Saturn,
    Body::Mercury,
];

// (slug, display_name, lord)
pub const NAKSHATRAS: [(&str, &str, Body); 27] = [
    ("ashwini", "Ashwini", Body::Ketu),
    ("bharani", "Bharani", Body::Venus),
    ("krittika", "Krittika", Body::Sun),
    ("rohini", "Rohini", Body::Moon),
    ("mrigashira", "Mrigashira", Body::Mars),
    ("ardra", "Ardra", Body::Rahu),
    ("punarvasu", "Punarvasu", Body::Jupiter),
    ("pushya", "Pushya", Body::Saturn),
    ("ashlesha", "Ashlesha", Body::Mercury),
    ("magha", "Magha", Body::Ketu),
    ("purva_phalguni", "Purva Phalguni", Body::Venus),
    ("uttara_phalguni", "Uttara Phalguni", Body::Sun),
    ("hasta", "Hasta", Body::Moon),
    ("chitra", "Chitra", Body::Mars),
    ("swati", "Swati", Body::Rahu),
    ("vishakha", "Vishakha", Body::Jupiter),
    ("anuradha", "Anuradha", Body::Saturn),
    ("jyeshtha", "Jyeshtha", Body::Mercury),
    ("mula", "Mula", Body::Ketu),
    ("purva_ashadha", "Purva Ashadha", Body::Venus),
    ("uttara_ashadha", "Uttara Ashadha", Body::Sun),
    ("shravana", "Shravana", Body::Moon),
    ("dhanishta", "Dhanishta", Body::Mars),
    ("shatabhisha", "Shatabhisha", Body::Rahu),
    ("purva_bhadrapada", "Purva Bhadrapada", Body::Jupiter),
    ("uttara_bhadrapada", "Uttara Bhadrapada", Body::Saturn),
    ("revati", "Revati", Body::Mercury),
];

/// Normalize degrees to [0, 360).
pub fn normalize_degrees(value: f64) -> f64 {
    let normalized = value.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if normalized >= 360.0 {
        0.0
    } else {
        normalized
    }
}

/// Sign index (0-11) of a longitude.
pub fn sign_index(longitude: f64) -> usize {
    (normalize_degrees(longitude) / SIGN_SPAN) as usize % SIGNS.len()
}

/// Nakshatra index (0-26) of a longitude.
pub fn nakshatra_index(longitude: f64) -> usize {
    (normalize_degrees(longitude) / NAKSHATRA_SPAN) as usize % NAKSHATRAS.len()
}

pub fn sign_lord(longitude: f64) -> Body {
    SIGNS[sign_index(longitude)].2
}

/// Star lord through the 27-slot nakshatra table.
pub fn star_lord(longitude: f64) -> Body {
    NAKSHATRAS[nakshatra_index(longitude)].2
}

/// Sub lord through the 9-body cycle, indexed by nakshatra ordinal mod 9.
///
/// Deliberately not routed through [`star_lord`]: the two lookups use
/// different tables and moduli.
pub fn sub_lord(longitude: f64) -> Body {
    let ordinal = (normalize_degrees(longitude) / NAKSHATRA_SPAN) as usize;
    VIMSHOTTARI_CYCLE[ordinal % VIMSHOTTARI_CYCLE.len()]
}

pub fn sign_name(longitude: f64) -> &'static str {
    SIGNS[sign_index(longitude)].1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(normalize_degrees(0.0), 0.0);
        assert_eq!(normalize_degrees(360.0), 0.0);
        assert_eq!(normalize_degrees(720.0), 0.0);
        assert_eq!(normalize_degrees(-10.0), 350.0);
        assert_eq!(normalize_degrees(370.0), 10.0);
        assert!(normalize_degrees(-1e-18) < 360.0);
    }

    #[test]
    fn test_nakshatra_lords_repeat_the_cycle() {
        for (idx, (_, _, lord)) in NAKSHATRAS.iter().enumerate() {
            assert_eq!(*lord, VIMSHOTTARI_CYCLE[idx % 9], "nakshatra {}", idx);
        }
    }

    #[test]
    fn test_sign_lords() {
        assert_eq!(sign_lord(0.0), Body::Mars);
        assert_eq!(sign_lord(95.0), Body::Moon);
        assert_eq!(sign_lord(125.0), Body::Sun);
        assert_eq!(sign_lord(225.0), Body::Mars);
        assert_eq!(sign_lord(359.9), Body::Jupiter);
    }

    #[test]
    fn test_leo_125_degrees() {
        assert_eq!(sign_name(125.0), "Leo");
        assert_eq!(nakshatra_index(125.0), 9);
        assert_eq!(NAKSHATRAS[nakshatra_index(125.0)].0, "magha");
        assert_eq!(star_lord(125.0), Body::Ketu);
        assert_eq!(sub_lord(125.0), Body::Ketu);
    }

    #[test]
    fn test_nakshatra_boundaries() {
        assert_eq!(nakshatra_index(13.33), 0);
        assert_eq!(nakshatra_index(NAKSHATRA_SPAN), 1);
        assert_eq!(nakshatra_index(359.99), 26);
        assert_eq!(star_lord(359.99), Body::Mercury);
    }
}
