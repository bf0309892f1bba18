use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::bodies::Body;
use crate::error::ChartError;
use crate::tables::normalize_degrees;
use crate::time::JulianDay;

/// Geographic location coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub lat: f64,
    pub lon: f64,
}

impl GeoLocation {
    /// Build a location, rejecting out-of-range or non-finite coordinates.
    pub fn new(lat: f64, lon: f64) -> Result<Self, ChartError> {
        let location = Self { lat, lon };
        location.validate()?;
        Ok(location)
    }

    pub fn validate(&self) -> Result<(), ChartError> {
        if !self.lat.is_finite() || !(-90.0..=90.0).contains(&self.lat) {
            return Err(ChartError::InvalidInput(format!(
                "latitude {} outside [-90, 90]",
                self.lat
            )));
        }
        if !self.lon.is_finite() || !(-180.0..=180.0).contains(&self.lon) {
            return Err(ChartError::InvalidInput(format!(
                "longitude {} outside [-180, 180]",
                self.lon
            )));
        }
        Ok(())
    }
}

/// Sidereal position of one body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyPosition {
    pub body: Body,
    /// Sidereal longitude in degrees (0-360)
    pub longitude: f64,
    /// Latitude in degrees
    pub latitude: f64,
    /// Distance in AU
    pub distance: f64,
    /// Speed in longitude (degrees per day)
    pub speed: f64,
}

impl BodyPosition {
    pub fn retrograde(&self) -> bool {
        self.speed < 0.0
    }
}

/// House cusps and angles in the sidereal frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HouseCusps {
    /// Cusp longitudes, index 0 is the leading edge of house 1
    pub cusps: [f64; 12],
    pub ascendant: f64,
    pub mc: f64,
}

impl HouseCusps {
    /// Normalizes every value into [0, 360).
    pub fn new(cusps: [f64; 12], ascendant: f64, mc: f64) -> Self {
        Self {
            cusps: cusps.map(normalize_degrees),
            ascendant: normalize_degrees(ascendant),
            mc: normalize_degrees(mc),
        }
    }

    /// Cusp of `house` (1-12).
    pub fn cusp(&self, house: u8) -> Option<f64> {
        if (1..=12).contains(&house) {
            Some(self.cusps[house as usize - 1])
        } else {
            None
        }
    }

    pub fn is_well_formed(&self) -> bool {
        self.cusps
            .iter()
            .chain([self.ascendant, self.mc].iter())
            .all(|c| c.is_finite() && (0.0..360.0).contains(c))
    }
}

/// House-division method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HouseSystem {
    #[default]
    Placidus,
    Koch,
    Equal,
    WholeSign,
    Regiomontanus,
    Campanus,
    Alcabitius,
    Morinus,
}

/// House system mapping
const HOUSE_SYSTEMS: &[(&str, HouseSystem, u8)] = &[
    ("placidus", HouseSystem::Placidus, b'P'),
    ("koch", HouseSystem::Koch, b'K'),
    ("equal", HouseSystem::Equal, b'E'),
    ("whole_sign", HouseSystem::WholeSign, b'W'),
    ("regiomontanus", HouseSystem::Regiomontanus, b'R'),
    ("campanus", HouseSystem::Campanus, b'C'),
    ("alcabitius", HouseSystem::Alcabitius, b'A'),
    ("morinus", HouseSystem::Morinus, b'M'),
];

impl HouseSystem {
    pub fn name(&self) -> &'static str {
        HOUSE_SYSTEMS
            .iter()
            .find(|(_, system, _)| system == self)
            .map(|(name, _, _)| *name)
            .unwrap_or("placidus")
    }

    /// Swiss Ephemeris house system code.
    pub fn code(&self) -> u8 {
        HOUSE_SYSTEMS
            .iter()
            .find(|(_, system, _)| system == self)
            .map(|(_, _, code)| *code)
            .unwrap_or(b'P')
    }
}

impl FromStr for HouseSystem {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        HOUSE_SYSTEMS
            .iter()
            .find(|(name, _, _)| *name == lower)
            .map(|(_, system, _)| *system)
            .ok_or_else(|| {
                ChartError::ConfigurationUnavailable(format!(
                    "Invalid house system: {}. Valid systems: {:?}",
                    s,
                    HOUSE_SYSTEMS.iter().map(|(name, _, _)| *name).collect::<Vec<_>>()
                ))
            })
    }
}

impl fmt::Display for HouseSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Sidereal reference frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ayanamsha {
    #[default]
    Krishnamurti,
    Lahiri,
    Raman,
    FaganBradley,
}

/// General precession in longitude, arcseconds per Julian year.
pub const PRECESSION_ARCSEC_PER_YEAR: f64 = 50.290966;

// (name, variant, reference epoch JD, ayanamsha at epoch in degrees)
// Epochs and values follow the Swiss Ephemeris ayanamsha table.
const AYANAMSHAS: &[(&str, Ayanamsha, f64, f64)] = &[
    ("krishnamurti", Ayanamsha::Krishnamurti, 2415020.0, 22.363889),
    ("lahiri", Ayanamsha::Lahiri, 2435553.5, 23.245524743),
    ("raman", Ayanamsha::Raman, 2415020.0, 21.014444),
    ("fagan_bradley", Ayanamsha::FaganBradley, 2433282.42346, 24.042044444),
];

impl Ayanamsha {
    pub fn name(&self) -> &'static str {
        self.entry().0
    }

    fn entry(&self) -> &'static (&'static str, Ayanamsha, f64, f64) {
        AYANAMSHAS
            .iter()
            .find(|(_, ayanamsha, _, _)| ayanamsha == self)
            .unwrap_or(&AYANAMSHAS[0])
    }

    /// Tropical minus sidereal longitude at `jd`, in degrees.
    ///
    /// Linear in time from the reference epoch. Good to a few arcseconds
    /// over the twentieth and twenty-first centuries.
    pub fn offset(&self, jd: JulianDay) -> f64 {
        let (_, _, epoch, value) = self.entry();
        value + jd.years_since(*epoch) * PRECESSION_ARCSEC_PER_YEAR / 3600.0
    }

    /// Shift a tropical longitude into this sidereal frame.
    pub fn to_sidereal(&self, tropical: f64, jd: JulianDay) -> f64 {
        normalize_degrees(tropical - self.offset(jd))
    }
}

impl FromStr for Ayanamsha {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        AYANAMSHAS
            .iter()
            .find(|(name, _, _, _)| *name == lower)
            .map(|(_, ayanamsha, _, _)| *ayanamsha)
            .ok_or_else(|| {
                ChartError::ConfigurationUnavailable(format!(
                    "Invalid ayanamsha: {}. Valid ayanamshas: {:?}",
                    s,
                    AYANAMSHAS.iter().map(|(name, _, _, _)| *name).collect::<Vec<_>>()
                ))
            })
    }
}

impl fmt::Display for Ayanamsha {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::time::J2000;

    #[test]
    fn test_geo_location_bounds() {
        assert!(GeoLocation::new(19.0750, 72.8777).is_ok());
        assert!(GeoLocation::new(90.0, -180.0).is_ok());
        assert_eq!(
            GeoLocation::new(91.0, 0.0).unwrap_err().kind(),
            ErrorKind::InvalidInput
        );
        assert!(GeoLocation::new(0.0, 180.5).is_err());
        assert!(GeoLocation::new(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn test_house_system_parse() {
        assert_eq!("placidus".parse::<HouseSystem>().unwrap(), HouseSystem::Placidus);
        assert_eq!("Whole_Sign".parse::<HouseSystem>().unwrap(), HouseSystem::WholeSign);
        assert_eq!(HouseSystem::Koch.code(), b'K');
        let err = "topocentric".parse::<HouseSystem>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigurationUnavailable);
    }

    #[test]
    fn test_ayanamsha_parse() {
        assert_eq!(
            "krishnamurti".parse::<Ayanamsha>().unwrap(),
            Ayanamsha::Krishnamurti
        );
        assert_eq!(Ayanamsha::FaganBradley.name(), "fagan_bradley");
        assert!("galactic".parse::<Ayanamsha>().is_err());
    }

    #[test]
    fn test_ayanamsha_offsets_at_j2000() {
        let jd = JulianDay::new(J2000);
        // KP ayanamsha is close to 23°45' around 2000
        let kp = Ayanamsha::Krishnamurti.offset(jd);
        assert!((kp - 23.76).abs() < 0.02, "kp = {}", kp);
        // Lahiri is close to 23°51' around 2000
        let lahiri = Ayanamsha::Lahiri.offset(jd);
        assert!((lahiri - 23.857).abs() < 0.02, "lahiri = {}", lahiri);
        assert!(lahiri > kp);
    }

    #[test]
    fn test_to_sidereal_wraps() {
        let jd = JulianDay::new(J2000);
        let sidereal = Ayanamsha::Krishnamurti.to_sidereal(10.0, jd);
        assert!(sidereal > 340.0 && sidereal < 360.0);
    }

    #[test]
    fn test_house_cusps_normalized() {
        let mut raw = [0.0; 12];
        for (i, c) in raw.iter_mut().enumerate() {
            *c = 350.0 + i as f64 * 30.0;
        }
        let cusps = HouseCusps::new(raw, 350.0, 620.0);
        assert!(cusps.is_well_formed());
        assert_eq!(cusps.cusp(1), Some(350.0));
        assert_eq!(cusps.cusp(2), Some(20.0));
        assert_eq!(cusps.cusp(13), None);
        assert_eq!(cusps.mc, 260.0);
    }
}
