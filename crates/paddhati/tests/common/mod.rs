#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use paddhati::bodies::Body;
use paddhati::ephemeris::{Ayanamsha, BodyPosition, Ephemeris, GeoLocation, HouseCusps, HouseSystem};
use paddhati::error::EphemerisError;
use paddhati::time::{JulianDay, J2000};

// Unequal house widths, offsets from the ascendant
const CUSP_OFFSETS: [f64; 12] = [
    0.0, 28.0, 57.0, 90.0, 125.0, 155.0, 180.0, 208.0, 237.0, 270.0, 305.0, 335.0,
];

/// Deterministic oracle: each body moves linearly from a J2000 longitude.
#[derive(Default)]
pub struct FixedEphemeris {
    pub calls: AtomicUsize,
}

impl FixedEphemeris {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

fn base(body: Body) -> (f64, f64) {
    match body {
        Body::Sun => (256.5, 0.9856),
        Body::Moon => (199.0, 13.176),
        Body::Mars => (327.9, 0.524),
        Body::Mercury => (247.3, 1.38),
        Body::Jupiter => (1.9, 0.083),
        Body::Venus => (218.0, 1.2),
        Body::Saturn => (16.4, 0.0335),
        Body::Rahu => (101.4, -0.0529),
        Body::Ketu => (281.4, -0.0529),
        Body::Uranus => (290.8, 0.0117),
        Body::Neptune => (279.9, 0.006),
        Body::Pluto => (227.7, 0.004),
    }
}

pub fn wrap(value: f64) -> f64 {
    value.rem_euclid(360.0)
}

impl Ephemeris for FixedEphemeris {
    fn name(&self) -> &str {
        "fixed"
    }

    fn position(
        &self,
        body: Body,
        jd: JulianDay,
        _site: GeoLocation,
        _ayanamsha: Ayanamsha,
    ) -> Result<BodyPosition, EphemerisError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let (lon0, speed) = base(body);
        Ok(BodyPosition {
            body,
            longitude: wrap(lon0 + speed * (jd.value() - J2000)),
            latitude: 0.5,
            distance: 1.0,
            speed,
        })
    }

    fn house_cusps(
        &self,
        jd: JulianDay,
        site: GeoLocation,
        _house_system: HouseSystem,
        _ayanamsha: Ayanamsha,
    ) -> Result<HouseCusps, EphemerisError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let asc = wrap(jd.value().fract() * 360.0 + site.lon);
        Ok(HouseCusps::new(
            CUSP_OFFSETS.map(|offset| asc + offset),
            asc,
            asc + 270.0,
        ))
    }
}

/// Fails for one body, answers normally otherwise.
pub struct FailingEphemeris {
    pub failing: Body,
    pub inner: FixedEphemeris,
}

impl Ephemeris for FailingEphemeris {
    fn name(&self) -> &str {
        "failing"
    }

    fn position(
        &self,
        body: Body,
        jd: JulianDay,
        site: GeoLocation,
        ayanamsha: Ayanamsha,
    ) -> Result<BodyPosition, EphemerisError> {
        if body == self.failing {
            return Err(EphemerisError::CalculationFailed {
                body,
                julian_day: jd.value(),
                message: "ephemeris file missing".to_string(),
            });
        }
        self.inner.position(body, jd, site, ayanamsha)
    }

    fn house_cusps(
        &self,
        jd: JulianDay,
        site: GeoLocation,
        house_system: HouseSystem,
        ayanamsha: Ayanamsha,
    ) -> Result<HouseCusps, EphemerisError> {
        self.inner.house_cusps(jd, site, house_system, ayanamsha)
    }
}

/// Blocks every house query far longer than any test timeout.
#[derive(Default)]
pub struct SlowEphemeris {
    pub inner: FixedEphemeris,
}

impl Ephemeris for SlowEphemeris {
    fn name(&self) -> &str {
        "slow"
    }

    fn position(
        &self,
        body: Body,
        jd: JulianDay,
        site: GeoLocation,
        ayanamsha: Ayanamsha,
    ) -> Result<BodyPosition, EphemerisError> {
        self.inner.position(body, jd, site, ayanamsha)
    }

    fn house_cusps(
        &self,
        jd: JulianDay,
        site: GeoLocation,
        house_system: HouseSystem,
        ayanamsha: Ayanamsha,
    ) -> Result<HouseCusps, EphemerisError> {
        std::thread::sleep(Duration::from_millis(500));
        self.inner.house_cusps(jd, site, house_system, ayanamsha)
    }
}

/// Only knows Placidus in the Krishnamurti frame.
#[derive(Default)]
pub struct NarrowEphemeris {
    pub inner: FixedEphemeris,
}

impl Ephemeris for NarrowEphemeris {
    fn name(&self) -> &str {
        "narrow"
    }

    fn position(
        &self,
        body: Body,
        jd: JulianDay,
        site: GeoLocation,
        ayanamsha: Ayanamsha,
    ) -> Result<BodyPosition, EphemerisError> {
        self.inner.position(body, jd, site, ayanamsha)
    }

    fn house_cusps(
        &self,
        jd: JulianDay,
        site: GeoLocation,
        house_system: HouseSystem,
        ayanamsha: Ayanamsha,
    ) -> Result<HouseCusps, EphemerisError> {
        self.inner.house_cusps(jd, site, house_system, ayanamsha)
    }

    fn supports_house_system(&self, house_system: HouseSystem) -> bool {
        house_system == HouseSystem::Placidus
    }

    fn supports_ayanamsha(&self, ayanamsha: Ayanamsha) -> bool {
        ayanamsha == Ayanamsha::Krishnamurti
    }
}

pub fn mumbai() -> GeoLocation {
    GeoLocation { lat: 19.0750, lon: 72.8777 }
}
