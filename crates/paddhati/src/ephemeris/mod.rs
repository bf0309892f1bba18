pub mod adapter;
pub mod types;

pub use adapter::SwissEphemerisAdapter;
pub use types::{Ayanamsha, BodyPosition, GeoLocation, HouseCusps, HouseSystem};

use crate::bodies::Body;
use crate::error::EphemerisError;
use crate::time::JulianDay;

/// Planetary-position oracle consulted by the chart calculator.
///
/// Every call is blocking and independent of the others. Longitudes come
/// back already in the requested sidereal frame.
pub trait Ephemeris: Send + Sync {
    fn name(&self) -> &str;

    fn position(
        &self,
        body: Body,
        jd: JulianDay,
        site: GeoLocation,
        ayanamsha: Ayanamsha,
    ) -> Result<BodyPosition, EphemerisError>;

    fn house_cusps(
        &self,
        jd: JulianDay,
        site: GeoLocation,
        house_system: HouseSystem,
        ayanamsha: Ayanamsha,
    ) -> Result<HouseCusps, EphemerisError>;

    fn supports_house_system(&self, _house_system: HouseSystem) -> bool {
        true
    }

    fn supports_ayanamsha(&self, _ayanamsha: Ayanamsha) -> bool {
        true
    }
}
