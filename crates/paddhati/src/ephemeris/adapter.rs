use std::env;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use swisseph::swe::{calc_ut, houses_ex, set_ephe_path};
use swisseph::{AscMc, Cusp};

use crate::bodies::{Body, NodeKind};
use crate::ephemeris::types::{Ayanamsha, BodyPosition, GeoLocation, HouseCusps, HouseSystem};
use crate::ephemeris::Ephemeris;
use crate::error::EphemerisError;
use crate::time::JulianDay;

pub const DEFAULT_EPHEMERIS_PATH: &str = "/usr/local/share/swisseph";

const FLG_SWIEPH: i32 = 2;
const FLG_MOSEPH: i32 = 4;
const FLG_NONUT: i32 = 64;
const FLG_SPEED: i32 = 256;

// Mean equinox of date, matching the mean ayanamsha subtracted afterwards.
// Sidereal shifting is done here, not by the library.
const CALC_FLAGS: u32 = (FLG_SWIEPH | FLG_SPEED | FLG_NONUT) as u32;
const HOUSE_FLAGS: i32 = FLG_NONUT;

// The C library keeps global state between calls.
static SWISS_LOCK: Mutex<()> = Mutex::new(());

/// Swiss Ephemeris adapter implementation
pub struct SwissEphemerisAdapter {
    ephemeris_path: PathBuf,
    node: NodeKind,
}

impl SwissEphemerisAdapter {
    /// Create a new adapter with optional ephemeris path
    pub fn new(ephemeris_path: Option<PathBuf>) -> Result<Self, EphemerisError> {
        let path = ephemeris_path.unwrap_or_else(|| {
            env::var("SWISS_EPHEMERIS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_EPHEMERIS_PATH))
        });

        if !path.exists() {
            return Err(EphemerisError::FileNotFound {
                path: path.display().to_string(),
                message: "Ephemeris path does not exist. Please ensure Swiss Ephemeris data files are installed.".to_string(),
            });
        }

        let path_text = path.to_str().ok_or_else(|| EphemerisError::FileNotFound {
            path: path.display().to_string(),
            message: "Ephemeris path is not valid UTF-8".to_string(),
        })?;
        {
            let _guard = SWISS_LOCK.lock().unwrap_or_else(|e| e.into_inner());
            set_ephe_path(path_text);
        }

        log::info!("Swiss Ephemeris data at {}", path.display());
        Ok(Self {
            ephemeris_path: path,
            node: NodeKind::default(),
        })
    }

    /// Choose the mean or true lunar node for Rahu.
    pub fn with_node(mut self, node: NodeKind) -> Self {
        self.node = node;
        self
    }
}

impl Ephemeris for SwissEphemerisAdapter {
    fn name(&self) -> &str {
        "swisseph"
    }

    fn position(
        &self,
        body: Body,
        jd: JulianDay,
        _site: GeoLocation,
        ayanamsha: Ayanamsha,
    ) -> Result<BodyPosition, EphemerisError> {
        let planet_code = body
            .swiss_id(self.node)
            .ok_or_else(|| EphemerisError::CalculationFailed {
                body,
                julian_day: jd.value(),
                message: format!("{} is derived, not observed", body),
            })?;

        let result = {
            let _guard = SWISS_LOCK.lock().unwrap_or_else(|e| e.into_inner());
            calc_ut(jd.value(), planet_code, CALC_FLAGS)
        }
        .map_err(|e| EphemerisError::CalculationFailed {
            body,
            julian_day: jd.value(),
            message: format!("Swiss Ephemeris error: {}", e),
        })?;

        check_data_source(result.code, &self.ephemeris_path)?;

        let out = result.out;
        if !out[0].is_finite() {
            return Err(EphemerisError::CalculationFailed {
                body,
                julian_day: jd.value(),
                message: "non-finite longitude".to_string(),
            });
        }

        Ok(BodyPosition {
            body,
            longitude: ayanamsha.to_sidereal(out[0], jd),
            latitude: out[1],
            distance: out[2],
            speed: out[3],
        })
    }

    fn house_cusps(
        &self,
        jd: JulianDay,
        site: GeoLocation,
        house_system: HouseSystem,
        ayanamsha: Ayanamsha,
    ) -> Result<HouseCusps, EphemerisError> {
        let (c, a) = {
            let _guard = SWISS_LOCK.lock().unwrap_or_else(|e| e.into_inner());
            houses_ex(
                jd.value(),
                HOUSE_FLAGS,
                site.lat,
                site.lon,
                house_system.code() as i32,
            )
        };
        let cusps = Cusp::from_array(c);
        let ascmc = AscMc::from_array(a);

        let tropical = [
            cusps.first, cusps.second, cusps.third, cusps.fourth,
            cusps.fifth, cusps.sixth, cusps.seventh, cusps.eighth,
            cusps.ninth, cusps.tenth, cusps.eleventh, cusps.twelfth,
        ];
        if tropical.iter().any(|c| !c.is_finite()) || !ascmc.ascendant.is_finite() {
            return Err(EphemerisError::HouseCalculationFailed {
                julian_day: jd.value(),
                message: format!(
                    "{} cusps undefined at latitude {}",
                    house_system, site.lat
                ),
            });
        }

        let shift = |lon: f64| ayanamsha.to_sidereal(lon, jd);
        Ok(HouseCusps::new(
            tropical.map(shift),
            shift(ascmc.ascendant),
            shift(ascmc.mc),
        ))
    }
}

/// The library silently drops to its analytic Moshier model when the data
/// files cannot be read; the returned flags say which source answered.
fn check_data_source(ret_flags: i32, path: &Path) -> Result<(), EphemerisError> {
    if ret_flags & FLG_MOSEPH != 0 && ret_flags & FLG_SWIEPH == 0 {
        return Err(EphemerisError::FileNotFound {
            path: path.display().to_string(),
            message: "no Swiss Ephemeris data files readable here; the library fell back to Moshier".to_string(),
        });
    }
    Ok(())
}
