pub mod calculator;
pub mod houses;
pub mod moment;

pub use calculator::{derive_ketu, ChartCalculator, ChartSettings};
pub use houses::{house_for_longitude, FALLBACK_HOUSE};
pub use moment::{parse_listing_time, Moment, DEFAULT_LISTING_TIME};

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::bodies::Body;
use crate::ephemeris::{Ayanamsha, BodyPosition, HouseCusps, HouseSystem};
use crate::error::ChartError;
use crate::time::JulianDay;

/// Sidereal chart of one moment. Never patched: recompute for a new one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StoredChart")]
pub struct BirthChart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    symbol: Option<String>,
    moment: Moment,
    julian_day: JulianDay,
    house_system: HouseSystem,
    ayanamsha: Ayanamsha,
    houses: HouseCusps,
    positions: BTreeMap<Body, BodyPosition>,
    house_of: BTreeMap<Body, u8>,
    /// Bodies whose house is the fallback default rather than a computed match
    #[serde(default)]
    unplaced: BTreeSet<Body>,
}

/// Serialized chart as read back; rebuilt through classification on load.
#[derive(Deserialize)]
struct StoredChart {
    #[serde(default)]
    symbol: Option<String>,
    moment: Moment,
    house_system: HouseSystem,
    ayanamsha: Ayanamsha,
    houses: HouseCusps,
    positions: BTreeMap<Body, BodyPosition>,
    house_of: BTreeMap<Body, u8>,
}

impl TryFrom<StoredChart> for BirthChart {
    type Error = ChartError;

    fn try_from(stored: StoredChart) -> Result<Self, Self::Error> {
        if let Some((key, p)) = stored.positions.iter().find(|(key, p)| **key != p.body) {
            return Err(ChartError::InvalidInput(format!(
                "stored position for {} is labelled {}",
                key, p.body
            )));
        }
        let mut chart = BirthChart::from_positions(
            stored.moment,
            stored.house_system,
            stored.ayanamsha,
            stored.houses,
            stored.positions.into_values(),
        )?;
        if chart.house_of != stored.house_of {
            return Err(ChartError::InvalidInput(
                "stored house placements disagree with the stored cusps".to_string(),
            ));
        }
        chart.symbol = stored.symbol;
        Ok(chart)
    }
}

impl BirthChart {
    /// Assemble a chart from already-resolved positions and cusps.
    ///
    /// Classification runs here, so a chart rebuilt from stored positions
    /// gets the same houses as a freshly computed one.
    pub fn from_positions(
        moment: Moment,
        house_system: HouseSystem,
        ayanamsha: Ayanamsha,
        houses: HouseCusps,
        positions: impl IntoIterator<Item = BodyPosition>,
    ) -> Result<Self, ChartError> {
        if !houses.is_well_formed() {
            return Err(ChartError::InvalidInput(
                "house cusps must be finite longitudes in [0, 360)".to_string(),
            ));
        }
        let positions: BTreeMap<Body, BodyPosition> =
            positions.into_iter().map(|p| (p.body, p)).collect();
        if let Some(bad) = positions.values().find(|p| !p.longitude.is_finite()) {
            return Err(ChartError::InvalidInput(format!(
                "{} has a non-finite longitude",
                bad.body
            )));
        }

        let (house_of, unplaced) = houses::classify_positions(&houses, &positions);
        Ok(Self {
            symbol: None,
            julian_day: moment.julian_day(),
            moment,
            house_system,
            ayanamsha,
            houses,
            positions,
            house_of,
            unplaced,
        })
    }

    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    pub fn symbol(&self) -> Option<&str> {
        self.symbol.as_deref()
    }

    pub fn moment(&self) -> &Moment {
        &self.moment
    }

    pub fn julian_day(&self) -> JulianDay {
        self.julian_day
    }

    pub fn house_system(&self) -> HouseSystem {
        self.house_system
    }

    pub fn ayanamsha(&self) -> Ayanamsha {
        self.ayanamsha
    }

    pub fn houses(&self) -> &HouseCusps {
        &self.houses
    }

    pub fn ascendant(&self) -> f64 {
        self.houses.ascendant
    }

    pub fn positions(&self) -> &BTreeMap<Body, BodyPosition> {
        &self.positions
    }

    pub fn position(&self, body: Body) -> Option<&BodyPosition> {
        self.positions.get(&body)
    }

    pub fn house_of(&self) -> &BTreeMap<Body, u8> {
        &self.house_of
    }

    pub fn unplaced(&self) -> &BTreeSet<Body> {
        &self.unplaced
    }

    pub fn occupants(&self, house: u8) -> BTreeSet<Body> {
        self.house_of
            .iter()
            .filter(|(_, h)| **h == house)
            .map(|(body, _)| *body)
            .collect()
    }
}
