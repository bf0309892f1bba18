//! Moment -> BirthChart.
//!
//! Per-body ephemeris queries fan out onto the blocking pool, each under
//! its own timeout, and the chart is only assembled once every query has
//! answered. One failure fails the whole chart.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinSet;

use crate::bodies::{tracked_bodies, Body};
use crate::chart::{BirthChart, Moment};
use crate::ephemeris::{Ayanamsha, BodyPosition, Ephemeris, HouseCusps, HouseSystem};
use crate::error::{ChartError, EphemerisError};
use crate::tables::normalize_degrees;

pub const DEFAULT_EPHEMERIS_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSettings {
    pub house_system: HouseSystem,
    pub ayanamsha: Ayanamsha,
    /// Bodies placed in the chart. Ketu requires Rahu.
    pub bodies: Vec<Body>,
    pub ephemeris_timeout: Duration,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            house_system: HouseSystem::Placidus,
            ayanamsha: Ayanamsha::Krishnamurti,
            bodies: tracked_bodies(false),
            ephemeris_timeout: DEFAULT_EPHEMERIS_TIMEOUT,
        }
    }
}

impl ChartSettings {
    fn validate(&self) -> Result<(), ChartError> {
        if self.bodies.is_empty() {
            return Err(ChartError::InvalidInput("no bodies to place".to_string()));
        }
        if self.bodies.contains(&Body::Ketu) && !self.bodies.contains(&Body::Rahu) {
            return Err(ChartError::InvalidInput(
                "Ketu is derived from Rahu; track Rahu as well".to_string(),
            ));
        }
        if self.ephemeris_timeout.is_zero() {
            return Err(ChartError::InvalidInput(
                "ephemeris timeout must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Ketu sits exactly opposite Rahu and moves with it.
pub fn derive_ketu(rahu: &BodyPosition) -> BodyPosition {
    BodyPosition {
        body: Body::Ketu,
        longitude: normalize_degrees(rahu.longitude + 180.0),
        latitude: 0.0,
        distance: 0.0,
        speed: rahu.speed,
    }
}

enum Answer {
    Body(BodyPosition),
    Houses(HouseCusps),
}

pub struct ChartCalculator {
    ephemeris: Arc<dyn Ephemeris>,
    settings: ChartSettings,
}

impl ChartCalculator {
    pub fn new(ephemeris: Arc<dyn Ephemeris>, settings: ChartSettings) -> Self {
        Self { ephemeris, settings }
    }

    pub fn settings(&self) -> &ChartSettings {
        &self.settings
    }

    /// Compute the chart for `moment`.
    ///
    /// Input and configuration are checked before the ephemeris is touched.
    pub async fn compute_chart(&self, moment: &Moment) -> Result<BirthChart, ChartError> {
        self.settings.validate()?;
        moment.site().validate()?;
        let jd = moment.julian_day();
        if !jd.value().is_finite() {
            return Err(ChartError::InvalidInput(format!(
                "moment {} has no finite Julian Day",
                moment.local()
            )));
        }

        let ChartSettings {
            house_system,
            ayanamsha,
            ref bodies,
            ephemeris_timeout,
        } = self.settings;
        if !self.ephemeris.supports_house_system(house_system) {
            return Err(ChartError::ConfigurationUnavailable(format!(
                "house system {} not supported by {}",
                house_system,
                self.ephemeris.name()
            )));
        }
        if !self.ephemeris.supports_ayanamsha(ayanamsha) {
            return Err(ChartError::ConfigurationUnavailable(format!(
                "ayanamsha {} not supported by {}",
                ayanamsha,
                self.ephemeris.name()
            )));
        }

        let site = moment.site();
        let mut tasks: JoinSet<Result<Answer, EphemerisError>> = JoinSet::new();

        for body in bodies.iter().copied().filter(Body::is_queried) {
            let ephemeris = Arc::clone(&self.ephemeris);
            tasks.spawn(bounded(body.name().to_string(), ephemeris_timeout, move || {
                ephemeris.position(body, jd, site, ayanamsha).map(|p| {
                    // answers are keyed by what was asked for
                    Answer::Body(BodyPosition { body, ..p })
                })
            }));
        }
        let ephemeris = Arc::clone(&self.ephemeris);
        tasks.spawn(bounded("house cusps".to_string(), ephemeris_timeout, move || {
            ephemeris
                .house_cusps(jd, site, house_system, ayanamsha)
                .map(Answer::Houses)
        }));

        let mut positions = Vec::with_capacity(bodies.len());
        let mut houses = None;
        while let Some(joined) = tasks.join_next().await {
            let answer = joined.map_err(|e| EphemerisError::TaskFailed {
                target: "ephemeris query".to_string(),
                message: e.to_string(),
            })??;
            match answer {
                Answer::Body(position) => {
                    log::debug!(
                        "{} at JD {:.5}: {:.4}°",
                        position.body,
                        jd.value(),
                        position.longitude
                    );
                    positions.push(position);
                }
                Answer::Houses(cusps) => houses = Some(cusps),
            }
        }
        let houses = houses.ok_or_else(|| EphemerisError::HouseCalculationFailed {
            julian_day: jd.value(),
            message: "no house cusps returned".to_string(),
        })?;

        if bodies.contains(&Body::Ketu) {
            let rahu = positions
                .iter()
                .find(|p| p.body == Body::Rahu)
                .ok_or_else(|| EphemerisError::CalculationFailed {
                    body: Body::Rahu,
                    julian_day: jd.value(),
                    message: "Rahu missing, cannot derive Ketu".to_string(),
                })?;
            let ketu = derive_ketu(rahu);
            positions.push(ketu);
        }

        let chart = BirthChart::from_positions(*moment, house_system, ayanamsha, houses, positions)?;
        log::debug!(
            "chart at JD {:.5}: asc {:.4}°, {} bodies, {} unplaced",
            jd.value(),
            chart.ascendant(),
            chart.positions().len(),
            chart.unplaced().len()
        );
        Ok(chart)
    }
}

/// Run one blocking ephemeris query on the blocking pool under `limit`.
async fn bounded<F>(target: String, limit: Duration, query: F) -> Result<Answer, EphemerisError>
where
    F: FnOnce() -> Result<Answer, EphemerisError> + Send + 'static,
{
    match tokio::time::timeout(limit, tokio::task::spawn_blocking(query)).await {
        Ok(Ok(answer)) => answer,
        Ok(Err(join_error)) => Err(EphemerisError::TaskFailed {
            target,
            message: join_error.to_string(),
        }),
        Err(_) => Err(EphemerisError::Timeout {
            target,
            timeout: limit,
        }),
    }
}
