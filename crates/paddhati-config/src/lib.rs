use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use paddhati::bodies::{tracked_bodies, NodeKind};
use paddhati::chart::{parse_listing_time, ChartSettings, DEFAULT_LISTING_TIME};
use paddhati::ephemeris::{Ayanamsha, GeoLocation, HouseSystem};

const CONFIG_PATHS: [&str; 2] = ["configs/paddhati.toml", "../../configs/paddhati.toml"];

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ChartToml {
    pub house_system: String,
    pub ayanamsha: String,
    pub node: NodeKind,
    pub include_outer_planets: bool,
    pub ephemeris_timeout_ms: u64,
}

impl Default for ChartToml {
    fn default() -> Self {
        Self {
            house_system: HouseSystem::default().name().to_string(),
            ayanamsha: Ayanamsha::default().name().to_string(),
            node: NodeKind::default(),
            include_outer_planets: false,
            ephemeris_timeout_ms: 5_000,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct EphemerisToml {
    /// Directory of the Swiss Ephemeris data files
    pub path: Option<PathBuf>,
}

/// Where and when listings happen.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ExchangeToml {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub utc_offset_minutes: i32,
    pub listing_time: String,
}

impl Default for ExchangeToml {
    fn default() -> Self {
        // National Stock Exchange, Mumbai
        Self {
            name: "NSE".to_string(),
            latitude: 19.0750,
            longitude: 72.8777,
            utc_offset_minutes: 0,
            listing_time: DEFAULT_LISTING_TIME.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PaddhatiConfig {
    pub chart: ChartToml,
    pub ephemeris: EphemerisToml,
    pub exchange: ExchangeToml,
}

/// Try the common relative paths for `configs/paddhati.toml`.
pub fn read_config_text() -> anyhow::Result<String> {
    for p in &CONFIG_PATHS {
        if let Ok(c) = fs::read_to_string(p) {
            return Ok(c);
        }
    }
    anyhow::bail!("Could not load paddhati.toml from {:?}", CONFIG_PATHS);
}

pub fn parse_config(text: &str) -> anyhow::Result<PaddhatiConfig> {
    let config: PaddhatiConfig =
        toml::from_str(text).map_err(|e| anyhow::anyhow!("Failed to parse paddhati.toml: {e}"))?;
    config.validate()?;
    Ok(config)
}

/// Load from `path`, or from the default locations when `None`.
///
/// A missing file at the default locations yields the built-in defaults;
/// an explicit path that cannot be read is an error.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<PaddhatiConfig> {
    let text = match path {
        Some(p) => fs::read_to_string(p)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", p.display()))?,
        None => match read_config_text() {
            Ok(text) => text,
            Err(_) => return Ok(PaddhatiConfig::default()),
        },
    };
    parse_config(&text)
}

impl PaddhatiConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        self.chart.house_system.parse::<HouseSystem>()?;
        self.chart.ayanamsha.parse::<Ayanamsha>()?;
        if self.chart.ephemeris_timeout_ms == 0 {
            anyhow::bail!("chart.ephemeris_timeout_ms must be positive");
        }
        self.exchange_site()?;
        if self.exchange.utc_offset_minutes.abs() > 14 * 60 {
            anyhow::bail!(
                "exchange.utc_offset_minutes {} outside ±840",
                self.exchange.utc_offset_minutes
            );
        }
        parse_listing_time(&self.exchange.listing_time)?;
        Ok(())
    }

    pub fn chart_settings(&self) -> anyhow::Result<ChartSettings> {
        Ok(ChartSettings {
            house_system: self.chart.house_system.parse()?,
            ayanamsha: self.chart.ayanamsha.parse()?,
            bodies: tracked_bodies(self.chart.include_outer_planets),
            ephemeris_timeout: Duration::from_millis(self.chart.ephemeris_timeout_ms),
        })
    }

    pub fn exchange_site(&self) -> anyhow::Result<GeoLocation> {
        GeoLocation::new(self.exchange.latitude, self.exchange.longitude).map_err(|e| {
            anyhow::anyhow!("[exchange] {} coordinates rejected: {e}", self.exchange.name)
        })
    }
}
