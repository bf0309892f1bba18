//! KP (Krishnamurti Paddhati) chart engine.
//!
//! `chart` turns a listing moment into a sidereal [`BirthChart`],
//! `significators` reads house significators off it, and `scorer` folds
//! them into a descriptive score against a price series.

pub mod bodies;
pub mod chart;
pub mod ephemeris;
pub mod error;
pub mod nakshatra;
pub mod scorer;
pub mod significators;
pub mod tables;
pub mod time;

pub use bodies::{Body, NodeKind};
pub use chart::{BirthChart, ChartCalculator, ChartSettings, Moment};
pub use ephemeris::{Ayanamsha, Ephemeris, GeoLocation, HouseSystem, SwissEphemerisAdapter};
pub use error::{ChartError, EphemerisError, ErrorKind};
pub use scorer::{BacktestReport, Prediction, PricePoint, Scorer};
pub use significators::{all_house_significators, house_significators, HouseSignificators};
pub use time::JulianDay;
