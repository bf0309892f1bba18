//! KP significators of a house.
//!
//! Each house is signified by the lord of the sign on its cusp, the lord of
//! the nakshatra on its cusp, the sub lord of the cusp, and every body
//! sitting in the house.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::bodies::Body;
use crate::chart::BirthChart;
use crate::error::ChartError;
use crate::nakshatra::nakshatra_for_longitude;
use crate::tables;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseSignificators {
    pub house: u8,
    pub cusp_longitude: f64,
    pub cusp_sign: String,
    pub cusp_nakshatra: String,
    /// Quarter (1-4) of the cusp's nakshatra
    pub cusp_pada: u8,
    /// Fraction of the cusp's nakshatra already traversed
    pub cusp_progress: f64,
    pub sign_lord: Body,
    pub star_lord: Body,
    pub sub_lord: Body,
    pub occupants: BTreeSet<Body>,
    /// Union of the three lords and the occupants
    pub all: BTreeSet<Body>,
}

/// Significators of `house` (1-12).
pub fn house_significators(chart: &BirthChart, house: u8) -> Result<HouseSignificators, ChartError> {
    let cusp = chart.houses().cusp(house).ok_or_else(|| {
        ChartError::InvalidInput(format!("house number {} outside 1-12", house))
    })?;
    if !cusp.is_finite() {
        return Err(ChartError::InvalidInput(format!(
            "chart has no usable cusp for house {}",
            house
        )));
    }

    let sign_lord = tables::sign_lord(cusp);
    let star_lord = tables::star_lord(cusp);
    let sub_lord = tables::sub_lord(cusp);
    let occupants = chart.occupants(house);
    let placement = nakshatra_for_longitude(cusp);

    let mut all: BTreeSet<Body> = occupants.iter().copied().collect();
    all.extend([sign_lord, star_lord, sub_lord]);

    Ok(HouseSignificators {
        house,
        cusp_longitude: cusp,
        cusp_sign: tables::sign_name(cusp).to_string(),
        cusp_nakshatra: placement.base.name,
        cusp_pada: placement.pada,
        cusp_progress: placement.progress,
        sign_lord,
        star_lord,
        sub_lord,
        occupants,
        all,
    })
}

/// Significators for houses 1 through 12, in order.
pub fn all_house_significators(chart: &BirthChart) -> Result<Vec<HouseSignificators>, ChartError> {
    (1..=12).map(|house| house_significators(chart, house)).collect()
}
