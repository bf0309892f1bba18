use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ChartError;
use crate::scorer::{Direction, Scorer};
use crate::significators::HouseSignificators;

/// Shortest price series a backtest accepts.
pub const MIN_BACKTEST_POINTS: usize = 10;

/// One daily close, oldest first in a series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub time: NaiveDate,
    pub close: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayRecord {
    pub date: NaiveDate,
    pub close: f64,
    pub change_percent: f64,
    pub predicted: Direction,
    pub actual: Direction,
    pub matched: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestReport {
    /// Percentage of matching days, rounded to two decimals
    pub accuracy: f64,
    pub days: usize,
    pub matches: usize,
    pub astro_score: f64,
    pub records: Vec<DayRecord>,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

impl Scorer {
    /// Replay the astro score against `prices` day by day.
    ///
    /// The significators are fixed for the whole window, so the predicted
    /// direction is the same every day.
    pub fn backtest(
        &self,
        houses: &[&HouseSignificators],
        prices: &[PricePoint],
    ) -> Result<BacktestReport, ChartError> {
        if prices.len() < MIN_BACKTEST_POINTS {
            return Err(ChartError::InsufficientData {
                required: MIN_BACKTEST_POINTS,
                actual: prices.len(),
            });
        }
        for pair in prices.windows(2) {
            if pair[1].time < pair[0].time {
                return Err(ChartError::InvalidInput(format!(
                    "price series out of order at {}",
                    pair[1].time
                )));
            }
        }
        if let Some(bad) = prices.iter().find(|p| !p.close.is_finite() || p.close <= 0.0) {
            return Err(ChartError::InvalidInput(format!(
                "close {} on {} is not a positive price",
                bad.close, bad.time
            )));
        }

        let astro_score = self.astro_score(houses);
        let predicted = Direction::of(astro_score);

        let records: Vec<DayRecord> = prices
            .windows(2)
            .map(|pair| {
                let (prev, today) = (&pair[0], &pair[1]);
                let change_percent = (today.close - prev.close) / prev.close * 100.0;
                let actual = Direction::of(change_percent);
                DayRecord {
                    date: today.time,
                    close: today.close,
                    change_percent,
                    predicted,
                    actual,
                    matched: predicted == actual,
                }
            })
            .collect();

        let days = records.len();
        let matches = records.iter().filter(|r| r.matched).count();
        let accuracy = round2(matches as f64 / days as f64 * 100.0);
        log::debug!(
            "backtest over {} days: score {:.3}, {} matches ({:.2}%)",
            days,
            astro_score,
            matches,
            accuracy
        );

        Ok(BacktestReport {
            accuracy,
            days,
            matches,
            astro_score,
            records,
        })
    }
}
