mod prices;

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

use paddhati::bodies::NodeKind;
use paddhati::chart::{BirthChart, ChartCalculator, Moment};
use paddhati::ephemeris::{GeoLocation, SwissEphemerisAdapter};
use paddhati::scorer::{BacktestReport, Prediction, Scorer};
use paddhati::significators::{all_house_significators, HouseSignificators};
use paddhati_config::{load_config, PaddhatiConfig};

#[derive(Parser, Debug)]
#[command(author, version, about = "KP listing charts and significator scores")]
struct Args {
    /// Config file (defaults to configs/paddhati.toml when present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Swiss Ephemeris data directory; overrides the config.
    #[arg(long, global = true)]
    ephemeris_path: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, clap::Args)]
struct Listing {
    /// Ticker the chart is cast for.
    #[arg(long)]
    symbol: String,

    /// Listing date, YYYY-MM-DD.
    #[arg(long)]
    date: NaiveDate,

    /// Listing time; defaults to the exchange listing time.
    #[arg(long)]
    time: Option<String>,

    /// Latitude; defaults to the exchange.
    #[arg(long, allow_hyphen_values = true)]
    lat: Option<f64>,

    /// Longitude; defaults to the exchange.
    #[arg(long, allow_hyphen_values = true)]
    lon: Option<f64>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Cast the listing chart and print significators and a prediction.
    Chart {
        #[command(flatten)]
        listing: Listing,
    },
    /// Replay the listing chart's score over a JSON price history.
    Backtest {
        #[command(flatten)]
        listing: Listing,

        /// JSON array of {time, close, volume?} records.
        #[arg(long)]
        prices: PathBuf,
    },
}

#[derive(Serialize)]
struct ChartReport<'a> {
    chart: &'a BirthChart,
    significators: &'a [HouseSignificators],
    prediction: Prediction,
}

#[derive(Serialize)]
struct BacktestOutput<'a> {
    symbol: &'a str,
    prediction: Prediction,
    backtest: BacktestReport,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = load_config(args.config.as_deref())?;
    let ephemeris_path = args.ephemeris_path.clone().or_else(|| config.ephemeris.path.clone());
    let adapter = SwissEphemerisAdapter::new(ephemeris_path)?.with_node(config.chart.node);
    if config.chart.node == NodeKind::True {
        log::info!("using the true lunar node for Rahu");
    }
    let calculator = ChartCalculator::new(Arc::new(adapter), config.chart_settings()?);
    let scorer = Scorer::default();

    match args.command {
        Command::Chart { listing } => {
            let chart = cast(&calculator, &config, &listing).await?;
            let significators = all_house_significators(&chart)?;
            let prediction = scorer.predict(&Scorer::wealth_houses(&significators));
            let report = ChartReport {
                chart: &chart,
                significators: &significators,
                prediction,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Command::Backtest { listing, prices } => {
            let prices = prices::load_prices(&prices)?;
            let chart = cast(&calculator, &config, &listing).await?;
            let significators = all_house_significators(&chart)?;
            let wealth = Scorer::wealth_houses(&significators);
            let backtest = scorer
                .backtest(&wealth, &prices)
                .with_context(|| format!("Backtest failed for {}", listing.symbol))?;
            let output = BacktestOutput {
                symbol: &listing.symbol,
                prediction: scorer.predict(&wealth),
                backtest,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }
    Ok(())
}

async fn cast(
    calculator: &ChartCalculator,
    config: &PaddhatiConfig,
    listing: &Listing,
) -> anyhow::Result<BirthChart> {
    let exchange = config.exchange_site()?;
    let site = GeoLocation::new(
        listing.lat.unwrap_or(exchange.lat),
        listing.lon.unwrap_or(exchange.lon),
    )?;
    let time = listing
        .time
        .as_deref()
        .unwrap_or(&config.exchange.listing_time);
    let moment = Moment::for_listing(listing.date, time, site)?
        .with_utc_offset(config.exchange.utc_offset_minutes)?;
    log::info!(
        "casting {} for {} at {:.4}, {:.4}",
        listing.symbol,
        moment.local(),
        site.lat,
        site.lon
    );
    let chart = calculator
        .compute_chart(&moment)
        .await
        .with_context(|| format!("Chart failed for {}", listing.symbol))?;
    Ok(chart.with_symbol(listing.symbol.as_str()))
}
