use std::{error::Error, path::PathBuf};

use clap::Parser;
use num_format::ToFormattedString;
use simple_logger::SimpleLogger;

use carbon::{
    current_year, load_emission_factors, load_emission_factors_from, load_trips,
    report::{self, Locale},
    totals, Pipeline,
};

const ABOUT: &str = r#"Computes the carbon emissions (tCO2e) of every trip of a fleet.
The input is a CSV with columns
`fleet_id,fuel_consumed_liters,distance_km,load_tons,axle_count,manufacture_year`
and optionally `trip_id`, `date` and `fuel_type` (Portuguese column names are also accepted).
Trips whose fuel type has no emission factor are reported with zero emissions.
Writes every computed field of every trip to `--output` and the fleet totals to `--summary`.
"#;

#[derive(Parser, Debug)]
#[command(author, version, about = ABOUT)]
struct Cli {
    /// The fleet CSV
    #[arg(short, long)]
    input: PathBuf,
    /// Where the technical data of the trips is written
    #[arg(short, long, default_value = "fleet_report.csv")]
    output: PathBuf,
    /// Where the totals of the fleet are written
    #[arg(short, long, default_value = "fleet_summary.csv")]
    summary: PathBuf,
    /// Language of the labels of the summary
    #[arg(long, value_enum, default_value_t = Locale::En)]
    locale: Locale,
    /// Year vehicle ages are computed against (defaults to the current year)
    #[arg(long)]
    year: Option<i32>,
    /// CSV with columns `fuel_type,factor,source` replacing the reference emission factors
    #[arg(long)]
    factors: Option<PathBuf>,
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let factors = match &cli.factors {
        Some(path) => load_emission_factors_from(path)?,
        None => load_emission_factors()?,
    };
    let pipeline = Pipeline::new(factors, cli.year.unwrap_or_else(current_year));

    let trips = load_trips(&cli.input)?;
    let results = pipeline.run(trips);

    for trip in &results {
        log::info!(
            "{} ({}, {} axles, {}): age {} factor {:.3} | base {:.4} final {:.4} tCO2e | {:.6} tCO2e/ton {:.6} tCO2e/km | {:.2} km/L",
            trip.fleet_id,
            trip.trip_id,
            trip.axle_count,
            trip.manufacture_year,
            trip.vehicle_age,
            trip.age_factor,
            trip.base_emission,
            trip.final_emission,
            trip.intensity_per_ton,
            trip.intensity_per_km,
            trip.efficiency_km_per_liter,
        );
    }

    let totals = totals(&results);
    log::info!("Trips: {}", totals.trips.to_formatted_string(&num_format::Locale::en));
    log::info!("Total base emission: {:.3} tCO2e", totals.base_emission);
    log::info!("Total final emission: {:.3} tCO2e", totals.final_emission);

    std::fs::write(&cli.output, report::technical_data(&results)?)?;
    log::info!("Report written to {}", cli.output.display());

    let summary = report::fleet_summary(&totals, cli.locale);
    std::fs::write(&cli.summary, report::summary_csv(&summary)?)?;
    log::info!("Summary written to {}", cli.summary.display());
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    SimpleLogger::new()
        .with_level(log::LevelFilter::Info)
        .init()?;

    let cli = Cli::parse();

    run(cli).map_err(|e| {
        log::error!("Error computing the emissions of the fleet: {e}");
        e
    })
}
