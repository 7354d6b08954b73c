use std::{error::Error, path::PathBuf};

use clap::Parser;
use simple_logger::SimpleLogger;

use carbon::{
    current_year, load_emission_factors, load_emission_factors_from, load_trips, totals, Input,
    Pipeline,
};

const ABOUT: &str = r#"Computes the emission (tCO2e) of an input that is either
* a number of liters, which requires `--fuel-type`, or
* the path to a fleet CSV, whose total base and final emissions are computed.
"#;

#[derive(Parser, Debug)]
#[command(author, version, about = ABOUT)]
struct Cli {
    /// Liters of fuel, or the path of a fleet CSV
    input: String,
    /// The fuel type of the liters (e.g. `Diesel S10`)
    #[arg(long)]
    fuel_type: Option<String>,
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

    match Input::parse(&cli.input)? {
        Input::Liters(liters) => {
            let emission = pipeline.single_emission(liters, cli.fuel_type.as_deref())?;
            log::info!("Emission: {emission:.4} tCO2e");
        }
        Input::Batch(path) => {
            let results = pipeline.run(load_trips(path)?);
            let totals = totals(&results);
            log::info!("Trips: {}", totals.trips);
            log::info!("Total base emission: {:.3} tCO2e", totals.base_emission);
            log::info!("Total final emission: {:.3} tCO2e", totals.final_emission);
        }
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    SimpleLogger::new()
        .with_level(log::LevelFilter::Info)
        .init()?;

    let cli = Cli::parse();

    run(cli).map_err(|e| {
        log::error!("Error computing the emission: {e}");
        e
    })
}
