use std::{
    error::Error,
    path::{Path, PathBuf},
};

use clap::Parser;
use simple_logger::SimpleLogger;

use carbon::report::{self, Locale, ReportContext};
use carbon::*;

const ABOUT: &str = r#"Computes the carbon emissions (tCO2e) of a single trip and writes on disk:
* `carbon_report_{timestamp}_summary.csv`: the summary with localized labels
* `carbon_report_{timestamp}_technical.csv`: every computed field
* `carbon_report_{timestamp}.md`: a document with the trip data, the results and a sector comparison
* `carbon_report_{timestamp}.json` (with `--json`): the computed trip
When `--liters` is not provided, the liters are estimated from the distance and the
average consumption of the vehicle type on the fuel.
"#;

#[derive(Parser, Debug)]
#[command(author, version, about = ABOUT)]
struct Cli {
    /// The fuel type (e.g. `Diesel S10`, `Gasoline`, `Ethanol`)
    #[arg(long)]
    fuel_type: String,
    /// Liters consumed in the trip
    #[arg(long, value_parser = non_negative)]
    liters: Option<f64>,
    #[arg(long, value_enum, default_value_t = VehicleType::Car)]
    vehicle_type: VehicleType,
    /// The year the vehicle was manufactured
    #[arg(long)]
    manufacture_year: i32,
    /// Kilometers traveled
    #[arg(long, value_parser = non_negative)]
    distance_km: f64,
    /// Tons of cargo transported
    #[arg(long, value_parser = non_negative, default_value_t = 0.0)]
    load_tons: f64,
    /// E-mail written in the reports
    #[arg(long)]
    email: Option<String>,
    /// Origin address written in the document
    #[arg(long)]
    origin: Option<String>,
    /// Destination address written in the document
    #[arg(long)]
    destination: Option<String>,
    /// Language of the reports
    #[arg(long, value_enum, default_value_t = Locale::En)]
    locale: Locale,
    /// Year vehicle ages are computed against (defaults to the current year)
    #[arg(long)]
    year: Option<i32>,
    /// CSV with columns `fuel_type,factor,source` replacing the reference emission factors
    #[arg(long)]
    factors: Option<PathBuf>,
    /// Directory where reports are written
    #[arg(short, long, default_value = ".")]
    output: PathBuf,
    /// Also write the computed trip as JSON
    #[arg(long)]
    json: bool,
}

fn non_negative(arg: &str) -> Result<f64, String> {
    let value = arg.parse::<f64>().map_err(|e| e.to_string())?;
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(format!("{arg} is not a non-negative number"))
    }
}

fn liters(cli: &Cli) -> Result<f64, Box<dyn Error>> {
    if let Some(liters) = cli.liters {
        return Ok(liters);
    }
    let consumptions = load_average_consumption()?;
    let km_per_liter = average_consumption(&consumptions, cli.vehicle_type, &cli.fuel_type);
    let liters = estimate_liters(cli.distance_km, km_per_liter);
    log::info!("Estimated consumption: {liters:.2} L ({km_per_liter} km/L)");
    Ok(liters)
}

fn write(dir: &Path, name: String, contents: &[u8]) -> Result<(), Box<dyn Error>> {
    let path = dir.join(name);
    std::fs::write(&path, contents)?;
    log::info!("Report written to {}", path.display());
    Ok(())
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let factors = match &cli.factors {
        Some(path) => load_emission_factors_from(path)?,
        None => load_emission_factors()?,
    };
    let pipeline = Pipeline::new(factors, cli.year.unwrap_or_else(current_year));
    let now = time::OffsetDateTime::now_utc();

    let trip = Trip::single(
        &cli.fuel_type,
        liters(&cli)?,
        cli.distance_km,
        cli.load_tons,
        cli.manufacture_year,
        now.date(),
    );
    let result = pipeline.run_single(trip);

    log::info!("Vehicle age: {} years", result.vehicle_age);
    log::info!("Base emission: {:.4} tCO2e", result.base_emission);
    log::info!("Age factor: {:.4}", result.age_factor);
    log::info!("Final emission: {:.4} tCO2e", result.final_emission);
    log::info!("Intensity: {:.6} tCO2e/km", result.intensity_per_km);
    if cli.vehicle_type == VehicleType::Truck {
        log::info!("Intensity: {:.6} tCO2e/ton", result.intensity_per_ton);
    }
    log::info!("Efficiency: {:.2} km/L", result.efficiency_km_per_liter);

    let context = ReportContext {
        vehicle_type: cli.vehicle_type,
        email: cli.email.clone(),
        origin: cli.origin.clone(),
        destination: cli.destination.clone(),
        generated: now,
        locale: cli.locale,
    };

    std::fs::create_dir_all(&cli.output)?;
    let summary = report::summary(&result, &context)?;
    write(
        &cli.output,
        report::file_name(now, "_summary.csv")?,
        &report::summary_csv(&summary)?,
    )?;
    write(
        &cli.output,
        report::file_name(now, "_technical.csv")?,
        &report::technical_data(std::slice::from_ref(&result))?,
    )?;
    write(
        &cli.output,
        report::file_name(now, ".md")?,
        report::document(&result, &context)?.as_bytes(),
    )?;
    if cli.json {
        write(
            &cli.output,
            report::file_name(now, ".json")?,
            &serde_json::to_vec(&result)?,
        )?;
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    SimpleLogger::new()
        .with_level(log::LevelFilter::Info)
        .init()?;

    let cli = Cli::parse();

    run(cli).map_err(|e| {
        log::error!("Error computing the emissions of the trip: {e}");
        e
    })
}
