use std::{error::Error, path::PathBuf};

use clap::Parser;
use num_format::{Locale, ToFormattedString};
use simple_logger::SimpleLogger;

use carbon::{
    bottom_n, consumption_stats, consumption_stats_by, consumptions, current_year,
    load_emission_factors, load_trips, top_n, trips_per_fleet, Pipeline, TripConsumption,
};

const ABOUT: &str = r#"Analyses the fuel consumption (L/100 km) of the trips of a fleet CSV:
* mean consumption by number of axles
* vehicles with the most trips
* trips with the worst and best consumption
* mean, minimum and maximum consumption
Trips without distance have a consumption of 0.
"#;

#[derive(Parser, Debug)]
#[command(author, version, about = ABOUT)]
struct Cli {
    /// The fleet CSV
    #[arg(short, long)]
    input: PathBuf,
    /// Number of trips listed in the rankings
    #[arg(short, long, default_value_t = 5)]
    top: usize,
    /// Number of vehicles listed by number of trips
    #[arg(long, default_value_t = 10)]
    vehicles: usize,
}

fn log_trip(trip: &TripConsumption) {
    log::info!(
        "  {} ({}): {:.2} L, {:.2} km, {:.2} L/100km",
        trip.fleet_id,
        trip.trip_id,
        trip.fuel_liters,
        trip.distance_km,
        trip.consumption_l_per_100km
    );
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let pipeline = Pipeline::new(load_emission_factors()?, current_year());
    let results = pipeline.run(load_trips(&cli.input)?);
    let trips = consumptions(&results);

    log::info!("Mean consumption per 100 km by number of axles:");
    for (axles, stats) in consumption_stats_by(&trips, |t| t.axle_count) {
        log::info!(
            "  {axles} axles: {:.2} L/100km ({} trips)",
            stats.mean,
            stats.count.to_formatted_string(&Locale::en)
        );
    }

    log::info!("Vehicles with the most trips:");
    for (fleet_id, count) in trips_per_fleet(&results).into_iter().take(cli.vehicles) {
        log::info!("  {fleet_id}: {count}");
    }

    log::info!("Top {} worst consumptions:", cli.top);
    top_n(&trips, cli.top).into_iter().for_each(log_trip);

    log::info!("Top {} best consumptions:", cli.top);
    bottom_n(&trips, cli.top).into_iter().for_each(log_trip);

    let stats = consumption_stats(&trips)
        .ok_or_else(|| Into::<Box<dyn Error>>::into("The fleet has no trips"))?;
    log::info!("Mean consumption: {:.2} L/100km", stats.mean);
    log::info!("Minimum consumption: {:.2} L/100km", stats.min);
    log::info!("Maximum consumption: {:.2} L/100km", stats.max);
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    SimpleLogger::new()
        .with_level(log::LevelFilter::Info)
        .init()?;

    let cli = Cli::parse();

    run(cli).map_err(|e| {
        log::error!("Error analysing the consumption of the fleet: {e}");
        e
    })
}
