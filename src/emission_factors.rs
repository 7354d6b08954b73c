use std::{collections::HashMap, path::Path};

use serde::{Deserialize, Serialize};

use crate::{Error, Trip};

static EMISSION_FACTORS: &[u8] = include_bytes!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/src/emission_factors.csv"
));

/// A map of the fuel type (e.g. `Diesel S10`) to its [`EmissionFactor`].
pub type EmissionFactors = HashMap<String, EmissionFactor>;

/// The in-memory representation of the emission factor of a fuel
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct EmissionFactor {
    /// the fuel type (e.g. `Gasoline`)
    pub fuel_type: String,
    /// the emission in tCO2e per liter
    pub factor: f64,
    /// the source of the factor
    pub source: String,
}

/// Loads the reference emission factors shipped in `src/emission_factors.csv`
/// into memory as a map `fuel_type: EmissionFactor`.
/// # Error
/// Errors if the table is malformed
pub fn load_emission_factors() -> Result<EmissionFactors, Error> {
    read_emission_factors(EMISSION_FACTORS)
}

/// Loads emission factors from a CSV on disk with columns `fuel_type,factor,source`.
/// # Error
/// Errors if the file cannot be read or is malformed
pub fn load_emission_factors_from(path: impl AsRef<Path>) -> Result<EmissionFactors, Error> {
    let path = path.as_ref();
    let factors = read_emission_factors(&std::fs::read(path)?)?;
    log::info!("Loaded {} emission factors from {}", factors.len(), path.display());
    Ok(factors)
}

fn read_emission_factors(data: &[u8]) -> Result<EmissionFactors, Error> {
    Ok(super::csv::load(data, |f: EmissionFactor| {
        (f.fuel_type.clone(), f)
    })?)
}

/// A [`Trip`] with its emission before adjustments
#[derive(Debug, Clone, PartialEq)]
pub struct BaseEmission {
    pub trip: Trip,
    /// tCO2e per liter; `None` when the fuel type is not in the table
    pub emission_factor: Option<f64>,
    /// tCO2e
    pub base_emission: f64,
}

/// Returns the [`BaseEmission`] of a trip.
/// A fuel type missing from `factors` yields a `base_emission` of 0.
pub fn base_emission(trip: Trip, factors: &EmissionFactors) -> BaseEmission {
    let emission_factor = factors.get(&trip.fuel_type).map(|f| f.factor);
    if emission_factor.is_none() {
        log::warn!(
            "Trip '{}': fuel type '{}' has no emission factor; base emission set to 0",
            trip.trip_id,
            trip.fuel_type
        );
    }
    let base_emission = emission_factor.map_or(0.0, |factor| trip.fuel_liters * factor);
    BaseEmission {
        trip,
        emission_factor,
        base_emission,
    }
}

/// Computes the [`BaseEmission`] of every trip of a batch.
///
/// Lenient: trips whose fuel type is not in `factors` get a base emission of 0
/// instead of failing the batch. See [`compute_single_emission`] for the strict variant.
pub fn compute_batch_emissions(trips: Vec<Trip>, factors: &EmissionFactors) -> Vec<BaseEmission> {
    crate::map_batch(trips, |trip| base_emission(trip, factors))
}

/// Returns the emission in tCO2e of burning `liters` of `fuel_type`.
/// # Error
/// * [`Error::MissingArgument`] when `fuel_type` is `None`
/// * [`Error::InvalidArgument`] when `fuel_type` is not in `factors`
pub fn compute_single_emission(
    liters: f64,
    fuel_type: Option<&str>,
    factors: &EmissionFactors,
) -> Result<f64, Error> {
    let fuel_type = fuel_type.ok_or(Error::MissingArgument("fuel_type"))?;
    let factor = factors
        .get(fuel_type)
        .ok_or_else(|| Error::InvalidArgument {
            fuel_type: fuel_type.to_string(),
            available: fuel_types(factors),
        })?;
    Ok(liters * factor.factor)
}

/// Returns the fuel types of `factors`, sorted
pub fn fuel_types(factors: &EmissionFactors) -> Vec<String> {
    let mut types = factors.keys().cloned().collect::<Vec<_>>();
    types.sort();
    types
}
