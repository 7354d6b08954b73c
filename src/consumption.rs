use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::Error;

static AVERAGE_CONSUMPTION: &[u8] = include_bytes!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/src/average_consumption.csv"
));

/// km per liter used when a vehicle and fuel combination is not in the table
pub const DEFAULT_KM_PER_LITER: f64 = 5.0;

/// The kind of vehicle of a single trip
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum VehicleType {
    #[default]
    Car,
    Truck,
}

/// A map of `(vehicle type, fuel type)` to its [`AverageConsumption`].
pub type AverageConsumptions = HashMap<(VehicleType, String), AverageConsumption>;

/// The in-memory representation of the average consumption of a vehicle type on a fuel
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AverageConsumption {
    pub vehicle_type: VehicleType,
    /// the fuel type (e.g. `Ethanol`)
    pub fuel_type: String,
    pub km_per_liter: f64,
    /// the source of the figure
    pub source: String,
}

/// Loads the average consumptions shipped in `src/average_consumption.csv`.
/// # Error
/// Errors if the table is malformed
pub fn load_average_consumption() -> Result<AverageConsumptions, Error> {
    Ok(super::csv::load(AVERAGE_CONSUMPTION, |a: AverageConsumption| {
        ((a.vehicle_type, a.fuel_type.clone()), a)
    })?)
}

/// Returns the average km per liter of `vehicle_type` on `fuel_type`,
/// [`DEFAULT_KM_PER_LITER`] when the combination is unknown.
pub fn average_consumption(
    consumptions: &AverageConsumptions,
    vehicle_type: VehicleType,
    fuel_type: &str,
) -> f64 {
    consumptions
        .get(&(vehicle_type, fuel_type.to_string()))
        .map_or(DEFAULT_KM_PER_LITER, |a| a.km_per_liter)
}

/// Returns the liters needed to travel `distance_km` at `km_per_liter`.
/// Non-positive distances or consumptions yield 0.
pub fn estimate_liters(distance_km: f64, km_per_liter: f64) -> f64 {
    if distance_km <= 0.0 || km_per_liter <= 0.0 {
        0.0
    } else {
        distance_km / km_per_liter
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn table() {
        let c = load_average_consumption().unwrap();
        assert_eq!(c.len(), 6);
        assert_eq!(average_consumption(&c, VehicleType::Car, "Gasoline"), 12.0);
        assert_eq!(average_consumption(&c, VehicleType::Car, "Ethanol"), 8.0);
        assert_eq!(average_consumption(&c, VehicleType::Car, "Diesel S10"), 14.0);
        assert_eq!(average_consumption(&c, VehicleType::Truck, "Diesel S10"), 2.5);
        assert_eq!(average_consumption(&c, VehicleType::Truck, "Gasoline"), 2.0);
        assert_eq!(average_consumption(&c, VehicleType::Truck, "Ethanol"), 1.8);
        let diesel = &c[&(VehicleType::Truck, "Diesel S10".to_string())];
        assert_eq!(diesel.source, "Fleet average (estimate)");
    }

    #[test]
    fn unknown_combination() {
        let c = load_average_consumption().unwrap();
        assert_eq!(
            average_consumption(&c, VehicleType::Car, "Hydrogen"),
            DEFAULT_KM_PER_LITER
        );
    }

    #[test]
    fn estimate() {
        assert_eq!(estimate_liters(120.0, 12.0), 10.0);
        assert_eq!(estimate_liters(0.0, 12.0), 0.0);
        assert_eq!(estimate_liters(-5.0, 12.0), 0.0);
        assert_eq!(estimate_liters(100.0, 0.0), 0.0);
    }
}
