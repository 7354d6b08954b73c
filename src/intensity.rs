use serde::Serialize;

use crate::AgedEmission;

/// Returns `numerator / denominator`, or 0 when the denominator is 0.
pub fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// A trip annotated with all the results of the carbon calculation.
/// Fields follow the order in which they are computed.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct TripEmissions {
    pub trip_id: String,
    pub date: String,
    pub fleet_id: String,
    pub fuel_type: String,
    #[serde(rename = "fuel_consumed_liters")]
    pub fuel_liters: f64,
    pub distance_km: f64,
    pub load_tons: f64,
    pub axle_count: u32,
    pub manufacture_year: i32,
    /// tCO2e per liter; empty when the fuel type is unknown
    pub emission_factor: Option<f64>,
    /// tCO2e
    pub base_emission: f64,
    pub vehicle_age: u32,
    pub age_penalty_rate: f64,
    pub age_factor: f64,
    /// tCO2e
    pub final_emission: f64,
    /// tCO2e per ton of cargo
    pub intensity_per_ton: f64,
    /// tCO2e per km
    pub intensity_per_km: f64,
    pub efficiency_km_per_liter: f64,
}

/// Computes the emission intensities and the fuel efficiency of a trip.
pub fn intensity(aged: AgedEmission) -> TripEmissions {
    let AgedEmission {
        base,
        vehicle_age,
        age_penalty_rate,
        age_factor,
        final_emission,
    } = aged;
    let trip = base.trip;

    let intensity_per_ton = ratio(final_emission, trip.load_tons);
    let intensity_per_km = ratio(final_emission, trip.distance_km);
    let efficiency_km_per_liter = ratio(trip.distance_km, trip.fuel_liters);

    TripEmissions {
        trip_id: trip.trip_id,
        date: trip.date,
        fleet_id: trip.fleet_id,
        fuel_type: trip.fuel_type,
        fuel_liters: trip.fuel_liters,
        distance_km: trip.distance_km,
        load_tons: trip.load_tons,
        axle_count: trip.axle_count,
        manufacture_year: trip.manufacture_year,
        emission_factor: base.emission_factor,
        base_emission: base.base_emission,
        vehicle_age,
        age_penalty_rate,
        age_factor,
        final_emission,
        intensity_per_ton,
        intensity_per_km,
        efficiency_km_per_liter,
    }
}

/// Computes the emission intensities and the fuel efficiency of every trip of a batch.
pub fn compute_intensities(batch: Vec<AgedEmission>) -> Vec<TripEmissions> {
    crate::map_batch(batch, intensity)
}
