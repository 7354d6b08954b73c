use crate::BaseEmission;

/// Annual penalty rate by first year of manufacture, newest block first.
/// Vehicles older than the last block use [`OLDEST_PENALTY_RATE`].
const PENALTY_RATES: [(i32, f64); 5] = [
    (2023, 0.01),
    (2012, 0.015),
    (2006, 0.025),
    (2000, 0.03),
    (1996, 0.04),
];
const OLDEST_PENALTY_RATE: f64 = 0.05;

/// Returns the age in years of a vehicle manufactured in `manufacture_year`.
/// Vehicles manufactured after `current_year` have age 0.
pub fn vehicle_age(manufacture_year: i32, current_year: i32) -> u32 {
    current_year.saturating_sub(manufacture_year).max(0) as u32
}

/// Returns the annual emission penalty of a vehicle manufactured in `manufacture_year`.
/// The rate depends on the year of manufacture, not on the age.
pub fn age_penalty_rate(manufacture_year: i32) -> f64 {
    PENALTY_RATES
        .iter()
        .find(|(from, _)| manufacture_year >= *from)
        .map_or(OLDEST_PENALTY_RATE, |(_, rate)| *rate)
}

/// Returns the multiplier applied to the base emission, `1 + age * rate`.
pub fn age_factor(vehicle_age: u32, age_penalty_rate: f64) -> f64 {
    1.0 + vehicle_age as f64 * age_penalty_rate
}

/// A [`BaseEmission`] adjusted by the age of the vehicle
#[derive(Debug, Clone, PartialEq)]
pub struct AgedEmission {
    pub base: BaseEmission,
    pub vehicle_age: u32,
    pub age_penalty_rate: f64,
    pub age_factor: f64,
    /// tCO2e, `base_emission * age_factor`
    pub final_emission: f64,
}

/// Adjusts the emission of a trip by the age of its vehicle at `current_year`.
pub fn age_adjustment(base: BaseEmission, current_year: i32) -> AgedEmission {
    let year = base.trip.manufacture_year;
    let vehicle_age = vehicle_age(year, current_year);
    let age_penalty_rate = age_penalty_rate(year);
    let age_factor = age_factor(vehicle_age, age_penalty_rate);
    let final_emission = age_factor * base.base_emission;
    AgedEmission {
        base,
        vehicle_age,
        age_penalty_rate,
        age_factor,
        final_emission,
    }
}

/// Adjusts every emission of a batch by the age of its vehicle at `current_year`.
pub fn compute_age_adjustment(batch: Vec<BaseEmission>, current_year: i32) -> Vec<AgedEmission> {
    crate::map_batch(batch, |base| age_adjustment(base, current_year))
}
