use std::hash::Hash;

use itertools::Itertools;
use serde::Serialize;

use crate::{ratio, TripEmissions};

/// Returns the fuel consumption in liters per 100 km, or 0 when no distance was traveled.
pub fn consumption_l_per_100km(fuel_liters: f64, distance_km: f64) -> f64 {
    ratio(fuel_liters, distance_km) * 100.0
}

/// Descriptive statistics of a set of values
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct Stats {
    pub count: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

impl Stats {
    /// Returns the statistics of `values`, `None` when there are no values
    pub fn new(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        let mut values = values.into_iter();
        let first = values.next()?;
        let (count, sum, min, max) = values.fold(
            (1usize, first, first, first),
            |(count, sum, min, max), v| (count + 1, sum + v, min.min(v), max.max(v)),
        );
        Some(Self {
            count,
            mean: sum / count as f64,
            min,
            max,
        })
    }
}

/// The fuel consumption of a trip
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct TripConsumption {
    pub trip_id: String,
    pub fleet_id: String,
    pub axle_count: u32,
    pub fuel_liters: f64,
    pub distance_km: f64,
    pub consumption_l_per_100km: f64,
}

impl From<&TripEmissions> for TripConsumption {
    fn from(trip: &TripEmissions) -> Self {
        Self {
            trip_id: trip.trip_id.clone(),
            fleet_id: trip.fleet_id.clone(),
            axle_count: trip.axle_count,
            fuel_liters: trip.fuel_liters,
            distance_km: trip.distance_km,
            consumption_l_per_100km: consumption_l_per_100km(trip.fuel_liters, trip.distance_km),
        }
    }
}

/// Returns the consumption of every trip, in the order of `trips`
pub fn consumptions(trips: &[TripEmissions]) -> Vec<TripConsumption> {
    trips.iter().map(TripConsumption::from).collect()
}

/// Statistics of the consumption over all `trips`
pub fn consumption_stats(trips: &[TripConsumption]) -> Option<Stats> {
    Stats::new(trips.iter().map(|t| t.consumption_l_per_100km))
}

/// Statistics of the consumption grouped by `key`, ordered by key
pub fn consumption_stats_by<K, F>(trips: &[TripConsumption], key: F) -> Vec<(K, Stats)>
where
    K: Hash + Eq + Ord,
    F: Fn(&TripConsumption) -> K,
{
    trips
        .iter()
        .map(|t| (key(t), t.consumption_l_per_100km))
        .into_group_map()
        .into_iter()
        .filter_map(|(k, values)| Stats::new(values).map(|s| (k, s)))
        .sorted_by(|a, b| a.0.cmp(&b.0))
        .collect()
}

/// The `n` trips with the highest consumption, highest first
pub fn top_n(trips: &[TripConsumption], n: usize) -> Vec<&TripConsumption> {
    trips
        .iter()
        .sorted_by(|a, b| b.consumption_l_per_100km.total_cmp(&a.consumption_l_per_100km))
        .take(n)
        .collect()
}

/// The `n` trips with the lowest consumption, lowest first
pub fn bottom_n(trips: &[TripConsumption], n: usize) -> Vec<&TripConsumption> {
    trips
        .iter()
        .sorted_by(|a, b| a.consumption_l_per_100km.total_cmp(&b.consumption_l_per_100km))
        .take(n)
        .collect()
}

/// Number of trips per fleet id, most trips first (ties by id)
pub fn trips_per_fleet(trips: &[TripEmissions]) -> Vec<(&str, usize)> {
    trips
        .iter()
        .counts_by(|t| t.fleet_id.as_str())
        .into_iter()
        .sorted_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)))
        .collect()
}

/// Emission totals of a batch
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Default)]
pub struct Totals {
    pub trips: usize,
    /// tCO2e
    pub base_emission: f64,
    /// tCO2e
    pub final_emission: f64,
}

/// Sums the base and final emissions of `trips`
pub fn totals(trips: &[TripEmissions]) -> Totals {
    trips.iter().fold(Totals::default(), |acc, t| Totals {
        trips: acc.trips + 1,
        base_emission: acc.base_emission + t.base_emission,
        final_emission: acc.final_emission + t.final_emission,
    })
}
