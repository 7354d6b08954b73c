use std::path::Path;

use serde::{Deserialize, Serialize};

/// Identity given to a trip synthesized from single-trip input
pub const SINGLE_TRIP_ID: &str = "WEB_001";
/// Fleet given to a trip synthesized from single-trip input
pub const SINGLE_TRIP_FLEET: &str = "WEB";

/// A trip of a vehicle, as read from a fleet CSV or synthesized from single-trip input.
/// Column names of fleet spreadsheets in Portuguese are accepted as aliases.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Trip {
    #[serde(default, alias = "ID_Viagem")]
    pub trip_id: String,
    /// the date of the trip, as written in the source (e.g. `2024-03-01`)
    #[serde(default, alias = "Data")]
    pub date: String,
    #[serde(alias = "Frota_ID")]
    pub fleet_id: String,
    /// the key of the fuel in the [`crate::EmissionFactors`] (e.g. `Diesel S10`)
    #[serde(default, alias = "Tipo_Combustivel")]
    pub fuel_type: String,
    /// liters of fuel consumed
    #[serde(rename = "fuel_consumed_liters", alias = "Combustivel_L")]
    pub fuel_liters: f64,
    #[serde(alias = "KM_Rodado")]
    pub distance_km: f64,
    /// cargo in tons; 0 for passenger vehicles
    #[serde(alias = "Carga_Ton")]
    pub load_tons: f64,
    #[serde(alias = "Numero_Eixos")]
    pub axle_count: u32,
    #[serde(alias = "Ano_Fabricacao")]
    pub manufacture_year: i32,
}

impl Trip {
    /// Returns a single trip with placeholder identity, as used in single-trip mode.
    pub fn single(
        fuel_type: &str,
        fuel_liters: f64,
        distance_km: f64,
        load_tons: f64,
        manufacture_year: i32,
        date: time::Date,
    ) -> Self {
        Self {
            trip_id: SINGLE_TRIP_ID.to_string(),
            date: date.to_string(),
            fleet_id: SINGLE_TRIP_FLEET.to_string(),
            fuel_type: fuel_type.to_string(),
            fuel_liters,
            distance_km,
            load_tons,
            axle_count: 0,
            manufacture_year,
        }
    }

    /// Checks that the liters, kilometers and tons of the trip are finite and non-negative.
    /// # Error
    /// [`crate::Error::InvalidQuantity`] naming the first offending column
    pub fn validate(&self) -> crate::Result<()> {
        [
            ("fuel_consumed_liters", self.fuel_liters),
            ("distance_km", self.distance_km),
            ("load_tons", self.load_tons),
        ]
        .into_iter()
        .try_for_each(|(column, value)| {
            if value.is_finite() && value >= 0.0 {
                Ok(())
            } else {
                Err(crate::Error::InvalidQuantity {
                    field: format!("{column} of trip '{}'", self.trip_id),
                    value,
                })
            }
        })
    }
}

/// Reads trips from a fleet CSV in memory.
/// # Error
/// Errors if a row misses a required column, has a malformed value or a
/// negative or non-finite quantity
pub fn read_trips(data: &[u8]) -> crate::Result<Vec<Trip>> {
    let trips = crate::csv::deserialize(data).collect::<Result<Vec<Trip>, _>>()?;
    trips.iter().try_for_each(Trip::validate)?;
    Ok(trips)
}

/// Loads trips from a fleet CSV on disk.
/// # Error
/// Errors if the file cannot be read or is malformed
pub fn load_trips(path: impl AsRef<Path>) -> crate::Result<Vec<Trip>> {
    let path = path.as_ref();
    let data = std::fs::read(path)?;
    let trips = read_trips(&data)?;
    log::info!("Loaded {} trips from {}", trips.len(), path.display());
    Ok(trips)
}
