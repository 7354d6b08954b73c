use std::{path::PathBuf, str::FromStr};

use crate::{
    age_adjustment, base_emission, compute_age_adjustment, compute_batch_emissions,
    compute_intensities, compute_single_emission, intensity, EmissionFactors, Error, Trip,
    TripEmissions,
};

/// Returns the current year (UTC), the default reference year for vehicle ages.
pub fn current_year() -> i32 {
    time::OffsetDateTime::now_utc().year()
}

/// The carbon calculation: emission factor, age adjustment and intensities,
/// applied in this order to every trip.
///
/// The tables and the reference year are fixed at construction, so
/// running the same trips twice yields the same results.
#[derive(Debug, Clone)]
pub struct Pipeline {
    factors: EmissionFactors,
    current_year: i32,
}

impl Pipeline {
    pub fn new(factors: EmissionFactors, current_year: i32) -> Self {
        Self {
            factors,
            current_year,
        }
    }

    pub fn factors(&self) -> &EmissionFactors {
        &self.factors
    }

    /// The year vehicle ages are computed against
    pub fn current_year(&self) -> i32 {
        self.current_year
    }

    /// Runs the three stages over a batch of trips, returning one [`TripEmissions`] per trip
    /// in the same order.
    pub fn run(&self, trips: Vec<Trip>) -> Vec<TripEmissions> {
        log::info!(
            "Computing emissions of {} trips at year {}",
            trips.len(),
            self.current_year
        );
        let batch = compute_batch_emissions(trips, &self.factors);
        let batch = compute_age_adjustment(batch, self.current_year);
        let batch = compute_intensities(batch);
        for trip in &batch {
            log::debug!(
                "Trip '{}': base {:.4} tCO2e, final {:.4} tCO2e",
                trip.trip_id,
                trip.base_emission,
                trip.final_emission
            );
        }
        batch
    }

    /// Runs the three stages over a single trip.
    pub fn run_single(&self, trip: Trip) -> TripEmissions {
        let base = base_emission(trip, &self.factors);
        intensity(age_adjustment(base, self.current_year))
    }

    /// The emission in tCO2e of burning `liters` of `fuel_type`.
    /// See [`compute_single_emission`].
    pub fn single_emission(&self, liters: f64, fuel_type: Option<&str>) -> Result<f64, Error> {
        compute_single_emission(liters, fuel_type, &self.factors)
    }
}

/// An argument that is either a quantity of fuel or a batch of trips.
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    /// liters of fuel
    Liters(f64),
    /// path to a fleet CSV
    Batch(PathBuf),
}

impl Input {
    /// Parses `arg` into an [`Input`].
    /// # Error
    /// [`Error::InvalidQuantity`] if `arg` is a negative number.
    /// [`Error::UnsupportedInputType`] if `arg` is neither a finite number nor
    /// the path of an existing `.csv` file
    pub fn parse(arg: &str) -> Result<Self, Error> {
        if let Ok(liters) = arg.trim().parse::<f64>() {
            if liters.is_finite() {
                return if liters >= 0.0 {
                    Ok(Self::Liters(liters))
                } else {
                    Err(Error::InvalidQuantity {
                        field: "liters".to_string(),
                        value: liters,
                    })
                };
            }
        }
        let path = PathBuf::from(arg);
        let is_csv = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if is_csv && path.is_file() {
            Ok(Self::Batch(path))
        } else {
            Err(Error::UnsupportedInputType(arg.to_string()))
        }
    }
}

impl FromStr for Input {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
