use thiserror::Error;

/// Errors of the carbon calculator.
///
/// Unknown fuel types in a batch and zero denominators are not errors:
/// they default to `0`.
#[derive(Debug, Error)]
pub enum Error {
    /// The scalar emission was requested for a fuel type not in the table
    #[error("fuel type '{fuel_type}' not found. Available fuel types: {}", available.join(", "))]
    InvalidArgument {
        fuel_type: String,
        available: Vec<String>,
    },

    /// A required argument was not provided
    #[error("missing argument '{0}'")]
    MissingArgument(&'static str),

    /// The input is neither a number of liters nor a batch of trips
    #[error("unsupported input '{0}': expected a number of liters or a path to a CSV of trips")]
    UnsupportedInputType(String),

    /// A quantity (liters, kilometers or tons) is negative or not a number
    #[error("{field} must be a finite non-negative number, got {value}")]
    InvalidQuantity { field: String, value: f64 },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] ::csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Template(#[from] tinytemplate::error::Error),

    #[error(transparent)]
    Format(#[from] time::error::Format),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
