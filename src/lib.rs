#![forbid(unsafe_code)]
mod aggregation;
mod age;
mod consumption;
pub mod csv;
mod emission_factors;
mod error;
mod intensity;
mod model;
mod pipeline;
pub mod report;

pub use aggregation::*;
pub use age::*;
pub use consumption::*;
pub use emission_factors::*;
pub use error::{Error, Result};
pub use intensity::*;
pub use model::*;
pub use pipeline::*;

/// Applies `f` to every item of a batch, preserving order.
/// Items are independent, so with the `parallel` feature they are mapped on the rayon pool.
pub(crate) fn map_batch<T, U, F>(items: Vec<T>, f: F) -> Vec<U>
where
    T: Send,
    U: Send,
    F: Fn(T) -> U + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        items.into_par_iter().map(f).collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        items.into_iter().map(f).collect()
    }
}
