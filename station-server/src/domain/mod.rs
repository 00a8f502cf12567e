//! Domain types for the station service.
//!
//! Stations are the unit of the cached collection; departures are only
//! ever fetched on demand for a single station.

mod departure;
mod station;

pub use departure::Departure;
pub use station::{Station, Stations};
