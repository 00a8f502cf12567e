//! Station data sources.
//!
//! A [`StationSource`] knows how to fetch the full station list and the
//! departures for one station. Sources do no caching of their own; that is
//! the job of [`crate::repository::StationRepository`].

mod builtin;
mod client;
mod error;
#[cfg(test)]
pub(crate) mod fake;
mod source;

pub use builtin::BuiltinStationSource;
pub use client::{StationClient, StationClientConfig};
pub use error::StationError;
pub use source::StationSource;
