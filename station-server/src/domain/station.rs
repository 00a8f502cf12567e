//! Station types.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// A shared, immutable snapshot of the station list.
///
/// Cloning is a reference-count bump, so one fetched list can be handed to
/// every caller that waited on it.
pub type Stations = Arc<[Station]>;

/// A station and the platforms it serves.
///
/// Stations are identified by name: two stations with the same name are the
/// same station.
///
/// # Examples
///
/// ```
/// use station_server::domain::Station;
///
/// let powell = Station::new("Powell", ["1", "2"]);
/// assert_eq!(powell.id(), "Powell");
/// assert_eq!(powell.platforms.len(), 2);
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Station {
    /// Display name, also the station's identity.
    pub name: String,
    /// Platform labels, in the order the source reports them.
    pub platforms: Vec<String>,
}

impl Station {
    /// Create a station from a name and its platform labels.
    pub fn new<I, P>(name: impl Into<String>, platforms: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        Self {
            name: name.into(),
            platforms: platforms.into_iter().map(Into::into).collect(),
        }
    }

    /// The stable identity of this station.
    pub fn id(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Station({}, {:?})", self.name, self.platforms)
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
