//! Catalog configuration.
//!
//! | Setting | Default | Effect |
//! |---------|---------|--------|
//! | `capacity` | `None` | Pad every catalog to this many slots; reject larger inputs |
//! | `duplicates` | `LastWins` | How repeated exhibit names are handled at construction |
//! | `routing` | `Abort` | What `route_through` does with an unreachable segment |

use serde::{Deserialize, Serialize};

/// Handling of exhibit names that occur more than once in the input array.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// The last slot carrying the name owns it; earlier slots stay in the
    /// catalog (and in exports) but cannot be reached by name.
    #[default]
    LastWins,
    /// Construction fails with `Error::DuplicateExhibit`.
    Reject,
}

/// Handling of a waypoint pair with no connecting path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoutePolicy {
    /// Fail the whole route with `Error::Unreachable`.
    #[default]
    Abort,
    /// Drop the segment and stitch whatever fragments are reachable.
    SkipUnreachable,
}

/// Settings applied when a catalog is built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub capacity: Option<usize>,
    pub duplicates: DuplicatePolicy,
    pub routing: RoutePolicy,
}

impl CatalogConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = Some(capacity);
        self
    }

    pub fn with_duplicates(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicates = policy;
        self
    }

    pub fn with_routing(mut self, policy: RoutePolicy) -> Self {
        self.routing = policy;
        self
    }

    /// Parse a configuration from JSON. Missing keys take their defaults.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
