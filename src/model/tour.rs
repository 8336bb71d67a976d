//! Tour — a saved, named list of mandatory waypoints.

use serde::{Deserialize, Serialize};

/// A guided tour as authored by curators: a name and the exhibits it must
/// visit, in order. The concrete walk is computed on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tour {
    pub name: String,
    pub waypoints: Vec<String>,
}

impl Tour {
    pub fn new(name: impl Into<String>, waypoints: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            name: name.into(),
            waypoints: waypoints.into_iter().map(Into::into).collect(),
        }
    }
}
