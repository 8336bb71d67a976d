//! # museum-graph — Exhibit Catalogs and Tour Routing
//!
//! Small in-memory catalogs of museum exhibits. Each exhibit has a name, a
//! room and a tone × pace matrix of description texts; an undirected
//! relation graph between exhibits drives guided-tour routing.
//!
//! ## Quick Start
//!
//! ```rust
//! use museum_graph::{ExhibitCatalog, Exhibit, Tone, Pace};
//!
//! # fn example() -> museum_graph::Result<()> {
//! let mut catalog = ExhibitCatalog::new("Museo di Torino", "Torino", vec![
//!     Exhibit::new("sarcofago", "stanza 1"),
//!     Exhibit::new("mummia", "stanza 1"),
//!     Exhibit::new("collana", "stanza 2"),
//!     Exhibit::placeholder(),
//! ]);
//! catalog.connect("mummia", "sarcofago")?;
//! catalog.connect("mummia", "collana")?;
//! catalog.set_description("collana", Tone::Simple, Pace::Fast, "Collana con perle");
//!
//! let route = catalog.route_through(&["sarcofago", "collana"])?;
//! assert_eq!(catalog.route_names(&route), ["sarcofago", "mummia", "collana"]);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | `model` | `Exhibit`, `Descriptions`, `Tone`, `Pace`, `SlotId`, `Route`, `Tour` |
//! | `catalog` | `ExhibitCatalog` and its `RelationGraph` |
//! | `registry` | `CatalogRegistry`, `SharedCatalog` |
//! | `export` | Document types and JSON encoding/decoding |
//! | `config` | `CatalogConfig` and its policies |

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod config;
pub mod catalog;
pub mod registry;
pub mod export;

// ============================================================================
// Re-exports
// ============================================================================

pub use model::{
    Exhibit, Descriptions, DescriptionRows, SlotId, Tone, Pace,
    Route, Tour,
};

pub use config::{CatalogConfig, DuplicatePolicy, RoutePolicy};
pub use catalog::{ExhibitCatalog, ExhibitView, RelationGraph};
pub use registry::{CatalogRegistry, SharedCatalog};
pub use export::{RegistryDocument, MuseumDocument, ExhibitDocument};

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("No path from '{from}' to '{to}'")]
    Unreachable { from: String, to: String },

    #[error("Duplicate exhibit name: {0}")]
    DuplicateExhibit(String),

    #[error("Capacity exceeded: {got} slots needed, capacity is {capacity}")]
    CapacityExceeded { capacity: usize, got: usize },

    #[error("Duplicate tour: {0}")]
    DuplicateTour(String),

    #[error("Invalid tour: {0}")]
    InvalidTour(String),

    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
