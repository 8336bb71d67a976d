//! # Catalog Model
//!
//! Plain data types shared by the catalog, the registry and the exported
//! documents. No I/O, no shared state.

pub mod exhibit;
pub mod route;
pub mod tour;

pub use exhibit::{Exhibit, Descriptions, DescriptionRows, SlotId, Tone, Pace};
pub use route::Route;
pub use tour::Tour;
