//! Document export — the structural form of catalogs and registries.
//!
//! Domain types are first lowered into plain serde documents, and only the
//! documents are handed to `serde_json`. The persistence sink on the other
//! side (a file, a document database) treats the result as opaque.
//!
//! ```text
//! ExhibitCatalog::export()       → MuseumDocument
//! CatalogRegistry::export_all()  → RegistryDocument { museums: [...] }
//!   → to_json() / write_json()   → sink
//! ```
//!
//! The reverse direction (`from_json`, `ExhibitCatalog::from_document`)
//! rebuilds catalogs from a previously exported document.

use std::io::Write;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::ExhibitCatalog;
use crate::config::CatalogConfig;
use crate::model::{DescriptionRows, Descriptions, Exhibit, SlotId, Tour};
use crate::{Error, Result};

// ============================================================================
// Documents
// ============================================================================

/// Every catalog of a registry, ordered by registry key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryDocument {
    pub museums: Vec<MuseumDocument>,
}

/// One catalog. Placeholder slots are absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MuseumDocument {
    pub name: String,
    pub city: String,
    pub exhibits: Vec<ExhibitDocument>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tours: Vec<Tour>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExhibitDocument {
    /// Slot the exhibit occupied in its catalog.
    pub index: usize,
    pub name: String,
    pub room: String,
    /// Populated neighbors, in edge insertion order.
    pub connected: Vec<String>,
    /// `[tone][pace]`
    pub descriptions: DescriptionRows,
}

impl RegistryDocument {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl MuseumDocument {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn exhibit(&self, name: &str) -> Option<&ExhibitDocument> {
        self.exhibits.iter().find(|e| e.name == name)
    }
}

// ============================================================================
// Encoding
// ============================================================================

/// Compact JSON encoding of a document.
pub fn to_json<T: Serialize>(doc: &T) -> Result<String> {
    Ok(serde_json::to_string(doc)?)
}

/// Indented JSON encoding of a document.
pub fn to_json_pretty<T: Serialize>(doc: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(doc)?)
}

/// Write a document as indented JSON followed by a newline.
pub fn write_json<T: Serialize>(doc: &T, writer: &mut dyn Write) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, doc)?;
    writeln!(writer)?;
    Ok(())
}

// ============================================================================
// Import
// ============================================================================

/// Largest slot count an import may allocate when no capacity is configured.
pub const MAX_IMPORT_SLOTS: usize = 1 << 16;

impl ExhibitCatalog {
    /// Rebuild a catalog from its exported document.
    ///
    /// Exhibits return to their recorded slots and the gaps become
    /// placeholders, so slot ids survive a round trip. Capacity is the
    /// configured one, or just enough to hold the highest index, up to
    /// [`MAX_IMPORT_SLOTS`].
    ///
    /// Edges are resolved against the document rather than the name index,
    /// so exhibits sharing a name keep their own neighbors.
    pub fn from_document(doc: &MuseumDocument, config: &CatalogConfig) -> Result<Self> {
        let mut needed = 0;
        for e in &doc.exhibits {
            let end = e.index.checked_add(1).ok_or_else(|| {
                Error::InvalidDocument(format!("museum '{}': exhibit '{}' has index {}", doc.name, e.name, e.index))
            })?;
            needed = needed.max(end);
        }
        let capacity = match config.capacity {
            Some(capacity) if needed > capacity => {
                return Err(Error::CapacityExceeded { capacity, got: needed });
            }
            Some(capacity) => capacity,
            None if needed > MAX_IMPORT_SLOTS => {
                return Err(Error::InvalidDocument(format!(
                    "museum '{}': {needed} slots exceeds the import limit of {MAX_IMPORT_SLOTS}",
                    doc.name
                )));
            }
            None => needed,
        };

        let mut slots = vec![Exhibit::placeholder(); capacity];
        for e in &doc.exhibits {
            if e.name.is_empty() {
                return Err(Error::InvalidDocument(format!(
                    "museum '{}': exhibit at index {} has an empty name",
                    doc.name, e.index
                )));
            }
            let slot = &mut slots[e.index];
            if !slot.is_placeholder() {
                return Err(Error::InvalidDocument(format!(
                    "museum '{}': index {} used by both '{}' and '{}'",
                    doc.name, e.index, slot.name, e.name
                )));
            }
            *slot = Exhibit {
                name: e.name.clone(),
                room: e.room.clone(),
                descriptions: Descriptions::from_rows(e.descriptions.clone()),
            };
        }

        let mut catalog = ExhibitCatalog::with_config(doc.name.clone(), doc.city.clone(), slots, config)?;

        let mut by_name: HashMap<&str, Vec<&ExhibitDocument>> = HashMap::new();
        for e in &doc.exhibits {
            by_name.entry(e.name.as_str()).or_default().push(e);
        }
        for e in &doc.exhibits {
            for other in &e.connected {
                let candidates = by_name.get(other.as_str()).ok_or_else(|| {
                    Error::NotFound(format!("Exhibit '{other}' in museum '{}'", doc.name))
                })?;
                // Among same-named candidates, only those listing `e` back are neighbors.
                let mutual: Vec<&ExhibitDocument> = candidates
                    .iter()
                    .copied()
                    .filter(|c| c.connected.iter().any(|n| *n == e.name))
                    .collect();
                let targets = if mutual.is_empty() { candidates } else { &mutual };
                for target in targets {
                    catalog.connect_slots(SlotId(e.index), SlotId(target.index))?;
                }
            }
        }
        for tour in &doc.tours {
            catalog.add_tour(tour.name.clone(), tour.waypoints.iter().cloned())?;
        }
        debug!(museum = %doc.name, exhibits = doc.exhibits.len(), edges = catalog.edge_count(), "catalog imported");
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Pace, Tone};

    fn sample() -> ExhibitCatalog {
        let exhibits = vec![
            Exhibit::new("statua", "sala A").with_description(Tone::Simple, Pace::Slow, "Una statua \"classica\""),
            Exhibit::placeholder(),
            Exhibit::new("dipinto", "sala B"),
        ];
        let mut c = ExhibitCatalog::new("Uffizi", "Firenze", exhibits);
        c.connect("statua", "dipinto").unwrap();
        c
    }

    #[test]
    fn test_json_shape() {
        let json = to_json(&sample().export()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["name"], "Uffizi");
        assert_eq!(value["city"], "Firenze");
        assert_eq!(value["exhibits"].as_array().unwrap().len(), 2);
        assert_eq!(value["exhibits"][1]["index"], 2);
        assert_eq!(value["exhibits"][1]["connected"][0], "statua");
        assert_eq!(value["exhibits"][0]["descriptions"][1][2], "Una statua \"classica\"");
        assert!(value.get("tours").is_none());
    }

    #[test]
    fn test_write_json_ends_with_newline() {
        let mut buf = Vec::new();
        write_json(&sample().export(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.ends_with("}\n"));
        assert_eq!(MuseumDocument::from_json(&text).unwrap(), sample().export());
    }

    #[test]
    fn test_import_keeps_slots() {
        let doc = sample().export();
        let back = ExhibitCatalog::from_document(&doc, &CatalogConfig::default()).unwrap();
        assert_eq!(back.capacity(), 3);
        assert_eq!(back.slot("dipinto").unwrap(), SlotId(2));
        assert_eq!(back.export(), doc);
    }

    #[test]
    fn test_import_rejects_index_collision() {
        let mut doc = sample().export();
        doc.exhibits[1].index = 0;
        let err = ExhibitCatalog::from_document(&doc, &CatalogConfig::default()).unwrap_err();
        assert!(matches!(err, Error::InvalidDocument(_)));
    }

    #[test]
    fn test_import_unknown_neighbor() {
        let mut doc = sample().export();
        doc.exhibits[0].connected.push("anfora".into());
        let err = ExhibitCatalog::from_document(&doc, &CatalogConfig::default()).unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn test_import_bad_matrix_shape() {
        let json = r#"{"name":"m","city":"c","exhibits":[
            {"index":0,"name":"a","room":"r","connected":[],"descriptions":[["x","y"]]}
        ]}"#;
        assert!(matches!(MuseumDocument::from_json(json), Err(Error::Serialization(_))));
    }

    #[test]
    fn test_import_rejects_overflowing_index() {
        let json = format!(
            r#"{{"name":"m","city":"c","exhibits":[
                {{"index":{},"name":"a","room":"r","connected":[],"descriptions":[["","",""],["","",""],["","",""],["","",""]]}}
            ]}}"#,
            usize::MAX
        );
        let doc = MuseumDocument::from_json(&json).unwrap();
        let err = ExhibitCatalog::from_document(&doc, &CatalogConfig::default()).unwrap_err();
        assert!(matches!(err, Error::InvalidDocument(_)));
        let err = ExhibitCatalog::from_document(&doc, &CatalogConfig::new().with_capacity(8)).unwrap_err();
        assert!(matches!(err, Error::InvalidDocument(_)));
    }

    #[test]
    fn test_import_rejects_huge_index() {
        let mut doc = sample().export();
        doc.exhibits[1].index = 1_000_000_000_000;
        let err = ExhibitCatalog::from_document(&doc, &CatalogConfig::default()).unwrap_err();
        assert!(matches!(err, Error::InvalidDocument(_)));

        let err = ExhibitCatalog::from_document(&doc, &CatalogConfig::new().with_capacity(8)).unwrap_err();
        assert!(matches!(err, Error::CapacityExceeded { capacity: 8, .. }));
    }

    #[test]
    fn test_import_at_slot_limit() {
        let mut doc = sample().export();
        doc.exhibits[1].index = MAX_IMPORT_SLOTS - 1;
        let back = ExhibitCatalog::from_document(&doc, &CatalogConfig::default()).unwrap();
        assert_eq!(back.capacity(), MAX_IMPORT_SLOTS);
        assert_eq!(back.slot("dipinto").unwrap(), SlotId(MAX_IMPORT_SLOTS - 1));
    }

    #[test]
    fn test_import_shared_name_keeps_edges() {
        // vaso@0 - x@2; vaso@1 is isolated.
        let mut c = ExhibitCatalog::new(
            "m",
            "c",
            vec![Exhibit::new("vaso", "r"), Exhibit::new("vaso", "r"), Exhibit::new("x", "r")],
        );
        c.connect_slots(SlotId(0), SlotId(2)).unwrap();
        let doc = c.export();

        let back = ExhibitCatalog::from_document(&doc, &CatalogConfig::default()).unwrap();
        assert_eq!(back.graph().neighbors(SlotId(2)), &[SlotId(0)]);
        assert!(back.graph().neighbors(SlotId(1)).is_empty());
        assert_eq!(back.edge_count(), 1);
        assert_eq!(back.export(), doc);
    }
}
