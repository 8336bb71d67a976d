//! # Exhibit Catalog
//!
//! One museum's exhibits: a fixed number of slots, a name index over the
//! populated ones, and the relation graph used for tour routing.
//!
//! ## Phases
//!
//! Structure is frozen at construction: capacity, slot order and the
//! name → slot mapping never change. Content stays mutable for the life of
//! the catalog: descriptions, graph edges and saved tours.
//!
//! ## Lookups
//!
//! Every name-based operation resolves through [`ExhibitCatalog::slot`] and
//! fails with [`Error::NotFound`] on a miss. The single exception is
//! [`ExhibitCatalog::set_description`], which tolerates unknown names so
//! data entry can run ahead of the fixture set.

pub mod graph;

use hashbrown::HashMap;
use tracing::{debug, warn};

use crate::config::{CatalogConfig, DuplicatePolicy, RoutePolicy};
use crate::export::{ExhibitDocument, MuseumDocument};
use crate::model::*;
use crate::{Error, Result};

pub use graph::RelationGraph;

// ============================================================================
// ExhibitCatalog
// ============================================================================

/// Fixed-capacity exhibit store with an undirected relation graph.
#[derive(Debug, Clone)]
pub struct ExhibitCatalog {
    name: String,
    city: String,
    slots: Vec<Exhibit>,
    /// exhibit name → slot (placeholders are never indexed)
    index: HashMap<String, SlotId>,
    graph: RelationGraph,
    tours: Vec<Tour>,
    routing: RoutePolicy,
}

/// Read view of one populated slot.
#[derive(Debug, Clone, PartialEq)]
pub struct ExhibitView<'a> {
    pub slot: SlotId,
    pub name: &'a str,
    pub room: &'a str,
    pub neighbors: Vec<&'a str>,
    pub descriptions: &'a Descriptions,
}

impl ExhibitCatalog {
    /// Build a catalog from an ordered exhibit array using default settings.
    ///
    /// Capacity equals the array length. Duplicate names resolve to the last
    /// slot carrying them.
    pub fn new(
        name: impl Into<String>,
        city: impl Into<String>,
        exhibits: impl IntoIterator<Item = Exhibit>,
    ) -> Self {
        let slots: Vec<Exhibit> = exhibits.into_iter().collect();
        let (index, shadowed) = build_index(&slots);
        warn_shadowed(&slots, &shadowed);
        Self::assemble(name.into(), city.into(), slots, index, RoutePolicy::default())
    }

    /// Build a catalog under an explicit configuration.
    pub fn with_config(
        name: impl Into<String>,
        city: impl Into<String>,
        exhibits: impl IntoIterator<Item = Exhibit>,
        config: &CatalogConfig,
    ) -> Result<Self> {
        let mut slots: Vec<Exhibit> = exhibits.into_iter().collect();
        if let Some(capacity) = config.capacity {
            if slots.len() > capacity {
                return Err(Error::CapacityExceeded { capacity, got: slots.len() });
            }
            slots.resize_with(capacity, Exhibit::placeholder);
        }
        let (index, shadowed) = build_index(&slots);
        match (config.duplicates, shadowed.first()) {
            (DuplicatePolicy::Reject, Some(&slot)) => {
                return Err(Error::DuplicateExhibit(slots[slot.0].name.clone()));
            }
            _ => warn_shadowed(&slots, &shadowed),
        }
        Ok(Self::assemble(name.into(), city.into(), slots, index, config.routing))
    }

    fn assemble(
        name: String,
        city: String,
        slots: Vec<Exhibit>,
        index: HashMap<String, SlotId>,
        routing: RoutePolicy,
    ) -> Self {
        debug!(museum = %name, capacity = slots.len(), populated = index.len(), "catalog built");
        Self {
            graph: RelationGraph::new(slots.len()),
            name,
            city,
            slots,
            index,
            tours: Vec::new(),
            routing,
        }
    }

    // ========================================================================
    // Structure
    // ========================================================================

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    /// Total number of slots, placeholders included.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of exhibits reachable by name.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn routing(&self) -> RoutePolicy {
        self.routing
    }

    pub fn graph(&self) -> &RelationGraph {
        &self.graph
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Resolve an exhibit name to its slot.
    pub fn slot(&self, name: &str) -> Result<SlotId> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| Error::NotFound(format!("Exhibit '{name}' in museum '{}'", self.name)))
    }

    /// Name stored in `slot`, or `None` for placeholders and out-of-range slots.
    pub fn name_of(&self, slot: SlotId) -> Option<&str> {
        self.slots
            .get(slot.0)
            .filter(|e| !e.is_placeholder())
            .map(|e| e.name.as_str())
    }

    /// Populated slots in slot order.
    pub fn exhibits(&self) -> impl Iterator<Item = (SlotId, &Exhibit)> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, e)| !e.is_placeholder())
            .map(|(i, e)| (SlotId(i), e))
    }

    pub fn exhibit(&self, name: &str) -> Result<ExhibitView<'_>> {
        let slot = self.slot(name)?;
        let exhibit = &self.slots[slot.0];
        Ok(ExhibitView {
            slot,
            name: &exhibit.name,
            room: &exhibit.room,
            neighbors: self.populated_neighbors(slot),
            descriptions: &exhibit.descriptions,
        })
    }

    /// Names of the populated exhibits adjacent to `name`.
    pub fn neighbors(&self, name: &str) -> Result<Vec<&str>> {
        Ok(self.populated_neighbors(self.slot(name)?))
    }

    fn populated_neighbors(&self, slot: SlotId) -> Vec<&str> {
        self.graph
            .neighbors(slot)
            .iter()
            .filter_map(|&n| self.name_of(n))
            .collect()
    }

    // ========================================================================
    // Relation graph
    // ========================================================================

    /// Relate two exhibits for touring purposes. Connecting an already
    /// related pair is a no-op.
    pub fn connect(&mut self, a: &str, b: &str) -> Result<()> {
        let sa = self.slot(a)?;
        let sb = self.slot(b)?;
        if self.graph.add_edge(sa, sb) {
            debug!(museum = %self.name, a, b, "exhibits connected");
        }
        Ok(())
    }

    /// Relate two populated slots directly.
    pub fn connect_slots(&mut self, a: SlotId, b: SlotId) -> Result<()> {
        for slot in [a, b] {
            if self.name_of(slot).is_none() {
                return Err(Error::NotFound(format!("Slot {slot} in museum '{}'", self.name)));
            }
        }
        self.graph.add_edge(a, b);
        Ok(())
    }

    // ========================================================================
    // Descriptions
    // ========================================================================

    /// Description text for `name`; unauthored cells read as `""`.
    pub fn description(&self, name: &str, tone: Tone, pace: Pace) -> Result<&str> {
        Ok(self.description_cell(name, tone, pace)?.unwrap_or_default())
    }

    /// Description cell for `name`, `None` when never authored.
    pub fn description_cell(&self, name: &str, tone: Tone, pace: Pace) -> Result<Option<&str>> {
        let slot = self.slot(name)?;
        Ok(self.slots[slot.0].descriptions.get(tone, pace))
    }

    /// Overwrite a description cell.
    ///
    /// Unknown names are ignored rather than reported; the return value
    /// tells whether a cell was written.
    pub fn set_description(&mut self, name: &str, tone: Tone, pace: Pace, text: impl Into<String>) -> bool {
        match self.index.get(name) {
            Some(&slot) => {
                self.slots[slot.0].descriptions.set(tone, pace, text);
                true
            }
            None => {
                debug!(museum = %self.name, exhibit = name, "description write ignored: unknown exhibit");
                false
            }
        }
    }

    /// Reset a description cell to unauthored. Same tolerance as
    /// [`set_description`](Self::set_description).
    pub fn clear_description(&mut self, name: &str, tone: Tone, pace: Pace) -> bool {
        match self.index.get(name) {
            Some(&slot) => {
                self.slots[slot.0].descriptions.clear(tone, pace);
                true
            }
            None => false,
        }
    }

    // ========================================================================
    // Routing
    // ========================================================================

    /// Fewest-hop walk between two exhibits.
    ///
    /// `[slot(a)]` when `a == b`; an empty route when they sit in different
    /// components of the relation graph.
    pub fn shortest_path(&self, a: &str, b: &str) -> Result<Route> {
        let route = self.graph.bfs(self.slot(a)?, self.slot(b)?);
        debug!(museum = %self.name, from = a, to = b, stops = route.len(), "shortest path");
        Ok(route)
    }

    /// Stitch shortest paths through `waypoints` in order, using the
    /// catalog's [`RoutePolicy`].
    pub fn route_through<S: AsRef<str>>(&self, waypoints: &[S]) -> Result<Route> {
        self.route_through_with(waypoints, self.routing)
    }

    /// Stitch shortest paths through `waypoints` in order.
    ///
    /// Every waypoint must exist. Fewer than two waypoints yield an empty
    /// route. Junction slots appear once.
    pub fn route_through_with<S: AsRef<str>>(&self, waypoints: &[S], policy: RoutePolicy) -> Result<Route> {
        let stops = waypoints
            .iter()
            .map(|w| self.slot(w.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        let mut route = Route::empty();
        if stops.len() < 2 {
            return Ok(route);
        }

        for (i, pair) in stops.windows(2).enumerate() {
            let segment = self.graph.bfs(pair[0], pair[1]);
            if segment.is_empty() {
                let from = waypoints[i].as_ref();
                let to = waypoints[i + 1].as_ref();
                match policy {
                    RoutePolicy::Abort => {
                        return Err(Error::Unreachable { from: from.to_string(), to: to.to_string() });
                    }
                    RoutePolicy::SkipUnreachable => {
                        warn!(museum = %self.name, from, to, "route segment unreachable, skipped");
                        continue;
                    }
                }
            }
            route.stitch(segment);
        }
        Ok(route)
    }

    /// Exhibit names along `route`. Slots without a name are skipped.
    pub fn route_names(&self, route: &Route) -> Vec<&str> {
        route.stops().iter().filter_map(|&s| self.name_of(s)).collect()
    }

    // ========================================================================
    // Saved tours
    // ========================================================================

    /// Save a named tour. Every waypoint must name an existing exhibit.
    pub fn add_tour(&mut self, name: impl Into<String>, waypoints: impl IntoIterator<Item = impl Into<String>>) -> Result<()> {
        let tour = Tour::new(name, waypoints);
        if tour.name.is_empty() {
            return Err(Error::InvalidTour("tour name must not be empty".into()));
        }
        if tour.waypoints.is_empty() {
            return Err(Error::InvalidTour(format!("tour '{}' has no waypoints", tour.name)));
        }
        if self.tours.iter().any(|t| t.name == tour.name) {
            return Err(Error::DuplicateTour(tour.name));
        }
        for waypoint in &tour.waypoints {
            self.slot(waypoint)?;
        }
        debug!(museum = %self.name, tour = %tour.name, stops = tour.waypoints.len(), "tour saved");
        self.tours.push(tour);
        Ok(())
    }

    pub fn tour(&self, name: &str) -> Result<&Tour> {
        self.tours
            .iter()
            .find(|t| t.name == name)
            .ok_or_else(|| Error::NotFound(format!("Tour '{name}' in museum '{}'", self.name)))
    }

    pub fn tours(&self) -> &[Tour] {
        &self.tours
    }

    pub fn remove_tour(&mut self, name: &str) -> Result<Tour> {
        let pos = self
            .tours
            .iter()
            .position(|t| t.name == name)
            .ok_or_else(|| Error::NotFound(format!("Tour '{name}' in museum '{}'", self.name)))?;
        Ok(self.tours.remove(pos))
    }

    /// Compute the walk for a saved tour.
    pub fn plan_tour(&self, name: &str) -> Result<Route> {
        self.route_through(&self.tour(name)?.waypoints)
    }

    // ========================================================================
    // Export
    // ========================================================================

    /// Structural document over the populated slots.
    pub fn export(&self) -> MuseumDocument {
        let exhibits = self
            .exhibits()
            .map(|(slot, e)| ExhibitDocument {
                index: slot.0,
                name: e.name.clone(),
                room: e.room.clone(),
                connected: self.populated_neighbors(slot).into_iter().map(String::from).collect(),
                descriptions: e.descriptions.to_rows(),
            })
            .collect();

        MuseumDocument {
            name: self.name.clone(),
            city: self.city.clone(),
            exhibits,
            tours: self.tours.clone(),
        }
    }
}

/// Map populated names to slots. Also returns the slots whose name was
/// taken over by a later slot.
fn build_index(slots: &[Exhibit]) -> (HashMap<String, SlotId>, Vec<SlotId>) {
    let mut index = HashMap::with_capacity(slots.len());
    let mut shadowed = Vec::new();
    for (i, exhibit) in slots.iter().enumerate() {
        if exhibit.is_placeholder() {
            continue;
        }
        if let Some(prev) = index.insert(exhibit.name.clone(), SlotId(i)) {
            shadowed.push(prev);
        }
    }
    (index, shadowed)
}

fn warn_shadowed(slots: &[Exhibit], shadowed: &[SlotId]) {
    for slot in shadowed {
        warn!(exhibit = %slots[slot.0].name, slot = slot.0, "duplicate exhibit name, slot unreachable by name");
    }
}

// ============================================================================
// Tests
// ============================================================================
