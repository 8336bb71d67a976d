//! Route — an ordered sequence of slots through the relation graph.

use serde::{Deserialize, Serialize};
use super::SlotId;

/// A walk through a catalog's relation graph, source first.
///
/// An empty route means "no path"; a single-slot route is the trivial path
/// from an exhibit to itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    stops: Vec<SlotId>,
}

impl Route {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn single(slot: SlotId) -> Self {
        Self { stops: vec![slot] }
    }

    pub fn from_stops(stops: Vec<SlotId>) -> Self {
        Self { stops }
    }

    pub fn stops(&self) -> &[SlotId] {
        &self.stops
    }

    /// Number of slots visited (not hops).
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Number of edges walked.
    pub fn hops(&self) -> usize {
        self.stops.len().saturating_sub(1)
    }

    pub fn start(&self) -> Option<SlotId> {
        self.stops.first().copied()
    }

    pub fn end(&self) -> Option<SlotId> {
        self.stops.last().copied()
    }

    /// Append a segment that starts where this route ends.
    ///
    /// The segment's first slot is dropped when both sides are non-empty so
    /// the junction appears once.
    pub fn stitch(&mut self, segment: Route) {
        let skip = usize::from(!self.stops.is_empty() && !segment.stops.is_empty());
        self.stops.extend(segment.stops.into_iter().skip(skip));
    }
}

impl IntoIterator for Route {
    type Item = SlotId;
    type IntoIter = std::vec::IntoIter<SlotId>;

    fn into_iter(self) -> Self::IntoIter {
        self.stops.into_iter()
    }
}

impl<'a> IntoIterator for &'a Route {
    type Item = &'a SlotId;
    type IntoIter = std::slice::Iter<'a, SlotId>;

    fn into_iter(self) -> Self::IntoIter {
        self.stops.iter()
    }
}
