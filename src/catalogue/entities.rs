use std::sync::Arc;

use crate::shared::geo::Coordinate;

/// A named point where passengers can board or alight.
#[derive(Debug, Clone)]
pub struct Stop {
    /// The ordinal of the stop in catalogue insertion order, used for O(1)
    /// array lookups and as the graph vertex base.
    pub index: u32,
    /// Unique name; the identity of the stop.
    pub name: Arc<str>,
    pub coordinate: Coordinate,
}

/// A named service traversing an ordered sequence of stops.
#[derive(Debug, Clone)]
pub struct Route {
    /// The ordinal of the route in catalogue insertion order.
    pub index: u32,
    /// Unique name; the identity of the route.
    pub name: Arc<str>,
    /// Stop ordinals in travel order. For an out-and-back line this is the
    /// declared sequence followed by its mirror, so the stored sequence
    /// always reads start to start.
    pub stops: Vec<u32>,
    /// Whether the declared sequence is a closed loop.
    pub is_roundtrip: bool,
    /// Ordinal of the declared terminal, the last stop as written.
    pub terminal: u32,
}
