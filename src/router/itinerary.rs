use std::sync::Arc;

use crate::router::graph::{DirectedWeightedGraph, EdgeId};

/// One element of a reconstructed journey.
#[derive(Debug, Clone, PartialEq)]
pub enum RouteItem {
    /// Waiting at a stop for the next boarding.
    Wait { stop_name: Arc<str>, time: f64 },
    /// Riding one bus across `span_count` consecutive legs.
    Ride {
        bus: Arc<str>,
        span_count: u32,
        time: f64,
    },
}

impl RouteItem {
    pub fn time(&self) -> f64 {
        match self {
            RouteItem::Wait { time, .. } | RouteItem::Ride { time, .. } => *time,
        }
    }
}

/// A shortest-time journey between two stops. Item times always sum to
/// `total_time`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Itinerary {
    pub total_time: f64,
    pub items: Vec<RouteItem>,
}

impl Itinerary {
    pub(crate) fn from_edges(
        graph: &DirectedWeightedGraph,
        total_time: f64,
        edges: &[EdgeId],
    ) -> Self {
        let items = edges
            .iter()
            .map(|&id| {
                let edge = graph.edge(id);
                if edge.span_count == 0 {
                    RouteItem::Wait {
                        stop_name: edge.name.clone(),
                        time: edge.weight,
                    }
                } else {
                    RouteItem::Ride {
                        bus: edge.name.clone(),
                        span_count: edge.span_count,
                        time: edge.weight,
                    }
                }
            })
            .collect();
        Self { total_time, items }
    }
}
