pub mod graph;
pub mod itinerary;

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::{
    catalogue::Catalogue,
    router::{
        graph::{DirectedWeightedGraph, Edge, VertexId},
        itinerary::Itinerary,
    },
};

#[derive(Error, Debug)]
pub enum Error {
    #[error("bus_wait_time must be positive")]
    InvalidWaitTime,
    #[error("bus_velocity must be positive")]
    InvalidVelocity,
}

/// The fixed wait-time / vehicle-speed travel model.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RoutingSettings {
    /// Minutes spent waiting at a stop before every boarding.
    pub bus_wait_time: u32,
    /// Vehicle speed in km/h.
    pub bus_velocity: f64,
}

impl RoutingSettings {
    pub fn validate(&self) -> Result<(), self::Error> {
        if self.bus_wait_time == 0 {
            return Err(self::Error::InvalidWaitTime);
        }
        if !(self.bus_velocity > 0.0) {
            return Err(self::Error::InvalidVelocity);
        }
        Ok(())
    }

    fn meters_per_minute(&self) -> f64 {
        self.bus_velocity * 1000.0 / 60.0
    }
}

/// Answers point-to-point queries over the transit graph.
///
/// Every stop owns two vertices: `2k` models queueing at the stop and
/// `2k + 1` being aboard a vehicle leaving it. A single wait edge
/// `2k -> 2k + 1` carries the boarding cost, so one shortest-path run
/// prices waits and rides together. Riding one bus across several legs is
/// a single edge whose span count remembers how many stops it covers.
pub struct TransitRouter<'a> {
    catalogue: &'a Catalogue,
    graph: DirectedWeightedGraph,
}

impl<'a> TransitRouter<'a> {
    pub fn new(catalogue: &'a Catalogue, settings: RoutingSettings) -> Self {
        let mut graph = DirectedWeightedGraph::new(catalogue.stops().len() * 2);

        for stop in catalogue.stops() {
            graph.add_edge(Edge {
                from: queue_vertex(stop.index),
                to: transit_vertex(stop.index),
                weight: f64::from(settings.bus_wait_time),
                name: stop.name.clone(),
                span_count: 0,
            });
        }

        let meters_per_minute = settings.meters_per_minute();
        for route in catalogue.routes() {
            let stops = &route.stops;
            for i in 0..stops.len() {
                let mut forward = 0.0;
                let mut backward = 0.0;
                for j in i + 1..stops.len() {
                    forward += f64::from(catalogue.distance(stops[j - 1], stops[j]));
                    backward += f64::from(catalogue.distance(stops[j], stops[j - 1]));
                    let span_count = (j - i) as u32;

                    graph.add_edge(Edge {
                        from: transit_vertex(stops[i]),
                        to: queue_vertex(stops[j]),
                        weight: forward / meters_per_minute,
                        name: route.name.clone(),
                        span_count,
                    });
                    if !route.is_roundtrip {
                        graph.add_edge(Edge {
                            from: transit_vertex(stops[j]),
                            to: queue_vertex(stops[i]),
                            weight: backward / meters_per_minute,
                            name: route.name.clone(),
                            span_count,
                        });
                    }
                }
            }
        }

        info!(
            vertices = graph.vertex_count(),
            edges = graph.edge_count(),
            "transit graph built"
        );
        Self { catalogue, graph }
    }

    /// Shortest-time itinerary from one stop to another.
    ///
    /// `None` when either stop is unknown or no connection exists. Equal
    /// stops yield an empty itinerary with a total time of zero.
    pub fn find_route(&self, from: &str, to: &str) -> Option<Itinerary> {
        let from = self.catalogue.find_stop(from)?;
        let to = self.catalogue.find_stop(to)?;
        let (total_time, edges) = self
            .graph
            .shortest_path(queue_vertex(from.index), queue_vertex(to.index))?;
        Some(Itinerary::from_edges(&self.graph, total_time, &edges))
    }
}

const fn queue_vertex(stop: u32) -> VertexId {
    stop as usize * 2
}

const fn transit_vertex(stop: u32) -> VertexId {
    stop as usize * 2 + 1
}
