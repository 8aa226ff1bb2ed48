use std::collections::HashSet;

use crate::{catalogue::Catalogue, shared::geo::Distance};

/// Aggregates over a route's expanded stop sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteStats {
    /// Length of the stored (expanded) sequence.
    pub stops_count: usize,
    /// Number of distinct stops in that sequence.
    pub unique_stops_count: usize,
    /// Sum of directed road distances over consecutive pairs, in meters.
    pub road_length: f64,
    /// Ratio of road length to great-circle length over the same pairs.
    /// 0.0 when the sequence never leaves one coordinate.
    pub curvature: f64,
}

impl Catalogue {
    /// Computes [`RouteStats`] for the named route, or `None` if the route
    /// is unknown.
    pub fn route_stats(&self, name: &str) -> Option<RouteStats> {
        let route = self.find_route(name)?;

        let stops_count = route.stops.len();
        let unique_stops_count = route.stops.iter().collect::<HashSet<_>>().len();

        let mut road_length = 0.0;
        let mut geodesic_length = Distance::default();
        for pair in route.stops.windows(2) {
            road_length += self.distance(pair[0], pair[1]) as f64;
            let from = self.stop(pair[0]).coordinate;
            let to = self.stop(pair[1]).coordinate;
            geodesic_length = geodesic_length + from.geodesic_distance(&to);
        }

        let curvature = if geodesic_length.as_meters() > 0.0 {
            road_length / geodesic_length.as_meters()
        } else {
            0.0
        };

        Some(RouteStats {
            stops_count,
            unique_stops_count,
            road_length,
            curvature,
        })
    }
}
