mod entities;
mod stats;

pub use entities::*;
pub use stats::*;

use std::{
    collections::{BTreeSet, HashMap},
    sync::Arc,
};

use thiserror::Error;
use tracing::debug;

use crate::shared::geo::Coordinate;

#[derive(Error, Debug)]
pub enum Error {
    #[error("route {route} has no stops")]
    EmptyRoute { route: String },
    #[error("route {route} references unknown stop {stop}")]
    UnknownRouteStop { route: String, stop: String },
    #[error("road distance between {from} and {to} references an unknown stop")]
    UnknownDistanceStop { from: String, to: String },
}

/// The in-memory relational store of the transit network.
///
/// Stops and routes live in insertion-ordered arenas and are addressed by
/// their `u32` ordinal everywhere else; names resolve through primary-key
/// lookups. The catalogue is mutable during ingest and read-only for the
/// rest of the run.
#[derive(Debug, Default)]
pub struct Catalogue {
    stops: Vec<Stop>,
    routes: Vec<Route>,

    /// Maps a unique stop name to its ordinal in `stops`.
    stop_lookup: HashMap<Arc<str>, u32>,
    /// Maps a unique route name to its ordinal in `routes`.
    route_lookup: HashMap<Arc<str>, u32>,
    /// Index mapping: stop ordinal -> sorted set of route names serving it.
    stop_to_routes: HashMap<u32, BTreeSet<Arc<str>>>,
    /// Declared directed road distances in meters. The symmetric default is
    /// a read-time fallback in [`Catalogue::distance`], so declaration
    /// order never matters.
    distances: HashMap<(u32, u32), u32>,
}

impl Catalogue {
    pub fn new() -> Self {
        Default::default()
    }

    /// Inserts a stop and returns its ordinal.
    ///
    /// A repeated name keeps its ordinal and takes the new coordinate, so
    /// references handed out earlier stay valid.
    pub fn add_stop(&mut self, name: &str, coordinate: Coordinate) -> u32 {
        if let Some(&index) = self.stop_lookup.get(name) {
            self.stops[index as usize].coordinate = coordinate;
            return index;
        }
        let index = self.stops.len() as u32;
        let name: Arc<str> = name.into();
        self.stops.push(Stop {
            index,
            name: name.clone(),
            coordinate,
        });
        self.stop_lookup.insert(name, index);
        index
    }

    /// Resolves `stop_names` and stores the route, expanding an
    /// out-and-back line to its full there-and-back sequence.
    pub fn add_route(
        &mut self,
        name: &str,
        stop_names: &[String],
        is_roundtrip: bool,
    ) -> Result<u32, self::Error> {
        if stop_names.is_empty() {
            return Err(self::Error::EmptyRoute {
                route: name.to_string(),
            });
        }

        let mut sequence = Vec::with_capacity(if is_roundtrip {
            stop_names.len()
        } else {
            stop_names.len() * 2 - 1
        });
        for stop_name in stop_names {
            let stop_index = self
                .stop_lookup
                .get(stop_name.as_str())
                .copied()
                .ok_or_else(|| self::Error::UnknownRouteStop {
                    route: name.to_string(),
                    stop: stop_name.clone(),
                })?;
            sequence.push(stop_index);
        }
        let terminal = *sequence.last().expect("sequence is non-empty");
        if !is_roundtrip {
            let mirror: Vec<u32> = sequence.iter().rev().skip(1).copied().collect();
            sequence.extend(mirror);
        }

        let index = match self.route_lookup.get(name) {
            Some(&index) => {
                // Repeated declaration: the payload is replaced, the
                // ordinal and name stay. Drop the stale memberships first.
                let previous = std::mem::take(&mut self.routes[index as usize].stops);
                let route_name = self.routes[index as usize].name.clone();
                for stop_index in previous {
                    if let Some(routes) = self.stop_to_routes.get_mut(&stop_index) {
                        routes.remove(&route_name);
                    }
                }
                let route = &mut self.routes[index as usize];
                route.stops = sequence.clone();
                route.is_roundtrip = is_roundtrip;
                route.terminal = terminal;
                index
            }
            None => {
                let index = self.routes.len() as u32;
                let name: Arc<str> = name.into();
                self.routes.push(Route {
                    index,
                    name: name.clone(),
                    stops: sequence.clone(),
                    is_roundtrip,
                    terminal,
                });
                self.route_lookup.insert(name, index);
                index
            }
        };

        let route_name = self.routes[index as usize].name.clone();
        for stop_index in sequence {
            self.stop_to_routes
                .entry(stop_index)
                .or_default()
                .insert(route_name.clone());
        }
        debug!(route = %route_name, stops = self.routes[index as usize].stops.len(), "route stored");
        Ok(index)
    }

    /// Records the directed road distance between two known stops.
    pub fn set_distance(&mut self, from: &str, to: &str, meters: u32) -> Result<(), self::Error> {
        let unknown = || self::Error::UnknownDistanceStop {
            from: from.to_string(),
            to: to.to_string(),
        };
        let from_index = *self.stop_lookup.get(from).ok_or_else(unknown)?;
        let to_index = *self.stop_lookup.get(to).ok_or_else(unknown)?;
        self.distances.insert((from_index, to_index), meters);
        Ok(())
    }

    /// Road distance in meters from one stop ordinal to another.
    ///
    /// Falls back to the opposite direction when only that one was
    /// declared, and to 0 when neither was.
    pub fn distance(&self, from: u32, to: u32) -> u32 {
        self.distances
            .get(&(from, to))
            .or_else(|| self.distances.get(&(to, from)))
            .copied()
            .unwrap_or(0)
    }

    pub fn find_stop(&self, name: &str) -> Option<&Stop> {
        let index = self.stop_lookup.get(name)?;
        Some(&self.stops[*index as usize])
    }

    pub fn find_route(&self, name: &str) -> Option<&Route> {
        let index = self.route_lookup.get(name)?;
        Some(&self.routes[*index as usize])
    }

    /// The stop with ordinal `index`.
    pub fn stop(&self, index: u32) -> &Stop {
        &self.stops[index as usize]
    }

    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Sorted unique names of the routes serving a stop.
    ///
    /// `None` when the stop itself is unknown; an empty list when it is
    /// known but no route visits it.
    pub fn routes_at(&self, stop_name: &str) -> Option<Vec<Arc<str>>> {
        let index = self.stop_lookup.get(stop_name)?;
        Some(
            self.stop_to_routes
                .get(index)
                .map(|routes| routes.iter().cloned().collect())
                .unwrap_or_default(),
        )
    }
}
