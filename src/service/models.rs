use std::collections::BTreeMap;

use serde::Deserialize;

use crate::{render::RenderSettings, router::RoutingSettings};

/// The batch document read from the input stream.
#[derive(Debug, Deserialize)]
pub struct BatchInput {
    pub base_requests: Vec<BaseRequest>,
    pub render_settings: RenderSettings,
    pub routing_settings: RoutingSettings,
    pub stat_requests: Vec<StatRequest>,
}

/// A declaration in the build phase of the batch.
#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
pub enum BaseRequest {
    Stop(StopDeclaration),
    Bus(BusDeclaration),
}

#[derive(Debug, Deserialize)]
pub struct StopDeclaration {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Directed road distances to neighboring stops, in meters.
    pub road_distances: BTreeMap<String, u32>,
}

#[derive(Debug, Deserialize)]
pub struct BusDeclaration {
    pub name: String,
    pub stops: Vec<String>,
    pub is_roundtrip: bool,
}

/// A query in the answer phase of the batch.
#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
pub enum StatRequest {
    Bus { id: i64, name: String },
    Stop { id: i64, name: String },
    Map { id: i64 },
    Route { id: i64, from: String, to: String },
}
