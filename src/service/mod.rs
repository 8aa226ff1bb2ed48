pub mod models;

use std::io::{self, Write};

use serde_json::Value;
use thiserror::Error;
use tracing::info;

use crate::{
    catalogue::{self, Catalogue},
    json,
    render::{self, MapRenderer},
    router::{self, TransitRouter, itinerary::RouteItem},
    service::models::{BaseRequest, BatchInput, StatRequest},
    shared::geo::Coordinate,
};

#[derive(Error, Debug)]
pub enum Error {
    #[error("malformed input document: {0}")]
    Parse(serde_json::Error),
    #[error("input document does not match the batch schema: {0}")]
    Schema(serde_json::Error),
    #[error(transparent)]
    Catalogue(#[from] catalogue::Error),
    #[error("invalid render settings: {0}")]
    RenderSettings(#[from] render::Error),
    #[error("invalid routing settings: {0}")]
    RoutingSettings(#[from] router::Error),
    #[error(transparent)]
    Builder(#[from] json::Error),
    #[error("failed to write the answer document: {0}")]
    Io(#[from] io::Error),
}

/// Runs one batch: parses `input`, builds the catalogue and the derived
/// structures, and writes the answer array to `output`.
pub fn run(input: &str, output: &mut impl Write) -> Result<(), self::Error> {
    let answers = process(input)?;
    serde_json::to_writer_pretty(&mut *output, &answers)
        .map_err(|err| self::Error::Io(io::Error::other(err)))?;
    output.write_all(b"\n")?;
    Ok(())
}

/// Parses and answers a batch, returning the answer array as a JSON value.
pub fn process(input: &str) -> Result<Value, self::Error> {
    let document: Value = serde_json::from_str(input).map_err(self::Error::Parse)?;
    let batch: BatchInput = serde_json::from_value(document).map_err(self::Error::Schema)?;

    let catalogue = build_catalogue(&batch)?;
    batch.render_settings.validate()?;
    batch.routing_settings.validate()?;

    let router = TransitRouter::new(&catalogue, batch.routing_settings);
    let map = MapRenderer::new(&catalogue, &batch.render_settings).render();

    answer_requests(&batch.stat_requests, &catalogue, &router, &map)
}

/// Ingest phases in dependency order: stops first, then distances, then
/// routes. Distances and routes both resolve stop names against the
/// finished stop set.
fn build_catalogue(batch: &BatchInput) -> Result<Catalogue, self::Error> {
    let mut catalogue = Catalogue::new();
    for request in &batch.base_requests {
        if let BaseRequest::Stop(stop) = request {
            catalogue.add_stop(&stop.name, Coordinate::new(stop.latitude, stop.longitude));
        }
    }
    for request in &batch.base_requests {
        if let BaseRequest::Stop(stop) = request {
            for (neighbor, meters) in &stop.road_distances {
                catalogue.set_distance(&stop.name, neighbor, *meters)?;
            }
        }
    }
    for request in &batch.base_requests {
        if let BaseRequest::Bus(bus) = request {
            catalogue.add_route(&bus.name, &bus.stops, bus.is_roundtrip)?;
        }
    }
    info!(
        stops = catalogue.stops().len(),
        routes = catalogue.routes().len(),
        "catalogue built"
    );
    Ok(catalogue)
}

fn answer_requests(
    requests: &[StatRequest],
    catalogue: &Catalogue,
    router: &TransitRouter,
    map: &str,
) -> Result<Value, self::Error> {
    let mut builder = json::Builder::new();
    builder.start_array()?;
    for request in requests {
        match request {
            StatRequest::Bus { id, name } => answer_bus(&mut builder, catalogue, *id, name)?,
            StatRequest::Stop { id, name } => answer_stop(&mut builder, catalogue, *id, name)?,
            StatRequest::Map { id } => answer_map(&mut builder, *id, map)?,
            StatRequest::Route { id, from, to } => {
                answer_route(&mut builder, router, *id, from, to)?
            }
        }
    }
    builder.end_array()?;
    Ok(builder.build()?)
}

fn answer_bus(
    builder: &mut json::Builder,
    catalogue: &Catalogue,
    id: i64,
    name: &str,
) -> Result<(), json::Error> {
    builder.start_dict()?.key("request_id")?.value(id)?;
    match catalogue.route_stats(name) {
        Some(stats) => {
            builder
                .key("curvature")?
                .value(stats.curvature)?
                .key("route_length")?
                .value(stats.road_length)?
                .key("stop_count")?
                .value(stats.stops_count as i64)?
                .key("unique_stop_count")?
                .value(stats.unique_stops_count as i64)?;
        }
        None => {
            builder.key("error_message")?.value("not found")?;
        }
    }
    builder.end_dict()?;
    Ok(())
}

fn answer_stop(
    builder: &mut json::Builder,
    catalogue: &Catalogue,
    id: i64,
    name: &str,
) -> Result<(), json::Error> {
    builder.start_dict()?.key("request_id")?.value(id)?;
    match catalogue.routes_at(name) {
        Some(routes) => {
            builder.key("buses")?.start_array()?;
            for route in routes {
                builder.value(route.as_ref())?;
            }
            builder.end_array()?;
        }
        None => {
            builder.key("error_message")?.value("not found")?;
        }
    }
    builder.end_dict()?;
    Ok(())
}

fn answer_map(builder: &mut json::Builder, id: i64, map: &str) -> Result<(), json::Error> {
    builder
        .start_dict()?
        .key("request_id")?
        .value(id)?
        .key("map")?
        .value(map)?
        .end_dict()?;
    Ok(())
}

fn answer_route(
    builder: &mut json::Builder,
    router: &TransitRouter,
    id: i64,
    from: &str,
    to: &str,
) -> Result<(), json::Error> {
    builder.start_dict()?.key("request_id")?.value(id)?;
    match router.find_route(from, to) {
        Some(itinerary) => {
            builder
                .key("total_time")?
                .value(itinerary.total_time)?
                .key("items")?
                .start_array()?;
            for item in &itinerary.items {
                builder.start_dict()?;
                match item {
                    RouteItem::Wait { stop_name, time } => {
                        builder
                            .key("type")?
                            .value("Wait")?
                            .key("stop_name")?
                            .value(stop_name.as_ref())?
                            .key("time")?
                            .value(*time)?;
                    }
                    RouteItem::Ride {
                        bus,
                        span_count,
                        time,
                    } => {
                        builder
                            .key("type")?
                            .value("Bus")?
                            .key("bus")?
                            .value(bus.as_ref())?
                            .key("span_count")?
                            .value(i64::from(*span_count))?
                            .key("time")?
                            .value(*time)?;
                    }
                }
                builder.end_dict()?;
            }
            builder.end_array()?;
        }
        None => {
            builder.key("error_message")?.value("not found")?;
        }
    }
    builder.end_dict()?;
    Ok(())
}
