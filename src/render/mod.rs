pub mod projector;
pub mod svg;

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::{
    catalogue::{Catalogue, Route, Stop},
    render::{
        projector::Projector,
        svg::{Circle, Color, Document, LineCap, LineJoin, Polyline, Text},
    },
};

#[derive(Error, Debug)]
pub enum Error {
    #[error("canvas dimensions must be positive")]
    InvalidCanvas,
    #[error("padding must satisfy 2 * padding < min(width, height)")]
    PaddingTooLarge,
    #[error("color palette must not be empty")]
    EmptyPalette,
}

/// Style settings for the map, straight from the batch document.
#[derive(Debug, Clone, Deserialize)]
pub struct RenderSettings {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
    pub line_width: f64,
    pub stop_radius: f64,
    pub bus_label_font_size: u32,
    pub bus_label_offset: (f64, f64),
    pub stop_label_font_size: u32,
    pub stop_label_offset: (f64, f64),
    pub underlayer_color: Color,
    pub underlayer_width: f64,
    pub color_palette: Vec<Color>,
}

impl RenderSettings {
    pub fn validate(&self) -> Result<(), self::Error> {
        if !(self.width > 0.0) || !(self.height > 0.0) {
            return Err(self::Error::InvalidCanvas);
        }
        if self.padding < 0.0 || self.padding * 2.0 >= self.width.min(self.height) {
            return Err(self::Error::PaddingTooLarge);
        }
        if self.color_palette.is_empty() {
            return Err(self::Error::EmptyPalette);
        }
        Ok(())
    }
}

/// Draws the network as a four-layer SVG document: route polylines, route
/// labels, stop circles, stop labels, in that z-order.
pub struct MapRenderer<'a> {
    catalogue: &'a Catalogue,
    settings: &'a RenderSettings,
}

impl<'a> MapRenderer<'a> {
    pub fn new(catalogue: &'a Catalogue, settings: &'a RenderSettings) -> Self {
        Self {
            catalogue,
            settings,
        }
    }

    pub fn render(&self) -> String {
        // Only stops on routes shape the bounding box.
        let projector = Projector::new(
            self.catalogue
                .routes()
                .iter()
                .flat_map(|route| route.stops.iter())
                .map(|&stop| self.catalogue.stop(stop).coordinate),
            self.settings.width,
            self.settings.height,
            self.settings.padding,
        );

        let mut routes: Vec<&Route> = self.catalogue.routes().iter().collect();
        routes.sort_by(|lhs, rhs| lhs.name.cmp(&rhs.name));

        let mut served_stops: Vec<&Stop> = self
            .catalogue
            .stops()
            .iter()
            .filter(|stop| {
                self.catalogue
                    .routes_at(&stop.name)
                    .is_some_and(|routes| !routes.is_empty())
            })
            .collect();
        served_stops.sort_by(|lhs, rhs| lhs.name.cmp(&rhs.name));

        let mut document = Document::new();
        self.draw_route_lines(&mut document, &projector, &routes);
        self.draw_route_labels(&mut document, &projector, &routes);
        self.draw_stop_circles(&mut document, &projector, &served_stops);
        self.draw_stop_labels(&mut document, &projector, &served_stops);
        debug!(
            routes = routes.len(),
            stops = served_stops.len(),
            "map layers composed"
        );
        document.render()
    }

    fn palette_color(&self, route_ordinal: usize) -> Color {
        self.settings.color_palette[route_ordinal % self.settings.color_palette.len()].clone()
    }

    fn draw_route_lines(&self, document: &mut Document, projector: &Projector, routes: &[&Route]) {
        for (i, route) in routes.iter().enumerate() {
            let mut line = Polyline::new()
                .fill(Color::none())
                .stroke(self.palette_color(i))
                .stroke_width(self.settings.line_width)
                .line_cap(LineCap::Round)
                .line_join(LineJoin::Round);
            for &stop in &route.stops {
                line = line.point(projector.project(self.catalogue.stop(stop).coordinate));
            }
            document.push(line);
        }
    }

    fn draw_route_labels(&self, document: &mut Document, projector: &Projector, routes: &[&Route]) {
        for (i, route) in routes.iter().enumerate() {
            let first = route.stops[0];
            let mut terminals = vec![first];
            if !route.is_roundtrip && route.terminal != first {
                terminals.push(route.terminal);
            }

            for stop in terminals {
                let position = projector.project(self.catalogue.stop(stop).coordinate);
                let label = Text::new()
                    .position(position)
                    .offset(
                        self.settings.bus_label_offset.0,
                        self.settings.bus_label_offset.1,
                    )
                    .font_size(self.settings.bus_label_font_size)
                    .font_family("Verdana")
                    .font_weight("bold")
                    .content(route.name.as_ref());

                document.push(self.underlay(label.clone()));
                document.push(label.fill(self.palette_color(i)));
            }
        }
    }

    fn draw_stop_circles(&self, document: &mut Document, projector: &Projector, stops: &[&Stop]) {
        for stop in stops {
            document.push(
                Circle::new()
                    .center(projector.project(stop.coordinate))
                    .radius(self.settings.stop_radius)
                    .fill(Color::Named("white".into())),
            );
        }
    }

    fn draw_stop_labels(&self, document: &mut Document, projector: &Projector, stops: &[&Stop]) {
        for stop in stops {
            let label = Text::new()
                .position(projector.project(stop.coordinate))
                .offset(
                    self.settings.stop_label_offset.0,
                    self.settings.stop_label_offset.1,
                )
                .font_size(self.settings.stop_label_font_size)
                .font_family("Verdana")
                .content(stop.name.as_ref());

            document.push(self.underlay(label.clone()));
            document.push(label.fill(Color::Named("black".into())));
        }
    }

    /// The halo copy drawn beneath a label to keep it legible over lines.
    fn underlay(&self, label: Text) -> Text {
        label
            .fill(self.settings.underlayer_color.clone())
            .stroke(self.settings.underlayer_color.clone())
            .stroke_width(self.settings.underlayer_width)
            .line_cap(LineCap::Round)
            .line_join(LineJoin::Round)
    }
}
