use crate::render::svg::Point;
use crate::shared::geo::Coordinate;

/// Spans below this are treated as zero when deriving an axis scale.
const EPSILON: f64 = 1e-6;

/// Equirectangular projection fitted to the bounding box of a point set.
///
/// Latitudes are treated linearly; at city scale the distortion is bounded
/// and the mapping stays trivially invertible. An axis whose span is
/// degenerate contributes no scale; with no usable axis (or no points at
/// all) the zoom is 0 and everything projects to the padding corner.
#[derive(Debug, Clone, Copy, Default)]
pub struct Projector {
    min_lon: f64,
    max_lat: f64,
    zoom: f64,
    padding: f64,
}

impl Projector {
    pub fn new(
        points: impl IntoIterator<Item = Coordinate>,
        width: f64,
        height: f64,
        padding: f64,
    ) -> Self {
        let mut points = points.into_iter();
        let Some(first) = points.next() else {
            return Self {
                padding,
                ..Default::default()
            };
        };

        let mut min_lat = first.latitude;
        let mut max_lat = first.latitude;
        let mut min_lon = first.longitude;
        let mut max_lon = first.longitude;
        for point in points {
            min_lat = min_lat.min(point.latitude);
            max_lat = max_lat.max(point.latitude);
            min_lon = min_lon.min(point.longitude);
            max_lon = max_lon.max(point.longitude);
        }

        let lon_span = max_lon - min_lon;
        let lat_span = max_lat - min_lat;
        let zoom_x = (lon_span.abs() >= EPSILON).then(|| (width - 2.0 * padding) / lon_span);
        let zoom_y = (lat_span.abs() >= EPSILON).then(|| (height - 2.0 * padding) / lat_span);
        let zoom = match (zoom_x, zoom_y) {
            (Some(x), Some(y)) => x.min(y),
            (Some(x), None) => x,
            (None, Some(y)) => y,
            (None, None) => 0.0,
        };

        Self {
            min_lon,
            max_lat,
            zoom,
            padding,
        }
    }

    pub fn project(&self, coordinate: Coordinate) -> Point {
        Point::new(
            (coordinate.longitude - self.min_lon) * self.zoom + self.padding,
            (self.max_lat - coordinate.latitude) * self.zoom + self.padding,
        )
    }
}
