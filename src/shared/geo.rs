use std::{
    cmp,
    iter::Sum,
    ops::{Add, Div, Sub},
};

/// Mean Earth radius used for great-circle distances.
const EARTH_RADIUS: Distance = Distance::from_kilometers(6371.0);

/// A length in meters.
#[derive(Debug, Clone, Copy, Default)]
pub struct Distance(f64);

impl PartialEq for Distance {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl PartialOrd for Distance {
    fn partial_cmp(&self, other: &Self) -> Option<cmp::Ordering> {
        self.0.partial_cmp(&other.0)
    }
}

impl Add for Distance {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Distance {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl Div for Distance {
    type Output = f64;
    fn div(self, rhs: Self) -> Self::Output {
        self.0 / rhs.0
    }
}

impl Sum for Distance {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        Self(iter.map(|distance| distance.0).sum())
    }
}

impl From<f64> for Distance {
    fn from(value: f64) -> Self {
        Distance(value)
    }
}

impl Distance {
    pub const fn from_meters(distance: f64) -> Self {
        Self(distance)
    }

    pub const fn from_kilometers(distance: f64) -> Self {
        Self(distance * 1000.0)
    }

    pub const fn as_meters(&self) -> f64 {
        self.0
    }

    pub const fn as_kilometers(&self) -> f64 {
        self.0 / 1000.0
    }
}

/// A geographic point in degrees, latitude positive north, longitude
/// positive east.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Great-circle distance to `coord` along the haversine formula.
    pub fn geodesic_distance(&self, coord: &Self) -> Distance {
        let dist_lat = f64::to_radians(coord.latitude - self.latitude);
        let dist_lon = f64::to_radians(coord.longitude - self.longitude);
        let a = f64::powi(f64::sin(dist_lat / 2.0), 2)
            + f64::cos(f64::to_radians(self.latitude))
                * f64::cos(f64::to_radians(coord.latitude))
                * f64::sin(dist_lon / 2.0)
                * f64::sin(dist_lon / 2.0);
        let c = 2.0 * f64::atan2(f64::sqrt(a), f64::sqrt(1.0 - a));
        Distance::from_meters(EARTH_RADIUS.as_meters() * c)
    }
}

#[test]
fn geodesic_distance_test() {
    let coord_a = Coordinate::new(55.611087, 37.20829);
    let coord_b = Coordinate::new(55.595884, 37.209755);
    let d = coord_a.geodesic_distance(&coord_b);
    assert!((d.as_meters() - 1693.0).abs() < 1.0);
}

#[test]
fn geodesic_distance_zero_test() {
    let coord = Coordinate::new(55.611087, 37.20829);
    let d = coord.geodesic_distance(&coord);
    assert_eq!(d.as_meters(), 0.0);
}
