use crate::core::constants::MAX_LATITUDE;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Maps a longitude in degrees to a tile column at `zoom`.
///
/// Follows the OpenStreetMap slippy map tile numbering exactly:
/// `floor((lon + 180) / 360 * 2^zoom)`. The result is floored toward negative
/// infinity and never clamped, so longitudes outside [-180, 180] produce
/// columns outside the tile grid.
pub fn lon_to_tile_x(lon: f64, zoom: u8) -> i64 {
    ((lon + 180.0) / 360.0 * 2_f64.powi(zoom as i32)).floor() as i64
}

/// Maps a latitude in degrees to a tile row at `zoom`.
///
/// Uses the spherical Mercator inverse
/// `floor((1 - ln(tan(lat) + 1/cos(lat)) / PI) / 2 * 2^zoom)`. Rows grow
/// southward, so a larger latitude yields a smaller row.
///
/// The latitude must lie strictly inside (-90, 90); at the poles the
/// intermediate value is infinite and the float-to-int cast saturates.
pub fn lat_to_tile_y(lat: f64, zoom: u8) -> i64 {
    let lat_rad = lat.to_radians();
    let n = 2_f64.powi(zoom as i32);
    ((1.0 - (lat_rad.tan() + 1.0 / lat_rad.cos()).ln() / PI) / 2.0 * n).floor() as i64
}

/// Number of tiles along one axis of the grid at `zoom`.
///
/// Saturates at `i64::MAX` from zoom 63 upward.
pub fn tile_count(zoom: u8) -> i64 {
    1_i64
        .checked_shl(zoom as u32)
        .filter(|n| *n > 0)
        .unwrap_or(i64::MAX)
}

/// Represents a geographical coordinate with latitude and longitude
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    /// Creates a new LatLng coordinate
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Validates that the coordinates are within valid ranges
    pub fn is_valid(&self) -> bool {
        self.lat >= -90.0 && self.lat <= 90.0 && self.lng >= -180.0 && self.lng <= 180.0
    }

    /// Clamps latitude to the Web Mercator range
    pub fn clamp_lat(lat: f64) -> f64 {
        lat.clamp(-MAX_LATITUDE, MAX_LATITUDE)
    }
}

impl Default for LatLng {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Represents a point in screen or projected coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn add(&self, other: &Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }

    pub fn subtract(&self, other: &Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }

    pub fn multiply(&self, scalar: f64) -> Point {
        Point::new(self.x * scalar, self.y * scalar)
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Represents a bounding box of geographical coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLngBounds {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

impl LatLngBounds {
    pub fn new(south_west: LatLng, north_east: LatLng) -> Self {
        Self {
            south_west,
            north_east,
        }
    }

    /// Creates bounds from individual coordinates
    pub fn from_coords(south: f64, west: f64, north: f64, east: f64) -> Self {
        Self::new(LatLng::new(south, west), LatLng::new(north, east))
    }

    pub fn west(&self) -> f64 {
        self.south_west.lng
    }

    pub fn east(&self) -> f64 {
        self.north_east.lng
    }

    pub fn north(&self) -> f64 {
        self.north_east.lat
    }

    pub fn south(&self) -> f64 {
        self.south_west.lat
    }

    /// Checks if the bounds contain a point
    pub fn contains(&self, point: &LatLng) -> bool {
        point.lat >= self.south_west.lat
            && point.lat <= self.north_east.lat
            && point.lng >= self.south_west.lng
            && point.lng <= self.north_east.lng
    }

    /// Gets the center point of the bounds
    pub fn center(&self) -> LatLng {
        LatLng::new(
            (self.south_west.lat + self.north_east.lat) / 2.0,
            (self.south_west.lng + self.north_east.lng) / 2.0,
        )
    }
}

/// Represents a tile coordinate in the slippy map tile system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileCoord {
    pub x: u32,
    pub y: u32,
    pub z: u8,
}

impl TileCoord {
    pub fn new(x: u32, y: u32, z: u8) -> Self {
        Self { x, y, z }
    }

    /// Creates the tile containing a LatLng at the given zoom level.
    ///
    /// Unlike the raw conversions, the latitude is clamped to the Mercator
    /// range and the result is pinned to the grid.
    pub fn from_lat_lng(lat_lng: &LatLng, zoom: u8) -> Self {
        let last = tile_count(zoom) - 1;
        let x = lon_to_tile_x(lat_lng.lng, zoom).clamp(0, last);
        let y = lat_to_tile_y(LatLng::clamp_lat(lat_lng.lat), zoom).clamp(0, last);

        Self::new(x as u32, y as u32, zoom)
    }

    /// Converts tile coordinate to LatLng (northwest corner)
    pub fn to_lat_lng(&self) -> LatLng {
        let n = 2_f64.powi(self.z as i32);
        let lng = self.x as f64 / n * 360.0 - 180.0;
        let lat_rad = (PI * (1.0 - 2.0 * self.y as f64 / n)).sinh().atan();

        LatLng::new(lat_rad.to_degrees(), lng)
    }

    /// Checks if the tile is valid for the given zoom level
    pub fn is_valid(&self) -> bool {
        let max_coord = tile_count(self.z);
        (self.x as i64) < max_coord && (self.y as i64) < max_coord
    }
}
