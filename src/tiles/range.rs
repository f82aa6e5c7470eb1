use crate::core::geo::{lat_to_tile_y, lon_to_tile_x, tile_count, LatLngBounds, TileCoord};
use serde::{Deserialize, Serialize};

/// Inclusive rectangle of tile columns and rows at some zoom level.
///
/// Values are signed because ranges derived straight from viewport bounds or
/// from navigation steps may fall outside the grid until they are clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileRange {
    pub xmin: i64,
    pub ymin: i64,
    pub xmax: i64,
    pub ymax: i64,
}

impl TileRange {
    pub fn new(xmin: i64, ymin: i64, xmax: i64, ymax: i64) -> Self {
        Self {
            xmin,
            ymin,
            xmax,
            ymax,
        }
    }

    /// Tiles covering a geographic rectangle.
    ///
    /// The northern edge gives the smaller row because rows grow southward.
    pub fn from_bounds(bounds: &LatLngBounds, zoom: u8) -> Self {
        Self::new(
            lon_to_tile_x(bounds.west(), zoom),
            lat_to_tile_y(bounds.north(), zoom),
            lon_to_tile_x(bounds.east(), zoom),
            lat_to_tile_y(bounds.south(), zoom),
        )
    }

    pub fn width(&self) -> i64 {
        self.xmax - self.xmin + 1
    }

    pub fn height(&self) -> i64 {
        self.ymax - self.ymin + 1
    }

    pub fn tile_count(&self) -> i64 {
        self.width().max(0) * self.height().max(0)
    }

    /// Pins the range to the tile grid at `zoom` and makes it non-empty
    pub fn clamped_to_grid(&self, zoom: u8) -> Self {
        let last = tile_count(zoom) - 1;

        let xmin = self.xmin.clamp(0, last);
        let ymin = self.ymin.clamp(0, last);
        let xmax = self.xmax.min(last).max(xmin);
        let ymax = self.ymax.min(last).max(ymin);

        Self::new(xmin, ymin, xmax, ymax)
    }

    pub fn is_within_grid(&self, zoom: u8) -> bool {
        let n = tile_count(zoom);
        self.xmin >= 0
            && self.ymin >= 0
            && self.xmax < n
            && self.ymax < n
            && self.xmin <= self.xmax
            && self.ymin <= self.ymax
    }

    /// Tile coordinates row by row, north-west first. Tiles off the grid are skipped.
    pub fn coords(&self, zoom: u8) -> impl Iterator<Item = TileCoord> {
        let range = *self;
        let n = tile_count(zoom);
        (range.ymin.max(0)..=range.ymax.min(n - 1)).flat_map(move |y| {
            (range.xmin.max(0)..=range.xmax.min(n - 1))
                .map(move |x| TileCoord::new(x as u32, y as u32, zoom))
        })
    }
}
