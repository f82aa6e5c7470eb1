use crate::{
    core::geo::{LatLng, LatLngBounds, TileCoord},
    layers::tile::TileLayer,
    tiles::request::TileRequest,
};
use serde::Serialize;

/// One tile of a plan with its offset from the plan's top-left corner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedTile {
    pub coord: TileCoord,
    /// Horizontal pixel offset
    pub left: i64,
    /// Vertical pixel offset
    pub top: i64,
    pub url: String,
}

/// The tiles that make up a request, laid out as one image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TilePlan {
    pub provider: String,
    pub zoom: u8,
    pub scale: u32,
    pub width_tiles: i64,
    pub height_tiles: i64,
    pub tiles: Vec<PlannedTile>,
}

impl TilePlan {
    /// Enumerates the request's tiles row by row, north-west first.
    pub fn for_request(request: &TileRequest, layer: &TileLayer) -> Self {
        let request = request.normalized(layer);
        let range = request.range;
        let scale = request.scale as i64;

        let tiles: Vec<PlannedTile> = range
            .coords(request.zoom)
            .map(|coord| PlannedTile {
                coord,
                left: (coord.x as i64 - range.xmin) * scale,
                top: (coord.y as i64 - range.ymin) * scale,
                url: layer.tile_url(coord),
            })
            .collect();

        log::debug!(
            "planned {} tiles of {} at zoom {}",
            tiles.len(),
            request.provider,
            request.zoom
        );

        Self {
            provider: request.provider,
            zoom: request.zoom,
            scale: request.scale,
            width_tiles: range.width(),
            height_tiles: range.height(),
            tiles,
        }
    }

    pub fn width_px(&self) -> i64 {
        self.width_tiles * self.scale as i64
    }

    pub fn height_px(&self) -> i64 {
        self.height_tiles * self.scale as i64
    }

    /// Geographic area covered by the plan, `None` when it is empty
    pub fn bounds(&self) -> Option<LatLngBounds> {
        let first = self.tiles.first()?.coord;
        let last = self.tiles.last()?.coord;

        let north_west = first.to_lat_lng();
        let south_east = TileCoord::new(last.x + 1, last.y + 1, last.z).to_lat_lng();
        Some(LatLngBounds::new(
            LatLng::new(south_east.lat, north_west.lng),
            LatLng::new(north_west.lat, south_east.lng),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{layers::tile::TileLayerSpec, tiles::range::TileRange};

    fn mapycz() -> TileLayer {
        TileLayer::from_spec(
            TileLayerSpec::new("mapycz", "https://m{s}.mapy.cz/{z}-{x}-{y}", 2, 18, "")
                .with_subdomains("1234"),
        )
        .unwrap()
    }

    #[test]
    fn test_plan_layout() {
        let layer = mapycz();
        let request = TileRequest::new("mapycz", 3, TileRange::new(1, 2, 2, 3), 256);
        let plan = TilePlan::for_request(&request, &layer);

        assert_eq!(plan.width_tiles, 2);
        assert_eq!(plan.height_tiles, 2);
        assert_eq!(plan.width_px(), 512);
        assert_eq!(plan.height_px(), 512);

        let offsets: Vec<_> = plan.tiles.iter().map(|t| (t.left, t.top)).collect();
        assert_eq!(offsets, vec![(0, 0), (256, 0), (0, 256), (256, 256)]);

        assert_eq!(plan.tiles[0].coord, TileCoord::new(1, 2, 3));
        assert_eq!(plan.tiles[0].url, "https://m4.mapy.cz/3-1-2");
        assert_eq!(plan.tiles[3].url, "https://m2.mapy.cz/3-2-3");
    }

    #[test]
    fn test_plan_uses_request_scale() {
        let layer = mapycz();
        let request = TileRequest::new("mapycz", 4, TileRange::new(0, 0, 2, 0), 128);
        let plan = TilePlan::for_request(&request, &layer);

        assert_eq!(plan.tiles.len(), 3);
        assert_eq!(plan.tiles[2].left, 256);
        assert_eq!(plan.width_px(), 384);
        assert_eq!(plan.height_px(), 128);
    }

    #[test]
    fn test_plan_is_normalized_first() {
        let layer = mapycz();
        let request = TileRequest::new("mapycz", 0, TileRange::new(-3, -3, 10, 0), 256);
        let plan = TilePlan::for_request(&request, &layer);

        assert_eq!(plan.zoom, 2);
        assert_eq!(plan.width_tiles, 4);
        assert_eq!(plan.height_tiles, 1);
        assert!(plan.tiles.iter().all(|t| t.coord.z == 2));
    }

    #[test]
    fn test_plan_bounds() {
        let layer = mapycz();
        let request = TileRequest::new("mapycz", 2, TileRange::new(0, 0, 3, 3), 256);
        let bounds = TilePlan::for_request(&request, &layer).bounds().unwrap();

        assert!((bounds.west() + 180.0).abs() < 1e-9);
        assert!((bounds.east() - 180.0).abs() < 1e-9);
        assert!(bounds.north() > 85.0);
        assert!(bounds.south() < -85.0);
    }
}
