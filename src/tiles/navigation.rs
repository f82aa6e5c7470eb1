use crate::{
    core::geo::tile_count,
    layers::tile::TileLayer,
    tiles::{range::TileRange, request::TileRequest},
};
use serde::Serialize;

/// Neighbouring requests reachable from a tile request in one step.
///
/// A link is `None` when the step is not possible: growing or moving past
/// the grid edge, shrinking a single row or column, or zooming beyond the
/// provider's zoom range. Every present link is already normalized.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Navigation {
    pub expand_left: Option<TileRequest>,
    pub expand_right: Option<TileRequest>,
    pub expand_top: Option<TileRequest>,
    pub expand_bottom: Option<TileRequest>,

    pub shift_left: Option<TileRequest>,
    pub shift_right: Option<TileRequest>,
    pub shift_top: Option<TileRequest>,
    pub shift_bottom: Option<TileRequest>,

    pub shrink_left: Option<TileRequest>,
    pub shrink_right: Option<TileRequest>,
    pub shrink_top: Option<TileRequest>,
    pub shrink_bottom: Option<TileRequest>,

    pub zoom_in_double: Option<TileRequest>,
    pub zoom_in_keep: Option<TileRequest>,
    pub zoom_out_half: Option<TileRequest>,
    pub zoom_out_keep: Option<TileRequest>,
}

impl Navigation {
    pub fn for_request(request: &TileRequest, layer: &TileLayer) -> Self {
        let current = request.normalized(layer);
        let TileRange {
            xmin,
            ymin,
            xmax,
            ymax,
        } = current.range;
        let zoom = current.zoom as i64;
        let last = tile_count(current.zoom) - 1;

        let step = |zoom: i64, range: TileRange, disabled: bool| -> Option<TileRequest> {
            if disabled {
                return None;
            }
            let next = TileRequest::new(
                current.provider.clone(),
                layer.clamp_zoom(zoom),
                range,
                current.scale,
            );
            Some(next.normalized(layer))
        };

        let at_left = xmin == 0;
        let at_right = xmax >= last;
        let at_top = ymin == 0;
        let at_bottom = ymax >= last;
        let one_column = xmin == xmax;
        let one_row = ymin == ymax;
        let at_max_zoom = current.zoom >= layer.max_zoom();
        let at_min_zoom = current.zoom <= layer.min_zoom();

        // Half the extent, used to keep the tile count while zooming.
        let half_w = (xmax - xmin) / 2;
        let half_h = (ymax - ymin) / 2;
        let quarter_w = (xmax - xmin) / 4;
        let quarter_h = (ymax - ymin) / 4;

        let navigation = Self {
            expand_left: step(zoom, TileRange::new(xmin - 1, ymin, xmax, ymax), at_left),
            expand_right: step(zoom, TileRange::new(xmin, ymin, xmax + 1, ymax), at_right),
            expand_top: step(zoom, TileRange::new(xmin, ymin - 1, xmax, ymax), at_top),
            expand_bottom: step(zoom, TileRange::new(xmin, ymin, xmax, ymax + 1), at_bottom),

            shift_left: step(zoom, TileRange::new(xmin - 1, ymin, xmax - 1, ymax), at_left),
            shift_right: step(zoom, TileRange::new(xmin + 1, ymin, xmax + 1, ymax), at_right),
            shift_top: step(zoom, TileRange::new(xmin, ymin - 1, xmax, ymax - 1), at_top),
            shift_bottom: step(zoom, TileRange::new(xmin, ymin + 1, xmax, ymax + 1), at_bottom),

            shrink_left: step(zoom, TileRange::new(xmin + 1, ymin, xmax, ymax), one_column),
            shrink_right: step(zoom, TileRange::new(xmin, ymin, xmax - 1, ymax), one_column),
            shrink_top: step(zoom, TileRange::new(xmin, ymin + 1, xmax, ymax), one_row),
            shrink_bottom: step(zoom, TileRange::new(xmin, ymin, xmax, ymax - 1), one_row),

            zoom_in_double: step(
                zoom + 1,
                TileRange::new(xmin * 2, ymin * 2, xmax * 2 + 1, ymax * 2 + 1),
                at_max_zoom,
            ),
            zoom_in_keep: step(
                zoom + 1,
                TileRange::new(
                    xmin * 2 + half_w,
                    ymin * 2 + half_h,
                    xmax * 2 - half_w,
                    ymax * 2 - half_h,
                ),
                at_max_zoom,
            ),
            zoom_out_half: step(
                zoom - 1,
                TileRange::new(xmin / 2, ymin / 2, xmax / 2, ymax / 2),
                at_min_zoom,
            ),
            zoom_out_keep: step(
                zoom - 1,
                TileRange::new(
                    xmin / 2 - quarter_w,
                    ymin / 2 - quarter_h,
                    xmax / 2 + quarter_w,
                    ymax / 2 + quarter_h,
                ),
                at_min_zoom,
            ),
        };

        log::debug!(
            "navigation for {} at zoom {}: {} of 16 links enabled",
            current.provider,
            current.zoom,
            navigation.links().iter().filter(|(_, link)| link.is_some()).count()
        );
        navigation
    }

    /// Every link with a stable label, in display order
    pub fn links(&self) -> [(&'static str, Option<&TileRequest>); 16] {
        [
            ("expand_left", self.expand_left.as_ref()),
            ("expand_right", self.expand_right.as_ref()),
            ("expand_top", self.expand_top.as_ref()),
            ("expand_bottom", self.expand_bottom.as_ref()),
            ("shift_left", self.shift_left.as_ref()),
            ("shift_right", self.shift_right.as_ref()),
            ("shift_top", self.shift_top.as_ref()),
            ("shift_bottom", self.shift_bottom.as_ref()),
            ("shrink_left", self.shrink_left.as_ref()),
            ("shrink_right", self.shrink_right.as_ref()),
            ("shrink_top", self.shrink_top.as_ref()),
            ("shrink_bottom", self.shrink_bottom.as_ref()),
            ("zoom_in_double", self.zoom_in_double.as_ref()),
            ("zoom_in_keep", self.zoom_in_keep.as_ref()),
            ("zoom_out_half", self.zoom_out_half.as_ref()),
            ("zoom_out_keep", self.zoom_out_keep.as_ref()),
        ]
    }
}
