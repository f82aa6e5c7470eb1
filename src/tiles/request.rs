//! The receiving side of a form submission

use crate::{
    core::constants::{
        DEFAULT_REQUEST_XMAX, DEFAULT_REQUEST_XMIN, DEFAULT_REQUEST_YMAX, DEFAULT_REQUEST_YMIN,
        DEFAULT_REQUEST_ZOOM, PROVIDER_SEPARATOR,
    },
    layers::{registry::LayerRegistry, tile::TileLayer},
    prelude::HashMap,
    tiles::range::TileRange,
    MapError, Result,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A tile grid request for one provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileRequest {
    pub provider: String,
    pub zoom: u8,
    pub range: TileRange,
    /// Tile edge in pixels
    pub scale: u32,
}

impl TileRequest {
    pub fn new(provider: impl Into<String>, zoom: u8, range: TileRange, scale: u32) -> Self {
        Self {
            provider: provider.into(),
            zoom,
            range,
            scale,
        }
    }

    /// Parses a submitted query string and normalizes it against the chosen provider.
    ///
    /// Absent or empty parameters fall back to zoom 3 and the tiles 1..=3 in
    /// both directions; `scale` falls back to the provider's tile size. A
    /// missing provider selects the first registered layer, and a pipe-joined
    /// provider list selects its first registered name.
    pub fn from_query(query: &str, registry: &LayerRegistry) -> Result<Self> {
        let params = parse_params(query);
        let layer = resolve_provider(params.get("provider").map(String::as_str), registry)?;

        let zoom = int_param(&params, "zoom", DEFAULT_REQUEST_ZOOM)?;
        let range = TileRange::new(
            int_param(&params, "xmin", DEFAULT_REQUEST_XMIN)?,
            int_param(&params, "ymin", DEFAULT_REQUEST_YMIN)?,
            int_param(&params, "xmax", DEFAULT_REQUEST_XMAX)?,
            int_param(&params, "ymax", DEFAULT_REQUEST_YMAX)?,
        );
        let scale = int_param(&params, "scale", layer.scale() as i64)?;
        if scale <= 0 || scale > u32::MAX as i64 {
            return Err(MapError::ParseError(format!(
                "scale query parameter out of range: {}",
                scale
            )));
        }

        let request = Self::new(layer.name(), layer.clamp_zoom(zoom), range, scale as u32);
        log::debug!("request before corrections: {:?}", request);

        let request = request.normalized(&layer);
        log::debug!("request after corrections: {:?}", request);
        Ok(request)
    }

    /// Copy of the request pinned to what `layer` can serve.
    ///
    /// The zoom is clamped into the layer's range, the tile range onto the
    /// grid at that zoom, and each maximum is raised to at least its minimum.
    pub fn normalized(&self, layer: &TileLayer) -> Self {
        let zoom = layer.clamp_zoom(self.zoom as i64);
        Self {
            provider: self.provider.clone(),
            zoom,
            range: self.range.clamped_to_grid(zoom),
            scale: self.scale,
        }
    }

    pub fn normalize(&mut self, layer: &TileLayer) {
        *self = self.normalized(layer);
    }

    pub fn width_tiles(&self) -> i64 {
        self.range.width()
    }

    pub fn height_tiles(&self) -> i64 {
        self.range.height()
    }

    /// URL-encoded query that [`TileRequest::from_query`] reads back
    pub fn to_query(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .append_pair("provider", &self.provider)
            .append_pair("zoom", &self.zoom.to_string())
            .append_pair("xmin", &self.range.xmin.to_string())
            .append_pair("ymin", &self.range.ymin.to_string())
            .append_pair("xmax", &self.range.xmax.to_string())
            .append_pair("ymax", &self.range.ymax.to_string())
            .append_pair("scale", &self.scale.to_string())
            .finish()
    }

    /// `base` with its query replaced by this request
    pub fn to_url(&self, base: &url::Url) -> url::Url {
        let mut url = base.clone();
        url.set_query(Some(&self.to_query()));
        url
    }
}

/// First occurrence of each key wins; empty values count as absent.
fn parse_params(query: &str) -> HashMap<String, String> {
    let query = query.strip_prefix('?').unwrap_or(query);
    let mut params = HashMap::default();
    for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
        if value.is_empty() {
            continue;
        }
        params
            .entry(key.into_owned())
            .or_insert_with(|| value.into_owned());
    }
    params
}

fn int_param(params: &HashMap<String, String>, name: &str, default: i64) -> Result<i64> {
    match params.get(name) {
        None => Ok(default),
        Some(value) => value.trim().parse::<i64>().map_err(|err| {
            MapError::ParseError(format!("cannot parse {} query parameter: {}", name, err))
        }),
    }
}

fn resolve_provider(provider: Option<&str>, registry: &LayerRegistry) -> Result<Arc<TileLayer>> {
    match provider {
        None => {
            log::debug!("no provider specified, choosing the first one");
            registry
                .first()
                .cloned()
                .ok_or_else(|| MapError::UnknownProvider(String::new()))
        }
        Some(names) => names
            .split(PROVIDER_SEPARATOR)
            .find_map(|name| registry.get(name.trim()))
            .cloned()
            .ok_or_else(|| MapError::UnknownProvider(names.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layers::tile::TileLayerSpec;

    fn registry() -> LayerRegistry {
        LayerRegistry::from_specs(vec![
            TileLayerSpec::new("mapycz", "m/{z}/{x}/{y}", 2, 18, ""),
            TileLayerSpec::new("osm", "o/{z}/{x}/{y}", 0, 19, "").with_scale(512),
        ])
        .unwrap()
    }

    #[test]
    fn test_defaults() {
        let request = TileRequest::from_query("", &registry()).unwrap();

        assert_eq!(request.provider, "mapycz");
        assert_eq!(request.zoom, 3);
        assert_eq!(request.range, TileRange::new(1, 1, 3, 3));
        assert_eq!(request.scale, 256);
    }

    #[test]
    fn test_explicit_values() {
        let request = TileRequest::from_query(
            "?zoom=5&xmin=15&xmax=16&ymin=10&ymax=12&provider=osm",
            &registry(),
        )
        .unwrap();

        assert_eq!(request.provider, "osm");
        assert_eq!(request.zoom, 5);
        assert_eq!(request.range, TileRange::new(15, 10, 16, 12));
        assert_eq!(request.scale, 512);
    }

    #[test]
    fn test_pipe_list_picks_first_known_provider() {
        let registry = registry();

        let request = TileRequest::from_query("provider=satellite%7Cosm%7Cmapycz", &registry).unwrap();
        assert_eq!(request.provider, "osm");

        let result = TileRequest::from_query("provider=satellite", &registry);
        assert!(matches!(result, Err(MapError::UnknownProvider(ref p)) if p == "satellite"));
    }

    #[test]
    fn test_empty_registry_has_no_provider() {
        let result = TileRequest::from_query("zoom=3", &LayerRegistry::new());
        assert!(matches!(result, Err(MapError::UnknownProvider(_))));
    }

    #[test]
    fn test_bad_integers_are_rejected() {
        let result = TileRequest::from_query("zoom=three", &registry());
        assert!(matches!(result, Err(MapError::ParseError(ref m)) if m.contains("zoom")));

        let result = TileRequest::from_query("scale=0", &registry());
        assert!(matches!(result, Err(MapError::ParseError(_))));
    }

    #[test]
    fn test_first_value_wins_and_empty_is_absent() {
        let request = TileRequest::from_query("xmin=2&xmin=7&ymax=", &registry()).unwrap();
        assert_eq!(request.range.xmin, 2);
        assert_eq!(request.range.ymax, 3);
    }

    #[test]
    fn test_normalization() {
        let registry = registry();
        let mapycz = registry.get("mapycz").unwrap();

        // Zoom below the provider minimum, range past the grid and inverted.
        let request = TileRequest::from_query("zoom=0&xmin=-4&xmax=9&ymin=3&ymax=1", &registry).unwrap();
        assert_eq!(request.zoom, 2);
        assert_eq!(request.range, TileRange::new(0, 3, 3, 3));

        let deep = TileRequest::new("mapycz", 25, TileRange::new(0, 0, 1, 1), 256);
        assert_eq!(deep.normalized(mapycz).zoom, 18);

        let mut request = TileRequest::new("mapycz", 3, TileRange::new(6, 6, 20, 2), 256);
        request.normalize(mapycz);
        assert_eq!(request.range, TileRange::new(6, 6, 7, 6));
        assert_eq!(request.width_tiles(), 2);
        assert_eq!(request.height_tiles(), 1);
    }

    #[test]
    fn test_query_round_trip() {
        let registry = registry();
        let request = TileRequest::new("osm", 4, TileRange::new(2, 3, 5, 6), 512);

        assert_eq!(
            request.to_query(),
            "provider=osm&zoom=4&xmin=2&ymin=3&xmax=5&ymax=6&scale=512"
        );
        assert_eq!(TileRequest::from_query(&request.to_query(), &registry).unwrap(), request);

        let base = url::Url::parse("http://localhost:8080/map?stale=1").unwrap();
        let url = request.to_url(&base);
        assert_eq!(url.path(), "/map");
        assert_eq!(url.query(), Some(request.to_query().as_str()));
    }
}
