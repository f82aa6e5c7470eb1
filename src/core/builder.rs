//! Map builder for fluent page initialization
//!
//! [`MapBuilder`] takes the provider records, creates one tile layer per
//! record, attaches a layers control listing all of them and switches the
//! default layer on. The result is a [`MapContext`] that owns both the layer
//! registry and the map.

use crate::{
    core::{
        constants::{DEFAULT_CENTER, DEFAULT_LAYER, DEFAULT_VIEWPORT_SIZE, DEFAULT_ZOOM},
        geo::{LatLng, Point},
        map::{Map, MapOptions},
        viewport::Viewport,
    },
    layers::{registry::LayerRegistry, tile::TileLayer, tile::TileLayerSpec},
    tiles::{navigation::Navigation, plan::TilePlan, request::TileRequest},
    ui::{
        controls::LayersControl,
        form::{sync_form, FormSnapshot, FormTarget},
    },
    MapError, Result,
};
use std::sync::Arc;

/// Builder for the map page
pub struct MapBuilder {
    specs: Vec<TileLayerSpec>,
    center: LatLng,
    zoom: u8,
    size: Point,
    default_layer: String,
    map_options: MapOptions,
    layers_control: bool,
}

impl MapBuilder {
    /// Create a builder with the page defaults: center (52, 11), zoom 3, layer `mapycz`
    pub fn new() -> Self {
        Self {
            specs: Vec::new(),
            center: LatLng::new(DEFAULT_CENTER.0, DEFAULT_CENTER.1),
            zoom: DEFAULT_ZOOM,
            size: Point::new(DEFAULT_VIEWPORT_SIZE.0, DEFAULT_VIEWPORT_SIZE.1),
            default_layer: DEFAULT_LAYER.to_string(),
            map_options: MapOptions::default(),
            layers_control: true,
        }
    }

    /// Set the provider records, in display order
    pub fn with_layers<I>(mut self, specs: I) -> Self
    where
        I: IntoIterator<Item = TileLayerSpec>,
    {
        self.specs = specs.into_iter().collect();
        self
    }

    /// Set the initial center and zoom level
    pub fn with_center_and_zoom(mut self, center: LatLng, zoom: u8) -> Self {
        self.center = center;
        self.zoom = zoom;
        self
    }

    /// Set the viewport size in pixels
    pub fn with_size(mut self, size: Point) -> Self {
        self.size = size;
        self
    }

    /// Set the layer that is switched on at startup
    pub fn with_default_layer(mut self, name: impl Into<String>) -> Self {
        self.default_layer = name.into();
        self
    }

    pub fn with_map_options(mut self, options: MapOptions) -> Self {
        self.map_options = options;
        self
    }

    /// Whether to attach the layers control; on by default
    pub fn with_layers_control(mut self, enabled: bool) -> Self {
        self.layers_control = enabled;
        self
    }

    pub fn build(self) -> Result<MapContext> {
        let registry = LayerRegistry::from_specs(self.specs)?;

        let default_layer = registry.get(&self.default_layer).cloned().ok_or_else(|| {
            MapError::Config(format!(
                "default layer '{}' is not among the configured layers",
                self.default_layer
            ))
        })?;

        let viewport = Viewport::new(self.center, self.zoom, self.size);
        let mut map = Map::with_options(viewport, self.map_options);

        if self.layers_control {
            map.add_control(LayersControl::from_registry(&registry));
        }

        map.add_layer(default_layer);
        map.set_view(self.center, self.zoom)?;

        log::info!(
            "map initialized at ({}, {}) zoom {} with {} layers, default '{}'",
            map.center().lat,
            map.center().lng,
            map.zoom(),
            registry.len(),
            self.default_layer
        );

        Ok(MapContext { registry, map })
    }
}

impl Default for MapBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything the page holds after initialization.
pub struct MapContext {
    registry: LayerRegistry,
    map: Map,
}

impl MapContext {
    pub fn registry(&self) -> &LayerRegistry {
        &self.registry
    }

    pub fn map(&self) -> &Map {
        &self.map
    }

    pub fn map_mut(&mut self) -> &mut Map {
        &mut self.map
    }

    /// The submit handler: copies the current view into `form`
    pub fn sync_form<F: FormTarget + ?Sized>(&self, form: &mut F) -> Result<()> {
        sync_form(&self.map, form)
    }

    pub fn snapshot(&self) -> FormSnapshot {
        FormSnapshot::capture(&self.map)
    }

    /// Parses a submission against this page's providers
    pub fn request_from_query(&self, query: &str) -> Result<TileRequest> {
        TileRequest::from_query(query, &self.registry)
    }

    /// The registered layer serving `request`
    pub fn layer_for(&self, request: &TileRequest) -> Result<&Arc<TileLayer>> {
        self.registry
            .get(&request.provider)
            .ok_or_else(|| MapError::UnknownProvider(request.provider.clone()))
    }

    pub fn navigation(&self, request: &TileRequest) -> Result<Navigation> {
        Ok(Navigation::for_request(request, self.layer_for(request)?))
    }

    pub fn plan(&self, request: &TileRequest) -> Result<TilePlan> {
        Ok(TilePlan::for_request(request, self.layer_for(request)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::form::FormFields;

    fn specs() -> Vec<TileLayerSpec> {
        vec![
            TileLayerSpec::new("mapycz", "https://m{s}.mapy.cz/{z}-{x}-{y}", 2, 18, "Seznam.cz")
                .with_subdomains("1234"),
            TileLayerSpec::new("osm", "https://tile.openstreetmap.org/{z}/{x}/{y}.png", 0, 19, ""),
        ]
    }

    #[test]
    fn test_builder_defaults() {
        let context = MapBuilder::new().with_layers(specs()).build().unwrap();
        let map = context.map();

        assert_eq!(map.center(), LatLng::new(52.0, 11.0));
        assert_eq!(map.zoom(), 3);
        assert_eq!(map.active_layer_names(), vec!["mapycz"]);
        assert_eq!(map.controls().len(), 1);
        assert_eq!(map.controls()[0].names(), vec!["mapycz", "osm"]);
    }

    #[test]
    fn test_missing_default_layer() {
        let result = MapBuilder::new()
            .with_layers(specs())
            .with_default_layer("satellite")
            .build();
        assert!(matches!(result, Err(MapError::Config(_))));

        let empty = MapBuilder::new().build();
        assert!(matches!(empty, Err(MapError::Config(_))));
    }

    #[test]
    fn test_builder_overrides() {
        let context = MapBuilder::new()
            .with_layers(specs())
            .with_center_and_zoom(LatLng::new(50.08, 14.42), 12)
            .with_size(Point::new(1024.0, 768.0))
            .with_default_layer("osm")
            .with_layers_control(false)
            .build()
            .unwrap();

        assert_eq!(context.map().zoom(), 12);
        assert_eq!(context.map().active_layer_names(), vec!["osm"]);
        assert!(context.map().controls().is_empty());
        assert_eq!(context.map().viewport().size, Point::new(1024.0, 768.0));
    }

    #[test]
    fn test_invalid_center_fails() {
        let result = MapBuilder::new()
            .with_layers(specs())
            .with_center_and_zoom(LatLng::new(95.0, 0.0), 3)
            .build();
        assert!(matches!(result, Err(MapError::InvalidCoordinates(_))));
    }

    #[test]
    fn test_context_round_trip() {
        let context = MapBuilder::new().with_layers(specs()).build().unwrap();

        let mut form = FormFields::tile_request();
        context.sync_form(&mut form).unwrap();
        assert_eq!(form.get("provider"), Some("mapycz"));
        assert_eq!(form.get("zoom"), Some("3"));

        let request = context.request_from_query(&form.to_query()).unwrap();
        assert_eq!(request.provider, "mapycz");
        assert_eq!(request.zoom, 3);
        assert_eq!(request.range, context.snapshot().range().clamped_to_grid(3));

        let plan = context.plan(&request).unwrap();
        assert_eq!(plan.tiles.len() as i64, request.range.tile_count());
        assert!(context.navigation(&request).is_ok());

        let stray = TileRequest::new("nope", 3, request.range, 256);
        assert!(matches!(context.plan(&stray), Err(MapError::UnknownProvider(_))));
    }
}
