use crate::{
    core::{
        constants::MAX_ZOOM,
        geo::{LatLng, LatLngBounds, Point},
        viewport::Viewport,
    },
    layers::{base::LayerTrait, manager::LayerManager, tile::TileLayer},
    ui::controls::{ControlEntry, LayersControl},
    MapError, Result,
};
use std::sync::Arc;

/// The read-only face of a map that the form synchronizer works against.
///
/// [`Map`] implements it; anything else that can report a zoom, the visible
/// bounds and its active layers (a remote widget, a test double) can too.
pub trait MapView {
    /// Current whole zoom level
    fn zoom(&self) -> u8;

    /// Currently visible geographic rectangle
    fn bounds(&self) -> LatLngBounds;

    /// Visits every active layer, in activation order
    fn each_layer(&self, f: &mut dyn FnMut(&dyn LayerTrait));
}

#[derive(Debug, Clone, Default)]
pub struct MapOptions {
    /// Fixed minimum zoom; derived from the active layers when unset
    pub min_zoom: Option<u8>,
    /// Fixed maximum zoom; derived from the active layers when unset
    pub max_zoom: Option<u8>,
}

pub struct Map {
    viewport: Viewport,
    layer_manager: LayerManager,
    controls: Vec<LayersControl>,
    options: MapOptions,
}

impl Map {
    pub fn new(center: LatLng, zoom: u8, size: Point) -> Self {
        let viewport = Viewport::new(center, zoom, size);
        Self::with_options(viewport, MapOptions::default())
    }

    pub fn with_options(viewport: Viewport, options: MapOptions) -> Self {
        let mut map = Self {
            viewport,
            layer_manager: LayerManager::new(),
            controls: Vec::new(),
            options,
        };
        map.update_zoom_levels();
        map
    }

    pub fn set_view(&mut self, center: LatLng, zoom: u8) -> Result<()> {
        if !center.is_valid() {
            return Err(MapError::InvalidCoordinates(format!(
                "center ({}, {}) is outside the world",
                center.lat, center.lng
            )));
        }

        self.viewport.set_center(center);
        self.viewport.set_zoom(zoom);
        log::debug!(
            "view set to ({:.5}, {:.5}) at zoom {}",
            self.viewport.center.lat,
            self.viewport.center.lng,
            self.viewport.zoom
        );
        Ok(())
    }

    pub fn set_zoom(&mut self, zoom: u8) {
        self.viewport.set_zoom(zoom);
    }

    pub fn zoom_in(&mut self) {
        self.set_zoom(self.viewport.zoom.saturating_add(1));
    }

    pub fn zoom_out(&mut self) {
        self.set_zoom(self.viewport.zoom.saturating_sub(1));
    }

    /// Pans the map by a pixel offset
    pub fn pan_by(&mut self, offset: Point) {
        self.viewport.pan(offset);
    }

    pub fn set_size(&mut self, size: Point) {
        self.viewport.set_size(size);
    }

    pub fn zoom(&self) -> u8 {
        self.viewport.zoom
    }

    pub fn center(&self) -> LatLng {
        self.viewport.center
    }

    pub fn bounds(&self) -> LatLngBounds {
        self.viewport.bounds()
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn options(&self) -> &MapOptions {
        &self.options
    }

    /// Attaches a layer; attaching an already active layer is a no-op
    pub fn add_layer(&mut self, layer: Arc<TileLayer>) -> bool {
        let name = layer.name().to_string();
        let added = self.layer_manager.add_layer(layer);
        if added {
            log::debug!("layer '{}' activated", name);
            self.update_zoom_levels();
        }
        added
    }

    pub fn remove_layer(&mut self, name: &str) -> Option<Arc<TileLayer>> {
        let removed = self.layer_manager.remove_layer(name);
        if removed.is_some() {
            log::debug!("layer '{}' deactivated", name);
            self.update_zoom_levels();
        }
        removed
    }

    pub fn has_layer(&self, name: &str) -> bool {
        self.layer_manager.contains(name)
    }

    pub fn active_layers(&self) -> &LayerManager {
        &self.layer_manager
    }

    pub fn active_layer_names(&self) -> Vec<String> {
        self.layer_manager.names()
    }

    pub fn add_control(&mut self, control: LayersControl) {
        self.controls.push(control);
    }

    pub fn controls(&self) -> &[LayersControl] {
        &self.controls
    }

    /// Flips a layer offered by an attached layers control.
    ///
    /// Returns whether the layer is active afterwards.
    pub fn toggle_layer(&mut self, name: &str) -> Result<bool> {
        let layer = self
            .controls
            .iter()
            .find_map(|control| control.layer(name))
            .cloned()
            .ok_or_else(|| MapError::Layer(format!("no control offers layer '{}'", name)))?;

        if self.has_layer(name) {
            self.remove_layer(name);
            Ok(false)
        } else {
            self.add_layer(layer);
            Ok(true)
        }
    }

    /// Rows of the first attached layers control
    pub fn control_entries(&self) -> Vec<ControlEntry> {
        self.controls
            .first()
            .map(|control| control.entries(&self.layer_manager))
            .unwrap_or_default()
    }

    /// Recomputes the zoom range from the options and the active layers
    fn update_zoom_levels(&mut self) {
        let mut layers_min: Option<u8> = None;
        let mut layers_max: Option<u8> = None;
        self.layer_manager.for_each_layer(|layer| {
            layers_min = Some(layers_min.map_or(layer.min_zoom(), |m| m.min(layer.min_zoom())));
            layers_max = Some(layers_max.map_or(layer.max_zoom(), |m| m.max(layer.max_zoom())));
        });

        let min_zoom = self.options.min_zoom.or(layers_min).unwrap_or(0);
        let max_zoom = self.options.max_zoom.or(layers_max).unwrap_or(MAX_ZOOM);
        self.viewport.set_zoom_limits(min_zoom, max_zoom);
    }
}

impl MapView for Map {
    fn zoom(&self) -> u8 {
        self.viewport.zoom
    }

    fn bounds(&self) -> LatLngBounds {
        self.viewport.bounds()
    }

    fn each_layer(&self, f: &mut dyn FnMut(&dyn LayerTrait)) {
        self.layer_manager.for_each_layer(|layer| f(layer));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layers::{registry::LayerRegistry, tile::TileLayerSpec};

    fn registry() -> LayerRegistry {
        LayerRegistry::from_specs(vec![
            TileLayerSpec::new("mapycz", "m/{z}/{x}/{y}", 2, 18, ""),
            TileLayerSpec::new("osm", "o/{z}/{x}/{y}", 0, 19, ""),
            TileLayerSpec::new("satellite", "s/{z}/{x}/{y}", 1, 17, ""),
        ])
        .unwrap()
    }

    fn map() -> Map {
        Map::new(LatLng::new(52.0, 11.0), 3, Point::new(800.0, 600.0))
    }

    #[test]
    fn test_map_creation() {
        let map = map();
        assert_eq!(map.zoom(), 3);
        assert_eq!(map.center(), LatLng::new(52.0, 11.0));
        assert!(map.active_layers().is_empty());
        assert!(map.bounds().contains(&map.center()));
    }

    #[test]
    fn test_set_view() {
        let mut map = map();
        map.set_view(LatLng::new(10.0, 20.0), 5).unwrap();
        assert_eq!(map.center(), LatLng::new(10.0, 20.0));
        assert_eq!(map.zoom(), 5);

        let result = map.set_view(LatLng::new(f64::NAN, 0.0), 5);
        assert!(matches!(result, Err(MapError::InvalidCoordinates(_))));
        let result = map.set_view(LatLng::new(0.0, 200.0), 5);
        assert!(matches!(result, Err(MapError::InvalidCoordinates(_))));
    }

    #[test]
    fn test_layer_management() {
        let registry = registry();
        let mut map = map();

        assert!(map.add_layer(registry.get("osm").unwrap().clone()));
        assert!(map.add_layer(registry.get("mapycz").unwrap().clone()));
        assert!(!map.add_layer(registry.get("osm").unwrap().clone()));
        assert_eq!(map.active_layer_names(), vec!["osm", "mapycz"]);

        assert!(map.remove_layer("osm").is_some());
        assert!(!map.has_layer("osm"));
        assert!(map.remove_layer("osm").is_none());
    }

    #[test]
    fn test_each_layer_follows_activation_order() {
        let registry = registry();
        let mut map = map();
        map.add_layer(registry.get("satellite").unwrap().clone());
        map.add_layer(registry.get("osm").unwrap().clone());

        let mut names = Vec::new();
        MapView::each_layer(&map, &mut |layer: &dyn LayerTrait| {
            names.push(layer.name().to_string())
        });
        assert_eq!(names, vec!["satellite", "osm"]);
    }

    #[test]
    fn test_zoom_range_follows_active_layers() {
        let registry = registry();
        let mut map = map();

        map.add_layer(registry.get("mapycz").unwrap().clone());
        map.set_zoom(0);
        assert_eq!(map.zoom(), 2);
        map.set_zoom(25);
        assert_eq!(map.zoom(), 18);

        map.add_layer(registry.get("osm").unwrap().clone());
        map.set_zoom(25);
        assert_eq!(map.zoom(), 19);

        map.remove_layer("osm");
        assert_eq!(map.zoom(), 18);
    }

    #[test]
    fn test_fixed_zoom_options_win() {
        let registry = registry();
        let options = MapOptions {
            min_zoom: Some(4),
            max_zoom: Some(10),
        };
        let mut map = Map::with_options(Viewport::default(), options);
        map.add_layer(registry.get("osm").unwrap().clone());

        map.set_zoom(19);
        assert_eq!(map.zoom(), 10);
        map.zoom_out();
        assert_eq!(map.zoom(), 9);
        map.set_zoom(0);
        assert_eq!(map.zoom(), 4);
    }

    #[test]
    fn test_toggle_through_control() {
        let registry = registry();
        let mut map = map();
        map.add_control(LayersControl::from_registry(&registry));

        assert!(map.toggle_layer("osm").unwrap());
        assert!(map.toggle_layer("satellite").unwrap());
        assert_eq!(map.active_layer_names(), vec!["osm", "satellite"]);

        assert!(!map.toggle_layer("osm").unwrap());
        assert_eq!(map.active_layer_names(), vec!["satellite"]);

        let entries = map.control_entries();
        assert_eq!(entries.len(), 3);
        assert!(entries.iter().any(|e| e.name == "satellite" && e.active));

        assert!(matches!(map.toggle_layer("nope"), Err(MapError::Layer(_))));
    }

    #[test]
    fn test_pan_and_zoom_steps() {
        let mut map = map();
        map.zoom_in();
        assert_eq!(map.zoom(), 4);

        let before = map.center();
        map.pan_by(Point::new(100.0, 0.0));
        assert!(map.center().lng > before.lng);

        map.set_size(Point::new(400.0, 300.0));
        assert_eq!(map.viewport().size, Point::new(400.0, 300.0));
    }
}
