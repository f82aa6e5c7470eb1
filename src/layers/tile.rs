//! Tile layer configuration and the constructed tile-source handle

use crate::{
    core::{
        constants::{DEFAULT_SUBDOMAINS, MAX_TILE_ZOOM, MAX_ZOOM, TILE_SIZE},
        geo::TileCoord,
    },
    layers::base::LayerTrait,
    tiles::source::{TileSource, UrlTemplate},
    MapError, Result,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

fn default_scale() -> u32 {
    TILE_SIZE
}

/// Static description of one selectable background layer.
///
/// Field names follow the provider records the page is configured with
/// (`Name`, `Url`, `MinZoom`, `MaxZoom`, `Attribution`, `SubDomains`, `Scale`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TileLayerSpec {
    pub name: String,
    pub url: String,
    pub min_zoom: u8,
    pub max_zoom: u8,
    #[serde(default)]
    pub attribution: String,
    #[serde(rename = "SubDomains", default, skip_serializing_if = "Option::is_none")]
    pub subdomains: Option<String>,
    /// Tile edge in pixels
    #[serde(default = "default_scale")]
    pub scale: u32,
}

impl TileLayerSpec {
    pub fn new(
        name: impl Into<String>,
        url: impl Into<String>,
        min_zoom: u8,
        max_zoom: u8,
        attribution: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            min_zoom,
            max_zoom,
            attribution: attribution.into(),
            subdomains: None,
            scale: TILE_SIZE,
        }
    }

    pub fn with_subdomains(mut self, subdomains: impl Into<String>) -> Self {
        self.subdomains = Some(subdomains.into());
        self
    }

    pub fn with_scale(mut self, scale: u32) -> Self {
        self.scale = scale;
        self
    }

    /// Sub-domains the entry actually declares; an empty string counts as none
    pub fn declared_subdomains(&self) -> Option<&str> {
        self.subdomains.as_deref().filter(|s| !s.is_empty())
    }
}

/// Effective options of a constructed tile layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileLayerOptions {
    pub tile_size: u32,
    pub min_zoom: u8,
    pub max_zoom: u8,
    pub attribution: Option<String>,
    pub subdomains: Vec<String>,
}

impl Default for TileLayerOptions {
    fn default() -> Self {
        Self {
            tile_size: TILE_SIZE,
            min_zoom: 0,
            max_zoom: MAX_ZOOM,
            attribution: None,
            subdomains: split_subdomains(DEFAULT_SUBDOMAINS),
        }
    }
}

/// Each character of a sub-domain string is one candidate, as the widget treats it
fn split_subdomains(subdomains: &str) -> Vec<String> {
    subdomains.chars().map(|c| c.to_string()).collect()
}

/// A tile source built from a [`TileLayerSpec`]. Immutable once constructed.
#[derive(Debug, Clone)]
pub struct TileLayer {
    spec: TileLayerSpec,
    options: TileLayerOptions,
    explicit_options: serde_json::Value,
    source: UrlTemplate,
}

impl TileLayer {
    /// Builds the layer, passing the sub-domain option only when the record declares one.
    pub fn from_spec(spec: TileLayerSpec) -> Result<Self> {
        if spec.name.is_empty() {
            return Err(MapError::Config(format!(
                "tile layer with url '{}' has no name",
                spec.url
            )));
        }
        if spec.min_zoom > spec.max_zoom {
            return Err(MapError::Config(format!(
                "tile layer '{}' has min zoom {} above max zoom {}",
                spec.name, spec.min_zoom, spec.max_zoom
            )));
        }
        if spec.max_zoom > MAX_TILE_ZOOM {
            return Err(MapError::Config(format!(
                "tile layer '{}' max zoom {} exceeds {}",
                spec.name, spec.max_zoom, MAX_TILE_ZOOM
            )));
        }
        if spec.scale == 0 {
            return Err(MapError::Config(format!(
                "tile layer '{}' has zero scale",
                spec.name
            )));
        }

        let mut explicit_options = json!({
            "name": spec.name,
            "minZoom": spec.min_zoom,
            "maxZoom": spec.max_zoom,
            "attribution": spec.attribution,
        });

        let mut options = TileLayerOptions {
            tile_size: spec.scale,
            min_zoom: spec.min_zoom,
            max_zoom: spec.max_zoom,
            attribution: Some(spec.attribution.clone()).filter(|a| !a.is_empty()),
            ..Default::default()
        };

        if let Some(subdomains) = spec.declared_subdomains() {
            explicit_options["subdomains"] = json!(subdomains);
            options.subdomains = split_subdomains(subdomains);
        }

        let source = UrlTemplate::new(spec.url.clone(), options.subdomains.clone());

        Ok(Self {
            spec,
            options,
            explicit_options,
            source,
        })
    }

    pub fn name(&self) -> &str {
        &self.spec.name
    }

    pub fn spec(&self) -> &TileLayerSpec {
        &self.spec
    }

    pub fn url_template(&self) -> &str {
        self.source.template()
    }

    /// Effective options, widget defaults included
    pub fn tile_options(&self) -> &TileLayerOptions {
        &self.options
    }

    /// Options exactly as passed at construction
    pub fn explicit_options(&self) -> &serde_json::Value {
        &self.explicit_options
    }

    pub fn has_subdomain_option(&self) -> bool {
        self.explicit_options.get("subdomains").is_some()
    }

    pub fn min_zoom(&self) -> u8 {
        self.options.min_zoom
    }

    pub fn max_zoom(&self) -> u8 {
        self.options.max_zoom
    }

    /// Tile edge in pixels
    pub fn scale(&self) -> u32 {
        self.options.tile_size
    }

    /// Clamps any requested zoom into the layer's zoom range
    pub fn clamp_zoom(&self, zoom: i64) -> u8 {
        zoom.clamp(self.min_zoom() as i64, self.max_zoom() as i64) as u8
    }

    pub fn tile_url(&self, coord: TileCoord) -> String {
        self.source.url(coord)
    }
}

impl TileSource for TileLayer {
    fn url(&self, coord: TileCoord) -> String {
        self.tile_url(coord)
    }
}

impl LayerTrait for TileLayer {
    fn name(&self) -> &str {
        &self.spec.name
    }

    fn attribution(&self) -> &str {
        &self.spec.attribution
    }

    fn options(&self) -> serde_json::Value {
        self.explicit_options.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn osm() -> TileLayerSpec {
        TileLayerSpec::new(
            "osm",
            "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png",
            0,
            19,
            "OpenStreetMap contributors",
        )
    }

    #[test]
    fn test_layer_without_subdomains_omits_option() {
        let layer = TileLayer::from_spec(osm()).unwrap();

        assert!(!layer.has_subdomain_option());
        assert!(layer.explicit_options().get("subdomains").is_none());
        assert_eq!(layer.explicit_options()["name"], "osm");
        assert_eq!(layer.explicit_options()["maxZoom"], 19);
        // The widget default still applies to URL resolution.
        assert_eq!(layer.tile_options().subdomains, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_layer_with_subdomains_passes_option() {
        let spec = TileLayerSpec::new(
            "mapycz",
            "https://m{s}.mapserver.mapy.cz/base-m/{z}-{x}-{y}",
            2,
            18,
            "Seznam.cz",
        )
        .with_subdomains("1234");
        let layer = TileLayer::from_spec(spec).unwrap();

        assert!(layer.has_subdomain_option());
        assert_eq!(layer.explicit_options()["subdomains"], "1234");
        assert_eq!(layer.tile_options().subdomains.len(), 4);
        assert_eq!(
            layer.tile_url(TileCoord::new(1, 2, 3)),
            "https://m4.mapserver.mapy.cz/base-m/3-1-2"
        );
    }

    #[test]
    fn test_empty_subdomains_count_as_absent() {
        let layer = TileLayer::from_spec(osm().with_subdomains("")).unwrap();
        assert!(!layer.has_subdomain_option());
    }

    #[test]
    fn test_spec_deserializes_provider_record() {
        let spec: TileLayerSpec = serde_json::from_str(
            r#"{"Name":"topo","Url":"https://tiles.example.org/{z}/{x}/{y}.png",
                "MinZoom":1,"MaxZoom":17,"Attribution":"Example"}"#,
        )
        .unwrap();

        assert_eq!(spec.name, "topo");
        assert_eq!(spec.min_zoom, 1);
        assert_eq!(spec.subdomains, None);
        assert_eq!(spec.scale, TILE_SIZE);

        let with_subdomains: TileLayerSpec = serde_json::from_str(
            r#"{"Name":"x","Url":"u","MinZoom":0,"MaxZoom":1,"Attribution":"","SubDomains":"ab","Scale":512}"#,
        )
        .unwrap();
        assert_eq!(with_subdomains.subdomains.as_deref(), Some("ab"));
        assert_eq!(with_subdomains.scale, 512);
    }

    #[test]
    fn test_invalid_specs_are_rejected() {
        let inverted = TileLayerSpec::new("bad", "u", 10, 2, "");
        assert!(matches!(TileLayer::from_spec(inverted), Err(MapError::Config(_))));

        let unnamed = TileLayerSpec::new("", "u", 0, 2, "");
        assert!(matches!(TileLayer::from_spec(unnamed), Err(MapError::Config(_))));

        let too_deep = TileLayerSpec::new("deep", "u", 0, 40, "");
        assert!(matches!(TileLayer::from_spec(too_deep), Err(MapError::Config(_))));

        let flat = TileLayerSpec::new("flat", "u", 0, 2, "").with_scale(0);
        assert!(matches!(TileLayer::from_spec(flat), Err(MapError::Config(_))));
    }

    #[test]
    fn test_clamp_zoom() {
        let layer = TileLayer::from_spec(TileLayerSpec::new("l", "u", 2, 12, "")).unwrap();
        assert_eq!(layer.clamp_zoom(-4), 2);
        assert_eq!(layer.clamp_zoom(7), 7);
        assert_eq!(layer.clamp_zoom(99), 12);
    }

    #[test]
    fn test_layer_trait_view() {
        let layer = TileLayer::from_spec(osm()).unwrap();
        let as_layer: &dyn LayerTrait = &layer;
        assert_eq!(as_layer.name(), "osm");
        assert_eq!(as_layer.attribution(), "OpenStreetMap contributors");
        assert_eq!(as_layer.options(), *layer.explicit_options());
    }
}
