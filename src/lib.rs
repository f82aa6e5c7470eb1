//! # bigmap
//!
//! A small, Rust-native model of a slippy map page whose only job is to turn
//! what the user is looking at into a tile-grid request.
//!
//! The crate is split the same way the page is:
//! - [`core`] holds the map, its viewport and the Web Mercator tile math
//! - [`layers`] holds the tile layer configuration and the layer registry
//! - [`ui`] holds the layers control and the form synchronizer
//! - [`tiles`] holds the receiving side of a submission: request parsing,
//!   normalization, navigation and tile enumeration

pub mod core;
pub mod layers;
pub mod prelude;
pub mod tiles;
pub mod ui;
pub use crate::core::constants;

// Re-export public API
pub use core::{
    builder::{MapBuilder, MapContext},
    geo::{lat_to_tile_y, lon_to_tile_x, LatLng, LatLngBounds, Point, TileCoord},
    map::{Map, MapOptions, MapView},
    viewport::Viewport,
};

pub use layers::{
    base::LayerTrait,
    registry::LayerRegistry,
    tile::{TileLayer, TileLayerOptions, TileLayerSpec},
};

pub use tiles::{
    navigation::Navigation,
    plan::{PlannedTile, TilePlan},
    range::TileRange,
    request::TileRequest,
    source::{TileSource, UrlTemplate},
};

pub use ui::{
    controls::{ControlEntry, LayersControl},
    form::{sync_form, FormFields, FormSnapshot, FormTarget},
};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Layer error: {0}")]
    Layer(String),

    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    #[error("Form has no field named '{0}'")]
    MissingField(String),

    #[error("Parse error: {0}")]
    ParseError(String),
}

/// Error type alias for convenience
pub type Error = MapError;
