//! Prelude module for common bigmap types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use bigmap::prelude::*;`

pub use crate::core::{
    builder::{MapBuilder, MapContext},
    config::{load_providers, parse_providers_csv, parse_providers_json},
    geo::{lat_to_tile_y, lon_to_tile_x, LatLng, LatLngBounds, Point, TileCoord},
    map::{Map, MapOptions, MapView},
    viewport::Viewport,
};

pub use crate::layers::{
    base::LayerTrait,
    manager::LayerManager,
    registry::LayerRegistry,
    tile::{TileLayer, TileLayerOptions, TileLayerSpec},
};

pub use crate::tiles::{
    navigation::Navigation,
    plan::{PlannedTile, TilePlan},
    range::TileRange,
    request::TileRequest,
    source::{TileSource, UrlTemplate},
};

pub use crate::ui::{
    controls::{ControlEntry, LayersControl},
    form::{sync_form, FormFields, FormSnapshot, FormTarget},
};

pub use crate::{Error as MapError, Result};

pub use std::sync::Arc;

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
