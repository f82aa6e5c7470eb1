//! Core constants derived from Leaflet defaults and the tile request page.
//! Keeping them in a single place makes it easier to tweak engine-wide magic numbers.

/// Default square tile size in pixels.
pub const TILE_SIZE: u32 = 256;

/// Initial map center as (latitude, longitude).
pub const DEFAULT_CENTER: (f64, f64) = (52.0, 11.0);

/// Initial map zoom.
pub const DEFAULT_ZOOM: u8 = 3;

/// Name of the layer that is switched on when the map is built.
pub const DEFAULT_LAYER: &str = "mapycz";

/// Default viewport size in pixels (width, height).
pub const DEFAULT_VIEWPORT_SIZE: (f64, f64) = (800.0, 600.0);

/// Zoom ceiling used when no layer constrains the map.
pub const MAX_ZOOM: u8 = 18;

/// Highest zoom a tile layer may declare; keeps `2^zoom` well inside `i64`.
pub const MAX_TILE_ZOOM: u8 = 30;

/// Latitude limit of the square Web Mercator world.
pub const MAX_LATITUDE: f64 = 85.0511287798;

/// Sub-domains the widget falls back to when a layer declares none.
pub const DEFAULT_SUBDOMAINS: &str = "abc";

/// Joins active layer names in the `provider` form field.
pub const PROVIDER_SEPARATOR: &str = "|";

/// Form fields written by the synchronizer, in write order.
pub const FORM_FIELDS: [&str; 6] = ["zoom", "xmin", "xmax", "ymin", "ymax", "provider"];

/// Request defaults used when a submission omits a parameter.
pub const DEFAULT_REQUEST_ZOOM: i64 = 3;
pub const DEFAULT_REQUEST_XMIN: i64 = 1;
pub const DEFAULT_REQUEST_YMIN: i64 = 1;
pub const DEFAULT_REQUEST_XMAX: i64 = 3;
pub const DEFAULT_REQUEST_YMAX: i64 = 3;
