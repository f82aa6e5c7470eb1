//! Tile addressing: URL templates, tile ranges and the request side of the
//! form (parsing, navigation between neighbouring requests, tile plans)

pub mod navigation;
pub mod plan;
pub mod range;
pub mod request;
pub mod source;

pub use navigation::Navigation;
pub use plan::{PlannedTile, TilePlan};
pub use range::TileRange;
pub use request::TileRequest;
pub use source::{TileSource, UrlTemplate};
