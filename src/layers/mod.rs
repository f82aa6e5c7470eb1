pub mod base;
pub mod manager;
pub mod registry;
pub mod tile;
