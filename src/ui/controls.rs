use crate::layers::{manager::LayerManager, registry::LayerRegistry, tile::TileLayer};
use serde::Serialize;
use std::sync::Arc;

/// One row of the layers control as the user sees it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ControlEntry {
    pub name: String,
    pub attribution: String,
    pub active: bool,
}

/// Layer-selection control listing every registered layer.
///
/// The control only holds shared handles; toggling goes through
/// [`crate::Map::toggle_layer`] so the map stays the owner of its active set.
#[derive(Debug, Clone)]
pub struct LayersControl {
    layers: Vec<Arc<TileLayer>>,
}

impl LayersControl {
    pub fn new(layers: Vec<Arc<TileLayer>>) -> Self {
        Self { layers }
    }

    /// Populates the control from the full registry, in display order
    pub fn from_registry(registry: &LayerRegistry) -> Self {
        Self::new(registry.iter().cloned().collect())
    }

    pub fn layer(&self, name: &str) -> Option<&Arc<TileLayer>> {
        self.layers.iter().find(|layer| layer.name() == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.layers.iter().map(|layer| layer.name()).collect()
    }

    /// Rows of the control with their checked state
    pub fn entries(&self, active: &LayerManager) -> Vec<ControlEntry> {
        self.layers
            .iter()
            .map(|layer| ControlEntry {
                name: layer.name().to_string(),
                attribution: layer.spec().attribution.clone(),
                active: active.contains(layer.name()),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}
