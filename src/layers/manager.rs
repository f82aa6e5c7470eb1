use crate::{layers::tile::TileLayer, prelude::HashMap};
use std::sync::Arc;

/// Tracks the layers currently attached to a map.
///
/// Iteration follows activation order; re-adding an attached layer keeps its
/// original slot.
pub struct LayerManager {
    /// Active layers indexed by name
    layers: HashMap<String, Arc<TileLayer>>,
    /// Layer names in the order they were attached
    activation_order: Vec<String>,
}

impl LayerManager {
    pub fn new() -> Self {
        Self {
            layers: HashMap::default(),
            activation_order: Vec::new(),
        }
    }

    /// Attaches a layer; returns `false` if a layer with that name is already attached
    pub fn add_layer(&mut self, layer: Arc<TileLayer>) -> bool {
        let name = layer.name().to_string();
        if self.layers.contains_key(&name) {
            return false;
        }

        self.layers.insert(name.clone(), layer);
        self.activation_order.push(name);
        true
    }

    /// Detaches a layer by name
    pub fn remove_layer(&mut self, name: &str) -> Option<Arc<TileLayer>> {
        self.activation_order.retain(|n| n != name);
        self.layers.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.layers.contains_key(name)
    }

    /// Layer names in activation order
    pub fn names(&self) -> Vec<String> {
        self.activation_order.clone()
    }

    /// Gets all layers in activation order
    pub fn layers(&self) -> Vec<&Arc<TileLayer>> {
        self.activation_order
            .iter()
            .filter_map(|name| self.layers.get(name))
            .collect()
    }

    /// Applies a function to each layer in activation order.
    pub fn for_each_layer<F>(&self, mut f: F)
    where
        F: FnMut(&TileLayer),
    {
        for name in &self.activation_order {
            if let Some(layer) = self.layers.get(name) {
                f(layer.as_ref());
            }
        }
    }

    /// Gets the number of layers
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Checks if the manager is empty
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl Default for LayerManager {
    fn default() -> Self {
        Self::new()
    }
}
