use crate::{
    layers::tile::{TileLayer, TileLayerSpec},
    prelude::HashMap,
    Result,
};
use std::sync::Arc;

/// Name → tile layer mapping built once from configuration.
///
/// Display order is the order in which names were first seen. A later entry
/// with an already registered name replaces the earlier layer but keeps its
/// display slot, the same way a repeated key behaves in an object literal.
#[derive(Debug, Default)]
pub struct LayerRegistry {
    layers: HashMap<String, Arc<TileLayer>>,
    display_order: Vec<String>,
}

impl LayerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the registry from configuration entries in order.
    pub fn from_specs<I>(specs: I) -> Result<Self>
    where
        I: IntoIterator<Item = TileLayerSpec>,
    {
        let mut registry = Self::new();
        for spec in specs {
            registry.insert(TileLayer::from_spec(spec)?);
        }
        Ok(registry)
    }

    /// Registers a layer; returns the layer it replaced, if any
    pub fn insert(&mut self, layer: TileLayer) -> Option<Arc<TileLayer>> {
        let name = layer.name().to_string();
        log::debug!("registering layer '{}' ({})", name, layer.url_template());

        let replaced = self.layers.insert(name.clone(), Arc::new(layer));
        match &replaced {
            Some(_) => log::warn!("layer '{}' defined more than once, keeping the last one", name),
            None => self.display_order.push(name),
        }
        replaced
    }

    pub fn get(&self, name: &str) -> Option<&Arc<TileLayer>> {
        self.layers.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.layers.contains_key(name)
    }

    /// The first layer in display order
    pub fn first(&self) -> Option<&Arc<TileLayer>> {
        self.display_order.first().and_then(|name| self.layers.get(name))
    }

    /// Layers in display order
    pub fn iter(&self) -> impl Iterator<Item = &Arc<TileLayer>> + '_ {
        self.display_order
            .iter()
            .filter_map(move |name| self.layers.get(name))
    }

    pub fn names(&self) -> Vec<&str> {
        self.display_order.iter().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}
