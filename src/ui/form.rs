//! Viewport-to-form synchronization
//!
//! On demand, the current zoom and visible bounds are converted into the
//! bounding tile columns and rows, and written together with the names of the
//! active layers into a form that the page then submits.

use crate::{
    core::{
        constants::{FORM_FIELDS, PROVIDER_SEPARATOR},
        map::MapView,
    },
    layers::base::LayerTrait,
    tiles::range::TileRange,
    MapError, Result,
};
use serde::{Deserialize, Serialize};

/// Anything that exposes named, writable form fields.
pub trait FormTarget {
    /// Writes `value` into the named field. A missing field is an error.
    fn set_value(&mut self, field: &str, value: &str) -> Result<()>;
}

/// An in-memory form with a fixed set of named fields.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormFields {
    fields: Vec<(String, String)>,
}

impl FormFields {
    /// Creates a form with the given empty fields
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: names
                .into_iter()
                .map(|name| (name.into(), String::new()))
                .collect(),
        }
    }

    /// The six fields of the tile request form
    pub fn tile_request() -> Self {
        Self::new(FORM_FIELDS)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn names(&self) -> Vec<&str> {
        self.fields.iter().map(|(field, _)| field.as_str()).collect()
    }

    /// URL-encoded submission of every field in declaration order
    pub fn to_query(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.fields.iter())
            .finish()
    }
}

impl FormTarget for FormFields {
    fn set_value(&mut self, field: &str, value: &str) -> Result<()> {
        let slot = self
            .fields
            .iter_mut()
            .find(|(name, _)| name == field)
            .ok_or_else(|| MapError::MissingField(field.to_string()))?;
        slot.1 = value.to_string();
        Ok(())
    }
}

/// The values the synchronizer writes, captured from a map view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSnapshot {
    pub zoom: u8,
    pub xmin: i64,
    pub xmax: i64,
    pub ymin: i64,
    pub ymax: i64,
    /// Active layer names joined with `|`, empty when none is active
    pub provider: String,
}

impl FormSnapshot {
    /// Reads zoom, bounds and active layers; never touches the view.
    pub fn capture<V: MapView + ?Sized>(view: &V) -> Self {
        let zoom = view.zoom();
        let range = TileRange::from_bounds(&view.bounds(), zoom);

        let mut names: Vec<String> = Vec::new();
        view.each_layer(&mut |layer: &dyn LayerTrait| names.push(layer.name().to_string()));

        let snapshot = Self {
            zoom,
            xmin: range.xmin,
            xmax: range.xmax,
            ymin: range.ymin,
            ymax: range.ymax,
            provider: names.join(PROVIDER_SEPARATOR),
        };
        log::debug!("captured form snapshot {:?}", snapshot);
        snapshot
    }

    pub fn range(&self) -> TileRange {
        TileRange::new(self.xmin, self.ymin, self.xmax, self.ymax)
    }

    /// The individual provider names
    pub fn providers(&self) -> Vec<&str> {
        self.provider
            .split(PROVIDER_SEPARATOR)
            .filter(|name| !name.is_empty())
            .collect()
    }

    /// Writes every field; stops at the first field the form lacks.
    pub fn write_to<F: FormTarget + ?Sized>(&self, form: &mut F) -> Result<()> {
        form.set_value("zoom", &self.zoom.to_string())?;
        form.set_value("xmin", &self.xmin.to_string())?;
        form.set_value("xmax", &self.xmax.to_string())?;
        form.set_value("ymin", &self.ymin.to_string())?;
        form.set_value("ymax", &self.ymax.to_string())?;
        form.set_value("provider", &self.provider)?;
        Ok(())
    }

    /// URL-encoded submission in form field order
    pub fn to_query(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .append_pair("zoom", &self.zoom.to_string())
            .append_pair("xmin", &self.xmin.to_string())
            .append_pair("xmax", &self.xmax.to_string())
            .append_pair("ymin", &self.ymin.to_string())
            .append_pair("ymax", &self.ymax.to_string())
            .append_pair("provider", &self.provider)
            .finish()
    }
}

/// Copies the current view of `view` into `form`.
pub fn sync_form<V, F>(view: &V, form: &mut F) -> Result<()>
where
    V: MapView + ?Sized,
    F: FormTarget + ?Sized,
{
    FormSnapshot::capture(view).write_to(form)
}
