//! Page-side pieces: the layers control and the form synchronizer

pub mod controls;
pub mod form;

pub use controls::{ControlEntry, LayersControl};
pub use form::{sync_form, FormFields, FormSnapshot, FormTarget};
