/// What the map needs to know about any layer it carries.
///
/// The form synchronizer only reads the configured name; the control also
/// shows the attribution.
pub trait LayerTrait {
    /// The configured name; unique within a registry
    fn name(&self) -> &str;

    /// Attribution text shown next to the layer
    fn attribution(&self) -> &str {
        ""
    }

    /// The option object the layer was constructed with
    fn options(&self) -> serde_json::Value {
        serde_json::Value::Null
    }
}
