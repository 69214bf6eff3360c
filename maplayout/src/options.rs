//! Options controlling how a layout is resolved.

use serde::{Deserialize, Serialize};

use crate::extent::LatExtent;

/// What to do with an input value that does not satisfy its schema.
///
/// `Lenient` matches plotly.js, which silently falls back to the default for invalid values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoercionPolicy {
    /// Fail the resolution with [`LayoutError::InvalidValue`](crate::LayoutError::InvalidValue).
    #[default]
    Strict,
    /// Replace the value with the default and continue.
    Lenient,
}

/// Options of [`resolve_layout`](crate::resolve_layout).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolveOptions {
    /// Handling of invalid input values.
    pub coercion: CoercionPolicy,
    /// Latitude range used for `fitBounds` when the samples contain no latitudes. Without it
    /// such input is an error.
    pub latitude_fallback: Option<LatExtent>,
}

impl ResolveOptions {
    /// Sets the coercion policy.
    pub fn with_coercion(mut self, coercion: CoercionPolicy) -> Self {
        self.coercion = coercion;
        self
    }

    /// Sets the latitude range used for sample sets without latitudes.
    pub fn with_latitude_fallback(mut self, fallback: LatExtent) -> Self {
        self.latitude_fallback = Some(fallback);
        self
    }
}
