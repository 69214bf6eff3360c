//! Resolution of a map subplot container into a [`LayoutConfig`].

use std::fmt::{Display, Formatter};

use serde::Serialize;
use serde_json::Value;

use crate::coerce::{nested_get, Coercer};
use crate::error::LayoutError;
use crate::extent::{latitude_extent, longitude_extent, BoundingExtent, SampleSet};
use crate::options::ResolveOptions;
use crate::schema::LayoutSchema;
use crate::session::{LayoutSession, SharedInput};

mod font;
mod layer;

pub use font::{Font, FontWeight};
pub use layer::{
    correct_layer_type, CircleStyle, FillStyle, LayerConfig, LayerType, LineStyle, SourceType,
    SymbolStyle, VisibleLayer,
};

/// Rectangular geographic area, in degrees.
///
/// `west > east` describes an area crossing the antimeridian.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    /// Western edge.
    pub west: f64,
    /// Eastern edge.
    pub east: f64,
    /// Southern edge.
    pub south: f64,
    /// Northern edge.
    pub north: f64,
}

impl From<BoundingExtent> for Bounds {
    fn from(extent: BoundingExtent) -> Self {
        Self {
            west: extent.min_lon,
            east: extent.max_lon,
            south: extent.min_lat,
            north: extent.max_lat,
        }
    }
}

/// Resolved map subplot configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutConfig {
    /// Base map style: a style name, a style URL or an inline style object.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<Value>,
    /// Map rotation in degrees, clockwise from north.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bearing: Option<f64>,
    /// Camera tilt in degrees.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pitch: Option<f64>,
    /// Area the initial view is fitted to. Defaults to the extent of the data.
    pub fit_bounds: Bounds,
    /// Area the view is restricted to. Only set if all four edges are given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounds: Option<Bounds>,
    /// Layers in drawing order.
    pub layers: Vec<LayerConfig>,
}

/// Non-fatal problem found and corrected during resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Path of the affected attribute, e.g. `layers[2].type`.
    pub path: String,
    /// Description of the problem and of the applied correction.
    pub message: String,
}

impl Diagnostic {
    /// Creates a new diagnostic.
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

fn data_extent(
    samples: &SampleSet,
    options: &ResolveOptions,
) -> Result<BoundingExtent, LayoutError> {
    let lon = longitude_extent(&samples.lon);
    let lat = match (latitude_extent(&samples.lat), options.latitude_fallback) {
        (Ok(lat), _) => lat,
        (Err(LayoutError::EmptyInput { .. }), Some(fallback)) => {
            log::debug!("No latitude samples, using fallback range {fallback:?}");
            fallback
        }
        (Err(err), _) => return Err(err),
    };

    Ok(BoundingExtent::new(lon, lat))
}

fn resolve_bounds(
    coercer: &Coercer,
    group: &str,
    defaults: Option<Bounds>,
) -> Result<Option<Bounds>, LayoutError> {
    let edge = |name: &str, dflt: Option<f64>| coercer.number(&format!("{group}.{name}"), dflt);

    let west = edge("west", defaults.map(|b| b.west))?;
    let east = edge("east", defaults.map(|b| b.east))?;
    let south = edge("south", defaults.map(|b| b.south))?;
    let north = edge("north", defaults.map(|b| b.north))?;

    Ok(match (west, east, south, north) {
        (Some(west), Some(east), Some(south), Some(north)) => Some(Bounds {
            west,
            east,
            south,
            north,
        }),
        _ => None,
    })
}

/// Resolves a map subplot container.
///
/// The view is fitted to the extent of `samples` unless `fitBounds` is given explicitly.
/// The returned session keeps a handle to `input`, so later view changes can be written back.
pub fn resolve_layout(
    input: &SharedInput,
    schema: &LayoutSchema,
    samples: &SampleSet,
    options: &ResolveOptions,
) -> Result<LayoutSession, LayoutError> {
    let extent = data_extent(samples, options)?;

    let container = input.read();
    let coercer = Coercer::new(&container, &schema.layout, options.coercion);

    let style = coercer.coerce("style", None)?;
    let bearing = coercer.number("bearing", None)?;
    let pitch = coercer.number("pitch", None)?;

    let data_bounds = Bounds::from(extent);
    let fit_bounds =
        resolve_bounds(&coercer, "fitBounds", Some(data_bounds))?.unwrap_or(data_bounds);
    let bounds = resolve_bounds(&coercer, "bounds", None)?;

    let mut layers = vec![];
    let mut diagnostics = vec![];
    if let Some(Value::Array(items)) = nested_get(&container, "layers") {
        for (index, item) in items.iter().enumerate() {
            let layer_coercer = Coercer::new(item, &schema.layers, options.coercion)
                .with_context(format!("layers[{index}]"));
            let (layer, diagnostic) = layer::resolve_layer(&layer_coercer, item.is_object())?;
            if let Some(diagnostic) = diagnostic {
                log::warn!("{diagnostic}");
                diagnostics.push(diagnostic);
            }
            layers.push(layer);
        }
    }

    log::debug!(
        "Resolved map layout with {} layers, fitted to {fit_bounds:?}",
        layers.len()
    );

    let config = LayoutConfig {
        style,
        bearing,
        pitch,
        fit_bounds,
        bounds,
        layers,
    };

    drop(container);
    Ok(LayoutSession::new(input.clone(), config, diagnostics))
}
