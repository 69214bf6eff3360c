//! Defaults of a single map layer.
//!
//! A layer is resolved in two phases. First every option is coerced from the input, then the
//! combination of source type and layer type is validated and corrected if needed.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::Serialize;
use serde_json::Value;

use super::font::{resolve_font, Font};
use super::Diagnostic;
use crate::coerce::Coercer;
use crate::error::LayoutError;
use crate::schema::FontOptions;

/// Origin of the layer data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    /// GeoJSON object or URL.
    GeoJson,
    /// Vector tiles.
    Vector,
    /// Raster tiles.
    Raster,
    /// Single georeferenced image.
    Image,
}

impl SourceType {
    /// Sources that can only be drawn by a raster layer.
    pub fn must_be_raster(self) -> bool {
        matches!(self, Self::Raster | Self::Image)
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::GeoJson => "geojson",
            Self::Vector => "vector",
            Self::Raster => "raster",
            Self::Image => "image",
        }
    }
}

impl FromStr for SourceType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "geojson" => Ok(Self::GeoJson),
            "vector" => Ok(Self::Vector),
            "raster" => Ok(Self::Raster),
            "image" => Ok(Self::Image),
            _ => Err(()),
        }
    }
}

impl Display for SourceType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the layer is drawn.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub enum LayerType {
    /// Circles at point features.
    Circle,
    /// Lines along line features.
    Line,
    /// Filled polygons.
    Fill,
    /// Icons and text labels.
    Symbol,
    /// Raster tiles or image.
    Raster,
    /// Any other layer type. It is passed through without type specific options.
    Other(String),
}

impl From<&str> for LayerType {
    fn from(value: &str) -> Self {
        match value {
            "circle" => Self::Circle,
            "line" => Self::Line,
            "fill" => Self::Fill,
            "symbol" => Self::Symbol,
            "raster" => Self::Raster,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<LayerType> for String {
    fn from(value: LayerType) -> Self {
        value.to_string()
    }
}

impl Display for LayerType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Circle => "circle",
            Self::Line => "line",
            Self::Fill => "fill",
            Self::Symbol => "symbol",
            Self::Raster => "raster",
            Self::Other(other) => other.as_str(),
        })
    }
}

/// Options of a `circle` layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CircleStyle {
    /// Circle radius in pixels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
}

/// Options of a `line` layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LineStyle {
    /// Line width in pixels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    /// Dash pattern, in line widths.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dash: Option<Value>,
}

/// Options of a `fill` layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FillStyle {
    /// Color of the polygon outline.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outlinecolor: Option<String>,
}

/// Options of a `symbol` layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SymbolStyle {
    /// Icon name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Icon size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iconsize: Option<f64>,
    /// Label text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Label font.
    pub textfont: Font,
    /// Label position relative to the icon.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub textposition: Option<String>,
    /// Placement of the symbol relative to its geometry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placement: Option<String>,
}

/// Options of a visible layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VisibleLayer {
    /// Source type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sourcetype: Option<SourceType>,
    /// Source data: URL, GeoJSON object or list of tile URLs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<Value>,
    /// Attribution of the source.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sourceattribution: Option<String>,
    /// Layer of a vector tile source. Only for [`SourceType::Vector`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sourcelayer: Option<String>,
    /// Image corners. Only for [`SourceType::Image`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Value>,
    /// Layer type. Type specific options are only resolved when it is set.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub layer_type: Option<LayerType>,
    /// Id of the layer this one is drawn under.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub below: Option<String>,
    /// Primary color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Opacity in `[0, 1]`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    /// Minimum zoom level at which the layer is shown.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minzoom: Option<f64>,
    /// Maximum zoom level at which the layer is shown.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maxzoom: Option<f64>,
    /// Circle options. Only for [`LayerType::Circle`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub circle: Option<CircleStyle>,
    /// Line options. Only for [`LayerType::Line`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<LineStyle>,
    /// Fill options. Only for [`LayerType::Fill`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<FillStyle>,
    /// Symbol options. Only for [`LayerType::Symbol`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<SymbolStyle>,
}

/// Resolved layer. A hidden layer carries no options besides `visible`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerConfig {
    /// Whether the layer is drawn.
    pub visible: bool,
    /// Options of the layer if it is visible.
    #[serde(flatten)]
    pub layer: Option<VisibleLayer>,
}

impl LayerConfig {
    /// Hidden layer.
    pub fn hidden() -> Self {
        Self {
            visible: false,
            layer: None,
        }
    }
}

/// Makes the layer type consistent with the source type.
///
/// Raster and image sources can only be drawn by a raster layer, so any other type is replaced
/// and reported with a diagnostic whose path is relative to the layer.
pub fn correct_layer_type(
    sourcetype: SourceType,
    layer_type: LayerType,
) -> (LayerType, Option<Diagnostic>) {
    if !sourcetype.must_be_raster() || layer_type == LayerType::Raster {
        return (layer_type, None);
    }

    let diagnostic = Diagnostic::new(
        "type",
        format!(
            "source type '{sourcetype}' can only be drawn by a 'raster' layer, \
            layer type '{layer_type}' is replaced with 'raster'"
        ),
    );
    (LayerType::Raster, Some(diagnostic))
}

fn source_type(coercer: &Coercer) -> Result<Option<SourceType>, LayoutError> {
    let Some(name) = coercer.string("sourcetype", None)? else {
        return Ok(None);
    };
    name.parse()
        .map(Some)
        .map_err(|_| LayoutError::InvalidValue {
            path: coercer.display_path("sourcetype"),
            value: Value::String(name),
            expected: "one of geojson, vector, raster, image".into(),
        })
}

/// Resolves one entry of the `layers` list. `is_container` is false for entries that are not
/// JSON objects.
pub(crate) fn resolve_layer(
    coercer: &Coercer,
    is_container: bool,
) -> Result<(LayerConfig, Option<Diagnostic>), LayoutError> {
    if !is_container || coercer.boolean("visible")? != Some(true) {
        return Ok((LayerConfig::hidden(), None));
    }

    let sourcetype = source_type(coercer)?;
    let must_be_raster = sourcetype.is_some_and(SourceType::must_be_raster);

    let mut layer = VisibleLayer {
        sourcetype,
        source: coercer.coerce("source", None)?,
        sourceattribution: coercer.string("sourceattribution", None)?,
        ..Default::default()
    };

    if sourcetype == Some(SourceType::Vector) {
        layer.sourcelayer = coercer.string("sourcelayer", None)?;
    }

    if sourcetype == Some(SourceType::Image) {
        layer.coordinates = coercer.coerce("coordinates", None)?;
    }

    let type_default = must_be_raster.then_some("raster");
    let layer_type = coercer
        .string("type", type_default)?
        .map(|name| LayerType::from(name.as_str()));

    let mut diagnostic = None;
    layer.layer_type = match (sourcetype, layer_type) {
        (Some(sourcetype), Some(layer_type)) => {
            let (layer_type, correction) = correct_layer_type(sourcetype, layer_type);
            diagnostic =
                correction.map(|d| Diagnostic::new(coercer.display_path(&d.path), d.message));
            Some(layer_type)
        }
        (_, layer_type) => layer_type,
    };

    layer.below = coercer.string("below", None)?;
    layer.color = coercer.string("color", None)?;
    layer.opacity = coercer.number("opacity", None)?;
    layer.minzoom = coercer.number("minzoom", None)?;
    layer.maxzoom = coercer.number("maxzoom", None)?;

    match &layer.layer_type {
        Some(LayerType::Circle) => {
            layer.circle = Some(CircleStyle {
                radius: coercer.number("circle.radius", None)?,
            });
        }
        Some(LayerType::Line) => {
            layer.line = Some(LineStyle {
                width: coercer.number("line.width", None)?,
                dash: coercer.coerce("line.dash", None)?,
            });
        }
        Some(LayerType::Fill) => {
            layer.fill = Some(FillStyle {
                outlinecolor: coercer.string("fill.outlinecolor", None)?,
            });
        }
        Some(LayerType::Symbol) => {
            layer.symbol = Some(SymbolStyle {
                icon: coercer.string("symbol.icon", None)?,
                iconsize: coercer.number("symbol.iconsize", None)?,
                text: coercer.string("symbol.text", None)?,
                textfont: resolve_font(coercer, "symbol.textfont", None, FontOptions::plain())?,
                textposition: coercer.string("symbol.textposition", None)?,
                placement: coercer.string("symbol.placement", None)?,
            });
        }
        Some(LayerType::Raster | LayerType::Other(_)) | None => {}
    }

    Ok((
        LayerConfig {
            visible: true,
            layer: Some(layer),
        },
        diagnostic,
    ))
}
