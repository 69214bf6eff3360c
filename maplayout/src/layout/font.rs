//! Text font options of symbol layers.

use serde::Serialize;
use serde_json::Value;

use crate::coerce::Coercer;
use crate::error::LayoutError;
use crate::schema::FontOptions;

/// Font weight: a numeric weight or a named one like `bold`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FontWeight {
    /// Numeric weight in `1..=1000`.
    Numeric(i64),
    /// Named weight.
    Named(String),
}

impl FontWeight {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_i64().map(Self::Numeric),
            Value::String(s) => Some(Self::Named(s.clone())),
            _ => None,
        }
    }

    fn to_value(&self) -> Value {
        match self {
            Self::Numeric(n) => Value::from(*n),
            Self::Named(s) => Value::from(s.as_str()),
        }
    }
}

/// Text font.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Font {
    /// Comma separated list of font families.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
    /// Size in points.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    /// Text color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Weight.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<FontWeight>,
    /// `normal` or `italic`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    /// Variant, e.g. `small-caps`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
    /// Letter case transformation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub textcase: Option<String>,
    /// Decoration line position.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lineposition: Option<String>,
    /// Text shadow.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shadow: Option<String>,
}

/// Resolves a font nested under `prefix`.
///
/// Fields of `dflt` take precedence over the schema defaults. Optional parts switched off in
/// `options` stay unset.
pub(crate) fn resolve_font(
    coercer: &Coercer,
    prefix: &str,
    dflt: Option<&Font>,
    options: FontOptions,
) -> Result<Font, LayoutError> {
    let path = |name: &str| format!("{prefix}.{name}");
    let string = |name: &str, dflt: Option<&String>| {
        coercer.string(&path(name), dflt.map(String::as_str))
    };
    let optional = |enabled: bool, name: &str, dflt: Option<&String>| {
        if enabled {
            string(name, dflt)
        } else {
            Ok(None)
        }
    };

    let weight = coercer.coerce(
        &path("weight"),
        dflt.and_then(|f| f.weight.as_ref()).map(FontWeight::to_value),
    )?;

    Ok(Font {
        family: string("family", dflt.and_then(|f| f.family.as_ref()))?,
        size: coercer.number(&path("size"), dflt.and_then(|f| f.size))?,
        color: string("color", dflt.and_then(|f| f.color.as_ref()))?,
        weight: weight.as_ref().and_then(FontWeight::from_value),
        style: string("style", dflt.and_then(|f| f.style.as_ref()))?,
        variant: optional(
            !options.no_variant,
            "variant",
            dflt.and_then(|f| f.variant.as_ref()),
        )?,
        textcase: optional(
            !options.no_textcase,
            "textcase",
            dflt.and_then(|f| f.textcase.as_ref()),
        )?,
        lineposition: optional(
            !options.no_lineposition,
            "lineposition",
            dflt.and_then(|f| f.lineposition.as_ref()),
        )?,
        shadow: optional(
            !options.no_shadow,
            "shadow",
            dflt.and_then(|f| f.shadow.as_ref()),
        )?,
    })
}
