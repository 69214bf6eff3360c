//! Attribute schema: which options a layout container accepts, of what type, and with what
//! default values.
//!
//! A schema can be built in code (see [`layout_attributes`]) or loaded from JSON using the
//! `{"valType": "number", "min": 0, "dflt": 1}` notation.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::LayoutError;

mod map_attributes;

pub use map_attributes::{
    font_attributes, layer_attributes, layout_attributes, FontOptions, STYLE_NAMES,
};

/// Type of an attribute value together with its constraints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "valType", rename_all = "snake_case")]
pub enum ValType {
    /// Any value except `null`.
    Any,
    /// `true` or `false`.
    Boolean,
    /// Floating point number within the optional inclusive range.
    Number {
        /// Minimum allowed value.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        /// Maximum allowed value.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
    },
    /// Integer within the optional inclusive range, or one of the extra string values.
    Integer {
        /// Minimum allowed value.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<i64>,
        /// Maximum allowed value.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<i64>,
        /// String values accepted in addition to the integers.
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        extras: Vec<String>,
    },
    /// String. Numbers are converted to their string representation.
    String {
        /// Reject empty strings.
        #[serde(default, rename = "noBlank")]
        no_blank: bool,
    },
    /// CSS-like color string.
    Color,
    /// JSON array.
    DataArray,
    /// One of the listed string values.
    Enumerated {
        /// Known values.
        values: Vec<String>,
        /// Accept strings that are not in the list as well.
        #[serde(default)]
        open: bool,
    },
}

/// Declaration of a single attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    /// Value type.
    #[serde(flatten)]
    pub val_type: ValType,
    /// Default value used when the input does not provide a valid one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dflt: Option<Value>,
}

impl Attribute {
    /// Creates an attribute without a default value.
    pub fn new(val_type: ValType) -> Self {
        Self {
            val_type,
            dflt: None,
        }
    }

    /// Attribute accepting any non-null value.
    pub fn any() -> Self {
        Self::new(ValType::Any)
    }

    /// Boolean attribute.
    pub fn boolean() -> Self {
        Self::new(ValType::Boolean)
    }

    /// Unbounded number attribute.
    pub fn number() -> Self {
        Self::new(ValType::Number {
            min: None,
            max: None,
        })
    }

    /// Number attribute limited to the inclusive range.
    pub fn number_in(min: Option<f64>, max: Option<f64>) -> Self {
        Self::new(ValType::Number { min, max })
    }

    /// String attribute.
    pub fn string() -> Self {
        Self::new(ValType::String { no_blank: false })
    }

    /// Color attribute.
    pub fn color() -> Self {
        Self::new(ValType::Color)
    }

    /// Array attribute.
    pub fn data_array() -> Self {
        Self::new(ValType::DataArray)
    }

    /// Attribute with a closed set of string values.
    pub fn enumerated(values: &[&str]) -> Self {
        Self::new(ValType::Enumerated {
            values: values.iter().map(|v| v.to_string()).collect(),
            open: false,
        })
    }

    /// Sets the default value.
    pub fn with_default(mut self, dflt: impl Into<Value>) -> Self {
        self.dflt = Some(dflt.into());
        self
    }

    /// Makes an enumerated attribute accept unlisted values.
    pub fn open(mut self) -> Self {
        if let ValType::Enumerated { open, .. } = &mut self.val_type {
            *open = true;
        }
        self
    }
}

/// Set of attributes addressed by dotted paths, e.g. `fitBounds.west`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeSet {
    attributes: HashMap<String, Attribute, ahash::RandomState>,
}

impl AttributeSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces an attribute and returns the set.
    pub fn with(mut self, path: impl Into<String>, attribute: Attribute) -> Self {
        self.insert(path, attribute);
        self
    }

    /// Adds or replaces an attribute.
    pub fn insert(&mut self, path: impl Into<String>, attribute: Attribute) {
        self.attributes.insert(path.into(), attribute);
    }

    /// Returns the attribute declared at the given path.
    pub fn get(&self, path: &str) -> Option<&Attribute> {
        self.attributes.get(path)
    }

    /// Number of declared attributes.
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Returns true if no attributes are declared.
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

impl Extend<(String, Attribute)> for AttributeSet {
    fn extend<T: IntoIterator<Item = (String, Attribute)>>(&mut self, iter: T) {
        self.attributes.extend(iter);
    }
}

/// Schema of a map subplot container: top level options and options of a single layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutSchema {
    /// Options of the map container itself.
    pub layout: AttributeSet,
    /// Options of an entry of the `layers` list.
    pub layers: AttributeSet,
}

impl LayoutSchema {
    /// Parses a schema from its JSON representation.
    pub fn from_json(json: &str) -> Result<Self, LayoutError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Default for LayoutSchema {
    fn default() -> Self {
        Self {
            layout: layout_attributes(),
            layers: layer_attributes(),
        }
    }
}
