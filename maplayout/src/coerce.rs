//! Resolution of a single attribute from an input container.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::{Number, Value};

use crate::error::LayoutError;
use crate::options::CoercionPolicy;
use crate::schema::{AttributeSet, ValType};

const COLOR_PATTERN: &str = r"^(#([0-9a-fA-F]{3,4}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})|(rgb|rgba|hsl|hsla|hsv|hsva)\(\s*[-+0-9.eE%\s,/]+\)|[a-zA-Z]+)$";

// Floats in this range convert to `i64` exactly, larger magnitudes would saturate.
const I64_LOWER: f64 = -9_223_372_036_854_775_808.0;
const I64_UPPER: f64 = 9_223_372_036_854_775_808.0;

static COLOR_REGEX: OnceLock<Regex> = OnceLock::new();

fn is_color(value: &str) -> bool {
    COLOR_REGEX
        .get_or_init(|| Regex::new(COLOR_PATTERN).expect("color pattern is valid"))
        .is_match(value.trim())
}

/// Reads a value at a dotted path, e.g. `fitBounds.west`.
pub(crate) fn nested_get<'v>(container: &'v Value, path: &str) -> Option<&'v Value> {
    path.split('.')
        .try_fold(container, |value, key| value.as_object()?.get(key))
}

fn as_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }?;
    number.is_finite().then_some(number)
}

fn in_range<T: PartialOrd>(value: T, min: Option<T>, max: Option<T>) -> bool {
    min.map_or(true, |min| value >= min) && max.map_or(true, |max| value <= max)
}

/// Checks the value against the type and returns its canonical form, or `None` if the value is
/// not acceptable.
fn clean(val_type: &ValType, value: &Value) -> Option<Value> {
    match val_type {
        ValType::Any => Some(value.clone()),
        ValType::Boolean => value.as_bool().map(Value::Bool),
        ValType::Number { min, max } => as_number(value)
            .filter(|n| in_range(*n, *min, *max))
            .and_then(Number::from_f64)
            .map(Value::Number),
        ValType::Integer { min, max, extras } => match value {
            Value::String(s) if extras.contains(s) => Some(value.clone()),
            _ => as_number(value)
                .filter(|n| n.fract() == 0.0 && (I64_LOWER..I64_UPPER).contains(n))
                .map(|n| n as i64)
                .filter(|n| in_range(*n, *min, *max))
                .map(Value::from),
        },
        ValType::String { no_blank } => {
            let s = match value {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                _ => return None,
            };
            (!(*no_blank && s.trim().is_empty())).then_some(Value::String(s))
        }
        ValType::Color => value
            .as_str()
            .filter(|s| is_color(s))
            .map(|_| value.clone()),
        ValType::DataArray => value.is_array().then(|| value.clone()),
        ValType::Enumerated { values, open } => value
            .as_str()
            .filter(|s| *open || values.iter().any(|v| v == s))
            .map(|_| value.clone()),
    }
}

fn describe(val_type: &ValType) -> String {
    let range = |min: Option<String>, max: Option<String>| match (min, max) {
        (None, None) => String::new(),
        (min, max) => format!(
            " in [{}, {}]",
            min.unwrap_or_else(|| "-inf".into()),
            max.unwrap_or_else(|| "inf".into())
        ),
    };

    match val_type {
        ValType::Any => "any non-null value".into(),
        ValType::Boolean => "a boolean".into(),
        ValType::Number { min, max } => format!(
            "a number{}",
            range(min.map(|v| v.to_string()), max.map(|v| v.to_string()))
        ),
        ValType::Integer { min, max, extras } => {
            let mut description = format!(
                "an integer{}",
                range(min.map(|v| v.to_string()), max.map(|v| v.to_string()))
            );
            if !extras.is_empty() {
                description += &format!(" or one of {extras:?}");
            }
            description
        }
        ValType::String { no_blank: true } => "a non-blank string".into(),
        ValType::String { no_blank: false } => "a string".into(),
        ValType::Color => "a color".into(),
        ValType::DataArray => "an array".into(),
        ValType::Enumerated { open: true, .. } => "a string".into(),
        ValType::Enumerated { values, .. } => format!("one of {values:?}"),
    }
}

/// Resolves attributes of one input container against an attribute set.
///
/// The value of an attribute is taken from the input if it is valid, otherwise from the given
/// default, otherwise from the schema default. If none of those exist the attribute is
/// unresolved (`None`).
pub struct Coercer<'a> {
    input: &'a Value,
    attributes: &'a AttributeSet,
    policy: CoercionPolicy,
    context: Option<String>,
}

impl<'a> Coercer<'a> {
    /// Creates a coercer reading from `input`.
    pub fn new(input: &'a Value, attributes: &'a AttributeSet, policy: CoercionPolicy) -> Self {
        Self {
            input,
            attributes,
            policy,
            context: None,
        }
    }

    /// Sets the prefix used for attribute paths in errors and diagnostics, e.g. `layers[3]`.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Full path of the attribute as reported to the user.
    pub fn display_path(&self, path: &str) -> String {
        match &self.context {
            Some(context) => format!("{context}.{path}"),
            None => path.to_string(),
        }
    }

    /// Resolves the attribute at `path`.
    ///
    /// `dflt` takes precedence over the schema default.
    pub fn coerce(&self, path: &str, dflt: Option<Value>) -> Result<Option<Value>, LayoutError> {
        let attribute = self
            .attributes
            .get(path)
            .ok_or_else(|| LayoutError::UnknownAttribute(self.display_path(path)))?;
        let dflt = dflt.or_else(|| attribute.dflt.clone());

        let value = match nested_get(self.input, path) {
            None | Some(Value::Null) => return Ok(dflt),
            Some(value) => value,
        };

        if let Some(cleaned) = clean(&attribute.val_type, value) {
            return Ok(Some(cleaned));
        }

        match self.policy {
            CoercionPolicy::Strict => Err(LayoutError::InvalidValue {
                path: self.display_path(path),
                value: value.clone(),
                expected: describe(&attribute.val_type),
            }),
            CoercionPolicy::Lenient => {
                log::debug!(
                    "Invalid value {value} for '{}', falling back to {dflt:?}",
                    self.display_path(path)
                );
                Ok(dflt)
            }
        }
    }

    /// Resolves a numeric attribute.
    pub fn number(&self, path: &str, dflt: Option<f64>) -> Result<Option<f64>, LayoutError> {
        let value = self.coerce(path, dflt.map(Value::from))?;
        self.typed(path, value, Value::as_f64, "a number")
    }

    /// Resolves a boolean attribute.
    pub fn boolean(&self, path: &str) -> Result<Option<bool>, LayoutError> {
        let value = self.coerce(path, None)?;
        self.typed(path, value, Value::as_bool, "a boolean")
    }

    /// Resolves a string attribute.
    pub fn string(&self, path: &str, dflt: Option<&str>) -> Result<Option<String>, LayoutError> {
        let value = self.coerce(path, dflt.map(Value::from))?;
        self.typed(path, value, |v| v.as_str().map(String::from), "a string")
    }

    // Guards against schemas whose declared type (or default) does not match the Rust type the
    // resolver needs.
    fn typed<T>(
        &self,
        path: &str,
        value: Option<Value>,
        convert: impl Fn(&Value) -> Option<T>,
        expected: &str,
    ) -> Result<Option<T>, LayoutError> {
        match value {
            None => Ok(None),
            Some(value) => match convert(&value) {
                Some(converted) => Ok(Some(converted)),
                None => Err(LayoutError::InvalidValue {
                    path: self.display_path(path),
                    value,
                    expected: expected.to_string(),
                }),
            },
        }
    }
}
