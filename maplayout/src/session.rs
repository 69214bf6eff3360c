//! Handle tying a resolved layout to the input container it was resolved from.

use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::coerce::nested_get;
use crate::error::LayoutError;
use crate::layout::{Diagnostic, LayoutConfig};

/// Input container shared between the caller and the sessions resolved from it.
pub type SharedInput = Arc<RwLock<Value>>;

/// Wraps an input container so it can be resolved and updated.
pub fn shared_input(value: Value) -> SharedInput {
    Arc::new(RwLock::new(value))
}

/// Change of the map view, e.g. after the user panned or zoomed. Unset fields are not touched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewUpdate {
    /// New center as `(lon, lat)`.
    pub center: Option<(f64, f64)>,
    /// New zoom level.
    pub zoom: Option<f64>,
    /// New bearing.
    pub bearing: Option<f64>,
    /// New pitch.
    pub pitch: Option<f64>,
}

/// Current map view as stored in the input container.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    /// Center longitude.
    pub lon: f64,
    /// Center latitude.
    pub lat: f64,
    /// Zoom level.
    pub zoom: f64,
    /// Bearing.
    pub bearing: f64,
    /// Pitch.
    pub pitch: f64,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            lon: 0.0,
            lat: 0.0,
            zoom: 1.0,
            bearing: 0.0,
            pitch: 0.0,
        }
    }
}

/// Result of [`resolve_layout`](crate::resolve_layout).
///
/// Holds the resolved configuration and the input container it was resolved from. The
/// container is shared, not copied: view updates are visible to everyone holding it.
#[derive(Debug, Clone)]
pub struct LayoutSession {
    input: SharedInput,
    config: LayoutConfig,
    diagnostics: Vec<Diagnostic>,
}

impl LayoutSession {
    pub(crate) fn new(
        input: SharedInput,
        config: LayoutConfig,
        diagnostics: Vec<Diagnostic>,
    ) -> Self {
        Self {
            input,
            config,
            diagnostics,
        }
    }

    /// Resolved configuration.
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Consumes the session and returns the resolved configuration.
    pub fn into_config(self) -> LayoutConfig {
        self.config
    }

    /// Problems corrected during resolution.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Input container the configuration was resolved from.
    pub fn input(&self) -> &SharedInput {
        &self.input
    }

    /// Writes the view change into the input container.
    ///
    /// A `null` container is replaced by an empty object first.
    pub fn update_view(&self, update: ViewUpdate) -> Result<(), LayoutError> {
        let mut input = self.input.write();
        if input.is_null() {
            *input = Value::Object(Map::new());
        }
        let container = input.as_object_mut().ok_or(LayoutError::NotAContainer)?;

        if let Some((lon, lat)) = update.center {
            let center = container
                .entry("center")
                .or_insert_with(|| Value::Object(Map::new()));
            if !center.is_object() {
                *center = Value::Object(Map::new());
            }
            if let Some(center) = center.as_object_mut() {
                center.insert("lon".into(), Value::from(lon));
                center.insert("lat".into(), Value::from(lat));
            }
        }

        for (key, value) in [
            ("zoom", update.zoom),
            ("bearing", update.bearing),
            ("pitch", update.pitch),
        ] {
            if let Some(value) = value {
                container.insert(key.into(), Value::from(value));
            }
        }

        log::trace!("Map view updated: {update:?}");
        Ok(())
    }

    /// Reads the current view from the input container. Missing or non-numeric fields take their
    /// default values.
    pub fn view(&self) -> ViewState {
        let input = self.input.read();
        let dflt = ViewState::default();
        let number = |path: &str, dflt: f64| {
            nested_get(&input, path)
                .and_then(Value::as_f64)
                .unwrap_or(dflt)
        };

        ViewState {
            lon: number("center.lon", dflt.lon),
            lat: number("center.lat", dflt.lat),
            zoom: number("zoom", dflt.zoom),
            bearing: number("bearing", dflt.bearing),
            pitch: number("pitch", dflt.pitch),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::extent::SampleSet;
    use crate::options::ResolveOptions;
    use crate::resolve_layout;
    use crate::schema::LayoutSchema;

    fn session(input: &SharedInput) -> LayoutSession {
        resolve_layout(
            input,
            &LayoutSchema::default(),
            &SampleSet::from_points([(0.0, 0.0)]),
            &ResolveOptions::default(),
        )
        .unwrap()
    }

    #[test]
    fn update_is_visible_through_shared_input() {
        let input = shared_input(json!({"style": "dark"}));
        let first = session(&input);
        let second = session(&input);

        first
            .update_view(ViewUpdate {
                center: Some((12.5, 41.9)),
                zoom: Some(6.0),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(
            *input.read(),
            json!({"style": "dark", "center": {"lon": 12.5, "lat": 41.9}, "zoom": 6.0})
        );
        assert_eq!(
            second.view(),
            ViewState {
                lon: 12.5,
                lat: 41.9,
                zoom: 6.0,
                ..Default::default()
            }
        );
    }

    #[test]
    fn update_replaces_invalid_center() {
        let input = shared_input(json!({"center": "somewhere"}));
        let session = session(&input);
        session
            .update_view(ViewUpdate {
                center: Some((1.0, 2.0)),
                bearing: Some(30.0),
                pitch: Some(45.0),
                ..Default::default()
            })
            .unwrap();

        let view = session.view();
        assert_eq!((view.lon, view.lat), (1.0, 2.0));
        assert_eq!(view.bearing, 30.0);
        assert_eq!(view.pitch, 45.0);
        assert_eq!(view.zoom, 1.0);
    }

    #[test]
    fn update_of_null_input_creates_container() {
        let input = shared_input(Value::Null);
        let session = session(&input);
        session
            .update_view(ViewUpdate {
                zoom: Some(3.0),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(*input.read(), json!({"zoom": 3.0}));
    }

    #[test]
    fn update_of_non_object_input_fails() {
        let input = shared_input(json!([1, 2]));
        let session = session(&input);
        assert!(matches!(
            session.update_view(ViewUpdate::default()),
            Err(LayoutError::NotAContainer)
        ));
    }
}
