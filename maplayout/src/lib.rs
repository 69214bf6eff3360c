//! Layout defaults for map subplots.
//!
//! Takes a partially specified map container (usually parsed from JSON), an attribute schema and
//! the geographic samples of the plotted data, and produces a fully resolved [`LayoutConfig`]:
//!
//! * the initial view (`fitBounds`) is fitted to the data. Longitudes are bounded by the
//!   smallest arc containing all samples, so data around the antimeridian is framed correctly;
//! * `bounds` restricting the view are kept only when all four edges are given;
//! * each entry of `layers` gets the options relevant for its source and layer type.
//!
//! ```no_run
//! use maplayout::{resolve_layout, shared_input, LayoutSchema, ResolveOptions, SampleSet};
//!
//! let input = shared_input(serde_json::json!({
//!     "style": "carto-positron",
//!     "layers": [{"sourcetype": "raster", "source": ["https://tiles.example.com/{z}/{x}/{y}.png"]}]
//! }));
//! let samples = SampleSet::from_points([(179.5, -16.8), (-178.9, -18.1)]);
//! let session = resolve_layout(
//!     &input,
//!     &LayoutSchema::default(),
//!     &samples,
//!     &ResolveOptions::default(),
//! )?;
//! println!("{}", serde_json::to_string_pretty(session.config())?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod coerce;
mod error;
pub mod extent;
pub mod layout;
mod options;
pub mod schema;
mod session;

pub use error::LayoutError;
pub use extent::{
    latitude_extent, longitude_extent, BoundingExtent, LatExtent, LonExtent, SampleSet,
};
pub use layout::{
    resolve_layout, Bounds, Diagnostic, LayerConfig, LayerType, LayoutConfig, SourceType,
};
pub use options::{CoercionPolicy, ResolveOptions};
pub use schema::LayoutSchema;
pub use session::{shared_input, LayoutSession, SharedInput, ViewState, ViewUpdate};
