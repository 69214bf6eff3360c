//! Built-in attribute tables of map subplots and their layers.

use serde::{Deserialize, Serialize};

use super::{Attribute, AttributeSet, ValType};

/// Names of the built-in base map styles.
pub const STYLE_NAMES: &[&str] = &[
    "basic",
    "carto-darkmatter",
    "carto-darkmatter-nolabels",
    "carto-positron",
    "carto-positron-nolabels",
    "carto-voyager",
    "carto-voyager-nolabels",
    "dark",
    "light",
    "open-street-map",
    "outdoors",
    "satellite",
    "satellite-streets",
    "streets",
    "white-bg",
];

const DEFAULT_LINE_COLOR: &str = "#444";
const DEFAULT_TEXT_FONT: &str = "Open Sans Regular, Arial Unicode MS Regular";
const MAX_ZOOM: f64 = 24.0;

const BOUND_EDGES: [&str; 4] = ["west", "east", "south", "north"];

/// Attributes of the map container.
pub fn layout_attributes() -> AttributeSet {
    // `style` also accepts style URLs and inline style objects, so it is not enumerated.
    let mut attributes = AttributeSet::new()
        .with("style", Attribute::any().with_default(STYLE_NAMES[0]))
        .with("center.lon", Attribute::number().with_default(0.0))
        .with("center.lat", Attribute::number().with_default(0.0))
        .with("zoom", Attribute::number().with_default(1.0))
        .with("bearing", Attribute::number().with_default(0.0))
        .with("pitch", Attribute::number().with_default(0.0));

    for group in ["fitBounds", "bounds"] {
        attributes.extend(
            BOUND_EDGES
                .iter()
                .map(|edge| (format!("{group}.{edge}"), Attribute::number())),
        );
    }

    attributes
}

/// Attributes of a single entry of the `layers` list.
pub fn layer_attributes() -> AttributeSet {
    let mut attributes = AttributeSet::new()
        .with("visible", Attribute::boolean().with_default(true))
        .with(
            "sourcetype",
            Attribute::enumerated(&["geojson", "vector", "raster", "image"])
                .with_default("geojson"),
        )
        .with("source", Attribute::any())
        .with("sourcelayer", Attribute::string().with_default(""))
        .with("sourceattribution", Attribute::string())
        .with(
            "type",
            Attribute::enumerated(&["circle", "line", "fill", "symbol", "raster"])
                .open()
                .with_default("circle"),
        )
        .with("coordinates", Attribute::any())
        .with("below", Attribute::string())
        .with("color", Attribute::color().with_default(DEFAULT_LINE_COLOR))
        .with(
            "opacity",
            Attribute::number_in(Some(0.0), Some(1.0)).with_default(1.0),
        )
        .with(
            "minzoom",
            Attribute::number_in(Some(0.0), Some(MAX_ZOOM)).with_default(0.0),
        )
        .with(
            "maxzoom",
            Attribute::number_in(Some(0.0), Some(MAX_ZOOM)).with_default(MAX_ZOOM),
        )
        .with(
            "circle.radius",
            Attribute::number_in(Some(0.0), None).with_default(15.0),
        )
        .with(
            "line.width",
            Attribute::number_in(Some(0.0), None).with_default(2.0),
        )
        .with("line.dash", Attribute::data_array())
        .with(
            "fill.outlinecolor",
            Attribute::color().with_default(DEFAULT_LINE_COLOR),
        )
        .with("symbol.icon", Attribute::string().with_default("marker"))
        .with(
            "symbol.iconsize",
            Attribute::number_in(Some(0.0), None).with_default(10.0),
        )
        .with("symbol.text", Attribute::string().with_default(""))
        .with(
            "symbol.textposition",
            Attribute::enumerated(&[
                "top left",
                "top center",
                "top right",
                "middle left",
                "middle center",
                "middle right",
                "bottom left",
                "bottom center",
                "bottom right",
            ])
            .with_default("middle center"),
        )
        .with(
            "symbol.placement",
            Attribute::enumerated(&["point", "line", "line-center"]).with_default("point"),
        );

    attributes.extend(font_attributes(
        "symbol.textfont",
        DEFAULT_TEXT_FONT,
        FontOptions::plain(),
    ));

    attributes
}

/// Switches for the optional parts of a font.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontOptions {
    /// Omit `variant`.
    pub no_variant: bool,
    /// Omit `shadow`.
    pub no_shadow: bool,
    /// Omit `lineposition`.
    pub no_lineposition: bool,
    /// Omit `textcase`.
    pub no_textcase: bool,
}

impl FontOptions {
    /// Font with only family, size, color, weight and style.
    pub fn plain() -> Self {
        Self {
            no_variant: true,
            no_shadow: true,
            no_lineposition: true,
            no_textcase: true,
        }
    }
}

/// Font attributes nested under `prefix`.
pub fn font_attributes(
    prefix: &str,
    family: &str,
    options: FontOptions,
) -> Vec<(String, Attribute)> {
    let path = |name: &str| format!("{prefix}.{name}");

    let mut attributes = vec![
        (
            path("family"),
            Attribute::new(ValType::String { no_blank: true }).with_default(family),
        ),
        (path("size"), Attribute::number_in(Some(1.0), None)),
        (path("color"), Attribute::color()),
        (
            path("weight"),
            Attribute::new(ValType::Integer {
                min: Some(1),
                max: Some(1000),
                extras: vec!["normal".into(), "bold".into()],
            })
            .with_default("normal"),
        ),
        (
            path("style"),
            Attribute::enumerated(&["normal", "italic"]).with_default("normal"),
        ),
    ];

    if !options.no_variant {
        attributes.push((
            path("variant"),
            Attribute::enumerated(&[
                "normal",
                "small-caps",
                "all-small-caps",
                "all-petite-caps",
                "petite-caps",
                "unicase",
            ])
            .with_default("normal"),
        ));
    }

    if !options.no_textcase {
        attributes.push((
            path("textcase"),
            Attribute::enumerated(&["normal", "word caps", "upper", "lower"])
                .with_default("normal"),
        ));
    }

    if !options.no_lineposition {
        attributes.push((
            path("lineposition"),
            Attribute::enumerated(&["none", "under", "over", "through"]).with_default("none"),
        ));
    }

    if !options.no_shadow {
        attributes.push((path("shadow"), Attribute::string().with_default("none")));
    }

    attributes
}
