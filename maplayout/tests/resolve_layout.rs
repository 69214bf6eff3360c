use std::sync::Arc;

use maplayout::{
    longitude_extent, resolve_layout, shared_input, Bounds, LayerType, LayoutSchema, LonExtent,
    ResolveOptions, SampleSet,
};
use serde_json::json;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn samples() -> SampleSet {
    SampleSet::new(vec![10.0, 20.0, 350.0], vec![-5.0, 30.0])
}

#[test]
fn longitude_extent_examples() {
    assert_eq!(longitude_extent(&[]), LonExtent::default());
    assert_eq!(
        longitude_extent(&[10.0, 20.0, 350.0]),
        LonExtent {
            min_lon: -10.0,
            max_lon: 20.0
        }
    );
    assert_eq!(
        longitude_extent(&[0.0, 90.0, 180.0, 270.0]),
        LonExtent {
            min_lon: 90.0,
            max_lon: 0.0
        }
    );
}

#[test]
fn resolved_layout_snapshot() -> anyhow::Result<()> {
    init_logger();

    let input = shared_input(json!({
        "layers": [
            {"visible": false, "color": "red", "type": "line"},
            {
                "sourcetype": "vector",
                "source": ["https://tiles.example.com/{z}/{x}/{y}.pbf"],
                "sourcelayer": "poi",
                "type": "symbol",
                "symbol": {"text": "x"}
            }
        ]
    }));
    let session = resolve_layout(
        &input,
        &LayoutSchema::default(),
        &samples(),
        &ResolveOptions::default(),
    )?;

    insta::assert_snapshot!(serde_json::to_string(session.config())?, @r###"{"style":"basic","bearing":0.0,"pitch":0.0,"fitBounds":{"west":-10.0,"east":20.0,"south":-5.0,"north":30.0},"layers":[{"visible":false},{"visible":true,"sourcetype":"vector","source":["https://tiles.example.com/{z}/{x}/{y}.pbf"],"sourcelayer":"poi","type":"symbol","color":"#444","opacity":1.0,"minzoom":0.0,"maxzoom":24.0,"symbol":{"icon":"marker","iconsize":10.0,"text":"x","textfont":{"family":"Open Sans Regular, Arial Unicode MS Regular","weight":"normal","style":"normal"},"textposition":"middle center","placement":"point"}}]}"###);
    Ok(())
}

#[test]
fn bounds_require_all_edges() -> anyhow::Result<()> {
    let full = json!({"bounds": {"west": 5.5, "east": 15.0, "south": 45.8, "north": 47.9}});
    let session = resolve_layout(
        &shared_input(full.clone()),
        &LayoutSchema::default(),
        &samples(),
        &ResolveOptions::default(),
    )?;
    assert_eq!(
        session.config().bounds,
        Some(Bounds {
            west: 5.5,
            east: 15.0,
            south: 45.8,
            north: 47.9
        })
    );

    let mut partial = full;
    partial["bounds"]
        .as_object_mut()
        .expect("bounds is an object")
        .remove("south");
    let session = resolve_layout(
        &shared_input(partial),
        &LayoutSchema::default(),
        &samples(),
        &ResolveOptions::default(),
    )?;
    let serialized = serde_json::to_value(session.config())?;
    assert!(serialized.get("bounds").is_none());
    Ok(())
}

#[test]
fn raster_source_forces_raster_layer() -> anyhow::Result<()> {
    init_logger();

    let input = shared_input(json!({
        "layers": [{"sourcetype": "raster", "type": "fill", "fill": {"outlinecolor": "red"}}]
    }));
    let session = resolve_layout(
        &input,
        &LayoutSchema::default(),
        &samples(),
        &ResolveOptions::default(),
    )?;

    let layer = session.config().layers[0]
        .layer
        .as_ref()
        .expect("layer is visible");
    assert_eq!(layer.layer_type, Some(LayerType::Raster));
    assert!(layer.fill.is_none());
    assert_eq!(session.diagnostics().len(), 1);
    Ok(())
}

#[test]
fn hidden_layer_serializes_to_visible_only() -> anyhow::Result<()> {
    let input = shared_input(json!({"layers": [{"visible": false, "opacity": 0.5}]}));
    let session = resolve_layout(
        &input,
        &LayoutSchema::default(),
        &samples(),
        &ResolveOptions::default(),
    )?;
    assert_eq!(
        serde_json::to_value(&session.config().layers[0])?,
        json!({"visible": false})
    );
    Ok(())
}

#[test]
fn resolution_is_idempotent() -> anyhow::Result<()> {
    let input = shared_input(json!({
        "style": "satellite",
        "pitch": 30,
        "layers": [{"type": "circle", "circle": {"radius": 4}}]
    }));
    let schema = LayoutSchema::default();
    let options = ResolveOptions::default();

    let first = resolve_layout(&input, &schema, &samples(), &options)?;
    let second = resolve_layout(&input, &schema, &samples(), &options)?;

    assert_eq!(first.config(), second.config());
    assert!(Arc::ptr_eq(first.input(), &input));
    assert!(Arc::ptr_eq(second.input(), &input));
    Ok(())
}

#[test]
fn custom_schema_from_json() -> anyhow::Result<()> {
    let schema = LayoutSchema::from_json(
        r#"{
            "layout": {
                "style": {"valType": "any", "dflt": "dark"},
                "bearing": {"valType": "number"},
                "pitch": {"valType": "number", "min": 0, "max": 60},
                "fitBounds.west": {"valType": "number"},
                "fitBounds.east": {"valType": "number"},
                "fitBounds.south": {"valType": "number"},
                "fitBounds.north": {"valType": "number"},
                "bounds.west": {"valType": "number", "dflt": -180.0},
                "bounds.east": {"valType": "number", "dflt": 180.0},
                "bounds.south": {"valType": "number", "dflt": -85.0},
                "bounds.north": {"valType": "number", "dflt": 85.0}
            },
            "layers": {"visible": {"valType": "boolean", "dflt": true}}
        }"#,
    )?;

    let session = resolve_layout(
        &shared_input(json!({})),
        &schema,
        &samples(),
        &ResolveOptions::default(),
    )?;
    let config = session.config();
    assert_eq!(config.style, Some(json!("dark")));
    assert_eq!(config.bearing, None);
    assert_eq!(
        config.bounds,
        Some(Bounds {
            west: -180.0,
            east: 180.0,
            south: -85.0,
            north: 85.0
        })
    );

    // Only `visible` is declared for layers, every other option is a schema error.
    assert!(matches!(
        resolve_layout(
            &shared_input(json!({"layers": [{"visible": true}]})),
            &schema,
            &samples(),
            &ResolveOptions::default(),
        ),
        Err(maplayout::LayoutError::UnknownAttribute(path)) if path == "layers[0].sourcetype"
    ));
    Ok(())
}

#[test]
fn layer_without_visibility_default_is_hidden() -> anyhow::Result<()> {
    let schema = LayoutSchema::from_json(
        r#"{
            "layout": {
                "style": {"valType": "any"},
                "bearing": {"valType": "number"},
                "pitch": {"valType": "number"},
                "fitBounds.west": {"valType": "number"},
                "fitBounds.east": {"valType": "number"},
                "fitBounds.south": {"valType": "number"},
                "fitBounds.north": {"valType": "number"},
                "bounds.west": {"valType": "number"},
                "bounds.east": {"valType": "number"},
                "bounds.south": {"valType": "number"},
                "bounds.north": {"valType": "number"}
            },
            "layers": {"visible": {"valType": "boolean"}}
        }"#,
    )?;

    let session = resolve_layout(
        &shared_input(json!({"layers": [{}, {"visible": false}]})),
        &schema,
        &samples(),
        &ResolveOptions::default(),
    )?;
    assert_eq!(
        serde_json::to_value(&session.config().layers)?,
        json!([{"visible": false}, {"visible": false}])
    );
    Ok(())
}
