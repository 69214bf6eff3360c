//! Resolves a map layout for samples scattered around the antimeridian (Fiji) and prints it.
//! Run with: RUST_LOG=debug cargo run --example fit_bounds

use maplayout::{
    resolve_layout, shared_input, LayoutSchema, ResolveOptions, SampleSet, ViewUpdate,
};
use serde_json::json;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let samples = SampleSet::from_points([
        (177.4, -17.7),
        (178.4, -18.1),
        (179.9, -16.6),
        (-179.8, -16.2),
        (-178.5, -19.1),
    ]);

    let input = shared_input(json!({
        "style": "open-street-map",
        "bounds": {"west": 170, "east": -170, "south": -25, "north": -10},
        "layers": [
            {
                "sourcetype": "raster",
                "type": "line",
                "source": ["https://tiles.example.com/{z}/{x}/{y}.png"],
                "sourceattribution": "Example tiles"
            },
            {
                "sourcetype": "geojson",
                "source": "https://example.com/reefs.geojson",
                "type": "fill",
                "opacity": 0.4
            }
        ]
    }));

    let session = resolve_layout(
        &input,
        &LayoutSchema::default(),
        &samples,
        &ResolveOptions::default(),
    )?;

    for diagnostic in session.diagnostics() {
        println!("corrected {diagnostic}");
    }
    println!("{}", serde_json::to_string_pretty(session.config())?);

    session.update_view(ViewUpdate {
        center: Some((179.2, -17.5)),
        zoom: Some(6.5),
        ..Default::default()
    })?;
    println!("view after update: {:?}", session.view());

    Ok(())
}
