//! CLI logic for the Linework preview tool.
//!
//! Reads a scene file, builds its nodes and edges with the Linework engine,
//! routes every edge, and writes an SVG preview.

pub mod error_adapter;

mod args;
mod config;
mod scene;

pub use args::Args;
pub use scene::{Scene, SceneEdge, SceneError};

use std::fs;

use log::info;

use linework::{DiagramBuilder, LineworkError};

/// Run the Linework CLI application
///
/// # Errors
///
/// Returns `LineworkError` for:
/// - File I/O errors and malformed scene files
/// - Configuration loading errors
/// - SVG export errors
pub fn run(args: &Args) -> Result<(), LineworkError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing scene"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let source = fs::read_to_string(&args.input)?;
    let scene = Scene::parse(&source)?;
    let (nodes, edges) = scene.records();

    let mut builder = DiagramBuilder::new(app_config);
    let diagram = builder.build(nodes, edges)?;
    scene.apply_arrows(&diagram);

    builder.write_svg(&diagram, &args.output)?;

    info!(output_file = args.output; "SVG exported successfully");

    Ok(())
}
