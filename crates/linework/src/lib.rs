//! Linework - the editing engine behind flowchart and process diagrams.
//!
//! Node creation from a type registry, edge routing and hit testing, routing
//! strategy selection for rendered connectors, and selection tracking. The
//! engine is synchronous and headless: drawing goes through the
//! [`render::Canvas`] interface and pointer input arrives as model-space
//! points.
//!
//! - [`node`]: node entities and the [`node::NodeFactory`]
//! - [`edge`]: edge entities, their cached paths and the routers
//! - [`optimizer`]: the [`optimizer::EdgeRenderOptimizer`]
//! - [`selection`]: the [`selection::SelectionManager`]
//! - [`render`]: drawing backend interface and the SVG backend
//! - [`config`]: routing and interaction settings

pub mod config;
pub mod edge;
pub mod node;
pub mod optimizer;
pub mod render;
pub mod selection;

mod diagram;
mod error;

pub use linework_core::{color, geometry, identifier, model, style};

pub use diagram::{Diagram, DiagramBuilder};
pub use error::LineworkError;
