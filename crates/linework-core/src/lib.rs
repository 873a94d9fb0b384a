//! Linework Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Linework
//! flowchart engine. It includes:
//!
//! - **Identifiers**: String-interned identifiers and injectable id generation ([`identifier`] module)
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Geometry**: Points, sizes, bounds and planar computations ([`geometry`] module)
//! - **Style**: Fill, stroke and font appearance ([`style`] module)
//! - **Model**: Node and edge records exchanged with the editor shell ([`model`] module)

pub mod color;
pub mod geometry;
pub mod identifier;
pub mod model;
pub mod style;
