//! Rendering module
//!
//! `scene` turns the game state into draw data; `pipeline` draws its
//! rectangles with WebGPU. Text is left to the platform shell.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::{FillRect, Scene, TextLine, build as build_scene};
