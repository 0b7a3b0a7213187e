//! WebGPU rendering module
//!
//! Flat-colored triangle lists built from the simulation state each frame.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use shapes::{background_color, scene_vertices};
pub use vertex::Vertex;
