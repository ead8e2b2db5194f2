/// SW3D Core Library - Software rasterization pipeline
///
/// This library provides the stateless core for rendering triangle
/// meshes as 2D line/fill images without a hardware graphics API:
/// transformation matrices, the staged rendering pipeline, backface
/// culling, the pixel-level rasterization algorithms and OBJ import.

pub mod camera;
pub mod config;
pub mod error;
pub mod geometry;
pub mod obj;
pub mod pipeline;
pub mod raster;
pub mod stages;
pub mod transform;

// Re-export commonly used types
pub use camera::{Axis, Camera};
pub use config::RenderConfig;
pub use error::RenderError;
pub use geometry::{Mesh, Placement, Triangle, Vertex};
pub use pipeline::{Pipeline, RenderContext, Stage};
pub use raster::{draw_mesh, Color, DrawMode, PixelMap, PixelSurface};
pub use stages::standard_pipeline;
