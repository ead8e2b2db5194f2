/// Pipeline engine and rendering context
use nalgebra::Matrix4;

use crate::camera::Camera;
use crate::error::RenderError;
use crate::geometry::{Mesh, Placement};

/// The value threaded through the rendering pipeline
///
/// Stages consume the context by value and hand back an updated one, so
/// no stage ever observes another stage's half-applied mutation. The
/// original mesh is snapshotted once at creation and never reassigned;
/// every execution starts from it, which makes re-running the pipeline
/// after a camera or placement change safe.
#[derive(Debug, Clone)]
pub struct RenderContext {
    camera: Camera,
    placement: Placement,
    screen_width: u32,
    screen_height: u32,
    original: Mesh,
    matrix: Matrix4<f32>,
}

impl RenderContext {
    /// Create a context for a placed mesh seen by a camera on a screen
    /// of fixed dimensions. Takes the original-geometry snapshot here.
    pub fn new(camera: Camera, placement: Placement, width: u32, height: u32) -> Self {
        let original = placement.mesh.clone();
        Self {
            camera,
            placement,
            screen_width: width,
            screen_height: height,
            original,
            matrix: Matrix4::identity(),
        }
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn screen_width(&self) -> u32 {
        self.screen_width
    }

    pub fn screen_height(&self) -> u32 {
        self.screen_height
    }

    /// The placed mesh as the pipeline currently sees it.
    pub fn placement(&self) -> &Placement {
        &self.placement
    }

    pub fn placement_mut(&mut self) -> &mut Placement {
        &mut self.placement
    }

    /// Current triangle mesh, shorthand for the placement's mesh.
    pub fn mesh(&self) -> &Mesh {
        &self.placement.mesh
    }

    /// Untransformed geometry as snapshotted at context creation.
    pub fn original_mesh(&self) -> &Mesh {
        &self.original
    }

    /// Accumulated transformation matrix.
    pub fn matrix(&self) -> &Matrix4<f32> {
        &self.matrix
    }

    /// Replace the accumulated transformation matrix.
    pub fn with_matrix(mut self, matrix: Matrix4<f32>) -> Self {
        self.matrix = matrix;
        self
    }

    /// Replace the current triangle mesh.
    pub fn with_mesh(mut self, mesh: Mesh) -> Self {
        self.placement.mesh = mesh;
        self
    }

    /// Consume the context, yielding the current mesh.
    pub fn into_mesh(self) -> Mesh {
        self.placement.mesh
    }
}

/// One step of the rendering pipeline
///
/// A stage maps a context to a context. Stages know nothing about their
/// neighbors, which keeps each independently testable.
pub trait Stage {
    fn apply(&self, context: RenderContext) -> Result<RenderContext, RenderError>;
}

/// An ordered chain of stages executed on demand
///
/// Holds nothing but the stage list; `execute` can be called any number
/// of times with fresh or updated contexts. The first failing stage
/// aborts the chain.
#[derive(Default)]
pub struct Pipeline {
    stages: Vec<Box<dyn Stage>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    /// Attach another stage to the end of the pipeline.
    pub fn pipe<S: Stage + 'static>(mut self, stage: S) -> Self {
        self.stages.push(Box::new(stage));
        self
    }

    /// Run the context through all stages in order.
    pub fn execute(&self, context: RenderContext) -> Result<RenderContext, RenderError> {
        let mut context = context;
        for stage in &self.stages {
            context = stage.apply(context)?;
        }
        Ok(context)
    }
}
