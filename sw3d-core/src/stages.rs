/// The transformation, projection and clipping steps of the pipeline
use nalgebra::{Matrix3, Matrix4, Point3, Vector4};
use tracing::debug;

use crate::error::RenderError;
use crate::geometry::{Mesh, Vertex};
use crate::pipeline::{Pipeline, RenderContext, Stage};
use crate::transform;

/// Homogeneous w below this magnitude counts as a degenerate point; the
/// triangle containing it is discarded instead of dividing.
const W_EPS: f32 = 1e-6;

/// Wire up the standard five-step pipeline.
pub fn standard_pipeline() -> Pipeline {
    Pipeline::new()
        .pipe(ModelTransformation)
        .pipe(CameraTransformation)
        .pipe(Projection)
        .pipe(ViewportTransformation)
        .pipe(Clipping)
}

/// Model transformation step
///
/// Translates, rotates and scales the placed mesh into world space by
/// producing `world = Translation * RotationZYX * Scaling`. Only the
/// matrix is touched; vertex data is left for the viewport step.
pub struct ModelTransformation;

impl Stage for ModelTransformation {
    fn apply(&self, context: RenderContext) -> Result<RenderContext, RenderError> {
        let placement = context.placement();
        let world = transform::translation(&placement.translation)
            * transform::rotation_zyx(&placement.rotation)
            * transform::scaling(&placement.scaling);
        Ok(context.with_matrix(world))
    }
}

/// Camera transformation step
///
/// Translates the eye to the origin and rotates the viewing direction
/// onto the z axis via the look-at matrix, composed on the left of the
/// accumulated matrix.
pub struct CameraTransformation;

impl Stage for CameraTransformation {
    fn apply(&self, context: RenderContext) -> Result<RenderContext, RenderError> {
        let camera = context.camera();
        let view = transform::look_at(&camera.position, &camera.target, &camera.up)?;
        let combined = view * context.matrix();
        Ok(context.with_matrix(combined))
    }
}

/// Projection step
///
/// Composes the perspective matrix built from the camera's field of
/// view, the screen dimensions and the clip distances on the left of
/// the accumulated matrix.
pub struct Projection;

impl Stage for Projection {
    fn apply(&self, context: RenderContext) -> Result<RenderContext, RenderError> {
        let camera = context.camera();
        let projection = transform::perspective(
            camera.fov,
            context.screen_width() as f32,
            context.screen_height() as f32,
            camera.near,
            camera.far,
        )?;
        let combined = projection * context.matrix();
        Ok(context.with_matrix(combined))
    }
}

/// Viewport transformation step
///
/// Applies the fully accumulated matrix to every vertex of the cached
/// original mesh and performs the perspective divide. A fresh mesh with
/// the same triangle connectivity replaces the context's current one;
/// the original snapshot is never written to. Triangles with a vertex
/// whose homogeneous w is near zero are discarded.
pub struct ViewportTransformation;

impl Stage for ViewportTransformation {
    fn apply(&self, context: RenderContext) -> Result<RenderContext, RenderError> {
        let matrix = *context.matrix();
        let original = context.original_mesh();
        let mut transformed =
            Mesh::with_capacity(original.triangle_count() * 3, original.triangle_count());
        let mut discarded = 0usize;

        for t in original.triangles() {
            let a = project_point(&original.vertex(t.a).position, &matrix);
            let b = project_point(&original.vertex(t.b).position, &matrix);
            let c = project_point(&original.vertex(t.c).position, &matrix);
            match (a, b, c) {
                (Some(a), Some(b), Some(c)) => {
                    let at = transformed.add_vertex(Vertex { position: a });
                    let bt = transformed.add_vertex(Vertex { position: b });
                    let ct = transformed.add_vertex(Vertex { position: c });
                    transformed.add_triangle(at, bt, ct)?;
                }
                _ => discarded += 1,
            }
        }

        if discarded > 0 {
            debug!(discarded, "discarded triangles with near-zero homogeneous w");
        }
        Ok(context.with_mesh(transformed))
    }
}

/// Multiply a point in homogeneous form by a transformation matrix and
/// divide by w. Returns `None` for a near-zero w.
pub fn project_point(point: &Point3<f32>, matrix: &Matrix4<f32>) -> Option<Point3<f32>> {
    let v = matrix * Vector4::new(point.x, point.y, point.z, 1.0);
    if v.w.abs() < W_EPS {
        return None;
    }
    Some(Point3::new(v.x / v.w, v.y / v.w, v.z / v.w))
}

/// Clipping step
///
/// Backface culling over the projected mesh: the determinant of the
/// screen-space `[x, y, 1]` rows is twice the signed triangle area, and
/// triangles with a non-negative determinant (clockwise or degenerate)
/// are dropped. Survivors are copied with fresh indices; their vertex
/// data is not touched.
// TODO: occlusion culling
pub struct Clipping;

impl Stage for Clipping {
    fn apply(&self, context: RenderContext) -> Result<RenderContext, RenderError> {
        let mesh = context.mesh();
        let mut clipped = Mesh::new();

        for t in mesh.triangles() {
            let a = mesh.vertex(t.a).position;
            let b = mesh.vertex(t.b).position;
            let c = mesh.vertex(t.c).position;

            let m = Matrix3::new(
                a.x, a.y, 1.0, //
                b.x, b.y, 1.0, //
                c.x, c.y, 1.0,
            );
            if m.determinant() < 0.0 {
                let at = clipped.add_vertex(*mesh.vertex(t.a));
                let bt = clipped.add_vertex(*mesh.vertex(t.b));
                let ct = clipped.add_vertex(*mesh.vertex(t.c));
                clipped.add_triangle(at, bt, ct)?;
            }
        }

        debug!(
            kept = clipped.triangle_count(),
            total = mesh.triangle_count(),
            "backface culling"
        );
        Ok(context.with_mesh(clipped))
    }
}
