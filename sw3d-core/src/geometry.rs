/// Geometry primitives for the rendering pipeline
use nalgebra::{Point3, Vector3};

use crate::error::RenderError;

/// A 3D vertex holding a position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Point3<f32>,
}

impl Vertex {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            position: Point3::new(x, y, z),
        }
    }
}

/// A triangle face referencing three vertices of its owning mesh by index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Triangle {
    pub a: usize,
    pub b: usize,
    pub c: usize,
}

impl Triangle {
    pub fn new(a: usize, b: usize, c: usize) -> Self {
        Self { a, b, c }
    }
}

/// An indexed triangle mesh
///
/// Vertices keep the index they were inserted at, so triangles added
/// afterwards can reference them. Triangles are validated against the
/// vertex list on insertion and never reference another mesh.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    vertices: Vec<Vertex>,
    triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(vertices: usize, triangles: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices),
            triangles: Vec::with_capacity(triangles),
        }
    }

    /// Append a vertex and return its stable index.
    pub fn add_vertex(&mut self, vertex: Vertex) -> usize {
        self.vertices.push(vertex);
        self.vertices.len() - 1
    }

    /// Append a triangle over previously added vertices.
    pub fn add_triangle(&mut self, a: usize, b: usize, c: usize) -> Result<(), RenderError> {
        let len = self.vertices.len();
        for index in [a, b, c] {
            if index >= len {
                return Err(RenderError::InvalidIndex { index, len });
            }
        }
        self.triangles.push(Triangle::new(a, b, c));
        Ok(())
    }

    /// Access a vertex by index. Indices held by this mesh's triangles
    /// are always in range.
    pub fn vertex(&self, index: usize) -> &Vertex {
        &self.vertices[index]
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Create a simple indexed cube mesh for demos and testing
    pub fn cube(size: f32) -> Self {
        let half = size / 2.0;
        let mut mesh = Self::with_capacity(8, 12);

        // Corners, bottom face first
        let v = [
            mesh.add_vertex(Vertex::new(-half, -half, -half)),
            mesh.add_vertex(Vertex::new(half, -half, -half)),
            mesh.add_vertex(Vertex::new(half, -half, half)),
            mesh.add_vertex(Vertex::new(-half, -half, half)),
            mesh.add_vertex(Vertex::new(-half, half, -half)),
            mesh.add_vertex(Vertex::new(half, half, -half)),
            mesh.add_vertex(Vertex::new(half, half, half)),
            mesh.add_vertex(Vertex::new(-half, half, half)),
        ];

        // Two triangles per face, wound counter-clockwise seen from outside
        let faces = [
            [v[0], v[1], v[5]],
            [v[0], v[5], v[4]], // front
            [v[2], v[3], v[7]],
            [v[2], v[7], v[6]], // back
            [v[4], v[5], v[6]],
            [v[4], v[6], v[7]], // top
            [v[3], v[2], v[1]],
            [v[3], v[1], v[0]], // bottom
            [v[1], v[2], v[6]],
            [v[1], v[6], v[5]], // right
            [v[3], v[0], v[4]],
            [v[3], v[4], v[7]], // left
        ];
        for [a, b, c] in faces {
            // Indices come straight from add_vertex above
            let _ = mesh.add_triangle(a, b, c);
        }

        mesh
    }
}

/// A mesh instance placed in world space
///
/// Holds the mesh together with its translation, scaling and per-axis
/// rotation (degrees). Cloning deep-copies; mesh geometry is treated as
/// immutable for the duration of a render cycle.
#[derive(Debug, Clone)]
pub struct Placement {
    pub mesh: Mesh,
    pub translation: Vector3<f32>,
    pub scaling: Vector3<f32>,
    pub rotation: Vector3<f32>,
}

impl Placement {
    /// Place a mesh with identity transformations.
    pub fn new(mesh: Mesh) -> Self {
        Self {
            mesh,
            translation: Vector3::new(0.0, 0.0, 0.0),
            scaling: Vector3::new(1.0, 1.0, 1.0),
            rotation: Vector3::new(0.0, 0.0, 0.0),
        }
    }

    pub fn with_transforms(
        mesh: Mesh,
        translation: Vector3<f32>,
        scaling: Vector3<f32>,
        rotation: Vector3<f32>,
    ) -> Self {
        Self {
            mesh,
            translation,
            scaling,
            rotation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_indices_are_stable() {
        let mut mesh = Mesh::new();
        let a = mesh.add_vertex(Vertex::new(0.0, 0.0, 0.0));
        let b = mesh.add_vertex(Vertex::new(1.0, 0.0, 0.0));
        let c = mesh.add_vertex(Vertex::new(0.0, 1.0, 0.0));
        assert_eq!((a, b, c), (0, 1, 2));
        assert!(mesh.add_triangle(a, b, c).is_ok());
        assert_eq!(mesh.triangle_count(), 1);
    }

    #[test]
    fn test_triangle_index_out_of_range() {
        let mut mesh = Mesh::new();
        mesh.add_vertex(Vertex::new(0.0, 0.0, 0.0));
        let err = mesh.add_triangle(0, 0, 3).unwrap_err();
        assert_eq!(err, RenderError::InvalidIndex { index: 3, len: 1 });
        assert_eq!(mesh.triangle_count(), 0);
    }

    #[test]
    fn test_cube_counts() {
        let cube = Mesh::cube(2.0);
        assert_eq!(cube.vertex_count(), 8);
        assert_eq!(cube.triangle_count(), 12);
        for t in cube.triangles() {
            assert!(t.a < 8 && t.b < 8 && t.c < 8);
        }
    }

    #[test]
    fn test_placement_defaults() {
        let placement = Placement::new(Mesh::cube(1.0));
        assert_eq!(placement.translation, Vector3::new(0.0, 0.0, 0.0));
        assert_eq!(placement.scaling, Vector3::new(1.0, 1.0, 1.0));
        assert_eq!(placement.rotation, Vector3::new(0.0, 0.0, 0.0));
    }
}
