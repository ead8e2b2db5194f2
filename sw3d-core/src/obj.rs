/// Wavefront OBJ importer for the plain-text triangle-list subset
use std::fmt;

use nom::{
    bytes::complete::{tag, take_till},
    character::complete::{char, i32 as index, multispace1},
    combinator::opt,
    multi::many1,
    number::complete::float,
    sequence::{pair, preceded},
    IResult,
};

use crate::geometry::{Mesh, Vertex};

/// Import failure with the 1-based source line it occurred on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjError {
    /// A `v` or `f` statement that does not parse.
    Parse { line: usize },
    /// A face reference that resolves outside the vertex list.
    IndexOutOfRange { line: usize, index: i32, len: usize },
}

impl fmt::Display for ObjError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjError::Parse { line } => write!(f, "malformed OBJ statement on line {}", line),
            ObjError::IndexOutOfRange { line, index, len } => write!(
                f,
                "face index {} on line {} out of range for {} vertices",
                index, line, len
            ),
        }
    }
}

impl std::error::Error for ObjError {}

/// Parse an OBJ document into a mesh.
///
/// Only `v` and `f` statements contribute; comments, normals, texture
/// coordinates, groups and material statements are skipped. Faces with
/// more than three references are fan-triangulated. Indices are 1-based
/// and may be negative (relative to the vertices seen so far).
pub fn parse_obj(input: &str) -> Result<Mesh, ObjError> {
    let mut mesh = Mesh::new();

    for (number, raw) in input.lines().enumerate() {
        let line = raw.trim();
        let lineno = number + 1;
        if line.starts_with("v ") || line.starts_with("v\t") {
            let (_, (x, y, z)) =
                parse_vertex_line(line).map_err(|_| ObjError::Parse { line: lineno })?;
            mesh.add_vertex(Vertex::new(x, y, z));
        } else if line.starts_with("f ") || line.starts_with("f\t") {
            let (_, refs) = parse_face_line(line).map_err(|_| ObjError::Parse { line: lineno })?;
            if refs.len() < 3 {
                return Err(ObjError::Parse { line: lineno });
            }
            let len = mesh.vertex_count();
            let mut resolved = Vec::with_capacity(refs.len());
            for reference in refs {
                let idx = resolve_index(reference, len).ok_or(ObjError::IndexOutOfRange {
                    line: lineno,
                    index: reference,
                    len,
                })?;
                resolved.push(idx);
            }
            // Fan triangulation around the first reference
            for i in 1..resolved.len() - 1 {
                mesh.add_triangle(resolved[0], resolved[i], resolved[i + 1])
                    .map_err(|_| ObjError::IndexOutOfRange {
                        line: lineno,
                        index: 0,
                        len,
                    })?;
            }
        }
        // Everything else (vn, vt, o, g, s, usemtl, comments) is skipped
    }

    Ok(mesh)
}

/// Resolve a 1-based (or negative relative) OBJ index against the
/// vertices parsed so far.
fn resolve_index(reference: i32, len: usize) -> Option<usize> {
    if reference > 0 {
        let idx = (reference - 1) as usize;
        (idx < len).then_some(idx)
    } else if reference < 0 {
        let back = reference.unsigned_abs() as usize;
        (back <= len).then(|| len - back)
    } else {
        None
    }
}

fn parse_vertex_line(input: &str) -> IResult<&str, (f32, f32, f32)> {
    let (input, _) = tag("v")(input)?;
    let (input, x) = preceded(multispace1, float)(input)?;
    let (input, y) = preceded(multispace1, float)(input)?;
    let (input, z) = preceded(multispace1, float)(input)?;
    Ok((input, (x, y, z)))
}

fn parse_face_line(input: &str) -> IResult<&str, Vec<i32>> {
    let (input, _) = tag("f")(input)?;
    many1(preceded(multispace1, face_reference))(input)
}

/// One face vertex reference: the position index, with any `/vt/vn`
/// attribute part discarded.
fn face_reference(input: &str) -> IResult<&str, i32> {
    let (input, position) = index(input)?;
    let (input, _) = opt(pair(char('/'), take_till(|c: char| c.is_whitespace())))(input)?;
    Ok((input, position))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_triangle() {
        let source = "\
# simple triangle
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 0.0 1.0 0.0
f 1 2 3
";
        let mesh = parse_obj(source).unwrap();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.triangle_count(), 1);
        let t = mesh.triangles()[0];
        assert_eq!((t.a, t.b, t.c), (0, 1, 2));
    }

    #[test]
    fn test_parse_skips_unknown_statements() {
        let source = "\
o cube
vn 0 0 1
vt 0.5 0.5
s off
v 0 0 0
v 1 0 0
v 0 1 0
usemtl none
f 1/1/1 2/2/1 3/3/1
";
        let mesh = parse_obj(source).unwrap();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.triangle_count(), 1);
    }

    #[test]
    fn test_quad_is_fan_triangulated() {
        let source = "\
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
f 1 2 3 4
";
        let mesh = parse_obj(source).unwrap();
        assert_eq!(mesh.triangle_count(), 2);
        let triangles = mesh.triangles();
        assert_eq!(
            (triangles[0].a, triangles[0].b, triangles[0].c),
            (0, 1, 2)
        );
        assert_eq!(
            (triangles[1].a, triangles[1].b, triangles[1].c),
            (0, 2, 3)
        );
    }

    #[test]
    fn test_negative_indices_resolve_backwards() {
        let source = "\
v 0 0 0
v 1 0 0
v 0 1 0
f -3 -2 -1
";
        let mesh = parse_obj(source).unwrap();
        let t = mesh.triangles()[0];
        assert_eq!((t.a, t.b, t.c), (0, 1, 2));
    }

    #[test]
    fn test_index_out_of_range() {
        let source = "v 0 0 0\nf 1 2 3\n";
        let err = parse_obj(source).unwrap_err();
        assert_eq!(
            err,
            ObjError::IndexOutOfRange {
                line: 2,
                index: 2,
                len: 1
            }
        );
    }

    #[test]
    fn test_malformed_vertex() {
        let source = "v 0.0 nope 1.0\n";
        let err = parse_obj(source).unwrap_err();
        assert_eq!(err, ObjError::Parse { line: 1 });
    }

    #[test]
    fn test_face_needs_three_references() {
        let source = "v 0 0 0\nv 1 0 0\nf 1 2\n";
        let err = parse_obj(source).unwrap_err();
        assert_eq!(err, ObjError::Parse { line: 3 });
    }
}
