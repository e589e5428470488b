/// Static mesh topology: vertices plus edge and triangle faces
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::vector::Vec3;

/// A face of a mesh, given as indices into the vertex list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Face {
    /// A line between two vertices. Never culled.
    Edge([usize; 2]),
    /// A triangle wound counter-clockwise when seen from its front side.
    Triangle([usize; 3]),
}

impl Face {
    pub fn indices(&self) -> &[usize] {
        match self {
            Face::Edge(idx) => idx,
            Face::Triangle(idx) => idx,
        }
    }
}

/// Rejected mesh topology
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MeshError {
    /// A face refers to a vertex that does not exist
    IndexOutOfRange {
        face: usize,
        index: usize,
        vertex_count: usize,
    },
    /// A face uses the same vertex more than once
    DegenerateFace { face: usize },
}

impl fmt::Display for MeshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeshError::IndexOutOfRange {
                face,
                index,
                vertex_count,
            } => write!(
                f,
                "face {} refers to vertex {} but the mesh has {} vertices",
                face, index, vertex_count
            ),
            MeshError::DegenerateFace { face } => {
                write!(f, "face {} repeats a vertex index", face)
            }
        }
    }
}

impl std::error::Error for MeshError {}

/// Built-in meshes selectable from configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MeshKind {
    /// Cube drawn from its twelve edges
    #[default]
    WireCube,
    /// Cube made of outward-facing triangles, back faces culled
    Cube,
    Octahedron,
}

/// A fixed set of vertices and faces. Topology never changes after
/// construction; only the pose it is drawn with does.
#[derive(Debug, Clone)]
pub struct Mesh {
    vertices: Vec<Vec3>,
    faces: Vec<Face>,
}

impl Mesh {
    /// Build a mesh, checking that every face refers to distinct, existing
    /// vertices.
    pub fn new(vertices: Vec<Vec3>, faces: Vec<Face>) -> Result<Self, MeshError> {
        for (face, f) in faces.iter().enumerate() {
            let indices = f.indices();
            if let Some(&index) = indices.iter().find(|&&i| i >= vertices.len()) {
                return Err(MeshError::IndexOutOfRange {
                    face,
                    index,
                    vertex_count: vertices.len(),
                });
            }
            let repeated = indices
                .iter()
                .enumerate()
                .any(|(i, a)| indices[i + 1..].contains(a));
            if repeated {
                return Err(MeshError::DegenerateFace { face });
            }
        }

        log::debug!(
            "Built mesh with {} vertices and {} faces",
            vertices.len(),
            faces.len()
        );
        Ok(Self { vertices, faces })
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Number of screen segments a fully visible frame of this mesh produces
    pub fn segment_count(&self) -> usize {
        self.faces
            .iter()
            .map(|f| match f {
                Face::Edge(_) => 1,
                Face::Triangle(_) => 3,
            })
            .sum()
    }

    pub fn builtin(kind: MeshKind, size: f64) -> Self {
        match kind {
            MeshKind::WireCube => Self::wire_cube(size),
            MeshKind::Cube => Self::cube(size),
            MeshKind::Octahedron => Self::octahedron(size),
        }
    }

    /// Cube corners, bottom ring (y = -half) first within each z layer:
    /// indices 0..4 at z = -half, 4..8 at z = +half.
    fn cube_vertices(size: f64) -> Vec<Vec3> {
        let h = size / 2.0;
        vec![
            Vec3::new(-h, -h, -h),
            Vec3::new(h, -h, -h),
            Vec3::new(h, h, -h),
            Vec3::new(-h, h, -h),
            Vec3::new(-h, -h, h),
            Vec3::new(h, -h, h),
            Vec3::new(h, h, h),
            Vec3::new(-h, h, h),
        ]
    }

    /// Cube with edge length `size`, centered on the origin, as 12 edges
    pub fn wire_cube(size: f64) -> Self {
        let edges = [
            [0, 1], [1, 2], [2, 3], [3, 0],
            [4, 5], [5, 6], [6, 7], [7, 4],
            [0, 4], [1, 5], [2, 6], [3, 7],
        ];
        Self {
            vertices: Self::cube_vertices(size),
            faces: edges.into_iter().map(Face::Edge).collect(),
        }
    }

    /// Cube with edge length `size`, centered on the origin, as 12 triangles
    /// wound counter-clockwise when seen from outside
    pub fn cube(size: f64) -> Self {
        let triangles = [
            // Front
            [4, 5, 6], [4, 6, 7],
            // Back
            [0, 3, 2], [0, 2, 1],
            // Top
            [3, 7, 6], [3, 6, 2],
            // Bottom
            [0, 1, 5], [0, 5, 4],
            // Right
            [1, 2, 6], [1, 6, 5],
            // Left
            [0, 4, 7], [0, 7, 3],
        ];
        Self {
            vertices: Self::cube_vertices(size),
            faces: triangles.into_iter().map(Face::Triangle).collect(),
        }
    }

    /// Regular octahedron with vertices `size` away from the origin on each axis
    pub fn octahedron(size: f64) -> Self {
        let vertices = vec![
            Vec3::new(size, 0.0, 0.0),
            Vec3::new(-size, 0.0, 0.0),
            Vec3::new(0.0, size, 0.0),
            Vec3::new(0.0, -size, 0.0),
            Vec3::new(0.0, 0.0, size),
            Vec3::new(0.0, 0.0, -size),
        ];
        let triangles = [
            [0, 2, 4], [1, 4, 2], [0, 4, 3], [1, 3, 4],
            [0, 5, 2], [1, 2, 5], [0, 3, 5], [1, 5, 3],
        ];
        Self {
            vertices,
            faces: triangles.into_iter().map(Face::Triangle).collect(),
        }
    }
}
