/// Wireframe geometry: meshes, edges and the fixed scene
use nalgebra::Point3;

use crate::error::SceneError;

/// A wireframe line segment, as a pair of vertex indices into its mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge(pub usize, pub usize);

/// The 12 edges of an eight-corner box.
///
/// Corners 0..4 are one face and 4..8 the opposite face, each listed in the
/// same winding, so corner `i` and `i + 4` are joined.
pub const CUBOID_EDGES: [Edge; 12] = [
    Edge(0, 1),
    Edge(0, 3),
    Edge(0, 4),
    Edge(1, 2),
    Edge(1, 5),
    Edge(2, 3),
    Edge(2, 6),
    Edge(3, 7),
    Edge(4, 5),
    Edge(4, 7),
    Edge(5, 6),
    Edge(6, 7),
];

/// A static wireframe mesh in world space
#[derive(Debug, Clone)]
pub struct Mesh {
    name: String,
    vertices: Vec<Point3<f32>>,
    edges: Vec<Edge>,
}

impl Mesh {
    /// Build a mesh, rejecting any edge that points past the vertex list
    pub fn new(
        name: impl Into<String>,
        vertices: Vec<Point3<f32>>,
        edges: Vec<Edge>,
    ) -> Result<Self, SceneError> {
        let name = name.into();

        for (i, edge) in edges.iter().enumerate() {
            for index in [edge.0, edge.1] {
                if index >= vertices.len() {
                    return Err(SceneError::EdgeOutOfRange {
                        mesh: name,
                        edge: i,
                        index,
                        vertex_count: vertices.len(),
                    });
                }
            }
        }

        Ok(Self {
            name,
            vertices,
            edges,
        })
    }

    /// Build a box from its eight corners using [`CUBOID_EDGES`].
    ///
    /// Infallible because the corner count is fixed by the type.
    pub fn cuboid(name: impl Into<String>, corners: [Point3<f32>; 8]) -> Self {
        Self {
            name: name.into(),
            vertices: corners.to_vec(),
            edges: CUBOID_EDGES.to_vec(),
        }
    }

    /// Create an axis-aligned cube of edge length `size` around `center`
    pub fn cube(name: impl Into<String>, center: Point3<f32>, size: f32) -> Self {
        let h = size / 2.0;
        let c = center;

        Self::cuboid(
            name,
            [
                Point3::new(c.x - h, c.y - h, c.z + h),
                Point3::new(c.x + h, c.y - h, c.z + h),
                Point3::new(c.x + h, c.y + h, c.z + h),
                Point3::new(c.x - h, c.y + h, c.z + h),
                Point3::new(c.x - h, c.y - h, c.z - h),
                Point3::new(c.x + h, c.y - h, c.z - h),
                Point3::new(c.x + h, c.y + h, c.z - h),
                Point3::new(c.x - h, c.y + h, c.z - h),
            ],
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vertices(&self) -> &[Point3<f32>] {
        &self.vertices
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }
}

/// The fixed set of meshes rendered every frame
#[derive(Debug, Clone, Default)]
pub struct Scene {
    meshes: Vec<Mesh>,
}

impl Scene {
    pub fn new(meshes: Vec<Mesh>) -> Self {
        Self { meshes }
    }

    /// The three boxes shown at startup
    pub fn default_scene() -> Self {
        let p = Point3::<f32>::new;

        let cube = Mesh::cube("cube", p(0.0, 0.0, 0.0), 2.0);

        let tower = Mesh::cuboid(
            "tower",
            [
                p(2.0, -1.0, 2.0),
                p(4.0, -1.0, 2.0),
                p(4.0, 3.0, 2.0),
                p(2.0, 3.0, 2.0),
                p(2.0, -1.0, -1.0),
                p(4.0, -1.0, -1.0),
                p(4.0, 3.0, -1.0),
                p(2.0, 3.0, -1.0),
            ],
        );

        // Narrower at the top than at the base
        let frustum = Mesh::cuboid(
            "frustum",
            [
                p(1.0, 0.0, 6.0),
                p(3.0, 0.0, 6.0),
                p(2.5, 3.0, 5.5),
                p(1.5, 3.0, 5.5),
                p(1.0, 0.0, 4.0),
                p(3.0, 0.0, 4.0),
                p(2.5, 3.0, 4.5),
                p(1.5, 3.0, 4.5),
            ],
        );

        Self::new(vec![cube, tower, frustum])
    }

    pub fn meshes(&self) -> &[Mesh] {
        &self.meshes
    }

    pub fn edge_count(&self) -> usize {
        self.meshes.iter().map(|mesh| mesh.edges().len()).sum()
    }

    pub fn vertex_count(&self) -> usize {
        self.meshes.iter().map(|mesh| mesh.vertices().len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_out_of_range_is_rejected() {
        let vertices = vec![Point3::origin(), Point3::new(1.0, 0.0, 0.0)];
        let err = Mesh::new("broken", vertices, vec![Edge(0, 1), Edge(1, 2)]).unwrap_err();

        assert_eq!(
            err,
            SceneError::EdgeOutOfRange {
                mesh: "broken".to_string(),
                edge: 1,
                index: 2,
                vertex_count: 2,
            }
        );
    }

    #[test]
    fn test_valid_mesh() {
        let vertices = vec![Point3::origin(), Point3::new(1.0, 0.0, 0.0)];
        let mesh = Mesh::new("segment", vertices, vec![Edge(0, 1)]).unwrap();
        assert_eq!(mesh.name(), "segment");
        assert_eq!(mesh.edges(), &[Edge(0, 1)]);
    }

    #[test]
    fn test_cube_corners() {
        let cube = Mesh::cube("unit", Point3::new(0.0, 0.0, 1.0), 1.0);
        assert_eq!(cube.vertices().len(), 8);
        assert_eq!(cube.edges().len(), 12);

        for v in cube.vertices() {
            assert!((v.x.abs() - 0.5).abs() < 1e-6);
            assert!((v.y.abs() - 0.5).abs() < 1e-6);
            assert!(((v.z - 1.0).abs() - 0.5).abs() < 1e-6);
        }

        // Every edge of a cube has the same length
        for edge in cube.edges() {
            let a = cube.vertices()[edge.0];
            let b = cube.vertices()[edge.1];
            assert!(((a - b).norm() - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_default_scene() {
        let scene = Scene::default_scene();
        assert_eq!(scene.meshes().len(), 3);
        assert_eq!(scene.edge_count(), 36);
        assert_eq!(scene.vertex_count(), 24);

        // Shared topology must be valid for every predefined mesh
        for mesh in scene.meshes() {
            let rebuilt = Mesh::new(mesh.name(), mesh.vertices().to_vec(), mesh.edges().to_vec());
            assert!(rebuilt.is_ok());
        }
    }
}
