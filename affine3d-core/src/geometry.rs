//! Wireframe geometry: vertices joined by edges, no faces.

use crate::error::{EngineError, Result};
use crate::vector::Vector3;

/// An edge as a pair of indices into the vertex list.
pub type Edge = [usize; 2];

/// A wireframe model. Every edge index is within the vertex bounds; the
/// constructor enforces it and the fields are not writable afterwards.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WireModel {
    vertices: Vec<Vector3>,
    edges: Vec<Edge>,
}

impl WireModel {
    pub fn new(vertices: Vec<Vector3>, edges: Vec<Edge>) -> Result<Self> {
        let vertex_count = vertices.len();
        for (edge, pair) in edges.iter().enumerate() {
            if let Some(&index) = pair.iter().find(|&&i| i >= vertex_count) {
                return Err(EngineError::EdgeOutOfBounds {
                    edge,
                    index,
                    vertex_count,
                });
            }
        }
        Ok(Self { vertices, edges })
    }

    pub fn vertices(&self) -> &[Vector3] {
        &self.vertices
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Mean of all vertices, or the origin for an empty model.
    pub fn centroid(&self) -> Vector3 {
        if self.vertices.is_empty() {
            return Vector3::ZERO;
        }
        let sum = self
            .vertices
            .iter()
            .fold(Vector3::ZERO, |acc, &v| acc + v);
        sum * (1.0 / self.vertices.len() as f64)
    }

    /// Axis-aligned cube of edge length `size` centred on the origin.
    pub fn cube(size: f64) -> Self {
        let h = size / 2.0;
        let vertices = vec![
            Vector3::new(-h, -h, -h),
            Vector3::new(h, -h, -h),
            Vector3::new(h, h, -h),
            Vector3::new(-h, h, -h),
            Vector3::new(-h, -h, h),
            Vector3::new(h, -h, h),
            Vector3::new(h, h, h),
            Vector3::new(-h, h, h),
        ];
        let edges = vec![
            // back face
            [0, 1],
            [1, 2],
            [2, 3],
            [3, 0],
            // front face
            [4, 5],
            [5, 6],
            [6, 7],
            [7, 4],
            // connecting edges
            [0, 4],
            [1, 5],
            [2, 6],
            [3, 7],
        ];
        Self { vertices, edges }
    }
}
