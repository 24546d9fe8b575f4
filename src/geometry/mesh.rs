// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyface Inc.

//! Indexed mesh arena - vertices, edges and polygon faces by index

use crate::utils::math::{newell_normal, vertex_median};
use ahash::AHashSet;
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Per-face classification used while a mesh moves through the pipeline.
///
/// `Mask` marks faces whose resolved input mask was 0, `Out` is the default
/// for masked-in faces, `In` marks extrusion caps. New faces created by the
/// extruder inherit the tag of the face they were grown from; this is
/// working state for one mesh's processing, not persisted output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FaceTag {
    Mask,
    Out,
    In,
}

/// Polygon face: an ordered loop of vertex indices plus its working tag
#[derive(Debug, Clone)]
pub struct Face {
    pub verts: Vec<usize>,
    pub tag: FaceTag,
}

impl Face {
    pub fn new(verts: Vec<usize>, tag: FaceTag) -> Self {
        Self { verts, tag }
    }
}

/// Errors raised while constructing a mesh from raw lists
#[derive(Debug, Error)]
pub enum MeshError {
    #[error("edge {edge} references vertex {vertex}, but the mesh has {vertices} vertices")]
    InvalidEdge {
        edge: usize,
        vertex: usize,
        vertices: usize,
    },
    #[error("polygon {face} references vertex {vertex}, but the mesh has {vertices} vertices")]
    InvalidFace {
        face: usize,
        vertex: usize,
        vertices: usize,
    },
}

/// Editable polygon mesh for one batch item.
///
/// Everything is owned by index: `positions` is the vertex arena, `edges`
/// holds canonical (min, max) vertex pairs in insertion order, `faces` holds
/// ordered vertex loops. Vertices are never removed, so vertex indices stay
/// stable across extrusion and transform steps.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub positions: Vec<Point3<f64>>,
    pub edges: Vec<[usize; 2]>,
    pub faces: Vec<Face>,
    edge_set: AHashSet<(usize, usize)>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a mesh from raw vertex/edge/polygon lists.
    ///
    /// Vertices are created in input order (index = position). Edges are
    /// deduplicated, and every polygon's boundary edges are inferred and
    /// added after the explicit ones, so an empty edge list is fine.
    ///
    /// Fails before any geometry is created if an edge or polygon references
    /// an out-of-range vertex. Degenerate polygons (repeated vertices, zero
    /// area, non-planar loops) are accepted as-is.
    pub fn from_lists(
        vertices: &[[f64; 3]],
        edges: &[[usize; 2]],
        polygons: &[Vec<usize>],
    ) -> Result<Self, MeshError> {
        let vertex_count = vertices.len();
        for (i, edge) in edges.iter().enumerate() {
            for &v in edge {
                if v >= vertex_count {
                    return Err(MeshError::InvalidEdge {
                        edge: i,
                        vertex: v,
                        vertices: vertex_count,
                    });
                }
            }
        }
        for (i, polygon) in polygons.iter().enumerate() {
            for &v in polygon {
                if v >= vertex_count {
                    return Err(MeshError::InvalidFace {
                        face: i,
                        vertex: v,
                        vertices: vertex_count,
                    });
                }
            }
        }

        let mut mesh = Self::new();
        mesh.positions = vertices
            .iter()
            .map(|v| Point3::new(v[0], v[1], v[2]))
            .collect();
        for edge in edges {
            mesh.add_edge(edge[0], edge[1]);
        }
        for polygon in polygons {
            mesh.add_face(Face::new(polygon.clone(), FaceTag::Out));
        }
        Ok(mesh)
    }

    /// Add a vertex and return its index
    pub fn add_vertex(&mut self, position: Point3<f64>) -> usize {
        let index = self.positions.len();
        self.positions.push(position);
        index
    }

    /// Add an edge, keeping the edge list free of duplicates.
    ///
    /// Edges are unordered pairs; (a, b) and (b, a) are the same edge.
    pub fn add_edge(&mut self, a: usize, b: usize) {
        let key = if a < b { (a, b) } else { (b, a) };
        if self.edge_set.insert(key) {
            self.edges.push([key.0, key.1]);
        }
    }

    /// Add a face and its boundary edges; returns the face index
    pub fn add_face(&mut self, face: Face) -> usize {
        let n = face.verts.len();
        for i in 0..n {
            self.add_edge(face.verts[i], face.verts[(i + 1) % n]);
        }
        let index = self.faces.len();
        self.faces.push(face);
        index
    }

    /// Positions of a face's loop, in loop order
    pub fn face_positions(&self, face: usize) -> Vec<Point3<f64>> {
        self.faces[face]
            .verts
            .iter()
            .map(|&v| self.positions[v])
            .collect()
    }

    /// Unit normal of a face (Newell's method over the loop).
    ///
    /// A zero-area face has no meaningful normal; the result is NaN in that
    /// case, and downstream frame construction inherits it.
    pub fn face_normal(&self, face: usize) -> Vector3<f64> {
        newell_normal(&self.face_positions(face)).normalize()
    }

    /// Vertex-median center of a face
    pub fn face_center(&self, face: usize) -> Point3<f64> {
        vertex_median(&self.face_positions(face))
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Flatten the mesh back into plain vertex/edge/polygon lists.
    ///
    /// Vertex indices are contiguous from 0 in arena order already (vertices
    /// are never deleted), so the output references need no remapping. The
    /// ordering is deterministic: positions and edges in insertion order,
    /// faces in their current list order.
    pub fn to_lists(&self) -> (Vec<[f64; 3]>, Vec<[usize; 2]>, Vec<Vec<usize>>) {
        let vertices = self.positions.iter().map(|p| [p.x, p.y, p.z]).collect();
        let edges = self.edges.clone();
        let polygons = self.faces.iter().map(|f| f.verts.clone()).collect();
        (vertices, edges, polygons)
    }
}
