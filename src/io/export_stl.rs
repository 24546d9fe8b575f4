// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyface Inc.

//! Binary STL export of a flattened result mesh

use crate::utils::math::newell_normal;
use anyhow::{bail, Context, Result};
use nalgebra::Point3;
use std::fs::File;
use std::path::Path;
use stl_io::{Normal, Triangle, Vertex};

/// Export one flattened mesh (vertex and polygon lists) as binary STL.
///
/// STL only speaks triangles, so every polygon is fan-triangulated from its
/// first vertex, each fan triangle carrying the polygon's Newell normal.
/// Polygons with fewer than three vertices are skipped.
pub fn export_stl(vertices: &[[f64; 3]], polygons: &[Vec<usize>], path: &Path) -> Result<()> {
    let mut triangles = Vec::new();

    for (i, polygon) in polygons.iter().enumerate() {
        if polygon.len() < 3 {
            continue;
        }
        if let Some(&v) = polygon.iter().find(|&&v| v >= vertices.len()) {
            bail!(
                "polygon {} references vertex {} but only {} vertices exist",
                i,
                v,
                vertices.len()
            );
        }

        let points: Vec<Point3<f64>> = polygon
            .iter()
            .map(|&v| Point3::new(vertices[v][0], vertices[v][1], vertices[v][2]))
            .collect();
        let normal = newell_normal(&points).normalize();
        let normal = Normal::new([normal.x as f32, normal.y as f32, normal.z as f32]);

        let as_vertex =
            |p: &Point3<f64>| Vertex::new([p.x as f32, p.y as f32, p.z as f32]);
        for i in 1..points.len() - 1 {
            triangles.push(Triangle {
                normal,
                vertices: [
                    as_vertex(&points[0]),
                    as_vertex(&points[i]),
                    as_vertex(&points[i + 1]),
                ],
            });
        }
    }

    let mut file =
        File::create(path).context(format!("Failed to create STL file: {}", path.display()))?;
    stl_io::write_stl(&mut file, triangles.iter())
        .context(format!("Failed to write STL file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_export_square_as_two_triangles() {
        let vertices = [
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [0.0, 1.0, 0.0],
        ];
        let polygons = vec![vec![0, 1, 2, 3]];

        let file = NamedTempFile::new().unwrap();
        export_stl(&vertices, &polygons, file.path()).unwrap();

        let mut reader = std::fs::File::open(file.path()).unwrap();
        let stl = stl_io::read_stl(&mut reader).unwrap();
        assert_eq!(stl.faces.len(), 2);
    }

    #[test]
    fn test_export_rejects_bad_indices() {
        let vertices = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0]];
        let polygons = vec![vec![0, 1, 5]];
        let file = NamedTempFile::new().unwrap();
        assert!(export_stl(&vertices, &polygons, file.path()).is_err());
    }
}
