// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyface Inc.

//! Math utilities

use nalgebra::{Point3, Vector3};

/// Calculate the normal of a polygon loop using Newell's method.
///
/// Works for any planar (or nearly planar) loop of 3 or more points and is
/// robust against collinear leading vertices, unlike a single cross product.
/// A degenerate loop (zero area) yields a zero-length vector; callers that
/// normalize the result inherit NaNs in that case.
pub fn newell_normal(points: &[Point3<f64>]) -> Vector3<f64> {
    let mut normal = Vector3::zeros();
    for (i, a) in points.iter().enumerate() {
        let b = &points[(i + 1) % points.len()];
        normal.x += (a.y - b.y) * (a.z + b.z);
        normal.y += (a.z - b.z) * (a.x + b.x);
        normal.z += (a.x - b.x) * (a.y + b.y);
    }
    normal
}

/// Vertex-median centroid of a polygon loop (arithmetic mean of positions).
pub fn vertex_median(points: &[Point3<f64>]) -> Point3<f64> {
    let mut sum = Vector3::zeros();
    for p in points {
        sum += p.coords;
    }
    Point3::from(sum / points.len() as f64)
}

/// Check if two floats are approximately equal
pub fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() < epsilon
}
