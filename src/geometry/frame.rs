// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyface Inc.

//! Per-face local coordinate frames and vertex transforms.
//!
//! Extruded caps are scaled and matrix-transformed relative to their own
//! orientation, not the world's. The frame puts local Z on the face normal
//! and the local origin at the face center, so "scale" shrinks or grows the
//! cap in its own plane and a matrix acts about the face, not the world
//! origin.

use super::mesh::Mesh;
use nalgebra::{Matrix3, Matrix4, Point3, Rotation3, Translation3, Vector3};
use std::f64::consts::PI;

/// Rotation taking local axes to world axes for a face with the given unit
/// normal (local Z = normal).
///
/// When the normal sits exactly on the global Z axis the in-plane cross
/// product would vanish, so that case is handled directly: identity for +Z,
/// a half-turn about X for -Z. Everywhere else local X is the normalized
/// in-XY-plane perpendicular (-n.y, n.x, 0) and local Y completes the
/// right-handed frame.
pub fn frame_rotation(normal: &Vector3<f64>) -> Rotation3<f64> {
    if normal.x == 0.0 && normal.y == 0.0 {
        if normal.z >= 0.0 {
            Rotation3::identity()
        } else {
            Rotation3::from_axis_angle(&Vector3::x_axis(), PI)
        }
    } else {
        let z_axis = *normal;
        let x_axis = Vector3::new(-z_axis.y, z_axis.x, 0.0).normalize();
        let y_axis = z_axis.cross(&x_axis).normalize();
        Rotation3::from_matrix_unchecked(Matrix3::from_columns(&[x_axis, y_axis, z_axis]))
    }
}

/// Affine maps between world space and a face's local frame.
///
/// Both directions are composed analytically from the rotation and the
/// center translation, so no numerical matrix inversion is involved.
#[derive(Debug, Clone)]
pub struct FaceSpace {
    pub to_local: Matrix4<f64>,
    pub to_world: Matrix4<f64>,
}

impl FaceSpace {
    pub fn new(center: &Point3<f64>, normal: &Vector3<f64>) -> Self {
        let rotation = frame_rotation(normal);
        let to_world = Translation3::from(center.coords).to_homogeneous() * rotation.to_homogeneous();
        let to_local = rotation.inverse().to_homogeneous()
            * Translation3::from(-center.coords).to_homogeneous();
        Self { to_local, to_world }
    }

    /// Frame of a mesh face, from its current normal and center
    pub fn of_face(mesh: &Mesh, face: usize) -> Self {
        Self::new(&mesh.face_center(face), &mesh.face_normal(face))
    }
}

/// Scale vertices about the local origin of `space`, component-wise.
pub fn scale_verts(mesh: &mut Mesh, verts: &[usize], scale: &Vector3<f64>, space: &FaceSpace) {
    for &v in verts {
        let local = space.to_local.transform_point(&mesh.positions[v]);
        let scaled = Point3::new(local.x * scale.x, local.y * scale.y, local.z * scale.z);
        mesh.positions[v] = space.to_world.transform_point(&scaled);
    }
}

/// Translate vertices by a world-space offset.
pub fn translate_verts(mesh: &mut Mesh, verts: &[usize], offset: &Vector3<f64>) {
    for &v in verts {
        mesh.positions[v] += *offset;
    }
}

/// Apply an arbitrary affine matrix to vertices, with `space` as the
/// reference frame: vertices are mapped into the local frame, transformed,
/// and mapped back.
pub fn transform_verts(mesh: &mut Mesh, verts: &[usize], matrix: &Matrix4<f64>, space: &FaceSpace) {
    let composed = space.to_world * matrix * space.to_local;
    for &v in verts {
        mesh.positions[v] = composed.transform_point(&mesh.positions[v]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_frame_plus_z_is_identity() {
        let rotation = frame_rotation(&Vector3::new(0.0, 0.0, 1.0));
        assert_relative_eq!(
            rotation.to_homogeneous(),
            Matrix4::identity(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_frame_minus_z_half_turn_about_x() {
        let rotation = frame_rotation(&Vector3::new(0.0, 0.0, -1.0));
        let mapped = rotation * Vector3::new(0.0, 0.0, 1.0);
        assert_relative_eq!(mapped, Vector3::new(0.0, 0.0, -1.0), epsilon = 1e-12);
        // X stays put under a rotation about X
        let x = rotation * Vector3::new(1.0, 0.0, 0.0);
        assert_relative_eq!(x, Vector3::new(1.0, 0.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn test_frame_is_orthonormal_with_z_on_normal() {
        let normal = Vector3::new(1.0, 2.0, 3.0).normalize();
        let rotation = frame_rotation(&normal);
        let m = rotation.matrix();
        let x = m.column(0).into_owned();
        let y = m.column(1).into_owned();
        let z = m.column(2).into_owned();
        assert_relative_eq!(z, normal, epsilon = 1e-12);
        assert_relative_eq!(x.dot(&y), 0.0, epsilon = 1e-12);
        assert_relative_eq!(x.dot(&z), 0.0, epsilon = 1e-12);
        assert_relative_eq!(x.norm(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(y.norm(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_space_round_trip() {
        let space = FaceSpace::new(
            &Point3::new(1.0, -2.0, 0.5),
            &Vector3::new(0.3, -0.4, 0.8).normalize(),
        );
        let p = Point3::new(4.0, 5.0, 6.0);
        let back = space
            .to_world
            .transform_point(&space.to_local.transform_point(&p));
        assert_relative_eq!(back, p, epsilon = 1e-12);
    }

    #[test]
    fn test_scale_pivots_on_face_center() {
        let mut mesh = Mesh::from_lists(
            &[
                [0.0, 0.0, 0.0],
                [1.0, 0.0, 0.0],
                [1.0, 1.0, 0.0],
                [0.0, 1.0, 0.0],
            ],
            &[],
            &[vec![0, 1, 2, 3]],
        )
        .unwrap();
        let space = FaceSpace::of_face(&mesh, 0);
        scale_verts(&mut mesh, &[0, 1, 2, 3], &Vector3::new(2.0, 2.0, 2.0), &space);

        assert_relative_eq!(mesh.positions[0], Point3::new(-0.5, -0.5, 0.0), epsilon = 1e-12);
        assert_relative_eq!(mesh.positions[2], Point3::new(1.5, 1.5, 0.0), epsilon = 1e-12);
        // The pivot itself does not move
        assert_relative_eq!(mesh.face_center(0), Point3::new(0.5, 0.5, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn test_matrix_in_local_frame_matches_scale() {
        let positions = [
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [0.0, 1.0, 0.0],
        ];
        let mut scaled = Mesh::from_lists(&positions, &[], &[vec![0, 1, 2, 3]]).unwrap();
        let mut transformed = scaled.clone();

        let space = FaceSpace::of_face(&scaled, 0);
        scale_verts(&mut scaled, &[0, 1, 2, 3], &Vector3::new(2.0, 2.0, 2.0), &space);
        transform_verts(
            &mut transformed,
            &[0, 1, 2, 3],
            &Matrix4::new_scaling(2.0),
            &space,
        );

        for v in 0..4 {
            assert_relative_eq!(scaled.positions[v], transformed.positions[v], epsilon = 1e-12);
        }
    }

    #[test]
    fn test_translate() {
        let mut mesh = Mesh::from_lists(&[[1.0, 2.0, 3.0]], &[], &[]).unwrap();
        translate_verts(&mut mesh, &[0], &Vector3::new(0.0, 0.0, 2.5));
        assert_eq!(mesh.positions[0], Point3::new(1.0, 2.0, 5.5));
    }
}
