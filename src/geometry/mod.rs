// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyface Inc.

//! Geometry module - mesh representation and operations

mod bbox;
mod extrude;
mod frame;
mod mesh;

pub use bbox::BoundingBox;
pub use extrude::extrude_discrete_faces;
pub use frame::{frame_rotation, scale_verts, transform_verts, translate_verts, FaceSpace};
pub use mesh::{Face, FaceTag, Mesh, MeshError};
