// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyface Inc.

//! Discrete per-face extrusion

use super::mesh::{Face, Mesh};

/// Extrude each face in `selection` as an independent island.
///
/// For every selected face the original boundary vertices stay in place, a
/// duplicate ring of new vertices is created on top of them, one side quad
/// per boundary edge bridges the old loop to the new ring, and a cap face
/// with the original winding is built from the new ring. The original face
/// record is removed (its boundary edges survive as the side quads' bottom
/// edges). Adjacent selected faces never share new geometry: each gets its
/// own ring, unlike a region extrude.
///
/// New faces inherit the tag of the face they were grown from. The final
/// face order is deterministic: surviving faces in their original order,
/// then per selected face (in selection order) its side quads followed by
/// its cap.
///
/// `selection` must hold distinct indices into the current face list.
/// Returns the cap face indices into the final face list, in selection
/// order. The caps coincide with the original faces until a transform moves
/// them.
pub fn extrude_discrete_faces(mesh: &mut Mesh, selection: &[usize]) -> Vec<usize> {
    let original_count = mesh.face_count();
    let mut dead = vec![false; original_count];
    let mut staged_caps = Vec::with_capacity(selection.len());

    for &face in selection {
        let loop_verts = mesh.faces[face].verts.clone();
        let tag = mesh.faces[face].tag;
        let n = loop_verts.len();

        let ring: Vec<usize> = loop_verts
            .iter()
            .map(|&v| mesh.add_vertex(mesh.positions[v]))
            .collect();

        // Side quads: bottom edge on the old loop, top edge on the new ring
        for i in 0..n {
            let j = (i + 1) % n;
            mesh.add_face(Face::new(
                vec![loop_verts[i], loop_verts[j], ring[j], ring[i]],
                tag,
            ));
        }

        staged_caps.push(mesh.add_face(Face::new(ring, tag)));
        dead[face] = true;
    }

    // Compact the face list, dropping the replaced originals
    let mut remap = vec![usize::MAX; mesh.faces.len()];
    let mut kept = Vec::with_capacity(mesh.faces.len() - selection.len());
    for (i, face) in std::mem::take(&mut mesh.faces).into_iter().enumerate() {
        if i < original_count && dead[i] {
            continue;
        }
        remap[i] = kept.len();
        kept.push(face);
    }
    mesh.faces = kept;

    staged_caps.into_iter().map(|i| remap[i]).collect()
}
