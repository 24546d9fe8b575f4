// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyface Inc.

//! Batch driver: build → resolve mask → extrude → transform → classify → flatten.
//!
//! This is the dataflow node's `process` re-expressed as a plain function.
//! Required sockets are `Option` fields, optional sockets fall back to the
//! node's defaults, and downstream consumption becomes an explicit
//! [`OutputRequest`]. Every batch item runs the whole pipeline on its own
//! mesh; items only share the read-only broadcast parameters.

use crate::geometry::{
    extrude_discrete_faces, scale_verts, transform_verts, translate_verts, FaceSpace, FaceTag, Mesh,
};
use crate::node::broadcast::{full_list, BroadcastError};
use crate::node::config::{ExtrudeConfig, ExtrudeMode, MaskMode, ScaleSeq};
use anyhow::{Context, Result};
use nalgebra::Matrix4;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Which outputs something downstream actually consumes.
///
/// Unrequested outputs are left empty and the work of producing them is
/// skipped. With nothing requested the whole run is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputRequest {
    #[serde(default = "enabled")]
    pub vertices: bool,
    #[serde(default = "enabled")]
    pub edges: bool,
    #[serde(default = "enabled")]
    pub polygons: bool,
    #[serde(default = "enabled")]
    pub extruded_polys: bool,
    #[serde(default = "enabled")]
    pub other_polys: bool,
    #[serde(default = "enabled")]
    pub mask: bool,
}

fn enabled() -> bool {
    true
}

impl OutputRequest {
    pub fn all() -> Self {
        Self {
            vertices: true,
            edges: true,
            polygons: true,
            extruded_polys: true,
            other_polys: true,
            mask: true,
        }
    }

    pub fn none() -> Self {
        Self {
            vertices: false,
            edges: false,
            polygons: false,
            extruded_polys: false,
            other_polys: false,
            mask: false,
        }
    }

    pub fn any(&self) -> bool {
        self.vertices
            || self.edges
            || self.polygons
            || self.extruded_polys
            || self.other_polys
            || self.mask
    }
}

impl Default for OutputRequest {
    fn default() -> Self {
        Self::all()
    }
}

/// Batched node inputs.
///
/// `vertices` and `polygons` are the required sockets; leaving either at
/// `None` makes the whole run a defined no-op. The rest default to the
/// original node's socket values: no explicit edges, mask all-ones, height
/// 0, uniform scale 1, identity matrix.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtrudeInputs {
    pub vertices: Option<Vec<Vec<[f64; 3]>>>,
    pub polygons: Option<Vec<Vec<Vec<usize>>>>,
    #[serde(default)]
    pub edges: Option<Vec<Vec<[usize; 2]>>>,
    #[serde(default)]
    pub mask: Option<Vec<Vec<i64>>>,
    #[serde(default)]
    pub height: Option<Vec<Vec<f64>>>,
    #[serde(default)]
    pub scale: Option<Vec<ScaleSeq>>,
    #[serde(default)]
    pub matrix: Option<Vec<Vec<Matrix4<f64>>>>,
}

/// Batched node outputs; unrequested lists stay empty
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtrudeOutputs {
    pub vertices: Vec<Vec<[f64; 3]>>,
    pub edges: Vec<Vec<[usize; 2]>>,
    pub polygons: Vec<Vec<Vec<usize>>>,
    pub extruded_polys: Vec<Vec<Vec<usize>>>,
    pub other_polys: Vec<Vec<Vec<usize>>>,
    pub mask: Vec<Vec<i64>>,
}

/// One mesh's worth of broadcast inputs
#[derive(Debug, Clone)]
struct BatchItem {
    vertices: Vec<[f64; 3]>,
    edges: Vec<[usize; 2]>,
    polygons: Vec<Vec<usize>>,
    mask: Vec<i64>,
    heights: Vec<f64>,
    scale: ScaleSeq,
    matrices: Vec<Matrix4<f64>>,
}

/// Per-item pipeline results before batch assembly
#[derive(Debug, Default)]
struct ItemResult {
    vertices: Vec<[f64; 3]>,
    edges: Vec<[usize; 2]>,
    polygons: Vec<Vec<usize>>,
    extruded_polys: Vec<Vec<usize>>,
    other_polys: Vec<Vec<usize>>,
    mask: Vec<i64>,
}

/// Run the extrusion pipeline over the whole batch, item by item.
///
/// Returns empty outputs without touching anything when a required input is
/// absent or no output is requested.
pub fn process(
    inputs: &ExtrudeInputs,
    config: &ExtrudeConfig,
    request: &OutputRequest,
) -> Result<ExtrudeOutputs> {
    let (Some(vertices), Some(polygons)) = (&inputs.vertices, &inputs.polygons) else {
        return Ok(ExtrudeOutputs::default());
    };
    if !request.any() {
        return Ok(ExtrudeOutputs::default());
    }

    let items = broadcast_batch(vertices, polygons, inputs)?;
    let results = items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            process_item(item, config, request)
                .with_context(|| format!("failed to process batch item {i}"))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(assemble(results, request))
}

/// Same results as [`process`], with batch items distributed across the
/// rayon thread pool. Items are independent by construction, so output
/// order is preserved.
pub fn process_parallel(
    inputs: &ExtrudeInputs,
    config: &ExtrudeConfig,
    request: &OutputRequest,
) -> Result<ExtrudeOutputs> {
    let (Some(vertices), Some(polygons)) = (&inputs.vertices, &inputs.polygons) else {
        return Ok(ExtrudeOutputs::default());
    };
    if !request.any() {
        return Ok(ExtrudeOutputs::default());
    }

    let items = broadcast_batch(vertices, polygons, inputs)?;
    let results = items
        .par_iter()
        .enumerate()
        .map(|(i, item)| {
            process_item(item, config, request)
                .with_context(|| format!("failed to process batch item {i}"))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(assemble(results, request))
}

/// Match all input sequences to the longest one by repeating last elements,
/// then zip them into per-item bundles.
fn broadcast_batch(
    vertices: &[Vec<[f64; 3]>],
    polygons: &[Vec<Vec<usize>>],
    inputs: &ExtrudeInputs,
) -> Result<Vec<BatchItem>, BroadcastError> {
    let mut vertices_s = vertices.to_vec();
    let mut polygons_s = polygons.to_vec();
    let mut edges_s = inputs.edges.clone().unwrap_or_else(|| vec![Vec::new()]);
    let mut masks_s = inputs.mask.clone().unwrap_or_else(|| vec![vec![1]]);
    let mut heights_s = inputs.height.clone().unwrap_or_else(|| vec![vec![0.0]]);
    let mut scales_s = inputs.scale.clone().unwrap_or_else(|| vec![ScaleSeq::default()]);
    let mut matrices_s = inputs
        .matrix
        .clone()
        .unwrap_or_else(|| vec![vec![Matrix4::identity()]]);

    let count = vertices_s
        .len()
        .max(polygons_s.len())
        .max(edges_s.len())
        .max(masks_s.len())
        .max(heights_s.len())
        .max(scales_s.len())
        .max(matrices_s.len());

    full_list(&mut vertices_s, count, "vertices")?;
    full_list(&mut polygons_s, count, "polygons")?;
    full_list(&mut edges_s, count, "edges")?;
    full_list(&mut masks_s, count, "mask")?;
    full_list(&mut heights_s, count, "height")?;
    full_list(&mut scales_s, count, "scale")?;
    full_list(&mut matrices_s, count, "matrix")?;

    let mut items = Vec::with_capacity(count);
    for i in 0..count {
        items.push(BatchItem {
            vertices: vertices_s[i].clone(),
            edges: edges_s[i].clone(),
            polygons: polygons_s[i].clone(),
            mask: masks_s[i].clone(),
            heights: heights_s[i].clone(),
            scale: scales_s[i].clone(),
            matrices: matrices_s[i].clone(),
        });
    }
    Ok(items)
}

/// The whole pipeline for one mesh.
fn process_item(
    item: &BatchItem,
    config: &ExtrudeConfig,
    request: &OutputRequest,
) -> Result<ItemResult> {
    let face_count = item.polygons.len();

    // Per-face parameters stretch to the input face count; transform
    // parameters are consumed positionally against the selection below.
    let mut masks = item.mask.clone();
    full_list(&mut masks, face_count, "mask")?;
    let mut heights = item.heights.clone();
    full_list(&mut heights, face_count, "height")?;
    let mut scales = item.scale.clone();
    scales.full_list(face_count)?;
    let mut matrices = item.matrices.clone();
    full_list(&mut matrices, face_count, "matrix")?;

    let mut mesh = Mesh::from_lists(&item.vertices, &item.edges, &item.polygons)?;
    for (face, &mask) in mesh.faces.iter_mut().zip(&masks) {
        face.tag = if mask != 0 { FaceTag::Out } else { FaceTag::Mask };
    }

    let selection: Vec<usize> = match config.mask_mode {
        MaskMode::NoExtrude => (0..face_count).filter(|&i| masks[i] != 0).collect(),
        MaskMode::NoTransform => (0..face_count).collect(),
    };
    let caps = extrude_discrete_faces(&mut mesh, &selection);

    // (cap, height, scale, matrix) tuples for the transform loop. In
    // NoExtrude mode the parameters line up with the selection; in
    // NoTransform mode they line up with the full face list and masked-out
    // caps are skipped, leaving their new geometry where the face was.
    let face_data: Vec<(usize, f64, usize)> = match config.mask_mode {
        MaskMode::NoExtrude => caps
            .iter()
            .enumerate()
            .map(|(i, &cap)| (cap, heights[i], i))
            .collect(),
        MaskMode::NoTransform => caps
            .iter()
            .enumerate()
            .filter(|&(i, _)| masks[i] != 0)
            .map(|(i, &cap)| (cap, heights[i], i))
            .collect(),
    };

    let record = request.extruded_polys || request.other_polys;
    let mut recorded_loops: Vec<Vec<usize>> = Vec::new();
    let mut recorded = vec![false; mesh.face_count()];

    for (cap, height, param) in face_data {
        let normal = mesh.face_normal(cap);
        let center = mesh.face_center(cap);
        let space = FaceSpace::new(&center, &normal);
        let verts = mesh.faces[cap].verts.clone();

        match config.extrude_mode {
            ExtrudeMode::Normal => {
                // Scale first: translating first would move the cap away
                // from the local origin and corrupt the scale pivot
                scale_verts(&mut mesh, &verts, &scales.value_at(param), &space);
                translate_verts(&mut mesh, &verts, &(normal * height));
            }
            ExtrudeMode::Matrix => {
                transform_verts(&mut mesh, &verts, &matrices[param], &space);
            }
        }

        if record {
            recorded[cap] = true;
            recorded_loops.push(verts);
        }
    }

    let mut result = ItemResult::default();

    if request.mask {
        for &cap in &caps {
            mesh.faces[cap].tag = FaceTag::In;
        }
        result.mask = mesh
            .faces
            .iter()
            .map(|f| i64::from(config.mask_output.contains(f.tag)))
            .collect();
    }

    if request.other_polys {
        result.other_polys = mesh
            .faces
            .iter()
            .enumerate()
            .filter(|&(i, _)| !recorded[i])
            .map(|(_, f)| f.verts.clone())
            .collect();
    }
    if request.extruded_polys {
        result.extruded_polys = recorded_loops;
    }

    if request.vertices || request.edges || request.polygons {
        let (vertices, edges, polygons) = mesh.to_lists();
        result.vertices = vertices;
        result.edges = edges;
        result.polygons = polygons;
    }

    Ok(result)
}

fn assemble(results: Vec<ItemResult>, request: &OutputRequest) -> ExtrudeOutputs {
    let mut outputs = ExtrudeOutputs::default();
    for result in results {
        if request.vertices {
            outputs.vertices.push(result.vertices);
        }
        if request.edges {
            outputs.edges.push(result.edges);
        }
        if request.polygons {
            outputs.polygons.push(result.polygons);
        }
        if request.extruded_polys {
            outputs.extruded_polys.push(result.extruded_polys);
        }
        if request.other_polys {
            outputs.other_polys.push(result.other_polys);
        }
        if request.mask {
            outputs.mask.push(result.mask);
        }
    }
    outputs
}
