// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyface Inc.

//! Polyface Extrusion Kernel
//!
//! A procedural mesh kernel that extrudes selected polygon faces as
//! independent islands and transforms each cap in its own local frame.
//! Batches of meshes run through one pipeline: build, mask resolve,
//! discrete extrude, per-face transform, classify, flatten.

pub mod cli;
pub mod geometry;
pub mod io;
pub mod node;
pub mod utils;

pub use geometry::{extrude_discrete_faces, FaceSpace, FaceTag, Mesh};
pub use io::{load_job, Job};
pub use node::{
    process, process_parallel, ExtrudeConfig, ExtrudeInputs, ExtrudeOutputs, ExtrudeMode,
    MaskMode, OutputRequest, ScaleSeq, TagFilter,
};

use anyhow::Result;

/// Main entry point: run the extrusion pipeline with every output computed
pub fn extrude_faces(inputs: &ExtrudeInputs, config: &ExtrudeConfig) -> Result<ExtrudeOutputs> {
    node::process(inputs, config, &OutputRequest::all())
}
