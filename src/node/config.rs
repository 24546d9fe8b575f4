// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyface Inc.

//! Node configuration types.
//!
//! The original dataflow node exposed these as UI properties and hid or
//! showed sockets depending on the mode; here they are one plain
//! configuration struct set once per run.

use crate::geometry::FaceTag;
use crate::node::broadcast::{full_list, BroadcastError};
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// How extruded caps are moved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtrudeMode {
    /// Scale in the face plane, then push along the face normal
    #[default]
    Normal,
    /// Apply a caller-supplied 4x4 matrix in the face's local frame
    Matrix,
}

/// What happens to faces that are masked out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaskMode {
    /// Masked-out faces are not extruded at all; they pass through untouched
    #[default]
    NoExtrude,
    /// Every face is extruded, but masked-out caps are never transformed
    NoTransform,
}

/// Multi-select of face tags contributing 1s to the output mask.
///
/// Defaults to just `out`, i.e. the output mask highlights faces that were
/// eligible for extrusion but did not become caps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagFilter {
    #[serde(default)]
    pub mask: bool,
    #[serde(default)]
    pub out: bool,
    #[serde(default, rename = "in")]
    pub inner: bool,
}

impl TagFilter {
    pub fn contains(&self, tag: FaceTag) -> bool {
        match tag {
            FaceTag::Mask => self.mask,
            FaceTag::Out => self.out,
            FaceTag::In => self.inner,
        }
    }
}

impl Default for TagFilter {
    fn default() -> Self {
        Self {
            mask: false,
            out: true,
            inner: false,
        }
    }
}

/// Per-face scale values for one batch item.
///
/// The upstream value is either one scalar per face (applied to all three
/// axes) or one 3-vector per face. The original node inferred which by
/// introspecting the connected socket's type; here the choice is declared
/// statically by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleSeq {
    Uniform(Vec<f64>),
    Vector(Vec<[f64; 3]>),
}

impl ScaleSeq {
    pub fn len(&self) -> usize {
        match self {
            Self::Uniform(values) => values.len(),
            Self::Vector(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Repeat-last-element broadcast to `count` entries
    pub fn full_list(&mut self, count: usize) -> Result<(), BroadcastError> {
        match self {
            Self::Uniform(values) => full_list(values, count, "scale"),
            Self::Vector(values) => full_list(values, count, "scale"),
        }
    }

    /// Scale vector for one face; scalars are broadcast to all three axes
    pub fn value_at(&self, index: usize) -> Vector3<f64> {
        match self {
            Self::Uniform(values) => Vector3::repeat(values[index]),
            Self::Vector(values) => Vector3::from(values[index]),
        }
    }
}

impl Default for ScaleSeq {
    fn default() -> Self {
        Self::Uniform(vec![1.0])
    }
}

/// Per-node-instance configuration
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ExtrudeConfig {
    #[serde(default)]
    pub extrude_mode: ExtrudeMode,
    #[serde(default)]
    pub mask_mode: MaskMode,
    #[serde(default)]
    pub mask_output: TagFilter,
}
