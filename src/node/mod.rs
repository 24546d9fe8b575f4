// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyface Inc.

//! Node module - configuration, broadcasting and the batch driver

mod broadcast;
mod config;
mod process;

pub use broadcast::{full_list, BroadcastError};
pub use config::{ExtrudeConfig, ExtrudeMode, MaskMode, ScaleSeq, TagFilter};
pub use process::{process, process_parallel, ExtrudeInputs, ExtrudeOutputs, OutputRequest};
