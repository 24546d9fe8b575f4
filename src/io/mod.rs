// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyface Inc.

//! I/O module - job documents and mesh export

mod export_stl;
mod job;

pub use export_stl::export_stl;
pub use job::{load_job, save_outputs, Job};
