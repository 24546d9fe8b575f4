// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyface Inc.

//! JSON job files: a whole batch run described in one document

use crate::node::{process, process_parallel, ExtrudeConfig, ExtrudeInputs, ExtrudeOutputs, OutputRequest};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

/// One batch run: configuration, requested outputs and the input batch.
///
/// `config` and `outputs` may be omitted from the document; they fall back
/// to the node defaults (normal mode, no-extrude masking, all outputs).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Job {
    #[serde(default)]
    pub config: ExtrudeConfig,
    #[serde(default)]
    pub outputs: OutputRequest,
    #[serde(default)]
    pub inputs: ExtrudeInputs,
}

impl Job {
    /// Run the job sequentially
    pub fn run(&self) -> Result<ExtrudeOutputs> {
        process(&self.inputs, &self.config, &self.outputs)
    }

    /// Run the job with batch items spread over the rayon pool
    pub fn run_parallel(&self) -> Result<ExtrudeOutputs> {
        process_parallel(&self.inputs, &self.config, &self.outputs)
    }

    /// Number of batch items implied by the longest input sequence
    pub fn batch_len(&self) -> usize {
        [
            self.inputs.vertices.as_ref().map_or(0, Vec::len),
            self.inputs.polygons.as_ref().map_or(0, Vec::len),
            self.inputs.edges.as_ref().map_or(0, Vec::len),
            self.inputs.mask.as_ref().map_or(0, Vec::len),
            self.inputs.height.as_ref().map_or(0, Vec::len),
            self.inputs.scale.as_ref().map_or(0, Vec::len),
            self.inputs.matrix.as_ref().map_or(0, Vec::len),
        ]
        .into_iter()
        .max()
        .unwrap_or(0)
    }
}

/// Load a job document from a JSON file
pub fn load_job(path: &Path) -> Result<Job> {
    let file =
        File::open(path).context(format!("Failed to open job file: {}", path.display()))?;
    serde_json::from_reader(file).context(format!("Failed to parse job file: {}", path.display()))
}

/// Write batch outputs as pretty-printed JSON
pub fn save_outputs(path: &Path, outputs: &ExtrudeOutputs) -> Result<()> {
    let file =
        File::create(path).context(format!("Failed to create output file: {}", path.display()))?;
    serde_json::to_writer_pretty(file, outputs)
        .context(format!("Failed to write outputs: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_defaults_from_minimal_document() {
        let job: Job = serde_json::from_str(
            r#"{
                "inputs": {
                    "vertices": [[[0,0,0],[1,0,0],[1,1,0],[0,1,0]]],
                    "polygons": [[[0,1,2,3]]]
                }
            }"#,
        )
        .unwrap();

        assert_eq!(job.config, ExtrudeConfig::default());
        assert_eq!(job.outputs, OutputRequest::all());
        assert_eq!(job.batch_len(), 1);

        let outputs = job.run().unwrap();
        assert_eq!(outputs.polygons.len(), 1);
        // One square extruded in place: 4 sides + cap
        assert_eq!(outputs.polygons[0].len(), 5);
    }

    #[test]
    fn test_job_without_required_inputs_is_noop() {
        let job: Job = serde_json::from_str("{}").unwrap();
        assert_eq!(job.run().unwrap(), ExtrudeOutputs::default());
    }
}
