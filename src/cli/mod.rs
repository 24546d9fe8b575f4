// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyface Inc.

//! CLI subsystem - job execution and reporting

use crate::geometry::BoundingBox;
use crate::io;
use crate::node::ExtrudeOutputs;
use anyhow::Result;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use nalgebra::Point3;
use std::path::Path;
use std::time::{Duration, Instant};

/// Execute a job file and write/report its outputs
pub fn run_command(
    input: &Path,
    output: Option<&Path>,
    stl: Option<&Path>,
    parallel: bool,
    verbose: bool,
) -> Result<()> {
    let job = io::load_job(input)?;
    let batch = job.batch_len();
    println!(
        "{} {} ({} batch item{})",
        "Loaded".green().bold(),
        input.display(),
        batch,
        if batch == 1 { "" } else { "s" }
    );

    let progress = spinner(parallel, batch);
    let start = Instant::now();
    let outputs = if parallel { job.run_parallel()? } else { job.run()? };
    let duration = start.elapsed();
    progress.finish_and_clear();

    report_outputs(&outputs, duration, verbose);

    if let Some(path) = output {
        io::save_outputs(path, &outputs)?;
        println!("{} {}", "Wrote".green().bold(), path.display());
    }

    if let Some(path) = stl {
        match (outputs.vertices.first(), outputs.polygons.first()) {
            (Some(vertices), Some(polygons)) => {
                io::export_stl(vertices, polygons, path)?;
                println!("{} {}", "Wrote".green().bold(), path.display());
            }
            _ => println!(
                "{} no flattened mesh in the outputs, skipping STL",
                "Warning:".yellow().bold()
            ),
        }
    }

    Ok(())
}

/// Print a summary of a job file without running it
pub fn info_command(input: &Path) -> Result<()> {
    let job = io::load_job(input)?;

    println!("{} {}", "Job:".bold(), input.display());
    println!("  {} {:?}", "Extrude mode:".bold(), job.config.extrude_mode);
    println!("  {} {:?}", "Mask mode:".bold(), job.config.mask_mode);
    println!(
        "  {} mask={} out={} in={}",
        "Mask output:".bold(),
        job.config.mask_output.mask,
        job.config.mask_output.out,
        job.config.mask_output.inner
    );
    println!("  {} {}", "Batch items:".bold(), job.batch_len());

    if let (Some(vertices_s), Some(polygons_s)) = (&job.inputs.vertices, &job.inputs.polygons) {
        for (i, (vertices, polygons)) in vertices_s.iter().zip(polygons_s).enumerate() {
            let points: Vec<Point3<f64>> = vertices
                .iter()
                .map(|v| Point3::new(v[0], v[1], v[2]))
                .collect();
            let bbox = BoundingBox::from_points(&points);
            println!(
                "  {} {} vertices, {} polygons, bbox {:.3} x {:.3} x {:.3}",
                format!("[{i}]").cyan(),
                vertices.len(),
                polygons.len(),
                bbox.size().x,
                bbox.size().y,
                bbox.size().z
            );
        }
    } else {
        println!(
            "  {} vertices/polygons not supplied - running this job is a no-op",
            "Note:".yellow().bold()
        );
    }

    Ok(())
}

fn spinner(parallel: bool, batch: usize) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap(),
    );
    pb.set_message(format!(
        "Extruding {} item{} ({})",
        batch,
        if batch == 1 { "" } else { "s" },
        if parallel { "parallel" } else { "sequential" }
    ));
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

fn report_outputs(outputs: &ExtrudeOutputs, duration: Duration, verbose: bool) {
    println!(
        "{} {} result mesh{} in {:.2?}",
        "Processed".green().bold(),
        outputs.polygons.len(),
        if outputs.polygons.len() == 1 { "" } else { "es" },
        duration
    );

    if !verbose {
        return;
    }

    for (i, polygons) in outputs.polygons.iter().enumerate() {
        let vertices = outputs.vertices.get(i).map_or(0, Vec::len);
        let extruded = outputs.extruded_polys.get(i).map_or(0, Vec::len);
        let other = outputs.other_polys.get(i).map_or(0, Vec::len);
        println!(
            "  {} {} vertices, {} polygons ({} extruded, {} other)",
            format!("[{i}]").cyan(),
            vertices,
            polygons.len(),
            extruded,
            other
        );
    }
}
