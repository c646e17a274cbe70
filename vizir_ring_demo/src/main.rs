// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ring chart demo.
//!
//! Usage: `vizir_ring_demo [data.json] [out.png]`
//!
//! Renders the chart headlessly, simulates a click on every segment, highlights the largest one
//! and writes the surface as PNG. Set `RUST_LOG=debug` to see what the chart does.

use std::error::Error;
use std::path::PathBuf;

use kurbo::Point;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use vizir_ring::{ChartData, RingChart, RingChartOptions, SurfaceGeometry};
use vizir_ring_raster::{PixmapHost, RasterError};

const SAMPLE: &str = include_str!("../data/sample.json");

fn load_data(path: Option<&PathBuf>) -> Result<ChartData, Box<dyn Error>> {
    let json = match path {
        Some(path) => std::fs::read_to_string(path)?,
        None => SAMPLE.to_owned(),
    };
    Ok(ChartData::from_json(&json)?)
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args_os().skip(1).map(PathBuf::from);
    let data_path = args.next();
    let out_path = args
        .next()
        .unwrap_or_else(|| PathBuf::from("vizir_ring_demo.png"));

    let data = load_data(data_path.as_ref())?;
    let options = RingChartOptions::default().with_thickness(0.35);
    let mut chart = RingChart::new(PixmapHost::new(400, 300), data, options)?;
    chart.set_on_label_clicked(|label| info!(label, "segment clicked"));

    // Click the middle of every segment's band.
    let Some(surface) = chart.surface() else {
        return Err("chart has no surface".into());
    };
    let geometry = SurfaceGeometry::new(vizir_ring::Surface::size(surface));
    let radius = geometry.max_radius() * (1.0 - options.thickness / 2.0);
    let targets: Vec<(String, Point)> = chart
        .segments()
        .iter()
        .map(|s| (s.label.clone(), geometry.point_at(s.mid_angle(), radius)))
        .collect();
    for (label, point) in targets {
        match chart.handle_click(point) {
            Some(hit) if hit == label => {}
            other => warn!(label = %label, ?other, "click did not resolve to its segment"),
        }
    }

    let largest = chart
        .segments()
        .iter()
        .max_by(|a, b| a.span().total_cmp(&b.span()))
        .map(|s| s.label.clone());
    if let Some(label) = largest {
        chart.rotate_to_label(&label);
        info!(label = %label, rotation = chart.host().rotation(), "highlighted");
    }

    if let Some(surface) = chart.surface() {
        let png = surface.encode_png()?;
        std::fs::write(&out_path, png).map_err(RasterError::Io)?;
        info!(path = %out_path.display(), "wrote chart");
    }
    Ok(())
}
