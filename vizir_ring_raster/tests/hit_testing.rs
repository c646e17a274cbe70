// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hit testing against rasterized charts.

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::{Point, Size};
use vizir_ring::{ChartData, RingChart, RingChartOptions, SegmentInput, Surface, SurfaceGeometry};
use vizir_ring_raster::PixmapHost;

fn abc() -> ChartData {
    ChartData::new([
        SegmentInput::new("A", 0.3, "#123456"),
        SegmentInput::new("B", 0.3, "#654321"),
        SegmentInput::new("C", 0.4, "#ffaa11"),
    ])
    .unwrap()
}

fn chart(host: PixmapHost, data: ChartData, options: RingChartOptions) -> RingChart<PixmapHost> {
    RingChart::new(host, data, options).unwrap()
}

fn geometry(chart: &RingChart<PixmapHost>) -> SurfaceGeometry {
    SurfaceGeometry::new(chart.surface().unwrap().size())
}

#[test]
fn pie_resolves_the_documented_point() {
    let options = RingChartOptions::default()
        .with_thickness(1.0)
        .with_offset_degrees(0.0);
    let chart = chart(PixmapHost::new(200, 200), abc(), options);
    let g = geometry(&chart);
    assert_eq!(chart.label_at(g.point_at(54.0, 80.0)), Some("A"));
    // The corners beyond the disc are trimmed away.
    assert_eq!(chart.label_at(Point::new(2.0, 2.0)), None);
    assert_eq!(chart.label_at(Point::new(197.0, 3.0)), None);
    assert_eq!(chart.label_at(g.point_at(162.0, 80.0)), Some("B"));
    assert_eq!(chart.label_at(g.point_at(288.0, 80.0)), Some("C"));
    // A full pie has no hole.
    assert_eq!(chart.label_at(g.point_at(54.0, 5.0)), Some("A"));
}

fn assert_band_coverage(chart: &RingChart<PixmapHost>, thickness: f64) {
    let g = geometry(chart);
    let outer = g.max_radius();
    let inner = outer * (1.0 - thickness);
    for segment in chart.segments() {
        let (start, end) = segment.drawable_range().unwrap();
        let mut angle = start + 4.0;
        while angle < end - 4.0 {
            for step in 1..=4 {
                let radius = inner + 4.0 + (outer - inner - 8.0) * f64::from(step) / 4.0;
                let point = g.point_at(angle, radius);
                assert_eq!(
                    chart.label_at(point),
                    Some(segment.label.as_str()),
                    "angle {angle} radius {radius}"
                );
            }
            angle += 7.0;
        }
    }
}

#[test]
fn every_segment_covers_its_band() {
    let options = RingChartOptions::default()
        .with_thickness(0.5)
        .with_offset_degrees(0.0);
    let chart = chart(PixmapHost::new(200, 200), abc(), options);
    assert_band_coverage(&chart, 0.5);
}

#[test]
fn non_square_surfaces_are_covered() {
    let options = RingChartOptions::default()
        .with_thickness(0.5)
        .with_offset_degrees(0.0);
    for (width, height) in [(320, 140), (140, 320)] {
        let chart = chart(PixmapHost::new(width, height), abc(), options);
        assert_band_coverage(&chart, 0.5);
    }
}

#[test]
fn clip_masking_resolves_the_same_labels() {
    let options = RingChartOptions::default()
        .with_thickness(0.5)
        .with_offset_degrees(0.0);
    let chart = chart(PixmapHost::new(200, 200).without_dest_in(), abc(), options);
    assert_band_coverage(&chart, 0.5);

    let g = geometry(&chart);
    assert_eq!(chart.label_at(g.center()), None);
    assert_eq!(chart.label_at(Point::new(2.0, 2.0)), None);
}

#[test]
fn hole_and_outside_resolve_nothing() {
    let chart = chart(
        PixmapHost::new(200, 200),
        abc(),
        RingChartOptions::default().with_thickness(0.3),
    );
    let g = geometry(&chart);
    assert_eq!(chart.label_at(g.center()), None);
    assert_eq!(chart.label_at(g.point_at(54.0, 60.0)), None);
    assert_eq!(chart.label_at(g.point_at(54.0, 85.0)), Some("A"));
    // Corners lie beyond the outer radius.
    assert_eq!(chart.label_at(Point::new(2.0, 2.0)), None);
    assert_eq!(chart.label_at(Point::new(197.0, 197.0)), None);
    assert_eq!(chart.label_at(Point::new(250.0, 10.0)), None);
}

#[test]
fn thin_rings_hug_the_outer_edge() {
    let chart = chart(
        PixmapHost::new(200, 200),
        abc(),
        RingChartOptions::default().with_thickness(0.05),
    );
    let g = geometry(&chart);
    // Outer radius 100, inner radius 95.
    assert_eq!(chart.label_at(g.point_at(54.0, 97.5)), Some("A"));
    assert_eq!(chart.label_at(g.point_at(162.0, 97.5)), Some("B"));
    assert_eq!(chart.label_at(g.point_at(54.0, 93.0)), None);
    assert_eq!(chart.label_at(g.point_at(54.0, 80.0)), None);
    assert_eq!(chart.label_at(g.center()), None);
}

#[test]
fn right_of_the_surface_resolves_nothing() {
    let options = RingChartOptions::default()
        .with_thickness(1.0)
        .with_offset_degrees(0.0);
    for host in [
        PixmapHost::new(200, 200),
        PixmapHost::new(200, 200).without_dest_in(),
    ] {
        let chart = chart(host, abc(), options);
        assert_eq!(chart.label_at(Point::new(210.0, 100.0)), None);
        assert_eq!(chart.label_at(Point::new(200.0, 100.0)), None);
        assert_eq!(chart.label_at(Point::new(190.0, 100.0)), Some("A"));
    }
}

#[test]
fn offsets_leave_gaps_between_segments() {
    let chart = chart(
        PixmapHost::new(200, 200),
        abc(),
        RingChartOptions::default()
            .with_thickness(0.5)
            .with_offset_degrees(10.0),
    );
    let g = geometry(&chart);
    assert_eq!(chart.label_at(g.point_at(108.0, 80.0)), None);
    assert_eq!(chart.label_at(g.point_at(216.0, 80.0)), None);
    assert_eq!(chart.label_at(g.point_at(0.0, 80.0)), None);
    assert_eq!(chart.label_at(g.point_at(100.0, 80.0)), Some("A"));
    assert_eq!(chart.label_at(g.point_at(116.0, 80.0)), Some("B"));
}

#[test]
fn a_wide_sector_wraps_around_the_corners() {
    let data = ChartData::new([SegmentInput::new("only", 1.0, "#336699")]).unwrap();
    let chart = chart(
        PixmapHost::new(200, 200),
        data,
        RingChartOptions::default()
            .with_thickness(0.5)
            .with_offset_degrees(20.0),
    );
    let segment = &chart.segments()[0];
    assert_eq!((segment.start_angle, segment.end_angle), (10.0, 350.0));

    let g = geometry(&chart);
    assert_eq!(chart.label_at(g.point_at(0.0, 80.0)), None);
    for angle in [20.0, 90.0, 135.0, 180.0, 225.0, 270.0, 340.0] {
        assert_eq!(
            chart.label_at(g.point_at(angle, 80.0)),
            Some("only"),
            "angle {angle}"
        );
    }
}

#[test]
fn partial_totals_leave_the_rest_empty() {
    let data = ChartData::new([SegmentInput::new("half", 0.5, "#336699")]).unwrap();
    let chart = chart(
        PixmapHost::new(200, 200),
        data,
        RingChartOptions::default().with_offset_degrees(0.0),
    );
    let g = geometry(&chart);
    assert_eq!(chart.label_at(g.point_at(90.0, 95.0)), Some("half"));
    assert_eq!(chart.label_at(g.point_at(270.0, 95.0)), None);
}

#[test]
fn clicks_call_back_only_on_segments() {
    let mut chart = chart(
        PixmapHost::new(200, 200),
        abc(),
        RingChartOptions::default().with_thickness(0.5),
    );
    let clicked = Rc::new(RefCell::new(Vec::new()));
    let sink = clicked.clone();
    chart.set_on_label_clicked(move |label| sink.borrow_mut().push(label.to_owned()));

    let g = geometry(&chart);
    assert_eq!(chart.handle_click(g.point_at(162.0, 80.0)), Some("B"));
    assert_eq!(chart.handle_click(g.center()), None);
    assert_eq!(chart.handle_click(Point::new(1.0, 1.0)), None);
    assert_eq!(*clicked.borrow(), ["B"]);
}

#[test]
fn clicks_follow_the_rotation() {
    let mut chart = chart(
        PixmapHost::new(200, 200),
        abc(),
        RingChartOptions::default().with_thickness(0.5),
    );
    assert!(chart.rotate_to_label("A"));
    assert!((chart.host().rotation() + 54.0).abs() < 1e-9);

    // The highlighted segment now sits at the top of the view.
    let g = geometry(&chart);
    assert_eq!(chart.handle_click(g.point_at(0.0, 80.0)), Some("A"));

    assert!(chart.rotate_to_label("C"));
    assert_eq!(chart.handle_click(g.point_at(0.0, 80.0)), Some("C"));
}

#[test]
fn redraw_follows_new_bounds() {
    let mut chart = chart(
        PixmapHost::new(200, 200),
        abc(),
        RingChartOptions::default().with_thickness(0.5),
    );
    chart.host_mut().set_bounds(120, 60);
    chart.redraw();
    assert_eq!(chart.surface().unwrap().size(), Size::new(120.0, 60.0));

    let g = geometry(&chart);
    assert_eq!(g.max_radius(), 30.0);
    assert_eq!(chart.label_at(g.point_at(54.0, 24.0)), Some("A"));
    assert_eq!(chart.label_at(Point::new(5.0, 30.0)), None);
}

#[test]
fn removing_the_chart_unsubscribes() {
    let chart = chart(PixmapHost::new(50, 50), abc(), RingChartOptions::default());
    assert!(chart.host().is_listening());
    let host = chart.remove();
    assert!(!host.is_listening());
}
