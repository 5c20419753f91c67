mod common;

use pf_core::{Image, Point2i};
use pf_detect::{
    DetectorConfig, FixedColors, PupilPipeline, RenderConfig, Renderer, SkipCause, SkipEvent,
    Stage, filter_candidates,
};

use common::*;

fn pipeline() -> PupilPipeline {
    PupilPipeline::with_colors(
        DetectorConfig::default(),
        Box::new(FixedColors::single([255, 0, 0])),
    )
}

#[test]
fn circle_and_bar_yield_one_candidate() {
    let mut edges = blank_edges(SIZE, SIZE);
    draw_circle_edges(&mut edges, 240.0, 150.0, 40.0);
    draw_rect_edges(&mut edges, 40, 360, 400, 25);

    let mut canvas = uniform_frame(SIZE, SIZE, 0);
    let mut skips: Vec<SkipEvent> = Vec::new();
    let det = pipeline().process_edges(&edges.as_view(), &mut canvas.as_view_mut(), &mut skips);

    assert_eq!(det.contour_count, 2);
    assert_eq!(det.candidates.len(), 1);
    assert_eq!(det.candidates[0].source_index, 0);
    assert!((det.candidates[0].circularity - 1.0).abs() < 0.05);
    assert_eq!(det.overlays.len(), 1);
    assert!(skips.is_empty());

    let el = det.overlays[0].ellipse;
    assert!((el.cx - 240.0).abs() < 1.0);
    assert!((el.cy - 150.0).abs() < 1.0);
    assert!((el.a - 40.0).abs() < 1.5);
    assert!((el.b - 40.0).abs() < 1.5);

    // The bar was not drawn.
    assert_eq!(canvas.get(240, 360), Some(&[0, 0, 0]));
}

#[test]
fn empty_edge_map_changes_nothing() {
    let edges = blank_edges(SIZE, SIZE);
    let mut canvas = uniform_frame(SIZE, SIZE, 77);
    let before = canvas.clone();

    let mut skips = Vec::<SkipEvent>::new();
    let det = pipeline().process_edges(&edges.as_view(), &mut canvas.as_view_mut(), &mut skips);

    assert_eq!(det.contour_count, 0);
    assert!(det.candidates.is_empty());
    assert!(det.overlays.is_empty());
    assert_eq!(canvas, before);
}

#[test]
fn uniform_frame_passes_through_unchanged() {
    let frame = uniform_frame(SIZE, SIZE, 128);
    let out = pipeline().process_frame(&frame.as_view()).expect("processed");

    assert_eq!(out.contour_count, 0);
    assert!(out.candidates.is_empty());
    assert_eq!(out.annotated, frame);
}

#[test]
fn dark_disc_is_found_and_fitted() {
    let frame = dark_disc_frame(SIZE, 240.0, 240.0, 50.0);
    let out = pipeline().process_frame(&frame.as_view()).expect("processed");

    assert!(out.contour_count >= 1);
    assert_eq!(out.candidates.len(), 1);
    assert_eq!(out.overlays.len(), 1);

    let el = out.overlays[0].ellipse;
    assert!((el.cx - 240.0).abs() < 1.5, "cx = {}", el.cx);
    assert!((el.cy - 240.0).abs() < 1.5, "cy = {}", el.cy);
    assert!((el.a - 50.0).abs() < 3.0, "a = {}", el.a);
    assert!((el.b - 50.0).abs() < 3.0, "b = {}", el.b);

    // Drawing happened on the copy only.
    assert_ne!(out.annotated, frame);
    assert_eq!(frame.get(240, 190), Some(&[25, 28, 30]));
}

#[test]
fn repeated_processing_is_deterministic() {
    let frame = dark_disc_frame(SIZE, 200.0, 260.0, 45.0);
    let mut pipeline = pipeline();

    let first = pipeline.process_frame(&frame.as_view()).expect("first");
    let second = pipeline.process_frame(&frame.as_view()).expect("second");

    assert_eq!(first.edges, second.edges);
    assert_eq!(first.candidates, second.candidates);
    assert_eq!(first.overlays, second.overlays);
    assert_eq!(first.annotated, second.annotated);
}

#[test]
fn seeded_random_colours_do_not_change_geometry() {
    let frame = dark_disc_frame(SIZE, 240.0, 240.0, 60.0);
    let cfg = DetectorConfig {
        color_seed: Some(3),
        ..DetectorConfig::default()
    };
    let mut a = PupilPipeline::new(cfg.clone());
    let mut b = PupilPipeline::new(DetectorConfig {
        color_seed: Some(4),
        ..cfg
    });

    let ra = a.process_frame(&frame.as_view()).expect("a");
    let rb = b.process_frame(&frame.as_view()).expect("b");
    assert_eq!(ra.candidates, rb.candidates);
    let ea: Vec<_> = ra.overlays.iter().map(|o| o.ellipse).collect();
    let eb: Vec<_> = rb.overlays.iter().map(|o| o.ellipse).collect();
    assert_eq!(ea, eb);
}

#[test]
fn degenerate_contour_is_skipped_without_stopping_the_batch() {
    let mut edges = blank_edges(SIZE, SIZE);
    // A lone speck, then a circle further down the raster order.
    *edges.get_mut(30, 20).expect("in bounds") = 255;
    draw_circle_edges(&mut edges, 240.0, 240.0, 35.0);

    let mut canvas = uniform_frame(SIZE, SIZE, 0);
    let mut skips: Vec<SkipEvent> = Vec::new();
    let det = pipeline().process_edges(&edges.as_view(), &mut canvas.as_view_mut(), &mut skips);

    assert_eq!(det.contour_count, 2);
    assert_eq!(
        skips,
        vec![SkipEvent {
            stage: Stage::Filter,
            index: 0,
            cause: SkipCause::DegenerateHull { vertices: 1 },
        }]
    );
    assert_eq!(det.candidates.len(), 1);
    assert_eq!(det.candidates[0].source_index, 1);
    assert_eq!(det.overlays.len(), 1);
}

#[test]
fn small_or_elongated_shapes_are_filtered_out() {
    let mut edges = blank_edges(SIZE, SIZE);
    // Circle of area ~ 490, below the area gate.
    draw_circle_edges(&mut edges, 60.0, 60.0, 12.5);
    // Large square: area passes, circularity pi/4 fails.
    draw_rect_edges(&mut edges, 200, 200, 100, 100);

    let mut canvas = uniform_frame(SIZE, SIZE, 0);
    let mut skips = Vec::<SkipEvent>::new();
    let det = pipeline().process_edges(&edges.as_view(), &mut canvas.as_view_mut(), &mut skips);
    assert_eq!(det.contour_count, 2);
    assert!(det.candidates.is_empty());
}

#[test]
fn stages_compose_like_process_edges() {
    let mut edges = blank_edges(SIZE, SIZE);
    draw_circle_edges(&mut edges, 120.0, 300.0, 30.0);
    draw_circle_edges(&mut edges, 360.0, 100.0, 45.0);

    let mut pipeline = pipeline();
    let mut skips: Vec<SkipEvent> = Vec::new();
    let (count, cands) = pipeline.detect(&edges.as_view(), &mut skips);
    assert_eq!(count, 2);
    // Raster order: the circle reaching higher rows comes first.
    assert_eq!(cands.len(), 2);
    assert!(cands[0].hull.iter().all(|p| p.x > 240));

    let direct = filter_candidates(
        &pf_contour::find_external_contours(&edges.as_view(), pf_contour::ChainApprox::Simple),
        &DetectorConfig::default().filter,
        &mut Vec::<SkipEvent>::new(),
    );
    assert_eq!(direct, cands);

    let mut canvas = uniform_frame(SIZE, SIZE, 0);
    let overlays = pipeline.render(&cands, &mut canvas.as_view_mut(), &mut skips);
    assert_eq!(overlays.len(), 2);
    assert!(skips.is_empty());
}

#[test]
fn renderer_skips_short_hulls_but_draws_the_rest() {
    let square = pf_detect::Candidate {
        source_index: 0,
        hull: vec![
            Point2i::new(10, 10),
            Point2i::new(60, 10),
            Point2i::new(60, 60),
            Point2i::new(10, 60),
        ],
        area: 2500.0,
        perimeter: 200.0,
        circularity: core::f64::consts::FRAC_PI_4,
    };
    let mut edges = blank_edges(SIZE, SIZE);
    draw_circle_edges(&mut edges, 300.0, 300.0, 40.0);
    let (_, mut cands) = pipeline().detect(&edges.as_view(), &mut Vec::<SkipEvent>::new());
    cands.insert(0, square);

    let colors = Box::new(FixedColors::single([0, 0, 255]));
    let mut renderer = Renderer::new(RenderConfig::default(), colors);
    let mut canvas: Image<[u8; 3]> = uniform_frame(SIZE, SIZE, 0);
    let mut skips: Vec<SkipEvent> = Vec::new();
    let overlays = renderer.render(&cands, &mut canvas.as_view_mut(), &mut skips);

    assert_eq!(overlays.len(), 1);
    assert_eq!(overlays[0].candidate_index, 1);
    assert_eq!(
        skips,
        vec![SkipEvent {
            stage: Stage::Render,
            index: 0,
            cause: SkipCause::TooFewPoints { needed: 5, got: 4 },
        }]
    );
}
