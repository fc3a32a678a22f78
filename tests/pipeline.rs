use image::Rgba;
use palmglow::composite::Compositor;
use palmglow::edges::{adaptive_threshold, binarize, gradient_magnitude, grayscale, EdgeConfig};
use palmglow::{process, Frame, GuidePoint, Pipeline, PipelineConfig};
use rayon::prelude::*;

fn step_frame(width: u32, height: u32) -> Frame {
    Frame::from_fn(width, height, |x, _| {
        if x < width / 2 {
            Rgba([0, 0, 0, 255])
        } else {
            Rgba([255, 255, 255, 255])
        }
    })
    .unwrap()
}

#[test]
fn black_frame_produces_empty_masks() {
    let frame = Frame::from_fn(32, 32, |_, _| Rgba([0, 0, 0, 255])).unwrap();
    let out = process(&frame, &[]);

    assert_eq!(out.edges.edge_count(), 0);
    assert!(out
        .edges
        .to_rgba_image()
        .pixels()
        .all(|p| *p == Rgba([255, 255, 255, 255])));
    assert_eq!(out.mask.covered_count(), 0);
}

#[test]
fn vertical_step_yields_boundary_line() {
    let frame = step_frame(20, 10);
    let out = process(&frame, &[]);

    for y in 0..10 {
        for x in 0..20 {
            let on_line = (1..9).contains(&y) && (x == 9 || x == 10);
            assert_eq!(out.edges.get(x, y).is_edge(), on_line, "pixel ({x}, {y})");
        }
    }
}

#[test]
fn checkerboard_threshold_arithmetic() {
    // 1-pixel checkerboard: diagonal taps match the centre and orthogonal
    // taps oppose it, so both Sobel sums cancel at every interior pixel.
    let frame = Frame::from_fn(4, 4, |x, y| {
        if (x + y) % 2 == 0 {
            Rgba([255, 255, 255, 255])
        } else {
            Rgba([0, 0, 0, 255])
        }
    })
    .unwrap();

    let gradient = gradient_magnitude(&grayscale(&frame));
    assert!(gradient.pixels().all(|p| p[0] == 0));

    // sorted magnitudes are sixteen zeros; rank floor(0.55 * 16) = 8 holds 0,
    // so the fallback 20 is scaled: max(18, 20 * 1.1) = 22
    let threshold = adaptive_threshold(&gradient, &EdgeConfig::default());
    assert!((threshold - 22.0).abs() < 1e-9);
    assert_eq!(binarize(&gradient, threshold).edge_count(), 0);
}

#[test]
fn bright_square_is_outlined() {
    let frame = Frame::from_fn(32, 32, |x, y| {
        if (12..20).contains(&x) && (12..20).contains(&y) {
            Rgba([255, 255, 255, 255])
        } else {
            Rgba([0, 0, 0, 255])
        }
    })
    .unwrap();

    let gradient = gradient_magnitude(&grayscale(&frame));
    // the outline is a small share of the frame, so the percentile sample is 0
    let threshold = adaptive_threshold(&gradient, &EdgeConfig::default());
    assert!((threshold - 22.0).abs() < 1e-9);

    let edges = process(&frame, &[]).edges;
    assert!(edges.get(11, 16).is_edge());
    assert!(edges.get(12, 16).is_edge());
    assert!(edges.get(16, 19).is_edge());
    assert!(!edges.get(16, 16).is_edge());
    assert!(!edges.get(2, 2).is_edge());
}

#[test]
fn square_guides_mask_centroid_not_far_corners() {
    let frame = Frame::from_fn(400, 300, |_, _| Rgba([90, 90, 90, 255])).unwrap();
    let guides = [
        GuidePoint::new(0.45, 0.4),
        GuidePoint::new(0.55, 0.4),
        GuidePoint::new(0.55, 0.6),
        GuidePoint::new(0.45, 0.6),
    ];
    let out = process(&frame, &guides);

    assert!(out.mask.alpha(200, 150) > 0);
    assert_eq!(out.mask.alpha(0, 0), 0);
    assert_eq!(out.mask.alpha(399, 299), 0);
    assert_eq!(out.mask.dimensions(), (400, 300));
}

#[test]
fn input_frame_is_not_modified() {
    let frame = step_frame(16, 16);
    let before = frame.as_raw().to_vec();
    let _ = process(&frame, &[GuidePoint::new(0.2, 0.2), GuidePoint::new(0.8, 0.7)]);
    assert_eq!(frame.as_raw(), &before[..]);
}

#[test]
fn concurrent_invocations_are_independent() {
    let pipeline = Pipeline::new(PipelineConfig::default().with_blur_sigma(4.0));
    let frames: Vec<Frame> = (0..6).map(|i| step_frame(16 + i * 4, 12)).collect();

    let parallel: Vec<_> = frames
        .par_iter()
        .map(|f| pipeline.process(f, &[]))
        .collect();

    for (frame, out) in frames.iter().zip(parallel) {
        let sequential = pipeline.process(frame, &[]);
        assert_eq!(out.edges, sequential.edges);
        assert_eq!(out.mask, sequential.mask);
    }
}

#[test]
fn composite_stays_inside_skin_mask() {
    // skin-coloured disc on blue, with a dark crease through it
    let frame = Frame::from_fn(48, 48, |x, y| {
        let (dx, dy) = (x as i32 - 24, y as i32 - 24);
        if dx * dx + dy * dy < 15 * 15 {
            if y == 24 {
                Rgba([60, 40, 40, 255])
            } else {
                Rgba([200, 150, 150, 255])
            }
        } else {
            Rgba([0, 0, 255, 255])
        }
    })
    .unwrap();

    let out = process(&frame, &[]);
    assert!(out.mask.covered_count() > 0);
    assert!(out.edges.edge_count() > 0);

    let compositor = Compositor::new(&frame, &out.edges, &out.mask).unwrap();
    let rendered = compositor.render(0.4);
    for (x, y, px) in rendered.enumerate_pixels() {
        if out.mask.alpha(x, y) == 0 {
            assert_eq!(*px, Rgba([0, 0, 0, 255]), "pixel ({x}, {y})");
        }
    }
}
