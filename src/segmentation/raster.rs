//! Minimal rasterizer for hull masks.
//!
//! Pixels are sampled at their centres without anti-aliasing; the large
//! blur that follows makes coverage sub-pixel accuracy irrelevant.

use super::types::Point;
use image::{GrayImage, Luma};

/// Fill a convex polygon (either winding) with `value`.
///
/// Polygons with fewer than three vertices enclose no area and are skipped.
pub fn fill_convex_polygon(canvas: &mut GrayImage, polygon: &[Point], value: u8) {
    if polygon.len() < 3 {
        return;
    }

    let Some((x0, y0, x1, y1)) = pixel_bounds(canvas, polygon, 0.0) else {
        return;
    };

    for y in y0..=y1 {
        for x in x0..=x1 {
            let c = Point::new(x as f64 + 0.5, y as f64 + 0.5);
            if inside_convex(polygon, c) {
                canvas.put_pixel(x, y, Luma([value]));
            }
        }
    }
}

/// Stroke the closed outline of `polygon` with a line of `line_width`.
///
/// Segment ends are butt caps and polygon corners get round joins. A
/// two-point polygon strokes its single segment with no join, so coincident
/// points draw nothing; a single point has no outline.
pub fn stroke_polygon(canvas: &mut GrayImage, polygon: &[Point], line_width: f64, value: u8) {
    if polygon.len() < 2 || line_width <= 0.0 {
        return;
    }

    let half = line_width / 2.0;
    let n = polygon.len();
    let closed = n >= 3;
    let segments = if closed { n } else { 1 };

    for i in 0..segments {
        let a = polygon[i];
        let b = polygon[(i + 1) % n];
        if a == b {
            continue;
        }
        let Some((x0, y0, x1, y1)) = pixel_bounds(canvas, &[a, b], half) else {
            continue;
        };

        for y in y0..=y1 {
            for x in x0..=x1 {
                let c = Point::new(x as f64 + 0.5, y as f64 + 0.5);
                let on_segment = distance_to_segment(c, a, b).is_some_and(|d| d <= half);
                if on_segment || (closed && distance(c, a) <= half) {
                    canvas.put_pixel(x, y, Luma([value]));
                }
            }
        }
    }
}

/// Inclusive pixel bounds of `points` grown by `margin`, clipped to the canvas.
fn pixel_bounds(canvas: &GrayImage, points: &[Point], margin: f64) -> Option<(u32, u32, u32, u32)> {
    let (width, height) = canvas.dimensions();
    let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
    let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
    for p in points {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }

    let x0 = (min_x - margin).floor().max(0.0);
    let y0 = (min_y - margin).floor().max(0.0);
    let x1 = (max_x + margin).ceil().min(width as f64 - 1.0);
    let y1 = (max_y + margin).ceil().min(height as f64 - 1.0);
    if x1 < x0 || y1 < y0 {
        return None;
    }

    Some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
}

fn inside_convex(polygon: &[Point], p: Point) -> bool {
    let n = polygon.len();
    let mut positive = false;
    let mut negative = false;
    for i in 0..n {
        let a = polygon[i];
        let b = polygon[(i + 1) % n];
        let cross = (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x);
        if cross > 0.0 {
            positive = true;
        } else if cross < 0.0 {
            negative = true;
        }
        if positive && negative {
            return false;
        }
    }
    true
}

/// Perpendicular distance from `p` to segment `ab`, or `None` when `p`
/// projects outside the segment.
fn distance_to_segment(p: Point, a: Point, b: Point) -> Option<f64> {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let len_sq = dx * dx + dy * dy;
    if len_sq == 0.0 {
        return None;
    }
    let t = ((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq;
    if !(0.0..=1.0).contains(&t) {
        return None;
    }
    Some(distance(p, Point::new(a.x + t * dx, a.y + t * dy)))
}

fn distance(p: Point, q: Point) -> f64 {
    ((p.x - q.x).powi(2) + (p.y - q.y).powi(2)).sqrt()
}
