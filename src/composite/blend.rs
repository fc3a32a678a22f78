//! Premultiplied float layers and the few canvas operations the glow needs.

use image::{imageops, Rgba, Rgba32FImage, RgbaImage};

/// Premultiplied RGBA, every channel in 0..=1.
pub type Layer = Rgba32FImage;

pub fn premultiplied(rgb: [u8; 3], alpha: f32) -> Rgba<f32> {
    let a = alpha.clamp(0.0, 1.0);
    Rgba([
        rgb[0] as f32 / 255.0 * a,
        rgb[1] as f32 / 255.0 * a,
        rgb[2] as f32 / 255.0 * a,
        a,
    ])
}

/// `dst = src * opacity + dst * (1 - src_alpha * opacity)`.
pub fn source_over(dst: &mut Layer, src: &Layer, opacity: f32) {
    for (d, s) in dst.pixels_mut().zip(src.pixels()) {
        let k = 1.0 - s[3] * opacity;
        for c in 0..4 {
            d[c] = s[c] * opacity + d[c] * k;
        }
    }
}

/// Separable screen blend in premultiplied form: `S + D - S * D`.
pub fn screen(dst: &mut Layer, src: &Layer, opacity: f32) {
    for (d, s) in dst.pixels_mut().zip(src.pixels()) {
        for c in 0..4 {
            let sc = s[c] * opacity;
            d[c] = (sc + d[c] - sc * d[c]).clamp(0.0, 1.0);
        }
    }
}

/// Keep `dst` only where `mask` has alpha (scaled by it).
pub fn destination_in(dst: &mut Layer, mask: &Layer) {
    for (d, m) in dst.pixels_mut().zip(mask.pixels()) {
        let a = m[3];
        for c in 0..4 {
            d[c] *= a;
        }
    }
}

/// Replace colour with `rgb` at `alpha`, keeping coverage ("source-in" fill).
pub fn tinted(src: &Layer, rgb: [u8; 3], alpha: f32) -> Layer {
    Layer::from_fn(src.width(), src.height(), |x, y| {
        premultiplied(rgb, src.get_pixel(x, y)[3] * alpha)
    })
}

/// Translate by whole pixels; uncovered area is transparent.
pub fn shifted(src: &Layer, dx: f32, dy: f32) -> Layer {
    let (width, height) = src.dimensions();
    let (dx, dy) = (dx.round() as i64, dy.round() as i64);
    Layer::from_fn(width, height, |x, y| {
        let sx = x as i64 - dx;
        let sy = y as i64 - dy;
        if sx < 0 || sy < 0 || sx >= width as i64 || sy >= height as i64 {
            Rgba([0.0; 4])
        } else {
            *src.get_pixel(sx as u32, sy as u32)
        }
    })
}

pub fn blurred(src: &Layer, sigma: f32) -> Layer {
    if sigma <= 0.0 {
        return src.clone();
    }
    imageops::blur(src, sigma)
}

/// Colour stop: offset in 0..=1, colour, straight alpha.
pub type GradientStop = (f32, [u8; 3], f32);

/// Premultiplied colour at `t` along linearly interpolated `stops`.
/// Past the last stop the gradient is transparent.
pub fn gradient_at(stops: &[GradientStop], t: f32) -> Rgba<f32> {
    for pair in stops.windows(2) {
        let (t0, c0, a0) = pair[0];
        let (t1, c1, a1) = pair[1];
        if t <= t1 {
            let f = if t1 > t0 { (t - t0) / (t1 - t0) } else { 0.0 };
            let lerp = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * f).round() as u8;
            let rgb = [lerp(c0[0], c1[0]), lerp(c0[1], c1[1]), lerp(c0[2], c1[2])];
            return premultiplied(rgb, a0 + (a1 - a0) * f);
        }
    }
    Rgba([0.0; 4])
}

/// Quantize to 8-bit straight alpha.
pub fn to_rgba8(layer: &Layer) -> RgbaImage {
    RgbaImage::from_fn(layer.width(), layer.height(), |x, y| {
        let p = layer.get_pixel(x, y);
        let a = p[3].clamp(0.0, 1.0);
        let unmul = |c: f32| {
            if a > 0.0 {
                ((c / a).clamp(0.0, 1.0) * 255.0).round() as u8
            } else {
                0
            }
        };
        Rgba([unmul(p[0]), unmul(p[1]), unmul(p[2]), (a * 255.0).round() as u8])
    })
}
