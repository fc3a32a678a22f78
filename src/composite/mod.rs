//! Glow compositing over the segmented hand.
//!
//! Consumes a frame, its edge mask and its alpha mask. Every layer is
//! clipped to the alpha mask before it reaches the output, so nothing is
//! ever drawn where the mask is transparent.

mod blend;
mod particles;

pub use blend::Layer;
pub use particles::Sparkles;

use crate::edges::EdgeMask;
use crate::error::FrameError;
use crate::frame::Frame;
use crate::segmentation::AlphaMask;
use blend::{
    blurred, destination_in, gradient_at, premultiplied, screen, shifted, source_over, tinted,
    to_rgba8, GradientStop,
};
use image::{Rgba, RgbaImage};

const PURPLE: [u8; 3] = [88, 26, 132];
const GOLD: [u8; 3] = [210, 176, 74];
const GOLD_ALPHA: f32 = 0.95;
const OUTLINE_ALPHA: f32 = 0.9;

const STRIPE_PURPLE: [u8; 3] = [120, 40, 180];
const STRIPE_GOLD: [u8; 3] = [255, 215, 120];
const STRIPE_STOPS: [GradientStop; 5] = [
    (0.0, STRIPE_PURPLE, 0.0),
    (0.45, STRIPE_PURPLE, 0.06),
    (0.5, STRIPE_GOLD, 0.12),
    (0.55, STRIPE_PURPLE, 0.06),
    (1.0, STRIPE_PURPLE, 0.0),
];

/// Phase advance per displayed frame.
pub const PHASE_STEP: f32 = 0.04;

/// Pre-computed layers for rendering glow frames of one processed photo.
pub struct Compositor {
    hand: Layer,
    glow_base: Layer,
    background: Layer,
}

impl Compositor {
    pub fn new(frame: &Frame, edges: &EdgeMask, mask: &AlphaMask) -> Result<Self, FrameError> {
        let expected = frame.dimensions();
        for actual in [edges.dimensions(), mask.dimensions()] {
            if actual != expected {
                return Err(FrameError::DimensionMismatch { expected, actual });
            }
        }

        let (width, height) = expected;
        let src = frame.image();

        let hand = Layer::from_fn(width, height, |x, y| {
            let px = src.get_pixel(x, y);
            let a = px[3] as f32 / 255.0 * mask.alpha(x, y) as f32 / 255.0;
            premultiplied([px[0], px[1], px[2]], a)
        });

        // dark crease pixels become opaque glow, attenuated by the mask
        let glow_base = Layer::from_fn(width, height, |x, y| {
            let crease = 1.0 - edges.get(x, y).channel() as f32 / 255.0;
            premultiplied(PURPLE, crease * mask.alpha(x, y) as f32 / 255.0)
        });

        let mut background = Layer::from_pixel(width, height, Rgba([0.0, 0.0, 0.0, 1.0]));
        source_over(&mut background, &hand, 1.0);

        Ok(Self {
            hand,
            glow_base,
            background,
        })
    }

    /// The frame kept only where the mask has alpha.
    pub fn masked_hand(&self) -> RgbaImage {
        to_rgba8(&self.hand)
    }

    /// Purple crease layer before animation.
    pub fn glow_base(&self) -> RgbaImage {
        to_rgba8(&self.glow_base)
    }

    /// Render the animated glow at `phase` onto a black background.
    pub fn render(&self, phase: f32) -> RgbaImage {
        to_rgba8(&self.compose(phase))
    }

    /// Like [`Compositor::render`], with `sparkles` advanced one frame and
    /// drawn on top.
    pub fn render_with_sparkles(&self, phase: f32, sparkles: &mut Sparkles) -> RgbaImage {
        let mut out = self.compose(phase);
        source_over(&mut out, &sparkles.step(&self.hand), 1.0);
        to_rgba8(&out)
    }

    fn compose(&self, phase: f32) -> Layer {
        let _span = tracing::debug_span!("composite", phase).entered();

        let glow = self.glow_layer(phase);
        let stripe = self.scan_layer(phase / 4.0);

        let mut out = self.background.clone();
        source_over(&mut out, &glow, 1.0);
        source_over(&mut out, &stripe, 1.0);
        out
    }

    fn glow_layer(&self, phase: f32) -> Layer {
        let drift = (phase * 0.7).sin() * 12.0;
        let sway = (phase * 0.5).cos() * 18.0;

        let (width, height) = self.glow_base.dimensions();
        let mut glow = Layer::new(width, height);

        let purple_cloud = shifted(&blurred(&self.glow_base, 12.0), drift, drift);
        screen(&mut glow, &purple_cloud, 1.0);

        let gold = tinted(&blurred(&self.glow_base, 6.0), GOLD, GOLD_ALPHA);
        let gold_cloud = shifted(&blurred(&gold, 8.0), sway, -sway);
        screen(&mut glow, &gold_cloud, 1.0);

        screen(&mut glow, &self.glow_base, 1.0);
        destination_in(&mut glow, &self.hand);

        // crease outline, already confined to the mask through its alpha
        screen(&mut glow, &self.glow_base, OUTLINE_ALPHA);
        glow
    }

    /// Diagonal highlight band sweeping across the hand.
    fn scan_layer(&self, sweep: f32) -> Layer {
        let (width, height) = self.hand.dimensions();
        let (w, h) = (width as f32, height as f32);
        let offset = sweep.rem_euclid(2.0) * 2.0 * w;
        let (x0, y0) = (-w + offset, -h);
        let (dx, dy) = (2.0 * w, 2.0 * h);
        let len_sq = dx * dx + dy * dy;

        let mut stripe = Layer::from_fn(width, height, |x, y| {
            let px = x as f32 + 0.5 - x0;
            let py = y as f32 + 0.5 - y0;
            let t = ((px * dx + py * dy) / len_sq).clamp(0.0, 1.0);
            gradient_at(&STRIPE_STOPS, t)
        });
        destination_in(&mut stripe, &self.hand);
        stripe
    }
}
