//! Sparkle particles drifting over the hand.
//!
//! Particles spawn at random points inside the hand, drift with a small
//! wobble and fade out over their lifetime. The generator is seeded, so a
//! given seed and hand replay the same sparkles.

use super::blend::{destination_in, gradient_at, GradientStop, Layer};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::TAU;

/// Chance per frame of trying to spawn a particle.
const SPAWN_CHANCE: f64 = 0.6;
/// Hand alpha a spawn point must exceed.
const SPAWN_MIN_ALPHA: f32 = 40.0 / 255.0;
/// Remaining life at which a particle is fully opaque.
const FADE_FRAMES: f32 = 90.0;

const SPARKLE_STOPS: [GradientStop; 4] = [
    (0.0, [255, 245, 200], 1.0),
    (0.2, [255, 215, 120], 0.9),
    (0.6, [210, 176, 74], 0.2),
    (1.0, [0, 0, 0], 0.0),
];

#[derive(Debug, Clone, PartialEq)]
struct Particle {
    x: f32,
    y: f32,
    vx: f32,
    vy: f32,
    life: f32,
    size: f32,
    wobble: f32,
}

impl Particle {
    fn advance(&mut self) {
        self.x += self.vx + (self.life * 0.1).sin() * self.wobble;
        self.y += self.vy + (self.life * 0.1).cos() * self.wobble;
        self.life -= 1.0;
    }

    fn alpha(&self) -> f32 {
        (self.life / FADE_FRAMES).max(0.0)
    }

    /// Radial sparkle filling a square of side `12 * size`.
    fn draw(&self, layer: &mut Layer) {
        let alpha = self.alpha();
        if alpha <= 0.0 {
            return;
        }

        let half = self.size * 6.0;
        let radius = half.max(6.0);
        let (width, height) = layer.dimensions();
        let x0 = (self.x - half).floor().max(0.0);
        let y0 = (self.y - half).floor().max(0.0);
        let x1 = (self.x + half).ceil().min(width as f32);
        let y1 = (self.y + half).ceil().min(height as f32);
        if x0 >= x1 || y0 >= y1 {
            return;
        }

        for py in y0 as u32..y1 as u32 {
            for px in x0 as u32..x1 as u32 {
                let (cx, cy) = (px as f32 + 0.5 - self.x, py as f32 + 0.5 - self.y);
                if cx.abs() > half || cy.abs() > half {
                    continue;
                }
                let s = gradient_at(&SPARKLE_STOPS, (cx.hypot(cy) / radius).min(1.0));
                let d = layer.get_pixel_mut(px, py);
                let k = 1.0 - s[3] * alpha;
                for c in 0..4 {
                    d[c] = s[c] * alpha + d[c] * k;
                }
            }
        }
    }
}

/// Seeded particle system, advanced once per rendered frame.
pub struct Sparkles {
    rng: StdRng,
    pool: Vec<Particle>,
}

impl Sparkles {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            pool: Vec::new(),
        }
    }

    /// Number of live particles.
    pub fn len(&self) -> usize {
        self.pool.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }

    /// Maybe spawn inside `hand`, advance every particle one frame and
    /// draw them clipped to `hand`. Expired particles are dropped after
    /// this frame.
    pub fn step(&mut self, hand: &Layer) -> Layer {
        let (width, height) = hand.dimensions();

        if self.rng.gen_bool(SPAWN_CHANCE) {
            let x = self.rng.gen_range(0.0..width as f32);
            let y = self.rng.gen_range(0.0..height as f32);
            let (px, py) = ((x as u32).min(width - 1), (y as u32).min(height - 1));
            if hand.get_pixel(px, py)[3] > SPAWN_MIN_ALPHA {
                self.spawn(x, y);
            }
        }

        let mut layer = Layer::new(width, height);
        for particle in &mut self.pool {
            particle.advance();
            particle.draw(&mut layer);
        }
        self.pool.retain(|p| p.life > 0.0);

        destination_in(&mut layer, hand);
        layer
    }

    fn spawn(&mut self, x: f32, y: f32) {
        let angle = self.rng.gen_range(0.0..TAU);
        let speed = 0.2 + self.rng.gen::<f32>() * 1.2;
        let particle = Particle {
            x,
            y,
            vx: angle.cos() * speed,
            vy: angle.sin() * speed,
            life: 40.0 + self.rng.gen::<f32>() * 50.0,
            size: 1.0 + self.rng.gen::<f32>() * 3.5,
            wobble: self.rng.gen::<f32>() * 0.5,
        };
        tracing::trace!(x, y, life = particle.life, "spawned sparkle");
        self.pool.push(particle);
    }
}
