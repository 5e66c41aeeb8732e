//! Celebration - particle burst shown when a level is completed
//!
//! Particles follow a closed-form ballistic path from their spawn time, so the
//! state at any `now_ms` does not depend on how often `advance` ran.

use crate::rng::SimpleRng;

/// Particles per burst.
pub const BURST_SIZE: usize = 48;

/// Lifetime range of one particle in milliseconds.
pub const PARTICLE_LIFE_MS: (u32, u32) = (700, 1400);

/// Downward acceleration in pixels per second squared.
pub const GRAVITY: f32 = 900.0;

/// Burst colors (0xRRGGBB).
pub const PALETTE: [u32; 5] = [0xE0_6C_5A, 0xF2_C1_4E, 0x6B_BF_8A, 0x5A_9B_E0, 0xC6_B0_A3];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub origin: (f32, f32),
    /// Pixels per second.
    pub velocity: (f32, f32),
    pub spawn_ms: u64,
    pub life_ms: u32,
    pub color: u32,
    /// Position at the last advance.
    pub pos: (f32, f32),
    /// Remaining life in `[0, 1]` at the last advance.
    pub fade: f32,
}

impl Particle {
    fn update(&mut self, now_ms: u64) -> bool {
        let age_ms = now_ms.saturating_sub(self.spawn_ms);
        if age_ms >= self.life_ms as u64 {
            self.fade = 0.0;
            return false;
        }
        let t = age_ms as f32 / 1000.0;
        self.pos = (
            self.origin.0 + self.velocity.0 * t,
            self.origin.1 + self.velocity.1 * t + 0.5 * GRAVITY * t * t,
        );
        self.fade = 1.0 - age_ms as f32 / self.life_ms as f32;
        true
    }
}

#[derive(Debug, Clone)]
pub struct Celebration {
    rng: SimpleRng,
    particles: Vec<Particle>,
}

impl Celebration {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
            particles: Vec::with_capacity(BURST_SIZE),
        }
    }

    /// Spawn a burst centered on `(x, y)`.
    pub fn burst(&mut self, x: f32, y: f32, now_ms: u64) {
        for _ in 0..BURST_SIZE {
            let angle = self.rng.next_between(0.0, std::f32::consts::TAU);
            let speed = self.rng.next_between(180.0, 520.0);
            let life = PARTICLE_LIFE_MS.0 + self.rng.next_range(PARTICLE_LIFE_MS.1 - PARTICLE_LIFE_MS.0);
            let color = PALETTE[self.rng.next_range(PALETTE.len() as u32) as usize];
            self.particles.push(Particle {
                origin: (x, y),
                // Bias upward so the burst reads as a fountain.
                velocity: (angle.cos() * speed, angle.sin() * speed - 260.0),
                spawn_ms: now_ms,
                life_ms: life,
                color,
                pos: (x, y),
                fade: 1.0,
            });
        }
    }

    /// Move live particles to `now_ms` and drop expired ones.
    ///
    /// Returns whether any particle was alive before the update.
    pub fn advance(&mut self, now_ms: u64) -> bool {
        if self.particles.is_empty() {
            return false;
        }
        self.particles.retain_mut(|p| p.update(now_ms));
        true
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn is_active(&self) -> bool {
        !self.particles.is_empty()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn burst_is_deterministic_per_seed() {
        let mut a = Celebration::new(9);
        let mut b = Celebration::new(9);
        a.burst(100.0, 100.0, 0);
        b.burst(100.0, 100.0, 0);
        assert_eq!(a.particles(), b.particles());
        assert_eq!(a.particles().len(), BURST_SIZE);
    }

    #[test]
    fn particles_expire() {
        let mut c = Celebration::new(1);
        c.burst(0.0, 0.0, 1000);
        assert!(c.advance(1100));
        assert!(c.is_active());
        assert!(c.particles().iter().all(|p| p.fade > 0.0 && p.fade < 1.0));

        c.advance(1000 + PARTICLE_LIFE_MS.1 as u64);
        assert!(!c.is_active());
        assert!(!c.advance(5000));
    }

    #[test]
    fn gravity_pulls_down_over_time() {
        let mut c = Celebration::new(3);
        c.burst(0.0, 0.0, 0);
        c.advance(100);
        let early: Vec<f32> = c.particles().iter().map(|p| p.pos.1).collect();
        c.advance(600);
        for (p, y0) in c.particles().iter().zip(early) {
            let vy = p.velocity.1;
            // y(t) = vy t + g t^2 / 2, so the gain over [0.1, 0.6] exceeds vy * 0.5
            assert!(p.pos.1 - y0 > vy * 0.5);
        }
    }
}
