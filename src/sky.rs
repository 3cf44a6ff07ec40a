//! Sky simulation: particle pools for the decorative canvas background.
//!
//! `SkyState` advances once per animation frame and never touches the canvas;
//! drawing lives in the browser layer. Randomness comes in through any
//! [`rand::Rng`], so a seeded generator gives a reproducible sky.

use std::f64::consts::PI;

use rand::Rng;

use crate::config::SkyConfig;
use crate::theme::Mode;

/// Shooting stars are dropped once they are this far past the right or
/// bottom edge.
pub const EXIT_MARGIN: f64 = 200.0;

/// Sun center offset from the top-right corner.
pub const SUN_INSET_X: f64 = 120.0;
pub const SUN_Y: f64 = 90.0;
pub const SUN_RAYS: usize = 6;
pub const SUN_SPIN: f64 = 0.002;

/// Uniform sample in `[min, max)`, or `min` when the range is empty.
fn span<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64) -> f64 {
    if max > min {
        rng.random_range(min..max)
    } else {
        min
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Star {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub r: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cloud {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub stretch: f64,
    pub speed: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dot {
    pub x: f64,
    pub y: f64,
    pub vy: f64,
    pub size: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShootingStar {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub life: f64,
    pub max_life: f64,
    pub swell: f64,
}

impl ShootingStar {
    /// Remaining life as a fraction of the starting life.
    pub fn opacity(&self) -> f64 {
        if self.max_life <= 0.0 {
            return 0.0;
        }
        (self.life / self.max_life).max(0.0)
    }

    /// End of the trail, four steps behind the head.
    pub fn tail(&self) -> (f64, f64) {
        (self.x - self.vx * 4.0, self.y - self.vy * 4.0)
    }
}

#[derive(Clone, Debug)]
pub struct SkyState {
    config: SkyConfig,
    mode: Mode,
    width: f64,
    height: f64,
    stars: Vec<Star>,
    clouds: Vec<Cloud>,
    dots: Vec<Dot>,
    shooting: Vec<ShootingStar>,
    cooldown: f64,
    sun_angle: f64,
}

impl SkyState {
    pub fn new<R: Rng + ?Sized>(
        config: SkyConfig,
        mode: Mode,
        width: f64,
        height: f64,
        rng: &mut R,
    ) -> Self {
        let mut sky = Self {
            config,
            mode,
            width,
            height,
            stars: Vec::new(),
            clouds: Vec::new(),
            dots: Vec::new(),
            shooting: Vec::new(),
            cooldown: 0.0,
            sun_angle: 0.0,
        };
        sky.restart(rng);
        sky
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn clouds(&self) -> &[Cloud] {
        &self.clouds
    }

    pub fn dots(&self) -> &[Dot] {
        &self.dots
    }

    pub fn shooting_stars(&self) -> &[ShootingStar] {
        &self.shooting
    }

    pub fn cooldown(&self) -> f64 {
        self.cooldown
    }

    pub fn sun_angle(&self) -> f64 {
        self.sun_angle
    }

    /// Sun center in canvas pixels.
    pub fn sun_center(&self) -> (f64, f64) {
        (self.width - SUN_INSET_X, SUN_Y)
    }

    /// Throw every pool away and seed the one for the current mode.
    pub fn restart<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.shooting.clear();
        self.stars.clear();
        self.clouds.clear();
        self.dots.clear();
        self.cooldown = span(rng, 120.0, 260.0);
        match self.mode {
            Mode::Dark => self.init_stars(rng),
            Mode::Light => self.init_clouds(rng),
        }
    }

    /// Switch modes. Returns `false` and leaves everything as it was when the
    /// mode is unchanged.
    pub fn set_mode<R: Rng + ?Sized>(&mut self, mode: Mode, rng: &mut R) -> bool {
        if mode == self.mode {
            return false;
        }
        self.mode = mode;
        self.restart(rng);
        true
    }

    /// New canvas size. Particle coordinates are only valid for the size
    /// they were seeded with, so everything is reseeded.
    pub fn resize<R: Rng + ?Sized>(&mut self, width: f64, height: f64, rng: &mut R) {
        self.width = width;
        self.height = height;
        self.restart(rng);
    }

    fn init_stars<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let (w, h) = (self.width, self.height);
        self.stars = (0..self.config.star_count)
            .map(|_| Star {
                x: span(rng, 0.0, w),
                y: span(rng, 0.0, h),
                vx: span(rng, -0.1, 0.1),
                vy: span(rng, -0.1, 0.1),
                r: span(rng, 0.6, 1.8),
            })
            .collect();
    }

    fn init_clouds<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let (w, h) = (self.width, self.height);
        self.clouds = (0..self.config.cloud_count)
            .map(|_| Cloud {
                x: span(rng, -100.0, w),
                y: span(rng, 30.0_f64.min(h), h * 0.65),
                radius: span(rng, 80.0, 180.0),
                stretch: span(rng, 0.6, 1.1),
                speed: span(rng, 0.04, 0.12),
            })
            .collect();
        self.dots = (0..self.config.dot_count)
            .map(|_| Dot {
                x: span(rng, 0.0, w),
                y: span(rng, 0.0, h),
                vy: span(rng, 0.04, 0.09),
                size: span(rng, 0.8, 2.0),
            })
            .collect();
    }

    /// Advance one frame.
    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        match self.mode {
            Mode::Dark => self.step_stars(),
            Mode::Light => {
                self.step_clouds();
                self.sun_angle += SUN_SPIN;
            }
        }
        self.step_shooting(rng);
    }

    fn step_stars(&mut self) {
        let (w, h) = (self.width, self.height);
        for s in &mut self.stars {
            s.x += s.vx;
            s.y += s.vy;
            if s.x < 0.0 || s.x > w {
                s.vx = -s.vx;
            }
            if s.y < 0.0 || s.y > h {
                s.vy = -s.vy;
            }
        }
    }

    fn step_clouds(&mut self) {
        let (w, h) = (self.width, self.height);
        for c in &mut self.clouds {
            c.x += c.speed;
            if c.x - c.radius > w {
                c.x = -c.radius;
            }
        }
        for d in &mut self.dots {
            d.y += d.vy;
            if d.y > h + 10.0 {
                d.y = -10.0;
            }
        }
    }

    fn step_shooting<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cooldown -= 1.0;
        if self.cooldown <= 0.0 && self.shooting.len() < self.config.max_shooting_stars {
            self.spawn_shooting(rng);
        }
        let (w, h) = (self.width, self.height);
        self.shooting.retain_mut(|s| {
            s.x += s.vx;
            s.y += s.vy;
            s.life -= 1.0;
            s.life > 0.0 && s.x <= w + EXIT_MARGIN && s.y <= h + EXIT_MARGIN
        });
    }

    fn spawn_shooting<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cooldown = span(rng, 280.0, 520.0);
        let (w, h) = (self.width, self.height);
        let x = span(rng, -w * 0.2, w * 0.4);
        let y = span(rng, 0.0, h * 0.4);
        let speed = span(rng, 8.0, 13.0);
        let angle = span(rng, PI * 0.1, PI * 0.35);
        let life = span(rng, 55.0, 90.0);
        self.shooting.push(ShootingStar {
            x,
            y,
            vx: angle.cos() * speed,
            vy: angle.sin() * speed,
            life,
            max_life: life,
            swell: span(rng, 0.7, 1.1),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sky(mode: Mode) -> (SkyState, StdRng) {
        let mut rng = StdRng::seed_from_u64(7);
        let sky = SkyState::new(SkyConfig::default(), mode, 800.0, 600.0, &mut rng);
        (sky, rng)
    }

    #[test]
    fn dark_seeds_stars_only() {
        let (sky, _) = sky(Mode::Dark);
        assert_eq!(sky.stars().len(), 70);
        assert!(sky.clouds().is_empty());
        assert!(sky.dots().is_empty());
        assert!((120.0..260.0).contains(&sky.cooldown()));
    }

    #[test]
    fn light_seeds_clouds_and_dots() {
        let (sky, _) = sky(Mode::Light);
        assert!(sky.stars().is_empty());
        assert_eq!(sky.clouds().len(), 12);
        assert_eq!(sky.dots().len(), 32);
    }

    #[test]
    fn stars_bounce_off_edges() {
        let mut rng = StdRng::seed_from_u64(1);
        let config = SkyConfig {
            star_count: 1,
            ..SkyConfig::default()
        };
        let mut sky = SkyState::new(config, Mode::Dark, 10.0, 10.0, &mut rng);
        sky.stars[0] = Star {
            x: 9.95,
            y: 5.0,
            vx: 0.1,
            vy: 0.0,
            r: 1.0,
        };
        sky.step_stars();
        assert_eq!(sky.stars[0].vx, -0.1);
        sky.step_stars();
        assert!(sky.stars[0].x < 10.0);
    }

    #[test]
    fn clouds_wrap_to_the_left() {
        let (mut sky, _) = sky(Mode::Light);
        sky.clouds[0] = Cloud {
            x: 899.99,
            y: 100.0,
            radius: 100.0,
            stretch: 1.0,
            speed: 0.1,
        };
        sky.dots[0].y = 610.0;
        sky.dots[0].vy = 0.05;
        sky.step_clouds();
        assert_eq!(sky.clouds[0].x, -100.0);
        assert_eq!(sky.dots[0].y, -10.0);
    }

    #[test]
    fn shooting_stars_spawn_after_cooldown_and_cap_at_two() {
        let (mut sky, mut rng) = sky(Mode::Dark);
        let mut max_seen = 0;
        for _ in 0..5000 {
            sky.tick(&mut rng);
            max_seen = max_seen.max(sky.shooting_stars().len());
            assert!(sky.shooting_stars().len() <= 2);
        }
        assert!(max_seen >= 1);
    }

    #[test]
    fn shooting_star_expires() {
        let (mut sky, mut rng) = sky(Mode::Dark);
        sky.cooldown = 1000.0;
        sky.shooting.push(ShootingStar {
            x: 0.0,
            y: 0.0,
            vx: 1.0,
            vy: 1.0,
            life: 2.0,
            max_life: 4.0,
            swell: 1.0,
        });
        assert_eq!(sky.shooting_stars()[0].opacity(), 0.5);
        sky.tick(&mut rng);
        assert_eq!(sky.shooting_stars().len(), 1);
        sky.tick(&mut rng);
        assert!(sky.shooting_stars().is_empty());
    }

    #[test]
    fn shooting_star_leaves_past_margin() {
        let (mut sky, mut rng) = sky(Mode::Dark);
        sky.cooldown = 1000.0;
        sky.shooting.push(ShootingStar {
            x: 995.0,
            y: 10.0,
            vx: 10.0,
            vy: 0.0,
            life: 50.0,
            max_life: 50.0,
            swell: 1.0,
        });
        sky.tick(&mut rng);
        assert!(sky.shooting_stars().is_empty());
    }

    #[test]
    fn same_mode_is_a_no_op() {
        let (mut sky, mut rng) = sky(Mode::Dark);
        let before = sky.stars().to_vec();
        assert!(!sky.set_mode(Mode::Dark, &mut rng));
        assert_eq!(sky.stars(), &before[..]);
    }

    #[test]
    fn sun_spins_in_light_mode_only() {
        let (mut light, mut rng) = sky(Mode::Light);
        light.tick(&mut rng);
        assert!((light.sun_angle() - SUN_SPIN).abs() < 1e-12);
        assert_eq!(light.sun_center(), (680.0, 90.0));

        let (mut dark, mut rng) = sky(Mode::Dark);
        dark.tick(&mut rng);
        assert_eq!(dark.sun_angle(), 0.0);
    }

    #[test]
    fn tiny_canvas_does_not_panic() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut sky = SkyState::new(SkyConfig::default(), Mode::Light, 0.0, 0.0, &mut rng);
        sky.tick(&mut rng);
        sky.set_mode(Mode::Dark, &mut rng);
        sky.tick(&mut rng);
    }
}
