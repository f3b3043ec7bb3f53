//! Night scene: a drifting star field with nebulas, planets, dust and the
//! occasional meteor.

use fastrand::Rng;
use haneul_canvas::{Canvas, Rgb};

use super::{rand_range, wrap_axis};
use crate::{layers, palette};

/// A twinkling star.
#[derive(Debug, Clone)]
struct Star {
    x: f32,
    y: f32,
    radius: f32,
    vx: f32,
    vy: f32,
    color: Rgb,
    /// Phase offset into the twinkle sinusoid.
    twinkle_phase: f32,
    /// Twinkle angular speed in radians per step.
    twinkle_speed: f32,
}

/// A faint drifting dust mote.
#[derive(Debug, Clone)]
struct DustMote {
    x: f32,
    y: f32,
    radius: f32,
    vx: f32,
    vy: f32,
    alpha: f32,
}

/// A large soft nebula patch.
#[derive(Debug, Clone)]
struct Nebula {
    x: f32,
    y: f32,
    radius: f32,
    vx: f32,
    vy: f32,
    color: Rgb,
    alpha: f32,
}

/// A slowly drifting planet.
#[derive(Debug, Clone)]
struct Planet {
    x: f32,
    y: f32,
    radius: f32,
    vx: f32,
    vy: f32,
    color: Rgb,
}

/// A falling meteor. Lives for `ttl` steps and fades as `life` runs out.
#[derive(Debug, Clone)]
struct Meteor {
    x: f32,
    y: f32,
    length: f32,
    angle: f32,
    speed: f32,
    life: u32,
    ttl: u32,
}

/// The night-sky animator. Owns every entity pool; drive it with `resize`,
/// `step` and `draw`.
#[derive(Debug)]
pub struct Cosmos {
    stars: Vec<Star>,
    dust: Vec<DustMote>,
    nebulas: Vec<Nebula>,
    planets: Vec<Planet>,
    meteors: Vec<Meteor>,
    width: f32,
    height: f32,
    scale: f32,
    frame: u64,
    rng: Rng,
}

impl Cosmos {
    /// Animator with empty pools; call `resize` before stepping.
    pub fn new(seed: u64) -> Self {
        Self {
            stars: Vec::new(),
            dust: Vec::new(),
            nebulas: Vec::new(),
            planets: Vec::new(),
            meteors: Vec::new(),
            width: 0.0,
            height: 0.0,
            scale: 1.0,
            frame: 0,
            rng: Rng::with_seed(seed),
        }
    }

    /// Throw away every pool and repopulate for the given surface.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width as f32;
        self.height = height as f32;
        self.scale = layers::scale_factor(self.width, self.height);

        let (w, h, scale) = (self.width, self.height, self.scale);
        let rng = &mut self.rng;
        let stars = (0..layers::STARS.scaled(w, h))
            .map(|_| spawn_star(rng, w, h, scale))
            .collect();
        let dust = (0..layers::DUST.scaled(w, h))
            .map(|_| spawn_dust(rng, w, h, scale))
            .collect();
        let nebulas = (0..layers::NEBULAS.scaled(w, h))
            .map(|_| spawn_nebula(rng, w, h, scale))
            .collect();
        let planets = (0..layers::PLANETS.scaled(w, h))
            .map(|_| spawn_planet(rng, w, h, scale))
            .collect();

        self.stars = stars;
        self.dust = dust;
        self.nebulas = nebulas;
        self.planets = planets;
        self.meteors.clear();
    }

    /// Advance the simulation by one tick.
    pub fn step(&mut self) {
        let (w, h) = (self.width, self.height);

        for star in &mut self.stars {
            star.x += star.vx;
            star.y += star.vy;
            wrap_axis(&mut star.x, w, star.radius);
            wrap_axis(&mut star.y, h, star.radius);
        }
        for mote in &mut self.dust {
            mote.x += mote.vx;
            mote.y += mote.vy;
            wrap_axis(&mut mote.x, w, mote.radius);
            wrap_axis(&mut mote.y, h, mote.radius);
        }
        for nebula in &mut self.nebulas {
            nebula.x += nebula.vx;
            nebula.y += nebula.vy;
            wrap_axis(&mut nebula.x, w, nebula.radius);
            wrap_axis(&mut nebula.y, h, nebula.radius);
        }
        for planet in &mut self.planets {
            planet.x += planet.vx;
            planet.y += planet.vy;
            wrap_axis(&mut planet.x, w, planet.radius);
            wrap_axis(&mut planet.y, h, planet.radius);
        }
        for meteor in &mut self.meteors {
            meteor.x += meteor.angle.cos() * meteor.speed;
            meteor.y += meteor.angle.sin() * meteor.speed;
        }

        // At most one spawn per step.
        if self.rng.f32() < layers::METEOR_CHANCE {
            let meteor = spawn_meteor(&mut self.rng, w, h, self.scale);
            self.meteors.push(meteor);
        }

        for meteor in &mut self.meteors {
            meteor.life = meteor.life.saturating_sub(1);
        }
        self.meteors.retain(|meteor| meteor.life > 0);

        self.frame = self.frame.wrapping_add(1);
    }

    /// Paint the current state, back to front.
    pub fn draw(&self, canvas: &mut Canvas) {
        canvas.fill_vertical_gradient(&palette::COSMOS_STOPS);
        let max_dim = self.width.max(self.height);
        canvas.radial_glow(
            self.width * 0.82,
            self.height * 0.18,
            max_dim * 0.6,
            palette::GLOW_BLUE,
            0.16,
        );
        canvas.radial_glow(
            self.width * 0.12,
            self.height * 0.85,
            max_dim * 0.55,
            palette::GLOW_EMERALD,
            0.10,
        );

        for nebula in &self.nebulas {
            canvas.radial_glow(nebula.x, nebula.y, nebula.radius, nebula.color, nebula.alpha);
        }

        for planet in &self.planets {
            canvas.fill_circle(planet.x, planet.y, planet.radius, planet.color, 1.0);
            // Lit limb toward the upper left.
            canvas.fill_circle(
                planet.x - planet.radius * 0.35,
                planet.y - planet.radius * 0.35,
                planet.radius * 0.55,
                Rgb::hex(0xFFF6E8),
                0.18,
            );
        }

        for star in &self.stars {
            let phase = self.frame as f32 * star.twinkle_speed + star.twinkle_phase;
            let alpha = 0.55 + 0.45 * phase.sin();
            let radius = star.radius.max(layers::MIN_DOT_RADIUS);
            canvas.fill_circle(star.x, star.y, radius, star.color, alpha);
        }
        for mote in &self.dust {
            let radius = mote.radius.max(layers::MIN_DOT_RADIUS);
            canvas.fill_circle(mote.x, mote.y, radius, palette::DUST_COLOR, mote.alpha);
        }

        for meteor in &self.meteors {
            let fade = meteor.life as f32 / meteor.ttl.max(1) as f32;
            let tail_x = meteor.x - meteor.angle.cos() * meteor.length;
            let tail_y = meteor.y - meteor.angle.sin() * meteor.length;
            canvas.stroke_fade(
                meteor.x,
                meteor.y,
                tail_x,
                tail_y,
                palette::METEOR_COLOR,
                0.9 * fade,
                0.0,
            );
            let head = (1.4 * self.scale).max(layers::MIN_DOT_RADIUS);
            canvas.fill_circle(meteor.x, meteor.y, head, palette::METEOR_COLOR, fade);
        }
    }
}

fn spawn_star(rng: &mut Rng, width: f32, height: f32, scale: f32) -> Star {
    let heading = rand_range(rng, 0.0, std::f32::consts::TAU);
    let speed = rand_range(rng, layers::STAR_SPEED.0, layers::STAR_SPEED.1) * scale;
    Star {
        x: rand_range(rng, 0.0, width),
        y: rand_range(rng, 0.0, height),
        radius: layers::STAR_BASE_RADIUS * rand_range(rng, 0.75, 1.25) * scale,
        vx: heading.cos() * speed,
        vy: heading.sin() * speed,
        color: palette::pick(rng, &palette::STAR_COLORS),
        twinkle_phase: rand_range(rng, 0.0, std::f32::consts::TAU),
        twinkle_speed: rand_range(
            rng,
            layers::STAR_TWINKLE_SPEED.0,
            layers::STAR_TWINKLE_SPEED.1,
        ),
    }
}

fn spawn_dust(rng: &mut Rng, width: f32, height: f32, scale: f32) -> DustMote {
    let heading = rand_range(rng, 0.0, std::f32::consts::TAU);
    let speed = rand_range(rng, layers::DUST_SPEED.0, layers::DUST_SPEED.1) * scale;
    DustMote {
        x: rand_range(rng, 0.0, width),
        y: rand_range(rng, 0.0, height),
        radius: rand_range(rng, layers::DUST_RADIUS.0, layers::DUST_RADIUS.1) * scale,
        vx: heading.cos() * speed,
        vy: heading.sin() * speed,
        alpha: rand_range(rng, layers::DUST_ALPHA.0, layers::DUST_ALPHA.1),
    }
}

fn spawn_nebula(rng: &mut Rng, width: f32, height: f32, scale: f32) -> Nebula {
    let heading = rand_range(rng, 0.0, std::f32::consts::TAU);
    let speed = rand_range(rng, layers::NEBULA_SPEED.0, layers::NEBULA_SPEED.1) * scale;
    Nebula {
        x: rand_range(rng, 0.0, width),
        y: rand_range(rng, 0.0, height),
        radius: rand_range(rng, layers::NEBULA_RADIUS.0, layers::NEBULA_RADIUS.1) * scale,
        vx: heading.cos() * speed,
        vy: heading.sin() * speed,
        color: palette::pick(rng, &palette::NEBULA_COLORS),
        alpha: rand_range(rng, layers::NEBULA_ALPHA.0, layers::NEBULA_ALPHA.1),
    }
}

fn spawn_planet(rng: &mut Rng, width: f32, height: f32, scale: f32) -> Planet {
    let heading = rand_range(rng, 0.0, std::f32::consts::TAU);
    let speed = rand_range(rng, layers::PLANET_SPEED.0, layers::PLANET_SPEED.1) * scale;
    Planet {
        x: rand_range(rng, 0.0, width),
        y: rand_range(rng, 0.0, height),
        radius: rand_range(rng, layers::PLANET_RADIUS.0, layers::PLANET_RADIUS.1) * scale,
        vx: heading.cos() * speed,
        vy: heading.sin() * speed,
        color: palette::pick(rng, &palette::PLANET_COLORS),
    }
}

fn spawn_meteor(rng: &mut Rng, width: f32, height: f32, scale: f32) -> Meteor {
    let life = rng.u32(layers::METEOR_LIFE.0..=layers::METEOR_LIFE.1);
    Meteor {
        x: rand_range(rng, width * 0.2, width * 1.1),
        y: rand_range(rng, -height * 0.1, height * 0.4),
        length: rand_range(rng, layers::METEOR_LENGTH.0, layers::METEOR_LENGTH.1) * scale,
        angle: rand_range(rng, layers::METEOR_ANGLE.0, layers::METEOR_ANGLE.1),
        speed: rand_range(rng, layers::METEOR_SPEED.0, layers::METEOR_SPEED.1) * scale,
        life,
        ttl: life,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_star_counts_at_reference_and_quarter_area() {
        let mut cosmos = Cosmos::new(1);
        cosmos.resize(1920, 1080);
        assert_eq!(cosmos.stars.len(), 1200);

        cosmos.resize(960, 540);
        assert_eq!(cosmos.stars.len(), 300);
    }

    #[test]
    fn test_small_surface_clamps_to_layer_minimums() {
        let mut cosmos = Cosmos::new(2);
        cosmos.resize(100, 60);
        assert_eq!(cosmos.stars.len(), 24);
        assert_eq!(cosmos.dust.len(), 12);
        assert_eq!(cosmos.nebulas.len(), 2);
        assert_eq!(cosmos.planets.len(), 1);
    }

    #[test]
    fn test_wrap_bounds_hold_over_many_steps() {
        let mut cosmos = Cosmos::new(3);
        cosmos.resize(300, 200);
        for _ in 0..500 {
            cosmos.step();
        }
        for star in &cosmos.stars {
            let margin = star.radius * 2.0;
            assert!(star.x >= -margin && star.x <= 300.0 + margin);
            assert!(star.y >= -margin && star.y <= 200.0 + margin);
        }
        for mote in &cosmos.dust {
            let margin = mote.radius * 2.0;
            assert!(mote.x >= -margin && mote.x <= 300.0 + margin);
            assert!(mote.y >= -margin && mote.y <= 200.0 + margin);
        }
        for nebula in &cosmos.nebulas {
            let margin = nebula.radius * 2.0;
            assert!(nebula.x >= -margin && nebula.x <= 300.0 + margin);
            assert!(nebula.y >= -margin && nebula.y <= 200.0 + margin);
        }
    }

    #[test]
    fn test_meteor_life_strictly_decrements_until_removal() {
        let mut cosmos = Cosmos::new(4);
        cosmos.resize(300, 200);
        cosmos.meteors.push(Meteor {
            x: -555.5,
            y: 10.0,
            length: 20.0,
            angle: 0.0,
            speed: 0.0,
            life: 5,
            ttl: 5,
        });
        for expected in (0..5).rev() {
            cosmos.step();
            let tracked = cosmos.meteors.iter().find(|m| m.x == -555.5);
            if expected == 0 {
                assert!(tracked.is_none());
            } else {
                assert_eq!(tracked.unwrap().life, expected);
            }
        }
    }

    #[test]
    fn test_meteors_spawn_at_most_one_per_step() {
        let mut cosmos = Cosmos::new(5);
        cosmos.resize(400, 300);
        let mut saw_meteor = false;
        for _ in 0..2000 {
            let before = cosmos.meteors.len();
            cosmos.step();
            assert!(cosmos.meteors.len() <= before + 1);
            assert!(cosmos.meteors.len() <= layers::METEOR_LIFE.1 as usize);
            saw_meteor |= !cosmos.meteors.is_empty();
        }
        assert!(saw_meteor);
    }

    #[test]
    fn test_resize_discards_all_prior_entities() {
        let mut cosmos = Cosmos::new(6);
        cosmos.resize(300, 200);
        cosmos.stars[0].x = -7777.0;
        cosmos.meteors.push(Meteor {
            x: -7777.0,
            y: 0.0,
            length: 10.0,
            angle: 0.0,
            speed: 0.0,
            life: 50,
            ttl: 50,
        });

        cosmos.resize(320, 220);
        assert!(cosmos.stars.iter().all(|s| s.x != -7777.0));
        assert!(cosmos.meteors.is_empty());
    }

    #[test]
    fn test_same_seed_same_simulation() {
        let mut a = Cosmos::new(42);
        let mut b = Cosmos::new(42);
        a.resize(250, 160);
        b.resize(250, 160);
        for _ in 0..50 {
            a.step();
            b.step();
        }
        assert_eq!(a.stars.len(), b.stars.len());
        for (sa, sb) in a.stars.iter().zip(&b.stars) {
            assert_eq!(sa.x, sb.x);
            assert_eq!(sa.y, sb.y);
        }
        assert_eq!(a.meteors.len(), b.meteors.len());
    }

    #[test]
    fn test_draw_covers_the_surface() {
        let mut cosmos = Cosmos::new(7);
        cosmos.resize(60, 40);
        for _ in 0..3 {
            cosmos.step();
        }
        let mut canvas = Canvas::new(60, 40);
        cosmos.draw(&mut canvas);
        // The gradient alone guarantees a non-black surface.
        assert!(canvas.pixel(30, 20) != Rgb::BLACK);
    }

    #[test]
    fn test_tiny_stars_and_dust_stay_visible_after_scaling() {
        // An 80x24 terminal gives an 80x48 surface, where the scale rule
        // leaves star radii around 0.04 px. The draw floor has to keep the
        // small layers legible over the backdrop.
        let mut cosmos = Cosmos::new(8);
        cosmos.resize(80, 48);
        assert!(cosmos.stars.iter().all(|s| s.radius < 0.1));

        cosmos.nebulas.clear();
        cosmos.planets.clear();
        cosmos.stars.clear();
        cosmos.dust.clear();
        cosmos.stars.push(Star {
            x: 40.0,
            y: 24.0,
            radius: 0.05,
            vx: 0.0,
            vy: 0.0,
            color: palette::STAR_COLORS[0],
            // Twinkle peak, so the contrast below is the bright phase.
            twinkle_phase: std::f32::consts::FRAC_PI_2,
            twinkle_speed: 0.0,
        });
        cosmos.dust.push(DustMote {
            x: 20.0,
            y: 10.0,
            radius: 0.05,
            vx: 0.0,
            vy: 0.0,
            alpha: 0.2,
        });

        let mut lit = Canvas::new(80, 48);
        cosmos.draw(&mut lit);
        cosmos.stars.clear();
        cosmos.dust.clear();
        let mut backdrop = Canvas::new(80, 48);
        cosmos.draw(&mut backdrop);

        let star_delta = lit.pixel(40, 24).g - backdrop.pixel(40, 24).g;
        assert!(star_delta > 100.0);
        let dust_delta = lit.pixel(20, 10).g - backdrop.pixel(20, 10).g;
        assert!(dust_delta > 10.0);
    }
}
