//! Day scene: layered clouds drifting over grassland hills, with a rare
//! aeroplane crossing left to right.

use std::collections::VecDeque;

use fastrand::Rng;
use haneul_canvas::{Canvas, Rgb};

use super::rand_range;
use crate::{layers, palette};

/// One puff in a cloud cluster, offset from the cloud center.
#[derive(Debug, Clone)]
struct Puff {
    dx: f32,
    dy: f32,
    radius: f32,
}

/// A drifting cloud. The puff cluster is fixed at creation.
#[derive(Debug, Clone)]
struct Cloud {
    x: f32,
    y: f32,
    size: f32,
    speed: f32,
    puffs: Vec<Puff>,
}

/// A static grassland silhouette, sampled to one height per column.
#[derive(Debug, Clone)]
struct Hill {
    surface: Vec<f32>,
    color: Rgb,
    alpha: f32,
}

/// The aeroplane and its contrail. At most one is ever active.
#[derive(Debug, Clone, Default)]
struct Aeroplane {
    active: bool,
    x: f32,
    y: f32,
    size: f32,
    speed: f32,
    /// Recent positions, oldest first. Bounded FIFO.
    trail: VecDeque<(f32, f32)>,
}

/// The daytime animator. Owns every entity pool; drive it with `resize`,
/// `step` and `draw`.
#[derive(Debug)]
pub struct Meadow {
    clouds: Vec<Cloud>,
    hills: Vec<Hill>,
    plane: Aeroplane,
    width: f32,
    height: f32,
    scale: f32,
    rng: Rng,
}

impl Meadow {
    /// Animator with empty pools; call `resize` before stepping.
    pub fn new(seed: u64) -> Self {
        Self {
            clouds: Vec::new(),
            hills: Vec::new(),
            plane: Aeroplane::default(),
            width: 0.0,
            height: 0.0,
            scale: 1.0,
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
        let mut clouds = Vec::new();
        for layer in &layers::CLOUD_LAYERS {
            for _ in 0..layer.count.scaled(w, h) {
                clouds.push(spawn_cloud(rng, layer, w, h, scale));
            }
        }
        let hills = layers::HILL_LAYERS
            .iter()
            .map(|layer| build_hill(rng, layer, w, h, scale))
            .collect();

        self.clouds = clouds;
        self.hills = hills;
        self.plane = Aeroplane::default();
    }

    /// Advance the simulation by one tick.
    pub fn step(&mut self) {
        // Clouds drift right and re-enter from the left.
        for cloud in &mut self.clouds {
            cloud.x += cloud.speed;
            if cloud.x - cloud.size > self.width {
                cloud.x = -cloud.size * 2.0;
                cloud.y = self.rng.f32() * self.height * 0.55;
            }
        }

        if self.plane.active {
            self.plane.x += self.plane.speed;
            self.plane.trail.push_back((self.plane.x, self.plane.y));
            if self.plane.trail.len() > layers::AEROPLANE_TRAIL_POINTS {
                self.plane.trail.pop_front();
            }
            if self.plane.x > self.width + layers::AEROPLANE_TRAIL_LENGTH * self.scale {
                self.plane.active = false;
            }
        } else if self.rng.f32() < layers::AEROPLANE_CHANCE {
            self.plane = spawn_plane(&mut self.rng, self.height, self.scale);
        }
    }

    /// Paint the current state, back to front.
    pub fn draw(&self, canvas: &mut Canvas) {
        canvas.fill_vertical_gradient(&palette::SKY_STOPS);

        for hill in &self.hills {
            canvas.fill_below(&hill.surface, hill.color, hill.alpha);
        }

        // Every cloud layer passes in front of the grassland; low clouds
        // overlap the hill band.
        for cloud in &self.clouds {
            for puff in &cloud.puffs {
                let px = cloud.x + puff.dx;
                let py = cloud.y + puff.dy;
                canvas.fill_circle(px, py, puff.radius, palette::CLOUD_COLOR, 0.35);
                canvas.fill_circle(px, py, puff.radius * 0.68, palette::CLOUD_COLOR, 0.5);
            }
        }

        if self.plane.active {
            draw_plane(canvas, &self.plane);
        }
    }
}

fn spawn_cloud(
    rng: &mut Rng,
    layer: &layers::CloudLayer,
    width: f32,
    height: f32,
    scale: f32,
) -> Cloud {
    let size_ref = layer.base_size * rand_range(rng, 0.75, 1.25);
    let size = size_ref * scale;
    // Puff count follows the unscaled size so clusters look alike at any
    // surface size.
    let puff_count = (size_ref / 30.0) as usize + 6;
    let puffs = (0..puff_count)
        .map(|_| Puff {
            dx: (rng.f32() - 0.5) * size * 0.9,
            dy: (rng.f32() - 0.5) * size * 0.35,
            radius: rng.f32() * (size / 4.0) + size / 6.0,
        })
        .collect();
    Cloud {
        x: rng.f32() * (width + size * 2.0) - size,
        y: rng.f32() * height * 0.55,
        size,
        speed: layer.speed * rand_range(rng, 0.75, 1.25) * scale,
        puffs,
    }
}

fn build_hill(
    rng: &mut Rng,
    layer: &layers::HillLayer,
    width: f32,
    height: f32,
    scale: f32,
) -> Hill {
    let points = hill_points(rng, layer, width, height, scale);
    Hill {
        surface: sample_hill_surface(&points, width as usize),
        color: layer.color,
        alpha: layer.alpha,
    }
}

/// Control points spanning 1.2x the surface width, jittered below the
/// layer's baseline.
fn hill_points(
    rng: &mut Rng,
    layer: &layers::HillLayer,
    width: f32,
    height: f32,
    scale: f32,
) -> Vec<(f32, f32)> {
    let span = width * 1.2;
    let segment = span / (layer.points - 1) as f32;
    (0..layer.points)
        .map(|i| {
            let x = i as f32 * segment - width * 0.1;
            let y = height * layer.baseline - rng.f32() * layer.amplitude * scale;
            (x, y)
        })
        .collect()
}

/// Sample the chain of quadratic curves through consecutive midpoints into
/// one height per column.
fn sample_hill_surface(points: &[(f32, f32)], columns: usize) -> Vec<f32> {
    let mut surface = vec![f32::INFINITY; columns];
    if columns == 0 || points.len() < 2 {
        return surface;
    }

    let mut start = points[0];
    for i in 1..points.len() {
        let (control, end) = if i + 1 < points.len() {
            let next = points[i + 1];
            (points[i], ((points[i].0 + next.0) / 2.0, (points[i].1 + next.1) / 2.0))
        } else {
            (points[i], points[i])
        };
        sample_quad(start, control, end, &mut surface);
        start = end;
    }

    // Backfill columns the sampling skipped from their left neighbor.
    let mut last = surface
        .iter()
        .copied()
        .find(|v| v.is_finite())
        .unwrap_or(f32::INFINITY);
    for value in &mut surface {
        if value.is_finite() {
            last = *value;
        } else {
            *value = last;
        }
    }
    surface
}

fn sample_quad(p0: (f32, f32), control: (f32, f32), p1: (f32, f32), surface: &mut [f32]) {
    let span = (p1.0 - p0.0).abs();
    let steps = ((span.ceil() as usize) * 2).max(8);
    for i in 0..=steps {
        let t = i as f32 / steps as f32;
        let inv = 1.0 - t;
        let x = inv * inv * p0.0 + 2.0 * inv * t * control.0 + t * t * p1.0;
        let y = inv * inv * p0.1 + 2.0 * inv * t * control.1 + t * t * p1.1;
        let col = x.round();
        if col >= 0.0 && (col as usize) < surface.len() {
            let idx = col as usize;
            surface[idx] = surface[idx].min(y);
        }
    }
}

fn spawn_plane(rng: &mut Rng, height: f32, scale: f32) -> Aeroplane {
    let size = layers::AEROPLANE_SIZE * scale;
    Aeroplane {
        active: true,
        x: -size,
        y: rng.f32() * height * 0.2 + height * 0.05,
        size,
        speed: layers::AEROPLANE_SPEED * scale,
        trail: VecDeque::with_capacity(layers::AEROPLANE_TRAIL_POINTS + 1),
    }
}

fn draw_plane(canvas: &mut Canvas, plane: &Aeroplane) {
    // Contrail brightens toward the newest point.
    let count = plane.trail.len();
    for i in 1..count {
        let (x0, y0) = plane.trail[i - 1];
        let (x1, y1) = plane.trail[i];
        let a0 = 0.6 * (i - 1) as f32 / count as f32;
        let a1 = 0.6 * i as f32 / count as f32;
        canvas.stroke_fade(x0, y0, x1, y1, palette::CONTRAIL_COLOR, a0, a1);
    }

    // Fuselage points right; the nose sits at the entity position.
    let s = plane.size;
    canvas.fill_triangle(
        [
            (plane.x, plane.y),
            (plane.x - s, plane.y + s * 0.25),
            (plane.x - s, plane.y - s * 0.25),
        ],
        palette::PLANE_BODY,
        1.0,
    );
    canvas.fill_triangle(
        [
            (plane.x - s * 0.6, plane.y),
            (plane.x - s, plane.y - s * 0.45),
            (plane.x - s, plane.y),
        ],
        palette::PLANE_TRIM,
        1.0,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cloud_counts_at_reference_and_quarter_area() {
        let mut meadow = Meadow::new(1);
        meadow.resize(1920, 1080);
        assert_eq!(meadow.clouds.len(), 12 + 8 + 5);

        meadow.resize(960, 540);
        // round(12/4) + round(8/4) + max(2, round(5/4))
        assert_eq!(meadow.clouds.len(), 3 + 2 + 2);
    }

    #[test]
    fn test_spawn_roll_while_active_is_a_noop() {
        let mut meadow = Meadow::new(2);
        meadow.resize(2000, 1000);
        meadow.plane = Aeroplane {
            active: true,
            x: 100.0,
            y: 50.0,
            size: 10.0,
            speed: 2.0,
            trail: VecDeque::new(),
        };
        for _ in 0..300 {
            let before = meadow.plane.x;
            meadow.step();
            // A respawn would teleport the plane back to the left edge.
            assert!(meadow.plane.active);
            assert_eq!(meadow.plane.x, before + 2.0);
        }
    }

    #[test]
    fn test_trail_is_a_bounded_fifo() {
        let mut meadow = Meadow::new(3);
        meadow.resize(2000, 1000);
        meadow.plane = Aeroplane {
            active: true,
            x: 100.0,
            y: 50.0,
            size: 10.0,
            speed: 2.0,
            trail: VecDeque::new(),
        };
        for _ in 0..200 {
            meadow.step();
            assert!(meadow.plane.trail.len() <= layers::AEROPLANE_TRAIL_POINTS);
        }
        assert_eq!(meadow.plane.trail.len(), layers::AEROPLANE_TRAIL_POINTS);
        // Steps pushed x = 102, 104, ..., 500; the oldest 50 were evicted.
        assert_eq!(meadow.plane.trail.front(), Some(&(202.0, 50.0)));
        assert_eq!(meadow.plane.trail.back(), Some(&(500.0, 50.0)));
    }

    #[test]
    fn test_plane_deactivates_past_the_right_edge() {
        let mut meadow = Meadow::new(4);
        meadow.resize(100, 60);
        meadow.plane = Aeroplane {
            active: true,
            x: 99.0,
            y: 10.0,
            size: 5.0,
            speed: 5.0,
            trail: VecDeque::new(),
        };
        let mut steps = 0;
        while meadow.plane.active && steps < 100 {
            meadow.step();
            steps += 1;
        }
        assert!(!meadow.plane.active);
        assert!(meadow.plane.x > 100.0);
    }

    #[test]
    fn test_resize_discards_all_prior_entities() {
        let mut meadow = Meadow::new(5);
        meadow.resize(300, 200);
        meadow.clouds[0].x = -9999.0;
        meadow.plane.active = true;

        meadow.resize(320, 220);
        assert!(meadow.clouds.iter().all(|c| c.x != -9999.0));
        assert!(!meadow.plane.active);
        assert!(meadow.plane.trail.is_empty());
    }

    #[test]
    fn test_hill_surfaces_cover_every_column() {
        let mut meadow = Meadow::new(6);
        meadow.resize(400, 300);
        assert_eq!(meadow.hills.len(), 3);
        for hill in &meadow.hills {
            assert_eq!(hill.surface.len(), 400);
            for &height in &hill.surface {
                assert!(height.is_finite());
                assert!(height > 0.0 && height < 300.0);
            }
        }
    }

    #[test]
    fn test_same_seed_same_simulation() {
        let mut a = Meadow::new(9);
        let mut b = Meadow::new(9);
        a.resize(250, 160);
        b.resize(250, 160);
        for _ in 0..100 {
            a.step();
            b.step();
        }
        assert_eq!(a.clouds.len(), b.clouds.len());
        for (ca, cb) in a.clouds.iter().zip(&b.clouds) {
            assert_eq!(ca.x, cb.x);
            assert_eq!(ca.y, cb.y);
        }
        assert_eq!(a.plane.active, b.plane.active);
    }

    #[test]
    fn test_draw_covers_the_surface() {
        let mut meadow = Meadow::new(7);
        meadow.resize(60, 40);
        for _ in 0..3 {
            meadow.step();
        }
        let mut canvas = Canvas::new(60, 40);
        meadow.draw(&mut canvas);
        // Sky gradient at the top, grassland at the bottom.
        assert!(canvas.pixel(30, 0) != Rgb::BLACK);
        assert!(canvas.pixel(30, 39) != Rgb::BLACK);
    }

    #[test]
    fn test_clouds_draw_in_front_of_the_hills() {
        let mut meadow = Meadow::new(10);
        meadow.resize(200, 100);
        // Park one puff deep in the hill band.
        meadow.clouds = vec![Cloud {
            x: 100.0,
            y: 92.0,
            size: 30.0,
            speed: 0.0,
            puffs: vec![Puff {
                dx: 0.0,
                dy: 0.0,
                radius: 6.0,
            }],
        }];

        let mut with_cloud = Canvas::new(200, 100);
        meadow.draw(&mut with_cloud);
        meadow.clouds.clear();
        let mut hills_only = Canvas::new(200, 100);
        meadow.draw(&mut hills_only);

        // The puff lightens the grassland instead of vanishing behind it.
        let lit = with_cloud.pixel(100, 92);
        let dark = hills_only.pixel(100, 92);
        assert!(lit.r - dark.r > 40.0);
    }
}
