//! Pixel drawing surface rendered with half-block glyphs.
//!
//! The canvas is an RGB float buffer twice as tall as the terminal area in
//! cells. `to_lines` folds each vertical pixel pair into one `▀` span, with
//! the foreground color carrying the upper pixel and the background the
//! lower, so every terminal cell shows two roughly square pixels.

use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
};

/// Solid RGB color with float channels in 0.0..=255.0.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Color from a packed `0xRRGGBB` value.
    pub const fn hex(value: u32) -> Self {
        Self {
            r: ((value >> 16) & 0xFF) as f32,
            g: ((value >> 8) & 0xFF) as f32,
            b: (value & 0xFF) as f32,
        }
    }

    /// Linear interpolation toward `other` at `t` in 0..=1.
    pub fn lerp(self, other: Rgb, t: f32) -> Rgb {
        Rgb {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
        }
    }

    fn to_color(self) -> Color {
        Color::Rgb(
            self.r.clamp(0.0, 255.0) as u8,
            self.g.clamp(0.0, 255.0) as u8,
            self.b.clamp(0.0, 255.0) as u8,
        )
    }
}

/// An RGB pixel buffer mapped onto terminal cells as stacked half-blocks.
#[derive(Debug, Clone)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<Rgb>,
}

impl Canvas {
    /// Create a black canvas. Either dimension may be zero.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgb::BLACK; (width * height) as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Resize the buffer and clear it to black.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels.resize((width * height) as usize, Rgb::BLACK);
    }

    /// The pixel at (x, y). Out-of-bounds reads return black.
    pub fn pixel(&self, x: u32, y: u32) -> Rgb {
        if x < self.width && y < self.height {
            self.pixels[(y * self.width + x) as usize]
        } else {
            Rgb::BLACK
        }
    }

    /// Blend `color` over the pixel at (x, y) with `alpha` coverage.
    /// Out-of-bounds writes are dropped.
    pub fn blend_px(&mut self, x: i32, y: i32, color: Rgb, alpha: f32) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let alpha = alpha.clamp(0.0, 1.0);
        let idx = (y as u32 * self.width + x as u32) as usize;
        let base = self.pixels[idx];
        self.pixels[idx] = base.lerp(color, alpha);
    }

    /// Additively brighten the pixel at (x, y), saturating at white.
    pub fn add_px(&mut self, x: i32, y: i32, color: Rgb, alpha: f32) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let alpha = alpha.clamp(0.0, 1.0);
        let idx = (y as u32 * self.width + x as u32) as usize;
        let base = self.pixels[idx];
        self.pixels[idx] = Rgb {
            r: (base.r + color.r * alpha).min(255.0),
            g: (base.g + color.g * alpha).min(255.0),
            b: (base.b + color.b * alpha).min(255.0),
        };
    }

    /// Fill every pixel with one color.
    pub fn fill(&mut self, color: Rgb) {
        self.pixels.fill(color);
    }

    /// Vertical gradient through `stops`, pairs of (offset in 0..=1, color)
    /// sorted by offset. Rows above the first stop take its color, rows below
    /// the last take the last's.
    pub fn fill_vertical_gradient(&mut self, stops: &[(f32, Rgb)]) {
        let Some(&(first_offset, first_color)) = stops.first() else {
            return;
        };
        let (last_offset, last_color) = stops[stops.len() - 1];

        for y in 0..self.height {
            let t = if self.height > 1 {
                y as f32 / (self.height - 1) as f32
            } else {
                0.0
            };
            let color = if t <= first_offset {
                first_color
            } else if t >= last_offset {
                last_color
            } else {
                let mut color = last_color;
                for pair in stops.windows(2) {
                    let (o0, c0) = pair[0];
                    let (o1, c1) = pair[1];
                    if t >= o0 && t <= o1 {
                        let span = (o1 - o0).max(f32::EPSILON);
                        color = c0.lerp(c1, (t - o0) / span);
                        break;
                    }
                }
                color
            };
            let row = (y * self.width) as usize;
            self.pixels[row..row + self.width as usize].fill(color);
        }
    }

    /// Additive glow fading from `alpha` at the center to zero at `radius`.
    pub fn radial_glow(&mut self, cx: f32, cy: f32, radius: f32, color: Rgb, alpha: f32) {
        if radius <= 0.0 {
            return;
        }
        let x0 = (cx - radius).floor() as i32;
        let x1 = (cx + radius).ceil() as i32;
        let y0 = (cy - radius).floor() as i32;
        let y1 = (cy + radius).ceil() as i32;
        for y in y0..=y1 {
            for x in x0..=x1 {
                let dx = x as f32 - cx;
                let dy = y as f32 - cy;
                let t = (dx * dx + dy * dy).sqrt() / radius;
                if t < 1.0 {
                    let falloff = (1.0 - t) * (1.0 - t);
                    self.add_px(x, y, color, alpha * falloff);
                }
            }
        }
    }

    /// Filled circle with a one-pixel soft edge. Radii at half a pixel or
    /// below degrade to a single pixel with area-proportional alpha, so
    /// far-away entities still register instead of vanishing.
    pub fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Rgb, alpha: f32) {
        if radius <= 0.0 {
            return;
        }
        if radius <= 0.5 {
            let coverage = (radius * 2.0) * (radius * 2.0);
            self.blend_px(
                cx.round() as i32,
                cy.round() as i32,
                color,
                alpha * coverage,
            );
            return;
        }
        let x0 = (cx - radius - 1.0).floor() as i32;
        let x1 = (cx + radius + 1.0).ceil() as i32;
        let y0 = (cy - radius - 1.0).floor() as i32;
        let y1 = (cy + radius + 1.0).ceil() as i32;
        for y in y0..=y1 {
            for x in x0..=x1 {
                let dx = x as f32 - cx;
                let dy = y as f32 - cy;
                let dist = (dx * dx + dy * dy).sqrt();
                let coverage = (radius + 0.5 - dist).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    self.blend_px(x, y, color, alpha * coverage);
                }
            }
        }
    }

    /// Straight one-pixel stroke with alpha interpolated from `alpha_from`
    /// at the start point to `alpha_to` at the end point.
    pub fn stroke_fade(
        &mut self,
        x0: f32,
        y0: f32,
        x1: f32,
        y1: f32,
        color: Rgb,
        alpha_from: f32,
        alpha_to: f32,
    ) {
        let steps = (x1 - x0).abs().max((y1 - y0).abs()).ceil().max(1.0) as u32;
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            let x = x0 + (x1 - x0) * t;
            let y = y0 + (y1 - y0) * t;
            let alpha = alpha_from + (alpha_to - alpha_from) * t;
            self.blend_px(x.round() as i32, y.round() as i32, color, alpha);
        }
    }

    /// Filled triangle (any winding).
    pub fn fill_triangle(&mut self, pts: [(f32, f32); 3], color: Rgb, alpha: f32) {
        let [a, b, c] = pts;
        let area2 = cross(a, b, c);
        if area2.abs() < f32::EPSILON {
            return;
        }
        let sign = area2.signum();
        let x0 = a.0.min(b.0).min(c.0).floor() as i32;
        let x1 = a.0.max(b.0).max(c.0).ceil() as i32;
        let y0 = a.1.min(b.1).min(c.1).floor() as i32;
        let y1 = a.1.max(b.1).max(c.1).ceil() as i32;
        for y in y0..=y1 {
            for x in x0..=x1 {
                let p = (x as f32, y as f32);
                let inside = cross(a, b, p) * sign >= 0.0
                    && cross(b, c, p) * sign >= 0.0
                    && cross(c, a, p) * sign >= 0.0;
                if inside {
                    self.blend_px(x, y, color, alpha);
                }
            }
        }
    }

    /// Blend `color` from `heights[x]` down to the bottom edge, column by
    /// column, with partial coverage for the topmost pixel. Non-finite
    /// heights skip their column.
    pub fn fill_below(&mut self, heights: &[f32], color: Rgb, alpha: f32) {
        let columns = (self.width as usize).min(heights.len());
        for (x, &h) in heights.iter().enumerate().take(columns) {
            if !h.is_finite() {
                continue;
            }
            if h >= self.height as f32 {
                continue;
            }
            let top = h.max(0.0);
            let first = top.floor() as i32;
            let coverage = ((first + 1) as f32 - top).clamp(0.0, 1.0);
            self.blend_px(x as i32, first, color, alpha * coverage);
            for y in (first + 1)..self.height as i32 {
                self.blend_px(x as i32, y, color, alpha);
            }
        }
    }

    /// Fold pixel rows into `▀` spans, one `Line` per terminal row.
    pub fn to_lines(&self) -> Vec<Line<'static>> {
        let cell_rows = self.height.div_ceil(2);
        (0..cell_rows)
            .map(|row| {
                let spans: Vec<Span> = (0..self.width)
                    .map(|x| {
                        let upper = self.pixel(x, row * 2);
                        let lower = self.pixel(x, row * 2 + 1);
                        Span::styled(
                            "▀",
                            Style::new().fg(upper.to_color()).bg(lower.to_color()),
                        )
                    })
                    .collect();
                Line::from(spans)
            })
            .collect()
    }
}

fn cross(a: (f32, f32), b: (f32, f32), p: (f32, f32)) -> f32 {
    (b.0 - a.0) * (p.1 - a.1) - (b.1 - a.1) * (p.0 - a.0)
}
