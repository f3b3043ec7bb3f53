//! Layer configuration tables for both scenes.
//!
//! All values are given for a 1920x1080 reference surface. Pool counts scale
//! with the area ratio (clamped to each layer's minimum) and linear values
//! (radii, sizes, speeds, lengths, amplitudes) scale with its square root,
//! so a scene reads the same on a 200-pixel terminal as on the reference.
//! Probabilities, step counts and angles are dimensionless and never scale.

use haneul_canvas::Rgb;

/// Reference surface width in pixels.
pub const REFERENCE_WIDTH: f32 = 1920.0;
/// Reference surface height in pixels.
pub const REFERENCE_HEIGHT: f32 = 1080.0;

/// Linear scale factor for a surface, against the reference.
pub fn scale_factor(width: f32, height: f32) -> f32 {
    ((width * height) / (REFERENCE_WIDTH * REFERENCE_HEIGHT)).sqrt()
}

/// Pool sizing for one entity layer.
#[derive(Debug, Clone, Copy)]
pub struct LayerCount {
    /// Entity count at the reference surface.
    pub base: u32,
    /// Lower bound regardless of surface size.
    pub min: u32,
}

impl LayerCount {
    /// Entity count for a surface, scaled by area against the reference.
    pub fn scaled(self, width: f32, height: f32) -> usize {
        let ratio = (width * height) / (REFERENCE_WIDTH * REFERENCE_HEIGHT);
        let count = (self.base as f32 * ratio).round() as u32;
        count.max(self.min) as usize
    }
}

// Cosmos.

/// Star pool sizing.
pub const STARS: LayerCount = LayerCount { base: 1200, min: 24 };
/// Star radius at the reference surface; each star varies it by 0.75..1.25.
pub const STAR_BASE_RADIUS: f32 = 1.1;
/// Star drift speed range.
pub const STAR_SPEED: (f32, f32) = (0.01, 0.06);
/// Star twinkle angular speed range, radians per step.
pub const STAR_TWINKLE_SPEED: (f32, f32) = (0.01, 0.035);

/// Dust pool sizing.
pub const DUST: LayerCount = LayerCount { base: 150, min: 12 };
/// Dust mote radius range.
pub const DUST_RADIUS: (f32, f32) = (0.4, 1.2);
/// Dust drift speed range.
pub const DUST_SPEED: (f32, f32) = (0.02, 0.10);
/// Dust opacity range.
pub const DUST_ALPHA: (f32, f32) = (0.05, 0.22);

/// Nebula pool sizing.
pub const NEBULAS: LayerCount = LayerCount { base: 6, min: 2 };
/// Nebula radius range.
pub const NEBULA_RADIUS: (f32, f32) = (120.0, 260.0);
/// Nebula drift speed range.
pub const NEBULA_SPEED: (f32, f32) = (0.005, 0.02);
/// Nebula opacity range.
pub const NEBULA_ALPHA: (f32, f32) = (0.05, 0.11);

/// Planet pool sizing.
pub const PLANETS: LayerCount = LayerCount { base: 3, min: 1 };
/// Planet radius range.
pub const PLANET_RADIUS: (f32, f32) = (9.0, 22.0);
/// Planet drift speed range.
pub const PLANET_SPEED: (f32, f32) = (0.01, 0.03);

/// Meteor spawn probability per step.
pub const METEOR_CHANCE: f32 = 0.025;
/// Meteor speed range.
pub const METEOR_SPEED: (f32, f32) = (7.0, 13.0);
/// Meteor tail length range.
pub const METEOR_LENGTH: (f32, f32) = (60.0, 140.0);
/// Meteor lifetime range in steps.
pub const METEOR_LIFE: (u32, u32) = (40, 70);
/// Meteor heading range in radians (down and to the left).
pub const METEOR_ANGLE: (f32, f32) = (1.95, 2.45);

/// Smallest radius stars, dust and meteor heads are drawn at. The scale
/// rule takes their stored radii far below one pixel on terminal-sized
/// surfaces; only drawing clamps.
pub const MIN_DOT_RADIUS: f32 = 0.4;

// Meadow.

/// One drifting cloud layer.
#[derive(Debug, Clone, Copy)]
pub struct CloudLayer {
    /// Pool sizing for this layer.
    pub count: LayerCount,
    /// Horizontal drift speed at the reference surface.
    pub speed: f32,
    /// Characteristic puff-cluster size at the reference surface.
    pub base_size: f32,
}

/// Cloud layers, far to near.
pub const CLOUD_LAYERS: [CloudLayer; 3] = [
    CloudLayer {
        count: LayerCount { base: 12, min: 2 },
        speed: 0.10,
        base_size: 150.0,
    },
    CloudLayer {
        count: LayerCount { base: 8, min: 2 },
        speed: 0.20,
        base_size: 250.0,
    },
    CloudLayer {
        count: LayerCount { base: 5, min: 2 },
        speed: 0.35,
        base_size: 400.0,
    },
];

/// One static grassland silhouette.
#[derive(Debug, Clone, Copy)]
pub struct HillLayer {
    /// Fill color.
    pub color: Rgb,
    /// Fill opacity.
    pub alpha: f32,
    /// Baseline as a fraction of surface height.
    pub baseline: f32,
    /// Peak height above the baseline at the reference surface.
    pub amplitude: f32,
    /// Control point count for the silhouette curve.
    pub points: usize,
}

/// Grassland layers, far to near.
pub const HILL_LAYERS: [HillLayer; 3] = [
    HillLayer {
        color: Rgb::hex(0x22C55E),
        alpha: 0.40,
        baseline: 0.85,
        amplitude: 80.0,
        points: 5,
    },
    HillLayer {
        color: Rgb::hex(0x16A34A),
        alpha: 0.60,
        baseline: 0.90,
        amplitude: 100.0,
        points: 7,
    },
    HillLayer {
        color: Rgb::hex(0x15803D),
        alpha: 0.80,
        baseline: 0.95,
        amplitude: 120.0,
        points: 10,
    },
];

/// Aeroplane spawn probability per step.
pub const AEROPLANE_CHANCE: f32 = 0.001;
/// Aeroplane speed at the reference surface.
pub const AEROPLANE_SPEED: f32 = 3.0;
/// Aeroplane body size at the reference surface.
pub const AEROPLANE_SIZE: f32 = 25.0;
/// Contrail capacity in points (a FIFO; oldest point drops first).
pub const AEROPLANE_TRAIL_POINTS: usize = 150;
/// Contrail length in reference pixels, used for the exit test.
pub const AEROPLANE_TRAIL_LENGTH: f32 = 150.0;
