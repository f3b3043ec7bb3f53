//! Shared color tables and gradient stops for both scenes.

use haneul_canvas::Rgb;

/// Daytime sky gradient, top to bottom.
pub const SKY_STOPS: [(f32, Rgb); 3] = [
    (0.0, Rgb::hex(0x87CEEB)),  // Sky blue
    (0.6, Rgb::hex(0xB0E0E6)),  // Powder blue
    (1.0, Rgb::hex(0xE0F2FE)),  // Pale horizon
];

/// Night sky gradient, top to bottom.
pub const COSMOS_STOPS: [(f32, Rgb); 3] = [
    (0.0, Rgb::hex(0x0B1026)),
    (0.55, Rgb::hex(0x070D1F)),
    (1.0, Rgb::hex(0x02040C)),
];

/// Ambient night glow, upper right.
pub const GLOW_BLUE: Rgb = Rgb::hex(0x1E40AF);
/// Ambient night glow, lower left.
pub const GLOW_EMERALD: Rgb = Rgb::hex(0x10B981);

/// Star tints: white, ice blue, warm amber, pale violet.
pub const STAR_COLORS: [Rgb; 4] = [
    Rgb::hex(0xFFFFFF),
    Rgb::hex(0xCFE4FF),
    Rgb::hex(0xFFE9C4),
    Rgb::hex(0xE8DFFF),
];

/// Nebula tints: violet, indigo, teal.
pub const NEBULA_COLORS: [Rgb; 3] = [
    Rgb::hex(0x6D28D9),
    Rgb::hex(0x4338CA),
    Rgb::hex(0x0F766E),
];

/// Planet tints: dusty rose, sand, slate blue.
pub const PLANET_COLORS: [Rgb; 3] = [
    Rgb::hex(0xC4848C),
    Rgb::hex(0xD6B88A),
    Rgb::hex(0x8D9DB6),
];

/// Faint blue-grey of drifting dust.
pub const DUST_COLOR: Rgb = Rgb::hex(0xBFD3E6);

/// Meteor streak color.
pub const METEOR_COLOR: Rgb = Rgb::hex(0xF4F7FF);

/// Cloud puff color.
pub const CLOUD_COLOR: Rgb = Rgb::hex(0xFFFFFF);

/// Aeroplane fuselage.
pub const PLANE_BODY: Rgb = Rgb::hex(0xE0E0E0);
/// Aeroplane tail fin.
pub const PLANE_TRIM: Rgb = Rgb::hex(0xA0A0A0);
/// Contrail color.
pub const CONTRAIL_COLOR: Rgb = Rgb::hex(0xFFFFFF);

/// Pick a palette entry with the scene RNG.
pub(crate) fn pick(rng: &mut fastrand::Rng, palette: &[Rgb]) -> Rgb {
    palette[rng.usize(..palette.len())]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_stays_in_palette() {
        let mut rng = fastrand::Rng::with_seed(5);
        for _ in 0..50 {
            let color = pick(&mut rng, &STAR_COLORS);
            assert!(STAR_COLORS.contains(&color));
        }
    }

    #[test]
    fn test_gradient_stops_ascend() {
        for stops in [&SKY_STOPS, &COSMOS_STOPS] {
            assert!(stops.windows(2).all(|pair| pair[0].0 < pair[1].0));
        }
    }
}
