//! The two scene animators.

pub mod cosmos;
pub mod meadow;

/// Uniform sample in `lo..hi`.
pub(crate) fn rand_range(rng: &mut fastrand::Rng, lo: f32, hi: f32) -> f32 {
    lo + (hi - lo) * rng.f32()
}

/// Advance past the wrap margin (twice the radius beyond an edge) and the
/// position teleports to the opposite margin. Tiling, never bouncing.
pub(crate) fn wrap_axis(pos: &mut f32, extent: f32, radius: f32) {
    let margin = radius * 2.0;
    if *pos < -margin {
        *pos = extent + margin;
    } else if *pos > extent + margin {
        *pos = -margin;
    }
}
