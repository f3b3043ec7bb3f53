//! Animated ambient scenes for the haneul terminal app.
//!
//! Two scene animators share one lifecycle: pools sized to the surface at
//! init, one `step` per tick (movement with edge wrapping, probabilistic
//! transient spawns, lifetime culling), and a fixed back-to-front `draw`
//! onto a half-block pixel canvas. Resizing discards and regenerates all
//! entity state.

mod layers;
mod palette;
mod scenes;
mod state;

pub use scenes::cosmos::Cosmos;
pub use scenes::meadow::Meadow;
pub use state::SceneState;
