//! Scene simulation state shared with the terminal host.

use haneul_canvas::Canvas;
use haneul_core::SceneKind;
use ratatui::{Frame, widgets::Paragraph};

use crate::scenes::{cosmos::Cosmos, meadow::Meadow};

/// Both scene animators plus the pixel surface they draw into.
///
/// The host only ever talks to this type: it picks the scene, and pools
/// regenerate automatically whenever the frame area changes.
#[derive(Debug)]
pub struct SceneState {
    cosmos: Cosmos,
    meadow: Meadow,
    canvas: Canvas,
    /// Last known terminal width.
    last_width: u16,
    /// Last known terminal height.
    last_height: u16,
}

impl Default for SceneState {
    fn default() -> Self {
        Self::new(None)
    }
}

impl SceneState {
    /// Create scene state. `None` seeds from the system clock; a fixed seed
    /// makes every run identical.
    pub fn new(seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(clock_seed);
        Self {
            cosmos: Cosmos::new(seed),
            // Distinct stream per scene.
            meadow: Meadow::new(seed ^ 0x9E37_79B9_7F4A_7C15),
            canvas: Canvas::new(0, 0),
            last_width: 0,
            last_height: 0,
        }
    }

    /// Replace both animators and force a rebuild on the next render.
    pub fn reseed(&mut self, seed: Option<u64>) {
        *self = Self::new(seed);
    }

    /// Step (unless paused) and draw the selected scene into `frame`.
    ///
    /// Pools regenerate when the frame area changed since the last call.
    /// A zero-area frame is a silent no-op.
    pub fn render(&mut self, frame: &mut Frame, kind: SceneKind, paused: bool) {
        let area = frame.area();
        if area.width == 0 || area.height == 0 {
            return;
        }

        if area.width != self.last_width || area.height != self.last_height {
            self.last_width = area.width;
            self.last_height = area.height;
            // Two pixels per cell row with half-blocks.
            let pixel_width = area.width as u32;
            let pixel_height = area.height as u32 * 2;
            self.canvas.resize(pixel_width, pixel_height);
            self.cosmos.resize(pixel_width, pixel_height);
            self.meadow.resize(pixel_width, pixel_height);
        }

        match kind {
            SceneKind::Cosmos => {
                if !paused {
                    self.cosmos.step();
                }
                self.cosmos.draw(&mut self.canvas);
            }
            SceneKind::Meadow => {
                if !paused {
                    self.meadow.step();
                }
                self.meadow.draw(&mut self.canvas);
            }
        }

        frame.render_widget(Paragraph::new(self.canvas.to_lines()), area);
    }
}

/// Seed captured from the system clock.
fn clock_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend};

    #[test]
    fn test_render_paints_half_blocks() {
        let mut state = SceneState::new(Some(42));
        let mut terminal = Terminal::new(TestBackend::new(20, 10)).unwrap();
        terminal
            .draw(|frame| state.render(frame, SceneKind::Cosmos, false))
            .unwrap();
        let cell = terminal.backend().buffer().cell((0, 0)).unwrap();
        assert_eq!(cell.symbol(), "▀");
    }

    #[test]
    fn test_zero_area_frame_is_a_noop() {
        let mut state = SceneState::new(Some(42));
        let mut terminal = Terminal::new(TestBackend::new(0, 0)).unwrap();
        terminal
            .draw(|frame| state.render(frame, SceneKind::Meadow, false))
            .unwrap();
    }

    #[test]
    fn test_survives_resize_between_draws() {
        let mut state = SceneState::new(Some(42));
        let mut terminal = Terminal::new(TestBackend::new(20, 10)).unwrap();
        terminal
            .draw(|frame| state.render(frame, SceneKind::Meadow, false))
            .unwrap();
        terminal.backend_mut().resize(31, 13);
        terminal
            .draw(|frame| state.render(frame, SceneKind::Meadow, false))
            .unwrap();
        terminal
            .draw(|frame| state.render(frame, SceneKind::Cosmos, false))
            .unwrap();
    }
}
