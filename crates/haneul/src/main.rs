use std::time::Duration;

use chrono::{Local, Timelike};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use haneul_config::Config;
use haneul_core::{AnimationSpeed, SceneKind, Theme};
use haneul_scene::SceneState;
use ratatui::{DefaultTerminal, Frame, layout::Rect, style::Stylize, text::Line};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let config = Config::load()?;
    let terminal = ratatui::init();
    let result = App::new(config).run(terminal);
    ratatui::restore();
    result
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    /// Theme preference deciding which scene mounts.
    theme: Theme,
    /// Tick interval preference.
    speed: AnimationSpeed,
    /// Scene simulation state.
    scenes: SceneState,
    /// Is the simulation paused?
    paused: bool,
    /// Show the bottom help line?
    show_help: bool,
}

impl App {
    /// Construct a new instance of [`App`] from loaded settings.
    pub fn new(config: Config) -> Self {
        Self {
            running: false,
            theme: config.theme,
            speed: config.speed,
            scenes: SceneState::new(config.seed),
            paused: false,
            show_help: config.show_help,
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        while self.running {
            terminal.draw(|frame| self.render(frame))?;
            self.handle_crossterm_events()?;
        }
        Ok(())
    }

    /// Renders the user interface.
    fn render(&mut self, frame: &mut Frame) {
        let kind = self.theme.scene_for_hour(Local::now().hour());
        self.scenes.render(frame, kind, self.paused);

        if self.show_help {
            self.render_help(frame, kind);
        }
    }

    /// Render the one-line key help over the bottom row.
    fn render_help(&self, frame: &mut Frame, kind: SceneKind) {
        let area = frame.area();
        if area.height == 0 {
            return;
        }

        let mut spans = vec![
            "q".bold().white(),
            " quit  ".dark_gray(),
            "t".bold().white(),
            format!(" theme {} ({})  ", self.theme.label(), kind.label()).dark_gray(),
            "s".bold().white(),
            format!(" speed {}  ", self.speed.label()).dark_gray(),
            "space".bold().white(),
            " pause  ".dark_gray(),
            "r".bold().white(),
            " reseed  ".dark_gray(),
            "h".bold().white(),
            " help".dark_gray(),
        ];
        if self.paused {
            spans.push("  paused".yellow());
        }

        let help = Line::from(spans).centered();
        let bottom = Rect::new(area.x, area.y + area.height - 1, area.width, 1);
        frame.render_widget(help, bottom);
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Polling with the tick-interval timeout drives the animation.
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        if event::poll(Duration::from_millis(self.speed.tick_ms()))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Mouse(_) => {}
                // The next render sees the new frame area and regenerates.
                Event::Resize(_, _) => {}
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char('t')) => self.theme = self.theme.next(),
            (_, KeyCode::Char('s')) => self.speed = self.speed.next(),
            (_, KeyCode::Char(' ')) => self.paused = !self.paused,
            // Always a fresh sky, even when the config pins a startup seed.
            (_, KeyCode::Char('r')) => self.scenes.reseed(None),
            (_, KeyCode::Char('h')) => self.show_help = !self.show_help,
            _ => {}
        }
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}
