//! Core application state and logic for the maze game.

use std::time::{Duration, Instant};

use color_eyre::eyre::Result;
use rand::rngs::StdRng;
use ratatui::DefaultTerminal;
use tracing::info;

use crate::{
    events, generator,
    level::Level,
    session::Session,
    types::{MazeSize, PlayerSpeed, Screen, TitleItem},
    ui,
};

/// Time the title menu highlight rests on an item before moving to the next one.
pub(crate) const TITLE_CYCLE_INTERVAL: Duration = Duration::from_secs(1);

/// Application state container for the maze game.
///
/// This structure holds the state of the application, which is to say the structure from which
/// Ratatui will render the game and Crossterm events will help writing to.
pub struct App {
    /// Application exit flag.
    ///
    /// This field indicates whether the application should exit. It is set to `true` when the user
    /// wants to quit the game but it starts off `false`.
    pub(crate) exit: bool,
    /// Current screen being displayed to the user.
    pub(crate) screen: Screen,
    /// Rotation speed of the player's facing.
    pub(crate) speed: PlayerSpeed,
    /// Dimensions used when a maze is generated.
    pub(crate) size: MazeSize,
    /// Playable levels, the built-in one first.
    pub(crate) levels: Vec<Level>,
    /// Which level the next session plays, or `None` for a freshly generated maze.
    pub(crate) selected_level: Option<usize>,
    /// Session being played, present while on the maze screen.
    pub(crate) session: Option<Session>,
    /// Randomness source for maze generation.
    pub(crate) rng: StdRng,
    /// Time of the last automatic move, either a turn of the player or a step of the title menu
    /// highlight.
    pub(crate) last_rotation: Instant,
}

impl App {
    /// Creates a new application on the title screen.
    ///
    /// `levels` are listed after the built-in level. Mazes are generated from `rng`, so a seeded
    /// generator replays the same sequence of mazes.
    pub(crate) fn new(speed: PlayerSpeed, size: MazeSize, levels: Vec<Level>, rng: StdRng) -> Self {
        let mut all_levels = vec![Level::default()];
        all_levels.extend(levels);

        Self {
            exit: false,
            screen: Screen::Title(TitleItem::Start),
            speed,
            size,
            levels: all_levels,
            selected_level: None,
            session: None,
            rng,
            last_rotation: Instant::now(),
        }
    }

    /// Runs the main loop of the application.
    ///
    /// This function handles user input and updates the application state. The loop continues until
    /// the exit condition is `true`, after which the function returns to the call site.
    ///
    /// # Errors
    ///
    /// - [`std::io::Error`]
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        while !self.exit {
            let _ = terminal.try_draw(|frame| {
                ui::draw(self, frame).map_err(std::io::Error::other)
            })?;
            events::handle_events(self)?;
            self.tick(Instant::now());
        }

        Ok(())
    }

    /// Name of the level the next session plays.
    pub(crate) fn level_label(&self) -> &str {
        self.selected_level
            .and_then(|idx| self.levels.get(idx))
            .map_or("Generated", |level| level.name.as_str())
    }

    /// Moves the level selection to the next entry, wrapping back to a generated maze.
    pub(crate) fn cycle_level(&mut self) {
        self.selected_level = match self.selected_level {
            None if !self.levels.is_empty() => Some(0),
            Some(idx) if idx + 1 < self.levels.len() => Some(idx + 1),
            _ => None,
        };
    }

    /// Starts a session on the selected level, or on a newly generated maze.
    pub(crate) fn start_session(&mut self) {
        let session = match self.selected_level.and_then(|idx| self.levels.get(idx)) {
            Some(level) => {
                info!(level = %level.name, "starting level");
                Session::new(level.maze.clone(), level.start)
            }
            None => {
                let (width, height) = self.size.dimensions();
                let generated = generator::generate(width, height, &mut self.rng);
                info!(width, height, "starting generated maze");
                Session::new(generated.maze, generated.start)
            }
        };

        self.session = Some(session);
        self.screen = Screen::Maze;
        self.last_rotation = Instant::now();
    }

    /// Leaves the current session and goes back to the title screen.
    pub(crate) fn leave_session(&mut self) {
        self.session = None;
        self.screen = Screen::Title(TitleItem::Start);
        self.last_rotation = Instant::now();
    }

    /// Applies the timed half of the one-button controls.
    ///
    /// On the title screen the highlight moves to the next item every [`TITLE_CYCLE_INTERVAL`],
    /// wrapping around, so the button alone can reach every item. In a maze the player turns once
    /// per rotation interval of the current speed. The about screen has nothing timed.
    pub(crate) fn tick(&mut self, now: Instant) {
        let elapsed = now.saturating_duration_since(self.last_rotation);

        match self.screen {
            Screen::Title(item) if elapsed >= TITLE_CYCLE_INTERVAL => {
                self.screen = Screen::Title(item.wrapping_next());
                self.last_rotation = now;
            }
            Screen::Maze if elapsed >= self.speed.rotation_interval() => {
                if let Some(session) = self.session.as_mut() {
                    session.rotate();
                    self.last_rotation = now;
                }
            }
            Screen::Title(_) | Screen::Maze | Screen::About => {}
        }
    }
}
