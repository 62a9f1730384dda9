//! Event handling functions for user input and application state updates.

use std::time::{Duration, Instant};

use color_eyre::eyre::Result;
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEventKind};
use tracing::debug;

use crate::{
    types::{Screen, TitleItem},
    App,
};

/// Handles input events and updates the application state accordingly.
///
/// This function polls for keyboard events and dispatches them to [`handle_key`]. It uses a
/// timeout to avoid blocking the UI, so the player keeps rotating while no key is pressed.
pub(crate) fn handle_events(app: &mut App) -> Result<()> {
    if event::poll(Duration::from_millis(100))? {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                handle_key(app, key.code);
            }
        }
    }

    Ok(())
}

/// Applies a single key press to the application.
///
/// Any key on the title screen restarts the highlight timer, so the highlight never moves right
/// after the player acted on it.
pub(crate) fn handle_key(app: &mut App, code: KeyCode) {
    if matches!(app.screen, Screen::Title(_)) {
        app.last_rotation = Instant::now();
    }

    match code {
        KeyCode::Char('q') => app.exit = true,
        KeyCode::Char('j') | KeyCode::Down => handle_down(app),
        KeyCode::Char('k') | KeyCode::Up => handle_up(app),
        KeyCode::Char('l' | ' ') | KeyCode::Enter => handle_select(app),
        KeyCode::Char('h') | KeyCode::Esc => handle_back(app),
        _ => {}
    }
}

/// Moves the title menu cursor down.
pub(crate) fn handle_down(app: &mut App) {
    if let Screen::Title(item) = app.screen {
        app.screen = Screen::Title(item.next());
    }
}

/// Moves the title menu cursor up.
pub(crate) fn handle_up(app: &mut App) {
    if let Screen::Title(item) = app.screen {
        app.screen = Screen::Title(item.previous());
    }
}

/// Handles the one button of the game.
///
/// On the title screen it activates or cycles the highlighted item. In a maze it moves the player
/// one cell in the direction they currently face.
pub(crate) fn handle_select(app: &mut App) {
    match app.screen {
        Screen::Title(TitleItem::Start) => app.start_session(),
        Screen::Title(TitleItem::Speed) => app.speed = app.speed.cycle(),
        Screen::Title(TitleItem::Size) => app.size = app.size.cycle(),
        Screen::Title(TitleItem::Level) => app.cycle_level(),
        Screen::Title(TitleItem::About) => app.screen = Screen::About,
        Screen::Title(TitleItem::Quit) => app.exit = true,
        Screen::Maze => {
            if let Some(session) = app.session.as_mut() {
                let step = session.advance();
                debug!(?step, player = %session.player, "player stepped");
            }
        }
        Screen::About => {}
    }
}

/// Returns to the title screen from the maze and about screens.
pub(crate) fn handle_back(app: &mut App) {
    match app.screen {
        Screen::Maze => app.leave_session(),
        Screen::About => app.screen = Screen::Title(TitleItem::About),
        Screen::Title(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng as _};

    use super::*;
    use crate::{
        direction::{Direction, Position},
        types::{MazeSize, PlayerSpeed},
    };

    /// Creates an app with a fixed seed and no extra levels.
    fn create_test_app() -> App {
        App::new(
            PlayerSpeed::Low,
            MazeSize::Small,
            Vec::new(),
            StdRng::seed_from_u64(7),
        )
    }

    #[test]
    fn test_q_quits_from_any_screen() {
        for screen in [Screen::Title(TitleItem::Size), Screen::Maze, Screen::About] {
            let mut app = create_test_app();
            app.screen = screen;
            handle_key(&mut app, KeyCode::Char('q'));
            assert!(app.exit);
        }
    }

    #[test]
    fn test_title_navigation() {
        let mut app = create_test_app();

        handle_key(&mut app, KeyCode::Char('j'));
        assert_eq!(app.screen, Screen::Title(TitleItem::Speed));
        handle_key(&mut app, KeyCode::Down);
        assert_eq!(app.screen, Screen::Title(TitleItem::Size));
        handle_key(&mut app, KeyCode::Char('k'));
        assert_eq!(app.screen, Screen::Title(TitleItem::Speed));
        handle_key(&mut app, KeyCode::Up);
        handle_key(&mut app, KeyCode::Up);
        assert_eq!(app.screen, Screen::Title(TitleItem::Start));
    }

    #[test]
    fn test_select_cycles_settings() {
        let mut app = create_test_app();

        app.screen = Screen::Title(TitleItem::Speed);
        handle_key(&mut app, KeyCode::Char('l'));
        assert_eq!(app.speed, PlayerSpeed::Medium);

        app.screen = Screen::Title(TitleItem::Size);
        handle_key(&mut app, KeyCode::Enter);
        assert_eq!(app.size, MazeSize::Medium);

        app.screen = Screen::Title(TitleItem::Level);
        handle_key(&mut app, KeyCode::Char(' '));
        assert_eq!(app.selected_level, Some(0));
    }

    #[test]
    fn test_about_round_trip() {
        let mut app = create_test_app();
        app.screen = Screen::Title(TitleItem::About);

        handle_key(&mut app, KeyCode::Char('l'));
        assert_eq!(app.screen, Screen::About);
        handle_key(&mut app, KeyCode::Char('l'));
        assert_eq!(app.screen, Screen::About);
        handle_key(&mut app, KeyCode::Esc);
        assert_eq!(app.screen, Screen::Title(TitleItem::About));
    }

    #[test]
    fn test_select_alone_reaches_every_title_item() {
        let mut app = create_test_app();

        let mut now = app.last_rotation;
        while app.screen != Screen::Title(TitleItem::Size) {
            now += crate::app::TITLE_CYCLE_INTERVAL;
            app.tick(now);
        }
        handle_key(&mut app, KeyCode::Char(' '));
        assert_eq!(app.size, MazeSize::Medium);

        let pressed = app.last_rotation;
        app.tick(pressed + Duration::from_millis(500));
        assert_eq!(app.screen, Screen::Title(TitleItem::Size));
    }

    #[test]
    fn test_quit_item_exits() {
        let mut app = create_test_app();
        app.screen = Screen::Title(TitleItem::Quit);

        handle_key(&mut app, KeyCode::Enter);
        assert!(app.exit);
    }

    #[test]
    fn test_playing_the_default_level_to_the_exit() {
        let mut app = create_test_app();
        app.screen = Screen::Title(TitleItem::Level);
        handle_key(&mut app, KeyCode::Char('l'));
        app.screen = Screen::Title(TitleItem::Start);
        handle_key(&mut app, KeyCode::Char('l'));
        assert_eq!(app.screen, Screen::Maze);

        let turn_to = |app: &mut App, direction: Direction| {
            while app.session.as_ref().map(|session| session.facing) != Some(direction) {
                if let Some(session) = app.session.as_mut() {
                    session.rotate();
                }
            }
        };

        turn_to(&mut app, Direction::South);
        handle_key(&mut app, KeyCode::Char('l'));
        turn_to(&mut app, Direction::East);
        handle_key(&mut app, KeyCode::Char('l'));
        handle_key(&mut app, KeyCode::Char('l'));
        turn_to(&mut app, Direction::North);
        handle_key(&mut app, KeyCode::Char('l'));
        turn_to(&mut app, Direction::East);
        handle_key(&mut app, KeyCode::Char('l'));

        let session = app.session.as_ref().expect("session should be running");
        assert!(session.has_won());
        assert_eq!(session.display_position(), Position::new(3, 0));
    }

    #[test]
    fn test_back_from_maze_ends_session() {
        let mut app = create_test_app();
        handle_key(&mut app, KeyCode::Enter);
        assert_eq!(app.screen, Screen::Maze);

        handle_key(&mut app, KeyCode::Char('h'));
        assert_eq!(app.screen, Screen::Title(TitleItem::Start));
        assert!(app.session.is_none());
    }
}
