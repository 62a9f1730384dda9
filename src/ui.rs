//! User interface rendering functions for all application screens.

use std::rc::Rc;

use color_eyre::eyre::{OptionExt as _, Result};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
    Frame,
};

use crate::{
    codec,
    direction::Direction,
    session::Session,
    types::{Screen, TitleItem},
    App,
};

/// Updates the application UI based on the persistent state.
///
/// This function renders different screens based on the current state stored in the [`App`]
/// structure, dispatching to the appropriate rendering function for each screen type.
///
/// # Errors
///
/// This function may return errors if the maze screen is shown without a running session.
pub(crate) fn draw(app: &App, frame: &mut Frame) -> Result<()> {
    match app.screen {
        Screen::Title(item) => title_menu(app, frame, item),
        Screen::Maze => maze_screen(app, frame)?,
        Screen::About => about(frame),
    }

    Ok(())
}

/// Clears the terminal screen by rendering a [`Clear`] widget.
pub(crate) fn clear(frame: &mut Frame) {
    frame.render_widget(Clear, frame.area());
}

/// Renders a centered, bordered menu and returns one row per item inside it.
#[expect(
    clippy::indexing_slicing,
    reason = "The collection is created in-place with few, known elements; there is no risk of bad indexing."
)]
pub(crate) fn init_menu(frame: &mut Frame, title: &str, items: u16) -> Rc<[Rect]> {
    let space = Layout::vertical([Constraint::Length(items + 2)])
        .flex(Flex::Center)
        .split(frame.area())[0];
    let layout = Layout::horizontal([Constraint::Length(36)])
        .flex(Flex::Center)
        .split(space)[0];

    let block = Block::bordered()
        .title(title)
        .title_bottom("(l) select / (j) (k) move")
        .title_alignment(Alignment::Center)
        .style(Color::Green)
        .border_type(BorderType::Rounded);

    let inner_space = block.inner(layout);

    frame.render_widget(block, layout);

    Layout::vertical(vec![Constraint::Max(1); usize::from(items)]).split(inner_space)
}

/// Renders the title screen with the game settings.
///
/// Each setting shows its current value and is cycled in place by selecting it.
pub(crate) fn title_menu(app: &App, frame: &mut Frame, selected: TitleItem) {
    clear(frame);

    let items = u16::try_from(TitleItem::ALL.len()).unwrap_or(u16::MAX);
    let rows = init_menu(frame, "Maze Game", items);

    let content_style = Style::default().fg(Color::Green);
    let active_content_style = Style::default().fg(Color::White).bg(Color::Green);

    for (item, row) in TitleItem::ALL.into_iter().zip(rows.iter()) {
        let label = match item {
            TitleItem::Start => "Start".to_owned(),
            TitleItem::Speed => format!("Player Speed: {}", app.speed),
            TitleItem::Size => format!("Maze Size: {}", app.size),
            TitleItem::Level => format!("Level: {}", app.level_label()),
            TitleItem::About => "About".to_owned(),
            TitleItem::Quit => "Quit".to_owned(),
        };
        let style = if item == selected {
            active_content_style
        } else {
            content_style
        };

        frame.render_widget(Line::styled(label, style).centered(), *row);
    }
}

/// Renders the about screen.
pub(crate) fn about(frame: &mut Frame) {
    clear(frame);

    let area = Layout::vertical([Constraint::Length(8)])
        .flex(Flex::Center)
        .split(frame.area())
        .first()
        .copied()
        .unwrap_or_default();
    let area = Layout::horizontal([Constraint::Length(64)])
        .flex(Flex::Center)
        .split(area)
        .first()
        .copied()
        .unwrap_or_default();

    let block = Block::bordered()
        .title("About Maze Game")
        .title_bottom("(h) return")
        .title_alignment(Alignment::Center)
        .style(Color::Green)
        .border_type(BorderType::Rounded);

    let text = Paragraph::new(vec![
        Line::raw("A maze you walk with a single button."),
        Line::raw(""),
        Line::raw("You turn on your own; press (l) to step the way you face."),
        Line::raw("Find the gap in the outer wall to escape."),
    ])
    .alignment(Alignment::Center)
    .block(block);

    frame.render_widget(text, area);
}

/// Renders the in-game screen with the maze, the player and the controls.
///
/// # Errors
///
/// This function may return errors if no session is running.
pub(crate) fn maze_screen(app: &App, frame: &mut Frame) -> Result<()> {
    clear(frame);

    let session = app
        .session
        .as_ref()
        .ok_or_eyre("maze screen shown without a running session")?;

    let overall_layout = Layout::vertical([Constraint::Min(1), Constraint::Length(2)])
        .split(frame.area());
    let maze_content_area = *overall_layout
        .first()
        .ok_or_eyre("failed to get maze content area from layout")?;
    let tooltip_area = *overall_layout
        .last()
        .ok_or_eyre("failed to get tooltip area from layout")?;

    let view = MazeView::new(session);
    let (view_width, view_height) = view.size();
    let maze_area = centered(maze_content_area, view_width, view_height);
    frame.render_widget(view, maze_area);

    let status = format!("Facing: {} / Speed: {}", session.facing, app.speed);
    let tooltip_block = Block::bordered()
        .title("(l) step / (h) return to menu / (q) quit")
        .title_alignment(Alignment::Center)
        .style(Style::default().fg(Color::Green))
        .border_type(BorderType::Plain)
        .borders(Borders::TOP);
    frame.render_widget(
        Paragraph::new(status)
            .alignment(Alignment::Center)
            .block(tooltip_block),
        tooltip_area,
    );

    if session.has_won() {
        let banner_area = centered(frame.area(), 20, 3);
        frame.render_widget(Clear, banner_area);
        frame.render_widget(
            Paragraph::new("YOU WON!")
                .alignment(Alignment::Center)
                .style(
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )
                .block(
                    Block::bordered()
                        .border_type(BorderType::Double)
                        .style(Color::Yellow),
                ),
            banner_area,
        );
    }

    Ok(())
}

/// Returns a `width` x `height` rectangle centered in `area`, shrunk to fit if needed.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let area = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .split(area)
        .first()
        .copied()
        .unwrap_or(area);
    Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .split(area)
        .first()
        .copied()
        .unwrap_or(area)
}

/// Blank space reserved around the maze art, in terminal cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Margins {
    /// Columns left of the maze.
    left: u8,
    /// Rows above the maze.
    top: u8,
    /// Columns right of the maze.
    right: u8,
    /// Rows below the maze.
    bottom: u8,
}

/// Widget drawing a session's maze with the same glyphs as the text format, plus the player.
///
/// The maze fills the widget while the game runs. Once the player has escaped, a strip just wide
/// enough for the arrow is added on the exit side so the player stays visible outside the walls.
pub(crate) struct MazeView<'session> {
    /// Session to draw.
    session: &'session Session,
}

impl<'session> MazeView<'session> {
    /// Wraps a session for rendering.
    pub(crate) const fn new(session: &'session Session) -> Self {
        Self { session }
    }

    /// Space needed next to the maze for the escaped player, if any.
    const fn margins(&self) -> Margins {
        let none = Margins {
            left: 0,
            top: 0,
            right: 0,
            bottom: 0,
        };
        match self.session.escaped {
            // The arrow sits in the second column of the cell block left of the border.
            Some(Direction::West) => Margins { left: 2, ..none },
            Some(Direction::North) => Margins { top: 1, ..none },
            Some(Direction::East) => Margins { right: 1, ..none },
            Some(Direction::South) => Margins { bottom: 1, ..none },
            None => none,
        }
    }

    /// Returns the `(width, height)` in terminal cells the widget needs, margins included.
    pub(crate) fn size(&self) -> (u16, u16) {
        let maze = &self.session.maze;
        let margins = self.margins();
        let width =
            maze.width() * 3 + 1 + usize::from(margins.left) + usize::from(margins.right);
        let height =
            maze.height() * 2 + 1 + usize::from(margins.top) + usize::from(margins.bottom);
        (
            u16::try_from(width).unwrap_or(u16::MAX),
            u16::try_from(height).unwrap_or(u16::MAX),
        )
    }
}

impl Widget for MazeView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let wall_style = Style::default().fg(Color::Green);
        let player_style = Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD);

        let margins = self.margins();
        let left = area.x.saturating_add(u16::from(margins.left));
        if left >= area.right() {
            return;
        }
        let art = codec::encode(&self.session.maze);
        for (idx, line) in art.lines().enumerate() {
            let Ok(offset) = u16::try_from(idx) else {
                break;
            };
            let y = area
                .y
                .saturating_add(u16::from(margins.top))
                .saturating_add(offset);
            if y >= area.bottom() {
                break;
            }
            let _ = buf.set_stringn(left, y, line, usize::from(area.right() - left), wall_style);
        }

        let pos = self.session.display_position();
        let col = isize::from(margins.left) + pos.x * 3 + 1;
        let row = isize::from(margins.top) + pos.y * 2 + 1;
        if let (Ok(dx), Ok(dy)) = (u16::try_from(col), u16::try_from(row)) {
            let x = area.x.saturating_add(dx);
            let y = area.y.saturating_add(dy);
            if x < area.right() && y < area.bottom() {
                let _ = buf.set_stringn(x, y, arrow(self.session.facing), 1, player_style);
            }
        }
    }
}

/// Glyph showing which way the player faces.
const fn arrow(direction: Direction) -> &'static str {
    match direction {
        Direction::North => "^",
        Direction::East => ">",
        Direction::South => "v",
        Direction::West => "<",
    }
}
