use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Block;
use ratatui::Frame;

use crate::game::GameSession;
use crate::grid::{GridSize, Position};
use crate::input::Direction;
use crate::score::ScoreStore;
use crate::ui::hud::{render_hud, HudInfo};
use crate::ui::menu::{phase_popup, render_popup};

const GLYPH_FOOD: &str = "●";
const GLYPH_SNAKE_BODY: &str = "█";
const GLYPH_SNAKE_TAIL: &str = "▓";
const GLYPH_SNAKE_HEAD_UP: &str = "▲";
const GLYPH_SNAKE_HEAD_DOWN: &str = "▼";
const GLYPH_SNAKE_HEAD_LEFT: &str = "◀";
const GLYPH_SNAKE_HEAD_RIGHT: &str = "▶";

const COLOR_SNAKE_HEAD: Color = Color::White;
const COLOR_SNAKE_BODY: Color = Color::Green;
const COLOR_SNAKE_TAIL: Color = Color::DarkGray;
const COLOR_FOOD: Color = Color::Red;
const COLOR_BORDER: Color = Color::Gray;

/// Renders the full game frame from immutable session state.
pub fn render<S: ScoreStore>(frame: &mut Frame<'_>, session: &GameSession<S>, hud_info: HudInfo) {
    let area = frame.area();
    let play_area = render_hud(frame, area, session, hud_info);

    let block = Block::bordered().border_style(Style::new().fg(COLOR_BORDER));
    let inner = block.inner(play_area);
    frame.render_widget(block, play_area);

    render_food(frame, inner, session);
    render_snake(frame, inner, session);

    if let Some(popup) = phase_popup(session, hud_info.reference_best_score) {
        render_popup(frame, play_area, &popup);
    }
}

fn render_food<S: ScoreStore>(frame: &mut Frame<'_>, inner: Rect, session: &GameSession<S>) {
    let Some(food) = session.food_position() else {
        return;
    };
    let Some((x, y)) = logical_to_terminal(inner, session.bounds(), food) else {
        return;
    };

    let buffer = frame.buffer_mut();
    buffer.set_string(x, y, GLYPH_FOOD, Style::new().fg(COLOR_FOOD));
}

fn render_snake<S: ScoreStore>(frame: &mut Frame<'_>, inner: Rect, session: &GameSession<S>) {
    let snake = session.snake();
    let last_index = snake.len() - 1;

    let buffer = frame.buffer_mut();
    for (index, segment) in snake.segments().enumerate() {
        let Some((x, y)) = logical_to_terminal(inner, session.bounds(), *segment) else {
            continue;
        };

        let (glyph, style) = if index == 0 {
            (
                head_glyph(session.heading()),
                Style::new()
                    .fg(COLOR_SNAKE_HEAD)
                    .add_modifier(Modifier::BOLD),
            )
        } else if index == last_index {
            (GLYPH_SNAKE_TAIL, Style::new().fg(COLOR_SNAKE_TAIL))
        } else {
            (GLYPH_SNAKE_BODY, Style::new().fg(COLOR_SNAKE_BODY))
        };

        buffer.set_string(x, y, glyph, style);
    }
}

fn head_glyph(direction: Direction) -> &'static str {
    match direction {
        Direction::Up => GLYPH_SNAKE_HEAD_UP,
        Direction::Down => GLYPH_SNAKE_HEAD_DOWN,
        Direction::Left => GLYPH_SNAKE_HEAD_LEFT,
        Direction::Right => GLYPH_SNAKE_HEAD_RIGHT,
    }
}

fn logical_to_terminal(inner: Rect, bounds: GridSize, position: Position) -> Option<(u16, u16)> {
    if !bounds.contains(position) {
        return None;
    }

    let x_offset = u16::try_from(position.x).ok()?;
    let y_offset = u16::try_from(position.y).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x >= inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}
