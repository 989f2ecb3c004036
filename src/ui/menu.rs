use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

use crate::game::{DeathReason, GameSession, Phase};
use crate::score::ScoreStore;

const POPUP_PADDING_X: u16 = 2;

/// Text of the box drawn over the board outside of active play.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Popup {
    pub title: &'static str,
    pub headline: &'static str,
    pub lines: Vec<String>,
}

/// Builds the popup for the session's phase, or `None` while running.
///
/// `reference_best` is the best score as it stood when the run began, so
/// the closing popup can tell whether this run set a new record.
#[must_use]
pub fn phase_popup<S: ScoreStore>(session: &GameSession<S>, reference_best: u32) -> Option<Popup> {
    match session.phase() {
        Phase::Running => None,
        Phase::Idle => Some(Popup {
            title: " start ",
            headline: "SNAKE",
            lines: vec![
                format!("Best score: {}", session.best_score()),
                String::new(),
                "[Enter] Start".to_owned(),
                "[Q]/[Esc] Quit".to_owned(),
                "Arrows/WASD/HJKL move, [P]/[Space] pause".to_owned(),
            ],
        }),
        Phase::Paused => Some(Popup {
            title: " pause ",
            headline: "PAUSED",
            lines: vec!["[P]/[Space] Resume".to_owned(), "[Q]/[Esc] Quit".to_owned()],
        }),
        Phase::GameOver | Phase::Victory => Some(result_popup(session, reference_best)),
    }
}

fn result_popup<S: ScoreStore>(session: &GameSession<S>, reference_best: u32) -> Popup {
    let score = session.score();
    let (headline, cause) = match (session.phase(), session.death_reason()) {
        (Phase::Victory, _) => ("YOU WIN", "The snake fills the board"),
        (_, Some(DeathReason::WallCollision)) => ("GAME OVER", "Cause: hit wall"),
        (_, Some(DeathReason::SelfCollision)) => ("GAME OVER", "Cause: hit yourself"),
        (_, None) => ("GAME OVER", ""),
    };

    let mut lines = vec![
        format!("Score: {score}"),
        format!("Best score: {}", session.best_score()),
        cause.to_owned(),
    ];
    if score > reference_best {
        lines.push("New best score!".to_owned());
    }
    lines.push(String::new());
    lines.push("[Enter]/[R] Play Again".to_owned());
    lines.push("[Q]/[Esc] Quit".to_owned());

    Popup {
        title: " game over ",
        headline,
        lines,
    }
}

/// Draws `popup` centred in `area`, sized to its text.
pub fn render_popup(frame: &mut Frame<'_>, area: Rect, popup: &Popup) {
    let rect = popup_rect(area, popup);
    frame.render_widget(Clear, rect);

    let mut text = Vec::with_capacity(popup.lines.len() + 2);
    text.push(Line::styled(
        popup.headline,
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
    ));
    text.push(Line::from(""));
    text.extend(popup.lines.iter().map(|line| Line::from(line.as_str())));

    frame.render_widget(
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(popup.title)),
        rect,
    );
}

fn popup_rect(area: Rect, popup: &Popup) -> Rect {
    let text_width = popup
        .lines
        .iter()
        .map(|line| line.width())
        .chain([popup.headline.width(), popup.title.width()])
        .max()
        .unwrap_or(0);
    let text_width = u16::try_from(text_width).unwrap_or(u16::MAX);
    let text_height = u16::try_from(popup.lines.len() + 2).unwrap_or(u16::MAX);

    // Two border cells on each axis.
    let width = text_width
        .saturating_add(2 * POPUP_PADDING_X + 2)
        .min(area.width);
    let height = text_height.saturating_add(2).min(area.height);

    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use ratatui::layout::Rect;

    use crate::config::GameConfig;
    use crate::game::{GameSession, Phase};
    use crate::grid::Position;
    use crate::input::Direction;
    use crate::score::MemoryScoreStore;
    use crate::snake::Snake;

    use super::{phase_popup, popup_rect, Popup};

    fn crashed_session(best: u32) -> GameSession<MemoryScoreStore> {
        let config = GameConfig {
            points_per_food: 30,
            ..GameConfig::with_grid(10, 10)
        };
        let mut session = GameSession::new_with_seed(config, MemoryScoreStore::with_best(best), 1)
            .expect("test config should be valid");
        let snake = Snake::from_segments(
            vec![Position::new(8, 5), Position::new(7, 5)],
            Direction::Right,
        )
        .expect("layout should be valid");
        session
            .start_from(snake, Position::new(9, 5))
            .expect("layout should be valid");
        session.tick();
        session.tick();
        assert_eq!(session.phase(), Phase::GameOver);
        session
    }

    #[test]
    fn popup_is_centered_and_sized_to_text() {
        let popup = Popup {
            title: " t ",
            headline: "HI",
            lines: vec!["0123456789".to_owned()],
        };

        let rect = popup_rect(Rect::new(0, 0, 40, 20), &popup);

        assert_eq!(rect, Rect::new(12, 7, 16, 5));
    }

    #[test]
    fn popup_is_clamped_to_small_areas() {
        let popup = Popup {
            title: " t ",
            headline: "HI",
            lines: vec!["a line far wider than the area".to_owned(); 10],
        };

        let rect = popup_rect(Rect::new(2, 1, 12, 6), &popup);

        assert_eq!(rect, Rect::new(2, 1, 12, 6));
    }

    #[test]
    fn running_session_has_no_popup() {
        let mut session =
            GameSession::new_with_seed(GameConfig::default(), MemoryScoreStore::default(), 1)
                .expect("test config should be valid");
        assert_eq!(phase_popup(&session, 0).map(|popup| popup.headline), Some("SNAKE"));

        session.start();

        assert_eq!(phase_popup(&session, 0), None);
    }

    #[test]
    fn result_popup_names_cause_and_new_record() {
        let session = crashed_session(10);

        let popup = phase_popup(&session, 10).expect("finished runs show a popup");

        assert_eq!(popup.headline, "GAME OVER");
        assert!(popup.lines.contains(&"Cause: hit wall".to_owned()));
        assert!(popup.lines.contains(&"Best score: 30".to_owned()));
        assert!(popup.lines.contains(&"New best score!".to_owned()));
    }

    #[test]
    fn result_popup_without_record_omits_the_banner() {
        let session = crashed_session(50);

        let popup = phase_popup(&session, 50).expect("finished runs show a popup");

        assert!(!popup.lines.contains(&"New best score!".to_owned()));
        assert!(popup.lines.contains(&"Best score: 50".to_owned()));
    }
}
