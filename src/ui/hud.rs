use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

use crate::game::{GameSession, Phase};
use crate::score::ScoreStore;

const HUD_MARGIN_X: u16 = 1;
const SEPARATOR: &str = " │ ";

/// Supplemental values displayed by the HUD row.
#[derive(Debug, Clone, Copy)]
pub struct HudInfo {
    /// Best score when the current run started, to spot a new record.
    pub reference_best_score: u32,
}

/// Renders the one-line HUD and returns the remaining play area above it.
#[must_use]
pub fn render_hud<S: ScoreStore>(
    frame: &mut Frame<'_>,
    area: Rect,
    session: &GameSession<S>,
    info: HudInfo,
) -> Rect {
    let [play_area, status_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);
    let status_area = inset_horizontal(status_area, HUD_MARGIN_X);

    let values = HudValues {
        length: session.snake().len(),
        level: session.speed_level(),
        score: session.score(),
        best: session.best_score(),
        new_record: session.score() > info.reference_best_score,
    };

    let label = phase_label(session.phase());
    let label_width = u16::try_from(label.width()).unwrap_or(u16::MAX);
    let [label_area, info_area] =
        Layout::horizontal([Constraint::Length(label_width), Constraint::Min(0)])
            .areas(status_area);

    frame.render_widget(
        Paragraph::new(label)
            .alignment(Alignment::Left)
            .style(Style::default().fg(Color::DarkGray)),
        label_area,
    );
    frame.render_widget(
        Paragraph::new(info_line(values, usize::from(info_area.width)))
            .alignment(Alignment::Right)
            .style(Style::default().fg(Color::DarkGray)),
        info_area,
    );

    play_area
}

#[derive(Debug, Clone, Copy)]
struct HudValues {
    length: usize,
    level: u32,
    score: u32,
    best: u32,
    new_record: bool,
}

fn phase_label(phase: Phase) -> &'static str {
    match phase {
        Phase::Idle => "ready",
        Phase::Running => "",
        Phase::Paused => "paused",
        Phase::GameOver => "game over",
        Phase::Victory => "board cleared",
    }
}

fn inset_horizontal(area: Rect, margin: u16) -> Rect {
    let total_margin = margin.saturating_mul(2);
    Rect {
        x: area.x.saturating_add(margin),
        y: area.y,
        width: area.width.saturating_sub(total_margin),
        height: area.height,
    }
}

fn info_line(values: HudValues, available_width: usize) -> Line<'static> {
    let compact = info_width(values, false) > available_width;
    let labels = if compact {
        ["L", "V", "S", "B"]
    } else {
        ["Length", "Level", "Score", "Best"]
    };

    let value_style = Style::default().fg(Color::White);
    let best_style = if values.new_record {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };

    Line::from(vec![
        Span::raw(format!("{}: ", labels[0])),
        Span::styled(values.length.to_string(), value_style),
        Span::raw(SEPARATOR),
        Span::raw(format!("{}: ", labels[1])),
        Span::styled(values.level.to_string(), value_style),
        Span::raw(SEPARATOR),
        Span::raw(format!("{}: ", labels[2])),
        Span::styled(values.score.to_string(), value_style),
        Span::raw(SEPARATOR),
        Span::raw(format!("{}: ", labels[3])),
        Span::styled(values.best.to_string(), best_style),
    ])
}

fn info_width(values: HudValues, compact: bool) -> usize {
    let labels = if compact {
        ["L", "V", "S", "B"]
    } else {
        ["Length", "Level", "Score", "Best"]
    };
    let fields = [
        format!("{}: {}", labels[0], values.length),
        format!("{}: {}", labels[1], values.level),
        format!("{}: {}", labels[2], values.score),
        format!("{}: {}", labels[3], values.best),
    ];

    fields.iter().map(|field| field.width()).sum::<usize>()
        + SEPARATOR.width() * (fields.len() - 1)
}

#[cfg(test)]
mod tests {
    use super::{info_line, info_width, HudValues};

    fn values() -> HudValues {
        HudValues {
            length: 12,
            level: 4,
            score: 90,
            best: 250,
            new_record: false,
        }
    }

    #[test]
    fn full_labels_when_space_allows() {
        let line = info_line(values(), 80);
        let text: String = line.spans.iter().map(|span| &*span.content).collect();

        assert_eq!(text, "Length: 12 │ Level: 4 │ Score: 90 │ Best: 250");
    }

    #[test]
    fn compact_labels_on_narrow_terminals() {
        let line = info_line(values(), 20);
        let text: String = line.spans.iter().map(|span| &*span.content).collect();

        assert_eq!(text, "L: 12 │ V: 4 │ S: 90 │ B: 250");
    }

    #[test]
    fn width_counts_separator_as_single_columns() {
        assert_eq!(info_width(values(), true), "L: 12 │ V: 4 │ S: 90 │ B: 250".len() - 6);
    }
}
