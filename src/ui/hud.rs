use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::config::{Speed, GAME_OVER_FG, MENU_FOOTER_FG, SCORE_FG};

/// Values displayed by the status row.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct HudInfo {
    pub score: u32,
    pub speed: Option<Speed>,
    pub game_over: bool,
}

/// Renders the one-line HUD and returns the remaining play area above it.
#[must_use]
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, info: &HudInfo) -> Rect {
    let [play_area, status_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);

    let [left, right] =
        Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).areas(status_area);

    frame.render_widget(Paragraph::new(score_line(info)), left);

    let speed_text = info
        .speed
        .map(|speed| format!("{speed} ({} ms)", speed.interval_ms()))
        .unwrap_or_default();
    frame.render_widget(
        Paragraph::new(speed_text)
            .alignment(Alignment::Right)
            .style(Style::default().fg(MENU_FOOTER_FG)),
        right,
    );

    play_area
}

fn score_line(info: &HudInfo) -> Line<'static> {
    let mut spans = vec![
        Span::styled("Score ", Style::default().fg(MENU_FOOTER_FG)),
        Span::styled(
            info.score.to_string(),
            Style::default().fg(SCORE_FG).add_modifier(Modifier::BOLD),
        ),
    ];

    if info.game_over {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            "GAME OVER",
            Style::default()
                .fg(GAME_OVER_FG)
                .add_modifier(Modifier::BOLD),
        ));
    }

    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::{score_line, HudInfo};

    #[test]
    fn score_line_shows_game_over_label_only_after_loss() {
        let running = HudInfo {
            score: 4,
            speed: None,
            game_over: false,
        };
        let lost = HudInfo {
            game_over: true,
            ..running
        };

        assert_eq!(score_line(&running).to_string(), "Score 4");
        assert_eq!(score_line(&lost).to_string(), "Score 4  GAME OVER");
    }
}
