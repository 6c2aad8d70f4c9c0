use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};
use ratatui::Frame;

use crate::config::{Speed, GAME_OVER_FG, MENU_FOOTER_FG, MENU_TITLE_FG};

/// Draws the start screen as a centered popup.
pub fn render_start_menu(frame: &mut Frame<'_>, area: Rect) {
    let popup = centered_popup(area, 80, 70);
    frame.render_widget(Clear, popup);

    let [title_row, body_row, footer_row] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .areas(popup);

    frame.render_widget(
        Paragraph::new(Line::from("SNAKE"))
            .alignment(Alignment::Center)
            .style(
                Style::default()
                    .fg(MENU_TITLE_FG)
                    .add_modifier(Modifier::BOLD),
            ),
        title_row,
    );

    frame.render_widget(
        Paragraph::new(start_lines())
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" start ")),
        body_row,
    );

    frame.render_widget(
        Paragraph::new(Line::from("arrows/WASD to move"))
            .alignment(Alignment::Center)
            .style(Style::default().fg(MENU_FOOTER_FG)),
        footer_row,
    );
}

/// Draws the end-of-game popup; start controls are available again.
pub fn render_game_over_menu(frame: &mut Frame<'_>, area: Rect, score: u32) {
    let popup = centered_popup(area, 80, 70);
    frame.render_widget(Clear, popup);

    let [title_row, body_row] =
        Layout::vertical([Constraint::Length(3), Constraint::Min(3)]).areas(popup);

    frame.render_widget(
        Paragraph::new(vec![
            Line::from("GAME OVER"),
            Line::from(format!("Score: {score}")),
        ])
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(GAME_OVER_FG)
                .add_modifier(Modifier::BOLD),
        ),
        title_row,
    );

    frame.render_widget(
        Paragraph::new(start_lines())
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" play again ")),
        body_row,
    );
}

fn start_lines() -> Vec<Line<'static>> {
    let mut lines: Vec<Line<'static>> = Speed::ALL
        .iter()
        .enumerate()
        .map(|(index, speed)| {
            Line::from(format!(
                "[{}] {:<6} {} ms",
                index + 1,
                speed.label(),
                speed.interval_ms()
            ))
        })
        .collect();
    lines.push(Line::from("[Enter] default speed"));
    lines.push(Line::from("[Q] Quit"));
    lines
}

fn centered_popup(area: Rect, width_percent: u16, height_percent: u16) -> Rect {
    let [_, mid, _] = Layout::vertical([
        Constraint::Percentage((100 - height_percent) / 2),
        Constraint::Percentage(height_percent),
        Constraint::Percentage((100 - height_percent) / 2),
    ])
    .areas(area);

    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - width_percent) / 2),
        Constraint::Percentage(width_percent),
        Constraint::Percentage((100 - width_percent) / 2),
    ])
    .areas(mid);

    center
}
