use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::game::{Level, Phase, Position, Snapshot};
use crate::metrics::GameMetrics;
use crate::session::PulseFrame;

/// Draws a session snapshot. Holds no game state of its own.
pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        snapshot: &Snapshot<'_>,
        metrics: &GameMetrics,
        pulse: Option<PulseFrame>,
    ) {
        let [header, body, footer] = Layout::vertical([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Game area
            Constraint::Length(3), // Footer
        ])
        .areas(frame.area());

        frame.render_widget(self.render_stats(snapshot, metrics), header);

        // Two columns per cell plus the border
        let grid_width = (snapshot.grid_width * 2 + 2).min(u16::MAX as usize) as u16;
        let grid_height = (snapshot.grid_height + 2).min(u16::MAX as usize) as u16;
        let game_area = centered(body, grid_width, grid_height);
        frame.render_widget(self.render_grid(snapshot), game_area);

        match snapshot.phase {
            Phase::Running => {}
            Phase::Paused => {
                let popup = centered(body, 34, 7);
                frame.render_widget(Clear, popup);
                frame.render_widget(self.render_pause(snapshot), popup);
            }
            Phase::GameOver => {
                let popup = centered(body, 38, 9);
                frame.render_widget(Clear, popup);
                frame.render_widget(self.render_game_over(snapshot, pulse), popup);
            }
        }

        frame.render_widget(self.render_controls(), footer);
    }

    fn render_grid(&self, snapshot: &Snapshot<'_>) -> Paragraph<'_> {
        let snake_color = level_color(snapshot.level);
        let head = snapshot.head();
        let mut lines = Vec::with_capacity(snapshot.grid_height);

        for y in 0..snapshot.grid_height {
            let mut spans = Vec::with_capacity(snapshot.grid_width);

            for x in 0..snapshot.grid_width {
                let pos = Position::new(x as i32, y as i32);

                let cell = if Some(pos) == head {
                    Span::styled(
                        "■ ",
                        Style::default()
                            .fg(snake_color)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if snapshot.snake.contains(&pos) {
                    Span::styled("□ ", Style::default().fg(snake_color))
                } else if pos == snapshot.food {
                    Span::styled(
                        "● ",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )
                } else {
                    Span::styled(". ", Style::default().fg(Color::DarkGray))
                };

                spans.push(cell);
            }

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::White))
                .title(format!(" Snake - {} ", snapshot.level_label)),
        )
    }

    fn render_stats(&self, snapshot: &Snapshot<'_>, metrics: &GameMetrics) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                snapshot.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Best: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                metrics.best_score.max(snapshot.score).to_string(),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Level: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                snapshot.level_label,
                Style::default().fg(level_color(snapshot.level)),
            ),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.format_time(), Style::default().fg(Color::White)),
        ])];

        Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::BOTTOM))
    }

    fn render_pause(&self, snapshot: &Snapshot<'_>) -> Paragraph<'_> {
        let text = vec![
            Line::from(Span::styled(
                "PAUSE",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Press Esc to resume",
                Style::default().fg(Color::White),
            )),
            Line::from(Span::styled(
                format!("Level: {}", snapshot.level_label),
                Style::default().fg(Color::White),
            )),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
                .style(Style::default().bg(Color::Black)),
        )
    }

    fn render_game_over(&self, snapshot: &Snapshot<'_>, pulse: Option<PulseFrame>) -> Paragraph<'_> {
        let (alpha, scale) = pulse
            .map(|p| (p.overlay_alpha, p.text_scale))
            .unwrap_or((0.5, 1.0));

        // Brighter red as the headline swells; darker backdrop as the overlay thickens.
        let red = (155.0 + (scale - 0.9) / 0.2 * 100.0).clamp(0.0, 255.0) as u8;
        let shade = ((1.0 - alpha) * 80.0).clamp(0.0, 255.0) as u8;
        let mut headline = Style::default().fg(Color::Rgb(red, 0, 0));
        if scale >= 1.0 {
            headline = headline.add_modifier(Modifier::BOLD);
        }

        let text = vec![
            Line::from(Span::styled("GAME OVER", headline)),
            Line::from(""),
            Line::from(vec![
                Span::styled("Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    snapshot.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(Span::styled(
                format!("Level: {}", snapshot.level_label),
                Style::default().fg(Color::White),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press an ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "arrow",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to play again", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red))
                .style(Style::default().bg(Color::Rgb(shade, shade, shade))),
        )
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("Esc", Style::default().fg(Color::Yellow)),
            Span::raw(" pause | "),
            Span::styled("1 2 3", Style::default().fg(Color::Cyan)),
            Span::raw(" level | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::TOP))
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

fn level_color(level: Level) -> Color {
    match level {
        Level::Easy => Color::LightGreen,
        Level::Medium => Color::Cyan,
        Level::Hard => Color::Rgb(255, 165, 0),
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [area] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(area);
    let [area] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    area
}
