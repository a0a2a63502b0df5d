use crate::models::Level;
use crate::ui::{draw_header, draw_help, layout::calculate_screen_chunks};
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn draw_loading(f: &mut Frame, level: Level, message: &str) {
    let layout = calculate_screen_chunks(f.area(), false);
    draw_header(f, layout.header_area, level.title());

    let mut text = Text::default();
    let padding = layout.body_area.height.saturating_sub(4) / 2;
    for _ in 0..padding {
        text.push_line(Line::from(""));
    }
    text.push_line(Line::from(Span::styled(
        message.to_string(),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    )));
    text.push_line(Line::from(""));
    text.push_line(Line::from(Span::styled(
        "Preparing the best possible practice for you. Please wait a moment...",
        Style::default().fg(Color::DarkGray),
    )));

    let body = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(body, layout.body_area);

    draw_help(f, layout.help_area, &[("h", "Back to levels"), ("Esc/Ctrl+C", "Quit")]);
}
