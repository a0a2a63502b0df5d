use crate::app::ViewState;
use crate::models::Level;
use crate::ui::{draw_banner, draw_header, draw_help, layout::calculate_screen_chunks};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

pub fn draw_level_select(f: &mut Frame, view: &ViewState, error: Option<&str>) {
    let banner = error.or(view.notice.as_deref());
    let layout = calculate_screen_chunks(f.area(), banner.is_some());

    draw_header(f, layout.header_area, "Exam Drill - Choose a level");
    if let Some(message) = banner {
        draw_banner(f, layout.banner_area, message, Color::Red);
    }

    let items: Vec<ListItem> = Level::ALL
        .iter()
        .enumerate()
        .map(|(i, level)| {
            let selected = i == view.selected_level;
            let title_style = if selected {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            };
            let marker = if selected { "> " } else { "  " };
            ListItem::new(vec![
                Line::from(vec![
                    Span::from(marker),
                    Span::styled(format!("[{}] {}", i + 1, level.title()), title_style),
                ]),
                Line::from(Span::styled(
                    format!("      {}", level.profile().description),
                    Style::default().fg(Color::Gray),
                )),
                Line::from(""),
            ])
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title("The AI writes a fresh quiz for the level you pick"),
    );
    f.render_widget(list, layout.body_area);

    draw_help(
        f,
        layout.help_area,
        &[
            ("↑/↓", "Navigate"),
            ("Enter/1-3", "Start"),
            ("Esc/Ctrl+C", "Quit"),
        ],
    );
}
