pub mod layout;
mod loading;
mod menu;
mod quiz;
mod results;

pub use layout::{calculate_quiz_chunks, calculate_screen_chunks};
pub use loading::draw_loading;
pub use menu::draw_level_select;
pub use quiz::draw_quiz;
pub use results::{draw_results, results_text};

use crate::app::App;
use crate::models::Screen;
use crate::utils::truncate_string;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Draw whichever screen the session is on.
pub fn draw(f: &mut Frame, app: &mut App) {
    let screen = app.session.screen().clone();
    match &screen {
        Screen::LevelSelect { error } => draw_level_select(f, &app.view, error.as_deref()),
        Screen::Loading { level, message, .. } => draw_loading(f, *level, message),
        Screen::Quiz {
            quiz,
            answers,
            error,
            ..
        } => draw_quiz(f, &mut app.view, quiz, answers, error.as_deref()),
        Screen::Results {
            quiz,
            answers,
            results,
            ..
        } => draw_results(f, &mut app.view, quiz, answers, results),
    }
}

pub(crate) fn draw_header(f: &mut Frame, area: Rect, title: &str) {
    let header = Paragraph::new(truncate_string(title, area.width.saturating_sub(2) as usize))
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, area);
}

pub(crate) fn draw_banner(f: &mut Frame, area: Rect, message: &str, color: Color) {
    if area.height == 0 {
        return;
    }
    let banner = Paragraph::new(message.to_string())
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        );
    f.render_widget(banner, area);
}

/// Footer of `key  label` pairs.
pub(crate) fn draw_help(f: &mut Frame, area: Rect, keys: &[(&str, &str)]) {
    let mut spans = Vec::new();
    for (key, label) in keys {
        spans.push(Span::styled(
            key.to_string(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::from(format!(" {}  ", label)));
    }
    let help = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::mock::{sample_quiz, sample_results};
    use crate::models::{AiResponse, Level};
    use ratatui::{backend::TestBackend, Terminal};

    fn rendered(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for row in buffer.content.chunks(buffer.area.width as usize) {
            for cell in row {
                out.push_str(cell.symbol());
            }
            out.push('\n');
        }
        out
    }

    fn render(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 50)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        rendered(&terminal)
    }

    fn new_app() -> (
        App,
        crossbeam_channel::Receiver<crate::models::AiRequest>,
        crossbeam_channel::Sender<AiResponse>,
    ) {
        let (req_tx, req_rx) = crossbeam_channel::unbounded();
        let (resp_tx, resp_rx) = crossbeam_channel::unbounded();
        (App::new(req_tx, resp_rx), req_rx, resp_tx)
    }

    fn load_quiz(
        app: &mut App,
        level: Level,
        req_rx: &crossbeam_channel::Receiver<crate::models::AiRequest>,
        resp_tx: &crossbeam_channel::Sender<AiResponse>,
    ) {
        app.select_level(level);
        let ticket = req_rx.try_recv().unwrap().ticket();
        resp_tx
            .send(AiResponse::Generated {
                ticket,
                result: Ok(sample_quiz(level, "render")),
            })
            .unwrap();
        app.poll_ai_responses();
    }

    #[test]
    fn test_level_select_lists_all_levels() {
        let (mut app, _req_rx, _resp_tx) = new_app();
        let screen = render(&mut app);
        for level in Level::ALL {
            assert!(screen.contains(level.title()), "missing {}", level.title());
        }
    }

    #[test]
    fn test_loading_shows_message() {
        let (mut app, _req_rx, _resp_tx) = new_app();
        app.select_level(Level::Eiken);
        let screen = render(&mut app);
        assert!(screen.contains(crate::session::GENERATING_MESSAGE));
    }

    #[test]
    fn test_quiz_without_passage() {
        let (mut app, req_rx, resp_tx) = new_app();
        load_quiz(&mut app, Level::Eiken, &req_rx, &resp_tx);
        let screen = render(&mut app);
        assert!(screen.contains("render question 1"));
        assert!(!screen.contains("Reading Passage"));
    }

    #[test]
    fn test_quiz_with_passage() {
        let (mut app, req_rx, resp_tx) = new_app();
        load_quiz(&mut app, Level::WasedaLetters, &req_rx, &resp_tx);
        let screen = render(&mut app);
        assert!(screen.contains("Reading Passage"));
        assert_eq!(screen.matches("Passage for render").count(), 1);
    }

    #[test]
    fn test_results_screen() {
        let (mut app, req_rx, resp_tx) = new_app();
        load_quiz(&mut app, Level::Eiken, &req_rx, &resp_tx);
        for q in 0..3 {
            app.view.current_question = q;
            app.choose_highlighted();
        }
        app.submit_answers();
        let ticket = req_rx.try_recv().unwrap().ticket();
        resp_tx
            .send(AiResponse::Graded {
                ticket,
                result: Ok(sample_results(Level::Eiken, 1)),
            })
            .unwrap();
        app.poll_ai_responses();

        let screen = render(&mut app);
        assert!(screen.contains("1 / 3"));
        assert!(screen.contains("Correct"));
        assert!(screen.contains("Incorrect"));
    }
}
