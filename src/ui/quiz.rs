use crate::app::ViewState;
use crate::models::{AnswerSet, Quiz};
use crate::ui::layout::{calculate_quiz_chunks, calculate_screen_chunks};
use crate::ui::{draw_banner, draw_header, draw_help};
use crate::utils::{calculate_max_scroll, estimate_text_height};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn draw_quiz(
    f: &mut Frame,
    view: &mut ViewState,
    quiz: &Quiz,
    answers: &AnswerSet,
    error: Option<&str>,
) {
    let banner = error.or(view.notice.as_deref());
    let layout = calculate_screen_chunks(f.area(), banner.is_some());

    let title = format!(
        "{} - answered {}/{}",
        quiz.title,
        answers.answered_count(),
        quiz.questions.len()
    );
    draw_header(f, layout.header_area, &title);
    if let Some(message) = banner {
        draw_banner(f, layout.banner_area, message, Color::Red);
    }

    let passage = quiz.passage();
    let body = calculate_quiz_chunks(layout.body_area, passage.is_some());

    if let (Some(passage), Some(area)) = (passage, body.passage_area) {
        let text = Text::from(passage.to_string());
        let visible_height = area.height.saturating_sub(2) as usize;
        let text_width = area.width.saturating_sub(2) as usize;
        let max_scroll = calculate_max_scroll(estimate_text_height(&text, text_width), visible_height);
        view.passage_scroll = view.passage_scroll.min(max_scroll);

        let widget = Paragraph::new(text)
            .wrap(Wrap { trim: true })
            .scroll((view.passage_scroll, 0))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Reading Passage"),
            );
        f.render_widget(widget, area);
    }

    let index = view.current_question.min(quiz.questions.len().saturating_sub(1));
    if let Some(question) = quiz.questions.get(index) {
        let chosen = answers.get(index);
        let mut text = Text::default();
        text.push_line(Line::from(Span::styled(
            format!("Q{}. {}", index + 1, question.question),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        text.push_line(Line::from(""));

        for (i, option) in question.options.iter().enumerate() {
            let marker = if chosen == Some(i) { "(•)" } else { "( )" };
            let style = if i == view.highlighted_option {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else if chosen == Some(i) {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default()
            };
            text.push_line(Line::from(Span::styled(
                format!("{} {}. {}", marker, i + 1, option),
                style,
            )));
        }

        let block_title = format!("Question {} / {}", index + 1, quiz.questions.len());
        let widget = Paragraph::new(text)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title(block_title));
        f.render_widget(widget, body.question_area);
    }

    let submit_label = if answers.is_complete() {
        "Submit"
    } else {
        "Submit (answer every question first)"
    };
    let mut keys = vec![
        ("←/→", "Question"),
        ("↑/↓", "Option"),
        ("Enter", "Choose"),
        ("s", submit_label),
    ];
    if passage.is_some() {
        keys.push(("PgUp/PgDn", "Scroll passage"));
    }
    keys.extend([("n", "New quiz"), ("h", "Levels"), ("Esc", "Quit")]);
    draw_help(f, layout.help_area, &keys);
}
