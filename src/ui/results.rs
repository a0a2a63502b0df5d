use crate::app::ViewState;
use crate::models::{question_outcomes, QuestionOutcome, Quiz, Results};
use crate::ui::layout::calculate_screen_chunks;
use crate::ui::{draw_header, draw_help};
use crate::utils::{calculate_max_scroll, estimate_text_height, render_markdown};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

fn score_color(score: usize, total: usize) -> Color {
    if total == 0 {
        return Color::Red;
    }
    let ratio = score as f32 / total as f32;
    if ratio >= 0.8 {
        Color::Green
    } else if ratio >= 0.5 {
        Color::Yellow
    } else {
        Color::Red
    }
}

fn section_heading(text: &mut Text<'static>, title: &str) {
    text.push_line(Line::from(Span::styled(
        title.to_string(),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
    )));
    text.push_line(Line::from(""));
}

/// Scrollable body of the results screen: summary, explanations, vocabulary.
pub fn results_text(quiz: &Quiz, answers: &[usize], results: &Results) -> Text<'static> {
    let mut text = Text::default();

    if let Some(summary) = &results.passage_summary {
        section_heading(&mut text, "Passage Summary");
        for line in summary.lines() {
            text.push_line(Line::from(line.to_string()));
        }
        text.push_line(Line::from(""));
    }

    section_heading(&mut text, "Explanations");
    let outcomes = question_outcomes(quiz, answers);
    for (i, explanation) in results.explanations.iter().enumerate() {
        let badge = match outcomes.get(i) {
            Some(QuestionOutcome::Correct) => Span::styled(
                " Correct ",
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            _ => Span::styled(
                " Incorrect ",
                Style::default()
                    .fg(Color::White)
                    .bg(Color::Red)
                    .add_modifier(Modifier::BOLD),
            ),
        };
        text.push_line(Line::from(vec![
            Span::styled(
                format!("Q{}. ", i + 1),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            badge,
        ]));

        if let Some(question) = quiz.questions.get(i) {
            let yours = answers
                .get(i)
                .and_then(|a| question.options.get(*a))
                .map(String::as_str)
                .unwrap_or("-");
            text.push_line(Line::from(Span::styled(
                format!("Your answer: {}", yours),
                Style::default().fg(Color::Yellow),
            )));
            text.push_line(Line::from(Span::styled(
                format!("Correct answer: {}", question.correct_option().unwrap_or("-")),
                Style::default().fg(Color::Green),
            )));
        }
        text.push_line(Line::from(""));
        text.extend(render_markdown(&explanation.detailed_explanation));
        text.push_line(Line::from(""));
    }

    section_heading(&mut text, "Key Words and Phrases");
    for entry in &results.vocabulary {
        text.push_line(Line::from(Span::styled(
            entry.word.clone(),
            Style::default()
                .fg(Color::LightCyan)
                .add_modifier(Modifier::BOLD),
        )));
        text.push_line(Line::from(format!("  {}", entry.meaning)));
        text.push_line(Line::from(Span::styled(
            format!("  e.g. \"{}\"", entry.example),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )));
        text.push_line(Line::from(""));
    }

    text
}

pub fn draw_results(
    f: &mut Frame,
    view: &mut ViewState,
    quiz: &Quiz,
    answers: &[usize],
    results: &Results,
) {
    let layout = calculate_screen_chunks(f.area(), view.notice.is_some());
    draw_header(f, layout.header_area, &format!("{} - Results", results.level.title()));
    if let Some(notice) = &view.notice {
        crate::ui::draw_banner(f, layout.banner_area, notice, Color::Red);
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(layout.body_area);

    let score = Paragraph::new(Line::from(vec![
        Span::styled(
            format!("{} / {}", results.score, results.total),
            Style::default()
                .fg(score_color(results.score, results.total))
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" correct"),
    ]))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL).title("Score"));
    f.render_widget(score, chunks[0]);

    let text = results_text(quiz, answers, results);
    let visible_height = chunks[1].height.saturating_sub(2) as usize;
    let text_width = chunks[1].width.saturating_sub(2) as usize;
    let max_scroll = calculate_max_scroll(estimate_text_height(&text, text_width), visible_height);
    view.results_scroll = view.results_scroll.min(max_scroll);

    let body = Paragraph::new(text)
        .wrap(Wrap { trim: false })
        .scroll((view.results_scroll, 0))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(body, chunks[1]);

    draw_help(
        f,
        layout.help_area,
        &[
            ("↑/↓", "Scroll"),
            ("n", "Retry this level"),
            ("l", "Other level"),
            ("Esc", "Quit"),
        ],
    );
}
