use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct ScreenLayout {
    pub header_area: Rect,
    pub banner_area: Rect,
    pub body_area: Rect,
    pub help_area: Rect,
}

pub struct QuizLayout {
    pub passage_area: Option<Rect>,
    pub question_area: Rect,
}

/// Header, optional error banner, body, and key help footer.
pub fn calculate_screen_chunks(area: Rect, with_banner: bool) -> ScreenLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(if with_banner { 3 } else { 0 }),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(area);

    ScreenLayout {
        header_area: chunks[0],
        banner_area: chunks[1],
        body_area: chunks[2],
        help_area: chunks[3],
    }
}

/// Split the quiz body between the passage (when present) and the question.
pub fn calculate_quiz_chunks(body: Rect, with_passage: bool) -> QuizLayout {
    if !with_passage {
        return QuizLayout {
            passage_area: None,
            question_area: body,
        };
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(55), Constraint::Min(8)])
        .split(body);

    QuizLayout {
        passage_area: Some(chunks[0]),
        question_area: chunks[1],
    }
}
