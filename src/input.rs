use crate::app::App;
use crate::models::{Level, Screen, ScreenKind, OPTIONS_PER_QUESTION};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

const SCROLL_STEP: u16 = 1;
const PAGE_STEP: u16 = 10;

pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match app.session.screen().kind() {
        ScreenKind::LevelSelect => handle_level_select(app, key),
        ScreenKind::Loading => handle_loading(app, key),
        ScreenKind::Quiz => handle_quiz(app, key),
        ScreenKind::Results => handle_results(app, key),
    }
}

fn handle_level_select(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Up => {
            app.view.selected_level = app.view.selected_level.saturating_sub(1);
        }
        KeyCode::Down => {
            if app.view.selected_level < Level::ALL.len() - 1 {
                app.view.selected_level += 1;
            }
        }
        KeyCode::Enter => {
            let level = app.selected_level();
            app.select_level(level);
        }
        KeyCode::Char(c @ '1'..='3') => {
            let index = c as usize - '1' as usize;
            app.view.selected_level = index;
            app.select_level(Level::ALL[index]);
        }
        KeyCode::Esc | KeyCode::Char('q') => app.should_quit = true,
        _ => {}
    }
}

fn handle_loading(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('h') => app.select_another_level(),
        KeyCode::Esc => app.should_quit = true,
        _ => {}
    }
}

fn handle_quiz(app: &mut App, key: KeyEvent) {
    let question_count = match app.session.screen() {
        Screen::Quiz { quiz, .. } => quiz.questions.len(),
        _ => return,
    };

    match key.code {
        KeyCode::Left | KeyCode::BackTab => {
            if app.view.current_question > 0 {
                app.view.current_question -= 1;
                app.view.highlighted_option = current_answer(app).unwrap_or(0);
            }
        }
        KeyCode::Right | KeyCode::Tab => {
            if app.view.current_question + 1 < question_count {
                app.view.current_question += 1;
                app.view.highlighted_option = current_answer(app).unwrap_or(0);
            }
        }
        KeyCode::Up => {
            app.view.highlighted_option = app.view.highlighted_option.saturating_sub(1);
        }
        KeyCode::Down => {
            if app.view.highlighted_option + 1 < OPTIONS_PER_QUESTION {
                app.view.highlighted_option += 1;
            }
        }
        KeyCode::Char(c @ '1'..='4') => {
            app.view.highlighted_option = c as usize - '1' as usize;
            app.choose_highlighted();
        }
        KeyCode::Enter | KeyCode::Char(' ') => {
            app.choose_highlighted();
            // Move on to the next question once one is picked.
            if app.view.current_question + 1 < question_count {
                app.view.current_question += 1;
                app.view.highlighted_option = current_answer(app).unwrap_or(0);
            }
        }
        KeyCode::PageDown => {
            app.view.passage_scroll = app.view.passage_scroll.saturating_add(PAGE_STEP);
        }
        KeyCode::PageUp => {
            app.view.passage_scroll = app.view.passage_scroll.saturating_sub(PAGE_STEP);
        }
        KeyCode::Char('s') => app.submit_answers(),
        KeyCode::Char('n') => app.request_new_quiz(),
        KeyCode::Char('h') => app.select_another_level(),
        KeyCode::Esc => app.should_quit = true,
        _ => {}
    }
}

fn handle_results(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Up => {
            app.view.results_scroll = app.view.results_scroll.saturating_sub(SCROLL_STEP);
        }
        KeyCode::Down => {
            app.view.results_scroll = app.view.results_scroll.saturating_add(SCROLL_STEP);
        }
        KeyCode::PageUp => {
            app.view.results_scroll = app.view.results_scroll.saturating_sub(PAGE_STEP);
        }
        KeyCode::PageDown => {
            app.view.results_scroll = app.view.results_scroll.saturating_add(PAGE_STEP);
        }
        KeyCode::Char('n') | KeyCode::Char('r') => app.request_new_quiz(),
        KeyCode::Char('l') | KeyCode::Char('h') => app.select_another_level(),
        KeyCode::Esc | KeyCode::Char('q') => app.should_quit = true,
        _ => {}
    }
}

fn current_answer(app: &App) -> Option<usize> {
    match app.session.screen() {
        Screen::Quiz { answers, .. } => answers.get(app.view.current_question),
        _ => None,
    }
}
