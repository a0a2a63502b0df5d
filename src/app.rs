use crate::error::{ClientError, GenerationError, GradingError, SessionError};
use crate::logger;
use crate::models::{AiRequest, AiResponse, Level, Screen, ScreenKind};
use crate::session::QuizSession;
use crossbeam_channel::{Receiver, Sender, TryRecvError};

/// Cursor and scroll positions of the terminal UI. None of this is session
/// state; it is reset whenever the screen changes.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub selected_level: usize,
    pub current_question: usize,
    pub highlighted_option: usize,
    pub passage_scroll: u16,
    pub results_scroll: u16,
    pub notice: Option<String>,
}

pub struct App {
    pub session: QuizSession,
    pub view: ViewState,
    pub should_quit: bool,
    ai_tx: Sender<AiRequest>,
    ai_rx: Receiver<AiResponse>,
}

impl App {
    pub fn new(ai_tx: Sender<AiRequest>, ai_rx: Receiver<AiResponse>) -> Self {
        Self {
            session: QuizSession::new(),
            view: ViewState::default(),
            should_quit: false,
            ai_tx,
            ai_rx,
        }
    }

    pub fn selected_level(&self) -> Level {
        Level::ALL[self.view.selected_level.min(Level::ALL.len() - 1)]
    }

    pub fn select_level(&mut self, level: Level) {
        let request = self.session.select_level(level);
        self.dispatch(request);
    }

    pub fn request_new_quiz(&mut self) {
        let request = self.session.request_new_quiz();
        self.dispatch(request);
    }

    pub fn submit_answers(&mut self) {
        let request = self.session.submit_current_answers();
        self.dispatch(request);
    }

    pub fn choose_highlighted(&mut self) {
        let (question, option) = (self.view.current_question, self.view.highlighted_option);
        if let Err(e) = self.session.choose_answer(question, option) {
            self.view.notice = Some(e.to_string());
        } else {
            self.view.notice = None;
        }
    }

    pub fn select_another_level(&mut self) {
        self.session.select_another_level();
        self.reset_view();
    }

    /// Apply every response the worker has delivered so far.
    pub fn poll_ai_responses(&mut self) {
        loop {
            match self.ai_rx.try_recv() {
                Ok(response) => self.apply(response),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if self.session.is_loading() {
                        logger::log("AI worker disconnected while a request was pending");
                        let ticket = self.pending_ticket();
                        let response = self.worker_gone(ticket);
                        self.apply(response);
                    }
                    break;
                }
            }
        }
    }

    fn apply(&mut self, response: AiResponse) {
        let before = self.session.screen().kind();
        if self.session.resolve(response) && self.session.screen().kind() != before {
            self.on_screen_changed();
        }
    }

    fn dispatch(&mut self, request: Result<AiRequest, SessionError>) {
        let request = match request {
            Ok(request) => request,
            Err(e) => {
                logger::log(&format!("Refused: {}", e));
                self.view.notice = Some(e.to_string());
                return;
            }
        };

        self.view.notice = None;
        let ticket = request.ticket();
        if let Err(e) = self.ai_tx.send(request) {
            logger::log(&format!("Failed to send request to AI worker: {}", e));
            let response = self.worker_gone(ticket);
            self.apply(response);
        }
    }

    /// Synthetic failure for when the worker thread is no longer running.
    fn worker_gone(&self, ticket: u64) -> AiResponse {
        let error = ClientError::Api("AI worker is not running".to_string());
        match self.session.screen() {
            Screen::Loading {
                pending: crate::models::PendingCall::Grading { .. },
                ..
            } => AiResponse::Graded {
                ticket,
                result: Err(GradingError::Client(error)),
            },
            _ => AiResponse::Generated {
                ticket,
                result: Err(GenerationError::Client(error)),
            },
        }
    }

    fn pending_ticket(&self) -> u64 {
        self.session.awaiting_ticket().unwrap_or_default()
    }

    fn on_screen_changed(&mut self) {
        let keep_question = matches!(self.session.screen().kind(), ScreenKind::Quiz)
            && self.session.screen().error().is_some();
        if keep_question {
            // Back from a failed grading: stay where the user was.
            self.view.results_scroll = 0;
        } else {
            self.reset_view();
        }
    }

    fn reset_view(&mut self) {
        let selected_level = self.view.selected_level;
        self.view = ViewState {
            selected_level,
            ..ViewState::default()
        };
    }
}
