use crate::error::SessionError;
use crate::logger;
use crate::models::{AiRequest, AiResponse, AnswerSet, Level, PendingCall, Screen};
use std::sync::Arc;

pub const GENERATING_MESSAGE: &str = "The AI is writing questions for this level...";
pub const GRADING_MESSAGE: &str = "The AI is grading your answers and writing explanations...";
pub const GENERATION_FAILED_MESSAGE: &str =
    "Failed to generate the quiz. Please wait a moment and try again.";
pub const GRADING_FAILED_MESSAGE: &str =
    "Failed to grade the quiz and write explanations. Please wait a moment and try again.";

/// Owns the screen state machine and the prior-question history.
///
/// Operations that need the external model move the session to
/// `Screen::Loading` and hand back an `AiRequest`; the settled `AiResponse` is
/// fed to `resolve`, which computes the next screen in one step. Only the
/// response carrying the ticket of the latest request is applied.
#[derive(Debug, Default)]
pub struct QuizSession {
    screen: Screen,
    history: Vec<String>,
    next_ticket: u64,
    awaiting: Option<u64>,
}

impl QuizSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Question texts of every quiz generated since the level was chosen.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.screen, Screen::Loading { .. })
    }

    /// Ticket of the request the session is currently waiting on.
    pub fn awaiting_ticket(&self) -> Option<u64> {
        self.awaiting
    }

    pub fn select_level(&mut self, level: Level) -> Result<AiRequest, SessionError> {
        match self.screen {
            Screen::LevelSelect { .. } => {}
            Screen::Loading { .. } => return Err(SessionError::Busy),
            _ => return Err(SessionError::WrongScreen),
        }
        Ok(self.begin_generation(level))
    }

    /// Regenerate at the current level, keeping the history.
    pub fn request_new_quiz(&mut self) -> Result<AiRequest, SessionError> {
        let level = match &self.screen {
            Screen::Quiz { level, .. } | Screen::Results { level, .. } => *level,
            Screen::Loading { .. } => return Err(SessionError::Busy),
            Screen::LevelSelect { .. } => return Err(SessionError::WrongScreen),
        };
        Ok(self.begin_generation(level))
    }

    pub fn choose_answer(&mut self, question: usize, option: usize) -> Result<(), SessionError> {
        match &mut self.screen {
            Screen::Quiz { quiz, answers, .. } => {
                let in_range = quiz
                    .questions
                    .get(question)
                    .is_some_and(|q| option < q.options.len());
                if !in_range || !answers.choose(question, option) {
                    return Err(SessionError::InvalidSelection { question, option });
                }
                Ok(())
            }
            Screen::Loading { .. } => Err(SessionError::Busy),
            _ => Err(SessionError::WrongScreen),
        }
    }

    /// Submit a full answer set for grading. Incomplete sets are refused
    /// without any state change.
    pub fn submit_answers(&mut self, answers: AnswerSet) -> Result<AiRequest, SessionError> {
        let (level, quiz) = match &self.screen {
            Screen::Quiz { level, quiz, .. } => (*level, Arc::clone(quiz)),
            Screen::Loading { .. } => return Err(SessionError::Busy),
            _ => return Err(SessionError::WrongScreen),
        };

        if answers.len() != quiz.questions.len() || !answers.is_complete() {
            return Err(SessionError::IncompleteAnswers);
        }

        let ticket = self.issue_ticket();
        let indices = answers.answered();
        logger::log(&format!("Submitting answers {:?} (ticket {})", indices, ticket));
        self.screen = Screen::Loading {
            level,
            message: GRADING_MESSAGE,
            pending: PendingCall::Grading {
                quiz: Arc::clone(&quiz),
                answers,
            },
        };

        Ok(AiRequest::Grade {
            ticket,
            level,
            quiz,
            answers: indices,
        })
    }

    /// Submit whatever the quiz screen currently holds.
    pub fn submit_current_answers(&mut self) -> Result<AiRequest, SessionError> {
        let answers = match &self.screen {
            Screen::Quiz { answers, .. } => answers.clone(),
            Screen::Loading { .. } => return Err(SessionError::Busy),
            _ => return Err(SessionError::WrongScreen),
        };
        self.submit_answers(answers)
    }

    /// Drop everything tied to the current level and go back to level selection.
    pub fn select_another_level(&mut self) {
        if let Some(ticket) = self.awaiting.take() {
            logger::log(&format!("Abandoning in-flight request (ticket {})", ticket));
        }
        self.history.clear();
        self.screen = Screen::LevelSelect { error: None };
    }

    /// Apply a settled external call. Returns `false` when the response
    /// belongs to an abandoned request and was ignored.
    pub fn resolve(&mut self, response: AiResponse) -> bool {
        if self.awaiting != Some(response.ticket()) {
            logger::log(&format!(
                "Ignoring stale response (ticket {}, awaiting {:?})",
                response.ticket(),
                self.awaiting
            ));
            return false;
        }
        self.awaiting = None;

        let current = std::mem::take(&mut self.screen);
        self.screen = self.transition(current, response);
        true
    }

    fn transition(&mut self, current: Screen, response: AiResponse) -> Screen {
        let Screen::Loading { level, pending, .. } = current else {
            return current;
        };

        match (pending, response) {
            (PendingCall::Generation, AiResponse::Generated { result: Ok(quiz), .. }) => {
                logger::log(&format!(
                    "Quiz ready for {:?} with {} questions",
                    level,
                    quiz.questions.len()
                ));
                self.history
                    .extend(quiz.question_texts().map(String::from));
                let answers = AnswerSet::unanswered(quiz.questions.len());
                Screen::Quiz {
                    level,
                    quiz: Arc::new(quiz),
                    answers,
                    error: None,
                }
            }
            (PendingCall::Generation, AiResponse::Generated { result: Err(e), .. }) => {
                logger::log(&format!("Quiz generation failed: {}", e));
                Screen::LevelSelect {
                    error: Some(GENERATION_FAILED_MESSAGE.to_string()),
                }
            }
            (PendingCall::Grading { quiz, answers }, AiResponse::Graded { result: Ok(results), .. }) => {
                logger::log(&format!(
                    "Graded {:?}: {}/{}",
                    level, results.score, results.total
                ));
                Screen::Results {
                    level,
                    quiz,
                    answers: answers.answered(),
                    results: Arc::new(results),
                }
            }
            (PendingCall::Grading { quiz, answers }, AiResponse::Graded { result: Err(e), .. }) => {
                logger::log(&format!("Grading failed: {}", e));
                Screen::Quiz {
                    level,
                    quiz,
                    answers,
                    error: Some(GRADING_FAILED_MESSAGE.to_string()),
                }
            }
            (PendingCall::Generation, AiResponse::Graded { .. }) => {
                logger::log("Received grading response while generating");
                Screen::LevelSelect {
                    error: Some(GENERATION_FAILED_MESSAGE.to_string()),
                }
            }
            (PendingCall::Grading { quiz, answers }, AiResponse::Generated { .. }) => {
                logger::log("Received generation response while grading");
                Screen::Quiz {
                    level,
                    quiz,
                    answers,
                    error: Some(GRADING_FAILED_MESSAGE.to_string()),
                }
            }
        }
    }

    fn begin_generation(&mut self, level: Level) -> AiRequest {
        let ticket = self.issue_ticket();
        logger::log(&format!("Requesting quiz for {:?} (ticket {})", level, ticket));
        self.screen = Screen::Loading {
            level,
            message: GENERATING_MESSAGE,
            pending: PendingCall::Generation,
        };
        AiRequest::Generate {
            ticket,
            level,
            prior_questions: self.history.clone(),
        }
    }

    fn issue_ticket(&mut self) -> u64 {
        self.next_ticket += 1;
        self.awaiting = Some(self.next_ticket);
        self.next_ticket
    }
}
