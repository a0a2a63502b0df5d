//! Scripted gateway for tests: replays queued replies and records every call.

use super::ContentGateway;
use crate::error::{ClientError, GenerationError, GradingError};
use crate::models::{Explanation, Level, Question, Quiz, Results, VocabularyEntry};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    Generate {
        level: Level,
        prior_questions: Vec<String>,
    },
    Grade {
        level: Level,
        answers: Vec<usize>,
    },
}

#[derive(Default)]
pub struct ScriptedGateway {
    quizzes: Mutex<VecDeque<Result<Quiz, GenerationError>>>,
    results: Mutex<VecDeque<Result<Results, GradingError>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_quiz(&self, quiz: Result<Quiz, GenerationError>) {
        self.quizzes.lock().unwrap().push_back(quiz);
    }

    pub fn push_results(&self, results: Result<Results, GradingError>) {
        self.results.lock().unwrap().push_back(results);
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContentGateway for ScriptedGateway {
    async fn generate_quiz(
        &self,
        level: Level,
        prior_questions: &[String],
    ) -> Result<Quiz, GenerationError> {
        self.calls.lock().unwrap().push(RecordedCall::Generate {
            level,
            prior_questions: prior_questions.to_vec(),
        });
        self.quizzes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(GenerationError::Client(ClientError::EmptyResponse)))
    }

    async fn grade_and_explain(
        &self,
        _quiz: &Quiz,
        answers: &[usize],
        level: Level,
    ) -> Result<Results, GradingError> {
        self.calls.lock().unwrap().push(RecordedCall::Grade {
            level,
            answers: answers.to_vec(),
        });
        self.results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(GradingError::Client(ClientError::EmptyResponse)))
    }
}

/// A contract-conforming quiz whose question texts carry `tag`.
pub fn sample_quiz(level: Level, tag: &str) -> Quiz {
    let passage = level
        .has_passage()
        .then(|| format!("Passage for {}", tag));
    Quiz {
        title: level.title().to_string(),
        questions: (0..3)
            .map(|i| Question {
                passage: passage.clone(),
                question: format!("{} question {}", tag, i + 1),
                options: vec!["A".into(), "B".into(), "C".into(), "D".into()],
                correct_answer_index: i,
            })
            .collect(),
    }
}

pub fn sample_results(level: Level, score: usize) -> Results {
    Results {
        score,
        total: 3,
        passage_summary: level.has_passage().then(|| "Summary".to_string()),
        explanations: (0..3)
            .map(|i| Explanation {
                detailed_explanation: format!("Explanation {}", i + 1),
            })
            .collect(),
        vocabulary: (0..level.profile().vocabulary_count)
            .map(|i| VocabularyEntry {
                word: format!("word{}", i),
                meaning: format!("meaning{}", i),
                example: format!("Example {}.", i),
            })
            .collect(),
        level,
    }
}
