use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Number of questions every generated quiz carries.
pub const QUESTIONS_PER_QUIZ: usize = 3;
/// Number of answer options every question carries.
pub const OPTIONS_PER_QUESTION: usize = 4;

/// The three fixed quiz tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Level {
    /// Eiken Grade 2 to Pre-1: grammar and vocabulary, no passage.
    Eiken,
    /// Waseda School of Letters: ~300 word academic passage.
    WasedaLetters,
    /// Waseda School of International Liberal Studies: 500-600 word passage.
    WasedaSils,
}

/// Fixed per-level record used for prompts and display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelProfile {
    pub title: &'static str,
    pub description: &'static str,
    pub instructions: &'static str,
    pub passage_words: u32,
    pub vocabulary_count: usize,
}

impl Level {
    pub const ALL: [Level; 3] = [Level::Eiken, Level::WasedaLetters, Level::WasedaSils];

    pub fn profile(self) -> LevelProfile {
        match self {
            Level::Eiken => LevelProfile {
                title: "Eiken Grade 2 to Pre-1",
                description: "Build the fundamentals and get used to the standard question formats.",
                instructions: "Write typical grammar and vocabulary questions at Eiken Grade 2 to Pre-1 level. \
                    Reflect the question trends of the last five years and include the points test takers most often get wrong.",
                passage_words: 0,
                vocabulary_count: 5,
            },
            Level::WasedaLetters => LevelProfile {
                title: "Waseda University School of Letters",
                description: "Standard long-passage reading. Accurate comprehension and question handling are tested.",
                instructions: "Model the English entrance exam of the Waseda University School of Letters. \
                    Write one academic passage of about 300 words and three reading comprehension questions about it. \
                    Keep the passage themes and question formats close to the trends of the last five years.",
                passage_words: 300,
                vocabulary_count: 10,
            },
            Level::WasedaSils => LevelProfile {
                title: "Waseda University School of International Liberal Studies",
                description: "Complex, abstract passages. Advanced vocabulary and logical reasoning are required.",
                instructions: "Model the English entrance exam of the Waseda University School of International Liberal Studies (SILS). \
                    Write one passage of about 500-600 words with a somewhat complex structure (several viewpoints or abstract concepts) \
                    and three questions that test deep comprehension and critical thinking. \
                    Keep the passage themes and question formats close to the trends of the last five years.",
                passage_words: 500,
                vocabulary_count: 10,
            },
        }
    }

    pub fn title(self) -> &'static str {
        self.profile().title
    }

    pub fn has_passage(self) -> bool {
        self.profile().passage_words > 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Shared reading text, identical on every question of a passage quiz.
    pub passage: Option<String>,
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer_index: usize,
}

impl Question {
    pub fn correct_option(&self) -> Option<&str> {
        self.options
            .get(self.correct_answer_index)
            .map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quiz {
    pub title: String,
    pub questions: Vec<Question>,
}

impl Quiz {
    /// The passage shared by all questions, if this is a passage quiz.
    pub fn passage(&self) -> Option<&str> {
        self.questions.first().and_then(|q| q.passage.as_deref())
    }

    pub fn question_texts(&self) -> impl Iterator<Item = &str> {
        self.questions.iter().map(|q| q.question.as_str())
    }
}

/// One slot per question, `None` until the user picks an option.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AnswerSet(Vec<Option<usize>>);

impl AnswerSet {
    pub fn unanswered(len: usize) -> Self {
        Self(vec![None; len])
    }

    pub fn from_slots(slots: Vec<Option<usize>>) -> Self {
        Self(slots)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, question: usize) -> Option<usize> {
        self.0.get(question).copied().flatten()
    }

    pub fn choose(&mut self, question: usize, option: usize) -> bool {
        match self.0.get_mut(question) {
            Some(slot) => {
                *slot = Some(option);
                true
            }
            None => false,
        }
    }

    pub fn answered_count(&self) -> usize {
        self.0.iter().filter(|a| a.is_some()).count()
    }

    pub fn is_complete(&self) -> bool {
        self.0.iter().all(Option::is_some)
    }

    /// Chosen indices with unanswered slots dropped.
    pub fn answered(&self) -> Vec<usize> {
        self.0.iter().flatten().copied().collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Explanation {
    pub detailed_explanation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyEntry {
    pub word: String,
    pub meaning: String,
    pub example: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Results {
    pub score: usize,
    pub total: usize,
    pub passage_summary: Option<String>,
    pub explanations: Vec<Explanation>,
    pub vocabulary: Vec<VocabularyEntry>,
    pub level: Level,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionOutcome {
    Correct,
    Incorrect,
}

/// Per-question correctness, derived locally from the stored answers.
pub fn question_outcomes(quiz: &Quiz, answers: &[usize]) -> Vec<QuestionOutcome> {
    quiz.questions
        .iter()
        .enumerate()
        .map(|(i, q)| {
            if answers.get(i) == Some(&q.correct_answer_index) {
                QuestionOutcome::Correct
            } else {
                QuestionOutcome::Incorrect
            }
        })
        .collect()
}

/// The four screens. Each variant carries only the data valid on that screen.
#[derive(Debug, Clone)]
pub enum Screen {
    LevelSelect {
        error: Option<String>,
    },
    Loading {
        level: Level,
        message: &'static str,
        pending: PendingCall,
    },
    Quiz {
        level: Level,
        quiz: Arc<Quiz>,
        answers: AnswerSet,
        error: Option<String>,
    },
    Results {
        level: Level,
        quiz: Arc<Quiz>,
        answers: Vec<usize>,
        results: Arc<Results>,
    },
}

impl Default for Screen {
    fn default() -> Self {
        Screen::LevelSelect { error: None }
    }
}

/// What a `Loading` screen is waiting for, and what to fall back to on failure.
#[derive(Debug, Clone)]
pub enum PendingCall {
    Generation,
    Grading { quiz: Arc<Quiz>, answers: AnswerSet },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenKind {
    LevelSelect,
    Loading,
    Quiz,
    Results,
}

impl Screen {
    pub fn kind(&self) -> ScreenKind {
        match self {
            Screen::LevelSelect { .. } => ScreenKind::LevelSelect,
            Screen::Loading { .. } => ScreenKind::Loading,
            Screen::Quiz { .. } => ScreenKind::Quiz,
            Screen::Results { .. } => ScreenKind::Results,
        }
    }

    pub fn level(&self) -> Option<Level> {
        match self {
            Screen::LevelSelect { .. } => None,
            Screen::Loading { level, .. }
            | Screen::Quiz { level, .. }
            | Screen::Results { level, .. } => Some(*level),
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Screen::LevelSelect { error } | Screen::Quiz { error, .. } => error.as_deref(),
            _ => None,
        }
    }
}

/// Work handed to the content gateway.
#[derive(Debug, Clone)]
pub enum AiRequest {
    Generate {
        ticket: u64,
        level: Level,
        prior_questions: Vec<String>,
    },
    Grade {
        ticket: u64,
        level: Level,
        quiz: Arc<Quiz>,
        answers: Vec<usize>,
    },
}

impl AiRequest {
    pub fn ticket(&self) -> u64 {
        match self {
            AiRequest::Generate { ticket, .. } | AiRequest::Grade { ticket, .. } => *ticket,
        }
    }
}

/// Settled result of an `AiRequest`.
#[derive(Debug)]
pub enum AiResponse {
    Generated {
        ticket: u64,
        result: Result<Quiz, crate::error::GenerationError>,
    },
    Graded {
        ticket: u64,
        result: Result<Results, crate::error::GradingError>,
    },
}

impl AiResponse {
    pub fn ticket(&self) -> u64 {
        match self {
            AiResponse::Generated { ticket, .. } | AiResponse::Graded { ticket, .. } => *ticket,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_quiz() -> Quiz {
        Quiz {
            title: "T".to_string(),
            questions: (0..3)
                .map(|i| Question {
                    passage: None,
                    question: format!("Q{}", i),
                    options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
                    correct_answer_index: i,
                })
                .collect(),
        }
    }

    #[test]
    fn test_level_profiles() {
        assert!(!Level::Eiken.has_passage());
        assert!(Level::WasedaLetters.has_passage());
        assert!(Level::WasedaSils.has_passage());
        assert_eq!(Level::Eiken.profile().vocabulary_count, 5);
        assert_eq!(Level::WasedaLetters.profile().vocabulary_count, 10);
        assert_eq!(Level::WasedaSils.profile().vocabulary_count, 10);
    }

    #[test]
    fn test_answer_set_completion() {
        let mut answers = AnswerSet::unanswered(3);
        assert!(!answers.is_complete());
        assert!(answers.choose(0, 1));
        assert!(answers.choose(2, 3));
        assert_eq!(answers.answered_count(), 2);
        assert_eq!(answers.answered(), vec![1, 3]);
        assert!(!answers.choose(3, 0));
        assert!(answers.choose(1, 0));
        assert!(answers.is_complete());
        assert_eq!(answers.get(1), Some(0));
    }

    #[test]
    fn test_question_outcomes() {
        let quiz = sample_quiz();
        let outcomes = question_outcomes(&quiz, &[0, 0, 2]);
        assert_eq!(
            outcomes,
            vec![
                QuestionOutcome::Correct,
                QuestionOutcome::Incorrect,
                QuestionOutcome::Correct
            ]
        );
    }

    #[test]
    fn test_quiz_passage_comes_from_first_question() {
        let mut quiz = sample_quiz();
        assert_eq!(quiz.passage(), None);
        for q in &mut quiz.questions {
            q.passage = Some("Text".to_string());
        }
        assert_eq!(quiz.passage(), Some("Text"));
        assert_eq!(quiz.questions[1].correct_option(), Some("b"));
    }
}
