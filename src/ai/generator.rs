use crate::ai::clean_json_response;
use crate::error::GenerationError;
use crate::models::{Level, Question, Quiz, OPTIONS_PER_QUESTION, QUESTIONS_PER_QUIZ};
use serde::Deserialize;

pub const GENERATION_SYSTEM_PROMPT: &str = "You are an expert tutor for Japanese university entrance exams. \
You know the last five years of entrance exam papers from the major universities and the Eiken tests in detail. \
Create a high quality short English quiz for the requested level. Respond strictly in JSON.";

#[derive(Debug, Deserialize)]
struct QuizRaw {
    passage: String,
    questions: Vec<QuestionRaw>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuestionRaw {
    question: String,
    options: Vec<String>,
    correct_answer_index: i64,
}

/// User prompt for quiz generation: level instructions, the JSON contract,
/// and, when there is history, the list of questions not to repeat.
pub fn build_generation_prompt(level: Level, prior_questions: &[String]) -> String {
    let profile = level.profile();
    let passage_rule = if level.has_passage() {
        format!(
            "\"passage\" must contain the reading passage (about {} words) that all questions refer to.",
            profile.passage_words
        )
    } else {
        "There is no reading passage for this level: \"passage\" must be an empty string.".to_string()
    };

    let mut prompt = format!(
        r#"{instructions}

IMPORTANT:

- Respond ONLY with this exact JSON structure (no markdown, no extra text):
{{
    "passage": "reading passage, or an empty string",
    "questions": [
        {{
            "question": "question text",
            "options": ["option 1", "option 2", "option 3", "option 4"],
            "correctAnswerIndex": index of the correct option (0-3)
        }}
    ]
}}
- "questions" must contain exactly {count} items and every "options" array exactly {options} strings.
- {passage_rule}
"#,
        instructions = profile.instructions,
        count = QUESTIONS_PER_QUIZ,
        options = OPTIONS_PER_QUESTION,
        passage_rule = passage_rule,
    );

    if !prior_questions.is_empty() {
        prompt.push_str("\nNote: generate new questions that differ from the following ones:\n");
        prompt.push_str(&prior_questions.join("\n"));
        prompt.push('\n');
    }

    prompt
}

/// Parse a generation reply and enforce the quiz contract.
pub fn parse_quiz(level: Level, response: &str) -> Result<Quiz, GenerationError> {
    let cleaned = clean_json_response(response);
    let raw: QuizRaw = serde_json::from_str(&cleaned)?;

    if raw.questions.len() != QUESTIONS_PER_QUIZ {
        return Err(GenerationError::Contract(format!(
            "expected {} questions, got {}",
            QUESTIONS_PER_QUIZ,
            raw.questions.len()
        )));
    }

    let passage = raw.passage.trim();
    let passage = if level.has_passage() {
        if passage.is_empty() {
            return Err(GenerationError::Contract(format!(
                "{} requires a reading passage",
                level.title()
            )));
        }
        Some(passage.to_string())
    } else {
        None
    };

    let questions = raw
        .questions
        .into_iter()
        .enumerate()
        .map(|(i, q)| {
            if q.question.trim().is_empty() {
                return Err(GenerationError::Contract(format!(
                    "question {} has no text",
                    i + 1
                )));
            }
            if q.options.len() != OPTIONS_PER_QUESTION {
                return Err(GenerationError::Contract(format!(
                    "question {} has {} options, expected {}",
                    i + 1,
                    q.options.len(),
                    OPTIONS_PER_QUESTION
                )));
            }
            let correct_answer_index = usize::try_from(q.correct_answer_index)
                .ok()
                .filter(|idx| *idx < q.options.len())
                .ok_or_else(|| {
                    GenerationError::Contract(format!(
                        "question {} has correct index {} out of range",
                        i + 1,
                        q.correct_answer_index
                    ))
                })?;

            Ok(Question {
                passage: passage.clone(),
                question: q.question,
                options: q.options,
                correct_answer_index,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Quiz {
        title: level.title().to_string(),
        questions,
    })
}
