use crate::ai::clean_json_response;
use crate::error::GradingError;
use crate::models::{Explanation, Level, Quiz, Results, VocabularyEntry};
use serde::Deserialize;

pub const GRADING_SYSTEM_PROMPT: &str = "You are an expert tutor for Japanese university entrance exams. \
Grade the quiz a student submitted and write careful, easy to follow explanations \
so the student understands why each answer is right and can improve next time. Respond strictly in JSON.";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResultsRaw {
    score: i64,
    #[serde(default)]
    passage_summary: Option<String>,
    explanations: Vec<ExplanationRaw>,
    vocabulary: Vec<VocabularyRaw>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExplanationRaw {
    detailed_explanation: String,
}

#[derive(Debug, Deserialize)]
struct VocabularyRaw {
    word: String,
    meaning: String,
    example: String,
}

/// Check the submitted indices against the quiz before anything is sent.
pub fn validate_answers(quiz: &Quiz, answers: &[usize]) -> Result<(), GradingError> {
    if answers.len() != quiz.questions.len() {
        return Err(GradingError::AnswerMismatch(format!(
            "{} answers for {} questions",
            answers.len(),
            quiz.questions.len()
        )));
    }
    for (i, (question, answer)) in quiz.questions.iter().zip(answers).enumerate() {
        if *answer >= question.options.len() {
            return Err(GradingError::AnswerMismatch(format!(
                "answer {} points at option {} of {}",
                i + 1,
                answer,
                question.options.len()
            )));
        }
    }
    Ok(())
}

/// User prompt for grading. Expects `answers` already checked by `validate_answers`.
pub fn build_grading_prompt(quiz: &Quiz, answers: &[usize], level: Level) -> String {
    let has_passage = level.has_passage();
    let vocabulary_count = level.profile().vocabulary_count;

    let mut prompt = String::from("Grade the following quiz and explain every question in detail.\n\n");
    prompt.push_str(&format!("Level: {}\n\n", quiz.title));

    if let Some(passage) = quiz.passage() {
        prompt.push_str(&format!("Passage:\n{}\n\n", passage));
    }

    prompt.push_str("Questions and correct answers:\n");
    for (i, q) in quiz.questions.iter().enumerate() {
        prompt.push_str(&format!(
            "\nQuestion {}:\n{}\nOptions: {}\nCorrect answer: {}\n",
            i + 1,
            q.question,
            q.options.join(", "),
            q.correct_option().unwrap_or_default()
        ));
    }

    prompt.push_str("\nStudent answers:\n");
    for (i, (q, answer)) in quiz.questions.iter().zip(answers).enumerate() {
        let chosen = q.options.get(*answer).map(String::as_str).unwrap_or_default();
        prompt.push_str(&format!("Answer to question {}: {}\n", i + 1, chosen));
    }

    let mut step = 1;
    prompt.push_str("\nInstructions:\n");
    prompt.push_str(&format!(
        "{}. Score: count how many of the {} questions were answered correctly.\n",
        step,
        quiz.questions.len()
    ));
    step += 1;
    if has_passage {
        prompt.push_str(&format!(
            "{}. Summary: write a concise summary of the whole passage.\n",
            step
        ));
        step += 1;
    }
    prompt.push_str(&format!(
        "{}. Explanations: for every question, explain the logical grounds that make the correct answer right, \
and explain concretely why each of the other options is wrong. One explanation per question, in question order.\n",
        step
    ));
    step += 1;
    prompt.push_str(&format!(
        "{}. Vocabulary: pick exactly {} important words or phrases that often appear in entrance exams \
from the questions{}. For each give the word or phrase, its meaning in Japanese, and one English example sentence.\n",
        step,
        vocabulary_count,
        if has_passage { " and the passage" } else { "" }
    ));

    prompt.push_str(&format!(
        r#"
IMPORTANT:

- Respond ONLY with this exact JSON structure (no markdown, no extra text):
{{
    "score": number of correct answers,
    "passageSummary": "{}",
    "explanations": [{{"detailedExplanation": "explanation"}}],
    "vocabulary": [{{"word": "word or phrase", "meaning": "meaning in Japanese", "example": "English example sentence"}}]
}}
- "explanations" must contain exactly {} items.
"#,
        if has_passage {
            "summary of the passage"
        } else {
            "empty string"
        },
        quiz.questions.len()
    ));

    prompt
}

/// Parse a grading reply, enforce the results contract, and attach `total` and `level`.
pub fn parse_results(quiz: &Quiz, level: Level, response: &str) -> Result<Results, GradingError> {
    let cleaned = clean_json_response(response);
    let raw: ResultsRaw = serde_json::from_str(&cleaned)?;
    let total = quiz.questions.len();

    if raw.explanations.len() != total {
        return Err(GradingError::Contract(format!(
            "expected {} explanations, got {}",
            total,
            raw.explanations.len()
        )));
    }

    let score = usize::try_from(raw.score)
        .ok()
        .filter(|s| *s <= total)
        .ok_or_else(|| {
            GradingError::Contract(format!("score {} outside 0..={}", raw.score, total))
        })?;

    let expected_vocabulary = level.profile().vocabulary_count;
    if raw.vocabulary.len() != expected_vocabulary {
        return Err(GradingError::Contract(format!(
            "expected {} vocabulary entries, got {}",
            expected_vocabulary,
            raw.vocabulary.len()
        )));
    }

    let passage_summary = raw
        .passage_summary
        .filter(|_| level.has_passage())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    Ok(Results {
        score,
        total,
        passage_summary,
        explanations: raw
            .explanations
            .into_iter()
            .map(|e| Explanation {
                detailed_explanation: e.detailed_explanation,
            })
            .collect(),
        vocabulary: raw
            .vocabulary
            .into_iter()
            .map(|v| VocabularyEntry {
                word: v.word,
                meaning: v.meaning,
                example: v.example,
            })
            .collect(),
        level,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Question;

    fn quiz_with_passage(passage: Option<&str>) -> Quiz {
        Quiz {
            title: "Test level".to_string(),
            questions: vec![
                Question {
                    passage: passage.map(String::from),
                    question: "Pick the verb".to_string(),
                    options: vec!["run".into(), "red".into(), "rapid".into(), "rarely".into()],
                    correct_answer_index: 0,
                },
                Question {
                    passage: passage.map(String::from),
                    question: "Pick the adverb".to_string(),
                    options: vec!["run".into(), "red".into(), "rapid".into(), "rarely".into()],
                    correct_answer_index: 3,
                },
                Question {
                    passage: passage.map(String::from),
                    question: "Pick the colour".to_string(),
                    options: vec!["run".into(), "red".into(), "rapid".into(), "rarely".into()],
                    correct_answer_index: 1,
                },
            ],
        }
    }

    fn vocabulary_json(count: usize) -> String {
        let entries: Vec<String> = (0..count)
            .map(|i| {
                format!(
                    r#"{{"word": "word{}", "meaning": "meaning{}", "example": "Example {}."}}"#,
                    i, i, i
                )
            })
            .collect();
        format!("[{}]", entries.join(","))
    }

    fn reply(score: i64, explanations: usize, vocabulary: usize, summary: &str) -> String {
        let explanations: Vec<String> = (0..explanations)
            .map(|i| format!(r#"{{"detailedExplanation": "Because {}."}}"#, i))
            .collect();
        format!(
            r#"{{"score": {}, "passageSummary": "{}", "explanations": [{}], "vocabulary": {}}}"#,
            score,
            summary,
            explanations.join(","),
            vocabulary_json(vocabulary)
        )
    }

    #[test]
    fn test_parse_results_attaches_total_and_level() {
        let quiz = quiz_with_passage(None);
        let results = parse_results(&quiz, Level::Eiken, &reply(2, 3, 5, "")).unwrap();
        assert_eq!(results.score, 2);
        assert_eq!(results.total, 3);
        assert_eq!(results.level, Level::Eiken);
        assert_eq!(results.explanations.len(), 3);
        assert_eq!(results.vocabulary.len(), 5);
        assert_eq!(results.passage_summary, None);
        assert_eq!(results.explanations[1].detailed_explanation, "Because 1.");
    }

    #[test]
    fn test_summary_kept_for_passage_level() {
        let quiz = quiz_with_passage(Some("A passage."));
        let results =
            parse_results(&quiz, Level::WasedaLetters, &reply(3, 3, 10, "It is about words.")).unwrap();
        assert_eq!(results.passage_summary.as_deref(), Some("It is about words."));
    }

    #[test]
    fn test_summary_dropped_for_grammar_level() {
        let quiz = quiz_with_passage(None);
        let results = parse_results(&quiz, Level::Eiken, &reply(1, 3, 5, "Stray summary")).unwrap();
        assert_eq!(results.passage_summary, None);
    }

    #[test]
    fn test_summary_may_be_absent() {
        let quiz = quiz_with_passage(None);
        let json = format!(
            r#"{{"score": 0, "explanations": [{{"detailedExplanation": "a"}}, {{"detailedExplanation": "b"}}, {{"detailedExplanation": "c"}}], "vocabulary": {}}}"#,
            vocabulary_json(5)
        );
        let results = parse_results(&quiz, Level::Eiken, &json).unwrap();
        assert_eq!(results.score, 0);
    }

    #[test]
    fn test_explanation_count_mismatch_rejected() {
        let quiz = quiz_with_passage(None);
        let result = parse_results(&quiz, Level::Eiken, &reply(2, 2, 5, ""));
        assert!(matches!(result, Err(GradingError::Contract(_))));
    }

    #[test]
    fn test_score_out_of_range_rejected() {
        let quiz = quiz_with_passage(None);
        assert!(matches!(
            parse_results(&quiz, Level::Eiken, &reply(4, 3, 5, "")),
            Err(GradingError::Contract(_))
        ));
        assert!(matches!(
            parse_results(&quiz, Level::Eiken, &reply(-1, 3, 5, "")),
            Err(GradingError::Contract(_))
        ));
    }

    #[test]
    fn test_vocabulary_count_must_match_level() {
        let grammar = quiz_with_passage(None);
        for count in [0, 4, 6] {
            assert!(matches!(
                parse_results(&grammar, Level::Eiken, &reply(2, 3, count, "")),
                Err(GradingError::Contract(_))
            ));
        }

        let reading = quiz_with_passage(Some("A passage."));
        for count in [1, 9, 11] {
            assert!(matches!(
                parse_results(&reading, Level::WasedaLetters, &reply(1, 3, count, "Summary")),
                Err(GradingError::Contract(_))
            ));
        }
        assert!(parse_results(&reading, Level::WasedaSils, &reply(1, 3, 10, "Summary")).is_ok());
    }

    #[test]
    fn test_malformed_reply() {
        let quiz = quiz_with_passage(None);
        assert!(matches!(
            parse_results(&quiz, Level::Eiken, r#"{"score": 1}"#),
            Err(GradingError::Malformed(_))
        ));
    }

    #[test]
    fn test_validate_answers() {
        let quiz = quiz_with_passage(None);
        assert!(validate_answers(&quiz, &[0, 3, 1]).is_ok());
        assert!(matches!(
            validate_answers(&quiz, &[0, 3]),
            Err(GradingError::AnswerMismatch(_))
        ));
        assert!(matches!(
            validate_answers(&quiz, &[0, 4, 1]),
            Err(GradingError::AnswerMismatch(_))
        ));
    }

    #[test]
    fn test_grading_prompt_contents_grammar_level() {
        let quiz = quiz_with_passage(None);
        let prompt = build_grading_prompt(&quiz, &[1, 3, 2], Level::Eiken);
        assert!(prompt.contains("Level: Test level"));
        assert!(prompt.contains("Correct answer: run"));
        assert!(prompt.contains("Answer to question 1: red"));
        assert!(prompt.contains("Answer to question 2: rarely"));
        assert!(prompt.contains("Answer to question 3: rapid"));
        assert!(prompt.contains("pick exactly 5 important words"));
        assert!(!prompt.contains("Summary:"));
        assert!(!prompt.contains("Passage:"));
    }

    #[test]
    fn test_grading_prompt_contents_passage_level() {
        let quiz = quiz_with_passage(Some("Shared passage text."));
        let prompt = build_grading_prompt(&quiz, &[0, 0, 0], Level::WasedaSils);
        assert_eq!(prompt.matches("Shared passage text.").count(), 1);
        assert!(prompt.contains("2. Summary:"));
        assert!(prompt.contains("4. Vocabulary: pick exactly 10 important words"));
    }
}
