//! Quiz scoring for the per-treatment comprehension check.
//!
//! Answers arrive as raw form values. A blank answer counts as unanswered.
//! A value that is not an integer, or that is not one of the scores the
//! question offers, is set aside and reported, never turned into a failure.

use crate::error::CoreError;
use crate::read_models::QuestionWithChoices;

/// Parses a submitted answer into a score.
///
/// Returns `Ok(None)` for a blank answer.
pub fn parse_score(raw: &str) -> Result<Option<i64>, CoreError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<i64>()
        .map(Some)
        .map_err(|e| CoreError::InvalidInput("score".to_string(), format!("'{trimmed}': {e}")))
}

/// Arithmetic mean of the collected scores, or `None` when nothing was collected.
pub fn average_score(scores: &[i64]) -> Option<f64> {
    if scores.is_empty() {
        return None;
    }
    let total: i64 = scores.iter().sum();
    Some(total as f64 / scores.len() as f64)
}

/// An answer that was submitted but could not be scored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedAnswer {
    pub question_id: i64,
    pub value: String,
    pub reason: CoreError,
}

/// The graded outcome of one quiz submission.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreSheet {
    scores: Vec<i64>,
    skipped: Vec<SkippedAnswer>,
}

impl ScoreSheet {
    /// Grades the answers for `questions`, in question order.
    ///
    /// `answer_for` receives a question's form field name and returns the
    /// submitted value, if any.
    pub fn grade<'a, F>(questions: &[QuestionWithChoices], mut answer_for: F) -> Self
    where
        F: FnMut(&str) -> Option<&'a str>,
    {
        let mut sheet = ScoreSheet::default();

        for question in questions {
            let Some(raw) = answer_for(&question.field_name()) else {
                continue;
            };
            let question_id = question.question.id;

            match parse_score(raw) {
                Ok(None) => {}
                Ok(Some(score)) if question.offers_score(score) => sheet.scores.push(score),
                Ok(Some(score)) => sheet.skipped.push(SkippedAnswer {
                    question_id,
                    value: raw.to_string(),
                    reason: CoreError::InvalidInput(
                        "score".to_string(),
                        format!("{score} is not offered by question {question_id}"),
                    ),
                }),
                Err(reason) => sheet.skipped.push(SkippedAnswer {
                    question_id,
                    value: raw.to_string(),
                    reason,
                }),
            }
        }

        sheet
    }

    pub fn scores(&self) -> &[i64] {
        &self.scores
    }

    /// Number of questions that contributed a score.
    pub fn answered(&self) -> usize {
        self.scores.len()
    }

    pub fn skipped(&self) -> &[SkippedAnswer] {
        &self.skipped
    }

    pub fn average(&self) -> Option<f64> {
        average_score(&self.scores)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{UnderstandingChoice, UnderstandingQuestion};
    use std::collections::HashMap;

    fn question(id: i64) -> QuestionWithChoices {
        QuestionWithChoices {
            question: UnderstandingQuestion {
                id,
                treatment_id: 1,
                text: format!("question {id}"),
                order_index: id,
            },
            choices: (1..=5)
                .map(|score| UnderstandingChoice {
                    id: id * 10 + score,
                    question_id: id,
                    label: format!("choice {score}"),
                    score,
                })
                .collect(),
        }
    }

    fn grade(questions: &[QuestionWithChoices], form: &HashMap<String, String>) -> ScoreSheet {
        ScoreSheet::grade(questions, |field| form.get(field).map(String::as_str))
    }

    fn form(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn average_of_five_four_three_is_four() {
        let questions = vec![question(1), question(2), question(3)];
        let sheet = grade(
            &questions,
            &form(&[("question_1", "5"), ("question_2", "4"), ("question_3", "3")]),
        );
        assert_eq!(sheet.scores(), &[5, 4, 3]);
        assert_eq!(sheet.average(), Some(4.0));
    }

    #[test]
    fn no_answers_means_no_average() {
        let questions = vec![question(1), question(2), question(3)];
        let sheet = grade(&questions, &HashMap::new());
        assert_eq!(sheet.answered(), 0);
        assert_eq!(sheet.average(), None);
    }

    #[test]
    fn missing_and_blank_answers_are_excluded() {
        let questions = vec![question(1), question(2), question(3)];
        let sheet = grade(&questions, &form(&[("question_1", "2"), ("question_3", "")]));
        assert_eq!(sheet.scores(), &[2]);
        assert_eq!(sheet.average(), Some(2.0));
        assert!(sheet.skipped().is_empty());
    }

    #[test]
    fn malformed_and_unoffered_scores_are_skipped() {
        let questions = vec![question(1), question(2), question(3)];
        let sheet = grade(
            &questions,
            &form(&[("question_1", "abc"), ("question_2", "9"), ("question_3", " 4 ")]),
        );
        assert_eq!(sheet.scores(), &[4]);
        assert_eq!(sheet.skipped().len(), 2);
        assert_eq!(sheet.skipped()[0].question_id, 1);
        assert_eq!(sheet.skipped()[1].value, "9");
    }

    #[test]
    fn answers_for_other_questions_are_ignored() {
        let questions = vec![question(1)];
        let sheet = grade(&questions, &form(&[("question_1", "3"), ("question_99", "5")]));
        assert_eq!(sheet.scores(), &[3]);
    }

    #[test]
    fn parse_score_rejects_non_integers() {
        assert_eq!(parse_score("  "), Ok(None));
        assert_eq!(parse_score("3"), Ok(Some(3)));
        assert!(matches!(parse_score("3.5"), Err(CoreError::InvalidInput(_, _))));
    }

    #[test]
    fn average_score_is_a_plain_mean() {
        assert_eq!(average_score(&[]), None);
        assert_eq!(average_score(&[1, 2]), Some(1.5));
    }
}
