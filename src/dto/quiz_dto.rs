use serde::Deserialize;
use validator::Validate;

use crate::error::{Error, Result};

/// Raw `/create` body: one repeated field per question attribute, index `i` of
/// every list describing question `i`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateQuizForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub question_text: Vec<String>,
    #[serde(default)]
    pub option1: Vec<String>,
    #[serde(default)]
    pub option2: Vec<String>,
    #[serde(default)]
    pub option3: Vec<String>,
    #[serde(default)]
    pub option4: Vec<String>,
    #[serde(default)]
    pub correct_answer: Vec<String>,
}

impl CreateQuizForm {
    /// Zips the parallel lists into question records. Lists of unequal
    /// length are rejected rather than truncated.
    pub fn into_draft(self) -> Result<QuizDraft> {
        let n = self.question_text.len();
        let lengths = [
            ("option1", self.option1.len()),
            ("option2", self.option2.len()),
            ("option3", self.option3.len()),
            ("option4", self.option4.len()),
            ("correct_answer", self.correct_answer.len()),
        ];
        if let Some((field, len)) = lengths.iter().find(|(_, len)| *len != n) {
            return Err(Error::MalformedQuizSubmission(format!(
                "{} question texts but {} values for {}",
                n, len, field
            )));
        }

        let questions = self
            .question_text
            .into_iter()
            .zip(self.option1)
            .zip(self.option2)
            .zip(self.option3)
            .zip(self.option4)
            .zip(self.correct_answer)
            .map(
                |(((((question_text, option1), option2), option3), option4), correct_answer)| {
                    QuestionDraft {
                        question_text,
                        option1,
                        option2,
                        option3,
                        option4,
                        correct_answer,
                    }
                },
            )
            .collect();

        Ok(QuizDraft {
            title: self.title,
            description: self.description,
            questions,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct QuizDraft {
    #[validate(length(max = 150, message = "must be at most 150 characters"))]
    pub title: String,
    pub description: String,
    pub questions: Vec<QuestionDraft>,
}

#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct QuestionDraft {
    pub question_text: String,
    #[validate(length(max = 150))]
    pub option1: String,
    #[validate(length(max = 150))]
    pub option2: String,
    #[validate(length(max = 150))]
    pub option3: String,
    #[validate(length(max = 150))]
    pub option4: String,
    #[validate(length(max = 150))]
    pub correct_answer: String,
}

impl QuestionDraft {
    pub fn has_matching_option(&self) -> bool {
        [&self.option1, &self.option2, &self.option3, &self.option4]
            .iter()
            .any(|o| **o == self.correct_answer)
    }
}

impl QuizDraft {
    /// Field limits plus the rule that every correct answer names one of its
    /// question's options.
    pub fn check(&self) -> Result<()> {
        self.validate()?;
        for (idx, q) in self.questions.iter().enumerate() {
            q.validate().map_err(|e| {
                Error::MalformedQuizSubmission(format!("question {}: {}", idx + 1, e))
            })?;
            if !q.has_matching_option() {
                return Err(Error::MalformedQuizSubmission(format!(
                    "question {}: correct answer must match one of the four options",
                    idx + 1
                )));
            }
        }
        Ok(())
    }
}
