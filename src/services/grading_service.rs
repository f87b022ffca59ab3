use std::collections::HashMap;

use crate::models::Question;

pub struct GradingService;

impl GradingService {
    /// One point per question whose submitted answer equals the stored
    /// correct answer exactly. Missing answers score nothing.
    pub fn score(questions: &[Question], answers: &HashMap<String, String>) -> usize {
        questions
            .iter()
            .filter(|q| {
                answers
                    .get(&q.answer_key())
                    .is_some_and(|given| *given == q.correct_answer)
            })
            .count()
    }
}
