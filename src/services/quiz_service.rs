use std::collections::HashMap;
use std::sync::Arc;

use crate::dto::quiz_dto::CreateQuizForm;
use crate::error::{Error, Result};
use crate::middleware::Principal;
use crate::models::{Quiz, QuizDetail, QuizSummary};
use crate::repositories::QuizRepository;
use crate::services::grading_service::GradingService;

#[derive(Debug, Clone)]
pub struct QuizResult {
    pub quiz: Quiz,
    pub score: usize,
    pub total: usize,
}

#[derive(Clone)]
pub struct QuizService {
    quizzes: Arc<dyn QuizRepository>,
}

impl QuizService {
    pub fn new(quizzes: Arc<dyn QuizRepository>) -> Self {
        Self { quizzes }
    }

    pub async fn create_quiz(&self, principal: &Principal, form: CreateQuizForm) -> Result<i64> {
        let Some(author) = principal.user() else {
            return Err(Error::Unauthenticated);
        };

        let draft = form.into_draft()?;
        draft.check()?;

        let quiz_id = self.quizzes.insert(author.id, &draft).await?;
        tracing::info!(
            quiz_id,
            user_id = author.id,
            questions = draft.questions.len(),
            "Created quiz"
        );
        Ok(quiz_id)
    }

    pub async fn get_quiz_for_display(&self, quiz_id: i64) -> Result<QuizDetail> {
        self.quizzes
            .find_by_id(quiz_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("Quiz {} does not exist", quiz_id)))
    }

    pub async fn submit_answers(
        &self,
        quiz_id: i64,
        answers: &HashMap<String, String>,
    ) -> Result<QuizResult> {
        let detail = self.get_quiz_for_display(quiz_id).await?;
        let score = GradingService::score(&detail.questions, answers);
        tracing::debug!(quiz_id, score, total = detail.questions.len(), "Scored submission");
        Ok(QuizResult {
            total: detail.questions.len(),
            quiz: detail.quiz,
            score,
        })
    }

    pub async fn list_quizzes(&self) -> Result<Vec<QuizSummary>> {
        self.quizzes.list_all().await
    }

    /// Only the author may delete; questions go with the quiz.
    pub async fn delete_quiz(&self, principal: &Principal, quiz_id: i64) -> Result<()> {
        let Some(user) = principal.user() else {
            return Err(Error::Unauthenticated);
        };

        let detail = self.get_quiz_for_display(quiz_id).await?;
        if detail.quiz.created_by != user.id {
            return Err(Error::Forbidden(
                "Only the quiz author can delete it.".to_string(),
            ));
        }

        if !self.quizzes.delete_cascade(quiz_id).await? {
            return Err(Error::NotFound(format!("Quiz {} does not exist", quiz_id)));
        }
        tracing::info!(quiz_id, user_id = user.id, "Deleted quiz");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Question;
    use crate::repositories::quiz_repository::MockQuizRepository;
    use crate::utils::session::SessionUser;

    fn author() -> Principal {
        Principal::User(SessionUser {
            id: 1,
            username: "author".into(),
        })
    }

    fn one_question_form() -> CreateQuizForm {
        CreateQuizForm {
            title: "Geography".into(),
            description: "".into(),
            question_text: vec!["Capital of France?".into()],
            option1: vec!["Paris".into()],
            option2: vec!["Rome".into()],
            option3: vec!["Berlin".into()],
            option4: vec!["Madrid".into()],
            correct_answer: vec!["Paris".into()],
        }
    }

    fn detail(created_by: i64) -> QuizDetail {
        let question = |id: i64, correct: &str| Question {
            id,
            question_text: format!("q{id}"),
            option1: "Paris".into(),
            option2: "Rome".into(),
            option3: "41".into(),
            option4: "42".into(),
            correct_answer: correct.into(),
            quiz_id: 9,
        };
        QuizDetail {
            quiz: Quiz {
                id: 9,
                title: "Mixed".into(),
                description: "".into(),
                created_by,
            },
            questions: vec![question(1, "Paris"), question(2, "42")],
        }
    }

    #[tokio::test]
    async fn anonymous_author_is_rejected_before_any_write() {
        let mut repo = MockQuizRepository::new();
        repo.expect_insert().never();
        let svc = QuizService::new(Arc::new(repo));

        let err = svc
            .create_quiz(&Principal::Anonymous, one_question_form())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Unauthenticated));
    }

    #[tokio::test]
    async fn malformed_form_is_rejected_before_any_write() {
        let mut repo = MockQuizRepository::new();
        repo.expect_insert().never();
        let svc = QuizService::new(Arc::new(repo));

        let mut form = one_question_form();
        form.correct_answer.clear();
        let err = svc.create_quiz(&author(), form).await.unwrap_err();
        assert!(matches!(err, Error::MalformedQuizSubmission(_)));
    }

    #[tokio::test]
    async fn create_passes_structured_questions_to_repository() {
        let mut repo = MockQuizRepository::new();
        repo.expect_insert()
            .withf(|owner, draft| {
                *owner == 1
                    && draft.questions.len() == 1
                    && draft.questions[0].option3 == "Berlin"
            })
            .times(1)
            .returning(|_, _| Ok(42));
        let svc = QuizService::new(Arc::new(repo));

        assert_eq!(svc.create_quiz(&author(), one_question_form()).await.unwrap(), 42);
    }

    #[tokio::test]
    async fn submit_scores_against_stored_answers() {
        let mut repo = MockQuizRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(Some(detail(1))));
        let svc = QuizService::new(Arc::new(repo));

        let partial: HashMap<String, String> =
            [("1".to_string(), "Paris".to_string()), ("2".to_string(), "41".to_string())].into();
        let result = svc.submit_answers(9, &partial).await.unwrap();
        assert_eq!((result.score, result.total), (1, 2));

        let result = svc.submit_answers(9, &HashMap::new()).await.unwrap();
        assert_eq!(result.score, 0);

        let all: HashMap<String, String> =
            [("1".to_string(), "Paris".to_string()), ("2".to_string(), "42".to_string())].into();
        let result = svc.submit_answers(9, &all).await.unwrap();
        assert_eq!(result.score, result.total);
    }

    #[tokio::test]
    async fn submit_to_unknown_quiz_is_not_found() {
        let mut repo = MockQuizRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));
        let svc = QuizService::new(Arc::new(repo));

        let err = svc.submit_answers(404, &HashMap::new()).await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn only_the_author_can_delete() {
        let mut repo = MockQuizRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(Some(detail(7))));
        repo.expect_delete_cascade().never();
        let svc = QuizService::new(Arc::new(repo));

        let err = svc.delete_quiz(&author(), 9).await.unwrap_err();
        assert!(matches!(err, Error::Forbidden(_)));
    }

    #[tokio::test]
    async fn author_delete_cascades() {
        let mut repo = MockQuizRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(Some(detail(1))));
        repo.expect_delete_cascade()
            .withf(|id| *id == 9)
            .times(1)
            .returning(|_| Ok(true));
        let svc = QuizService::new(Arc::new(repo));

        svc.delete_quiz(&author(), 9).await.unwrap();
    }
}
