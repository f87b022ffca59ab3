use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::dto::quiz_dto::QuizDraft;
use crate::error::Result;
use crate::models::{Question, Quiz, QuizDetail, QuizSummary};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuizRepository: Send + Sync {
    /// Persists the quiz and all of its questions as one unit.
    async fn insert(&self, created_by: i64, draft: &QuizDraft) -> Result<i64>;
    async fn find_by_id(&self, id: i64) -> Result<Option<QuizDetail>>;
    async fn list_all(&self) -> Result<Vec<QuizSummary>>;
    /// Returns false when no quiz had that id.
    async fn delete_cascade(&self, id: i64) -> Result<bool>;
}

#[derive(Clone)]
pub struct SqliteQuizRepository {
    pool: SqlitePool,
}

impl SqliteQuizRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QuizRepository for SqliteQuizRepository {
    async fn insert(&self, created_by: i64, draft: &QuizDraft) -> Result<i64> {
        let mut tx = self.pool.begin().await?;

        // Questions reference the quiz id, so the quiz row goes first.
        let quiz_id = sqlx::query(
            "INSERT INTO quiz (title, description, created_by) VALUES (?1, ?2, ?3)",
        )
        .bind(&draft.title)
        .bind(&draft.description)
        .bind(created_by)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

        for q in &draft.questions {
            sqlx::query(
                r#"
                INSERT INTO question
                    (question_text, option1, option2, option3, option4, correct_answer, quiz_id)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                "#,
            )
            .bind(&q.question_text)
            .bind(&q.option1)
            .bind(&q.option2)
            .bind(&q.option3)
            .bind(&q.option4)
            .bind(&q.correct_answer)
            .bind(quiz_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(quiz_id)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<QuizDetail>> {
        let Some(quiz) = sqlx::query_as::<_, Quiz>(
            "SELECT id, title, description, created_by FROM quiz WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        else {
            return Ok(None);
        };

        let questions = sqlx::query_as::<_, Question>(
            r#"
            SELECT id, question_text, option1, option2, option3, option4, correct_answer, quiz_id
            FROM question
            WHERE quiz_id = ?1
            ORDER BY id
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(QuizDetail { quiz, questions }))
    }

    async fn list_all(&self) -> Result<Vec<QuizSummary>> {
        let quizzes = sqlx::query_as::<_, QuizSummary>(
            "SELECT id, title, description FROM quiz ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(quizzes)
    }

    async fn delete_cascade(&self, id: i64) -> Result<bool> {
        let done = sqlx::query("DELETE FROM quiz WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(done.rows_affected() > 0)
    }
}
