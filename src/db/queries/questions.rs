use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqliteConnection, SqlitePool};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Question {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub category: Option<i64>,
    pub difficulty: Option<i64>,
}

pub async fn get_all_questions(pool: &SqlitePool) -> sqlx::Result<Vec<Question>> {
    sqlx::query_as::<_, Question>(
        r#"
        SELECT id, question, answer, category, difficulty FROM questions ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await
}

pub async fn get_question(pool: &SqlitePool, id: i64) -> sqlx::Result<Option<Question>> {
    sqlx::query_as::<_, Question>(
        r#"
        SELECT id, question, answer, category, difficulty FROM questions WHERE questions.id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn get_questions_for_category(
    pool: &SqlitePool,
    category: i64,
) -> sqlx::Result<Vec<Question>> {
    sqlx::query_as::<_, Question>(
        r#"
        SELECT id, question, answer, category, difficulty FROM questions
        WHERE questions.category = ?1
        ORDER BY id
        "#,
    )
    .bind(category)
    .fetch_all(pool)
    .await
}

/// Case-insensitive substring match on the question text, ordered by id.
/// SQLite `LIKE` only folds ASCII, so matching happens here with full
/// Unicode lowercasing. `term` is taken literally.
pub async fn search_questions(pool: &SqlitePool, term: &str) -> sqlx::Result<Vec<Question>> {
    let needle = term.to_lowercase();
    let mut questions = get_all_questions(pool).await?;
    questions.retain(|q| q.question.to_lowercase().contains(&needle));
    Ok(questions)
}

/// Questions of `category` whose id is not in `exclude`. The exclusion runs
/// in memory, since `exclude` comes from the client and may exceed the
/// SQLite bind parameter limit.
pub async fn get_quiz_candidates(
    pool: &SqlitePool,
    category: i64,
    exclude: &[i64],
) -> sqlx::Result<Vec<Question>> {
    let seen: HashSet<i64> = exclude.iter().copied().collect();
    let mut questions = get_questions_for_category(pool, category).await?;
    questions.retain(|q| !seen.contains(&q.id));
    Ok(questions)
}

pub async fn count_questions(pool: &SqlitePool) -> sqlx::Result<i64> {
    sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*) FROM questions
        "#,
    )
    .fetch_one(pool)
    .await
}

/// Stores a new question and returns its id. Fields are passed through
/// untouched, so a missing text or answer is rejected by the schema.
pub async fn create_question(
    pool: &SqlitePool,
    question: Option<&str>,
    answer: Option<&str>,
    category: Option<i64>,
    difficulty: Option<i64>,
) -> sqlx::Result<i64> {
    let mut conn = pool.acquire().await?;

    let id = sqlx::query(
        r#"
        INSERT INTO questions (question, answer, category, difficulty) VALUES (?1, ?2, ?3, ?4)
        "#,
    )
    .bind(question)
    .bind(answer)
    .bind(category)
    .bind(difficulty)
    .execute(&mut *conn)
    .await?
    .last_insert_rowid();

    Ok(id)
}

/// Returns the number of deleted rows.
pub async fn delete_question(pool: &SqlitePool, id: i64) -> sqlx::Result<u64> {
    let deleted = sqlx::query(
        r#"
        DELETE FROM questions WHERE questions.id = ?1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?
    .rows_affected();
    Ok(deleted)
}

pub async fn upsert_question(conn: &mut SqliteConnection, question: &Question) -> sqlx::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO questions (id, question, answer, category, difficulty) VALUES (?1, ?2, ?3, ?4, ?5)
        ON CONFLICT (id) DO UPDATE SET
            question = excluded.question,
            answer = excluded.answer,
            category = excluded.category,
            difficulty = excluded.difficulty
        "#,
    )
    .bind(question.id)
    .bind(&question.question)
    .bind(&question.answer)
    .bind(question.category)
    .bind(question.difficulty)
    .execute(conn)
    .await?;
    Ok(())
}
