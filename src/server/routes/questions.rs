use axum::{
    body::Bytes,
    extract::State,
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_option_number_from_string;
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::{categories::get_all_categories, questions},
        Category, Question,
    },
    server::{app::AppState, error::ApiError, pagination::Page},
};

use super::{read_json, ApiResponse, RowId};

#[derive(Deserialize)]
struct NewQuestion {
    #[serde(default)]
    question: Option<String>,
    #[serde(default)]
    answer: Option<String>,
    #[serde(default)]
    #[serde(deserialize_with = "deserialize_option_number_from_string")]
    category: Option<i64>,
    #[serde(default)]
    #[serde(deserialize_with = "deserialize_option_number_from_string")]
    difficulty: Option<i64>,
}

#[derive(Deserialize)]
struct SearchBody {
    #[serde(rename = "searchTerm")]
    search_term: Option<String>,
}

#[derive(Serialize)]
struct QuestionsPage {
    success: bool,
    categories: Vec<Category>,
    questions: Vec<Question>,
    total_questions: usize,
    current_category: Option<Category>,
}

#[derive(Serialize)]
struct Deleted {
    success: bool,
    deleted: i64,
    questions: Vec<Question>,
    total_questions: usize,
}

#[derive(Serialize)]
struct Created {
    success: bool,
    created: i64,
    total_questions: i64,
}

#[derive(Serialize)]
struct SearchResults {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    current_category: Option<Category>,
}

async fn list_questions(State(pool): State<SqlitePool>, page: Page) -> ApiResponse<QuestionsPage> {
    let all = questions::get_all_questions(&pool).await?;
    let total_questions = all.len();
    let questions = page.slice(all);
    let categories = get_all_categories(&pool).await?;

    if questions.is_empty() {
        return Err(ApiError::NotFound);
    }

    Ok(Json(QuestionsPage {
        success: true,
        categories,
        questions,
        total_questions,
        current_category: None,
    }))
}

async fn delete_question(
    State(pool): State<SqlitePool>,
    RowId(id): RowId,
    page: Page,
) -> ApiResponse<Deleted> {
    if questions::get_question(&pool, id).await?.is_none() {
        return Err(ApiError::NotFound);
    }

    questions::delete_question(&pool, id)
        .await
        .map_err(ApiError::unprocessable)?;
    let remaining = questions::get_all_questions(&pool)
        .await
        .map_err(ApiError::unprocessable)?;
    tracing::info!(id, "Question deleted");

    let total_questions = remaining.len();
    Ok(Json(Deleted {
        success: true,
        deleted: id,
        questions: page.slice(remaining),
        total_questions,
    }))
}

async fn create_question(State(pool): State<SqlitePool>, body: Bytes) -> ApiResponse<Created> {
    let new_question: NewQuestion = read_json(&body)
        .map_err(ApiError::unprocessable)?
        .ok_or(ApiError::Unprocessable)?;

    let id = questions::create_question(
        &pool,
        new_question.question.as_deref(),
        new_question.answer.as_deref(),
        new_question.category,
        new_question.difficulty,
    )
    .await
    .map_err(ApiError::unprocessable)?;
    let total_questions = questions::count_questions(&pool)
        .await
        .map_err(ApiError::unprocessable)?;
    tracing::info!(id, "Question created");

    Ok(Json(Created {
        success: true,
        created: id,
        total_questions,
    }))
}

async fn search_questions(
    State(pool): State<SqlitePool>,
    page: Page,
    body: Bytes,
) -> ApiResponse<SearchResults> {
    let search: SearchBody = read_json(&body)
        .map_err(|_| ApiError::BadRequest)?
        .ok_or(ApiError::Unprocessable)?;
    let term = search.search_term.ok_or(ApiError::NotFound)?;

    let matches = questions::search_questions(&pool, &term).await?;
    let total_questions = matches.len();
    let questions = page.slice(matches);
    tracing::debug!(%term, total_questions, "Searched questions");
    if questions.is_empty() {
        return Err(ApiError::NotFound);
    }

    Ok(Json(SearchResults {
        success: true,
        questions,
        total_questions,
        current_category: None,
    }))
}

pub fn questions_router(state: AppState) -> Router {
    Router::new()
        .route("/questions", get(list_questions).post(create_question))
        .route("/questions/{id}", delete(delete_question))
        .route("/searchQuestions", post(search_questions))
        .with_state(state)
}
