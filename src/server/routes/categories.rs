use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::{
            categories::{get_all_categories, get_category},
            questions::get_questions_for_category,
        },
        Category, Question,
    },
    server::{app::AppState, error::ApiError, pagination::Page},
};

use super::{ApiResponse, RowId};

#[derive(Serialize)]
struct CategoriesList {
    success: bool,
    categories: Vec<Category>,
}

#[derive(Serialize)]
struct CategoryQuestions {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    categories: Vec<Category>,
    current_category: Category,
}

async fn list_categories(State(pool): State<SqlitePool>) -> ApiResponse<CategoriesList> {
    let categories = get_all_categories(&pool).await?;
    Ok(Json(CategoriesList {
        success: true,
        categories,
    }))
}

async fn category_questions(
    State(pool): State<SqlitePool>,
    RowId(id): RowId,
    page: Page,
) -> ApiResponse<CategoryQuestions> {
    let current_category = get_category(&pool, id).await?.ok_or(ApiError::NotFound)?;
    let categories = get_all_categories(&pool).await?;

    let matches = get_questions_for_category(&pool, id).await?;
    let total_questions = matches.len();
    let questions = page.slice(matches);
    if questions.is_empty() {
        return Err(ApiError::NotFound);
    }

    Ok(Json(CategoryQuestions {
        success: true,
        questions,
        total_questions,
        categories,
        current_category,
    }))
}

pub fn category_router(state: AppState) -> Router {
    Router::new()
        .route("/categories", get(list_categories))
        .route("/categories/{id}/questions", get(category_questions))
        .with_state(state)
}
