use axum::{body::Bytes, extract::State, routing::post, Json, Router};
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::{categories::get_category, questions::get_quiz_candidates},
        Question,
    },
    server::{app::AppState, deserializers::FlexId, error::ApiError},
    telemetry::{QUIZ_QUESTIONS_SERVED, QUIZ_ROUNDS_EXHAUSTED},
};

use super::{read_json, ApiResponse};

const UNKNOWN_CATEGORY: &str = "unknown";

#[derive(Deserialize)]
struct QuizRequest {
    quiz_category: Option<QuizCategory>,
    previous_questions: Option<Vec<FlexId>>,
}

#[derive(Deserialize)]
struct QuizCategory {
    id: Option<FlexId>,
}

#[derive(Serialize)]
struct QuizQuestion {
    success: bool,
    question: Option<Question>,
}

/// Picks a random question of the requested category that is not listed in
/// `previous_questions`. Running out of questions is not an error.
async fn next_question(State(pool): State<SqlitePool>, body: Bytes) -> ApiResponse<QuizQuestion> {
    let request: QuizRequest = read_json(&body)
        .map_err(|_| ApiError::BadRequest)?
        .ok_or(ApiError::Unprocessable)?;
    // A null id counts as absent, so the request is not found instead of an
    // empty round.
    let (Some(QuizCategory { id: Some(category) }), Some(previous)) =
        (request.quiz_category, request.previous_questions)
    else {
        return Err(ApiError::NotFound);
    };

    let previous: Vec<i64> = previous.into_iter().map(|id| id.0).collect();
    let candidates = get_quiz_candidates(&pool, category.0, &previous).await?;
    let question = candidates.choose(&mut rand::thread_rng()).cloned();

    // Metric labels are limited to stored categories.
    let label = match get_category(&pool, category.0).await? {
        Some(known) => known.id.to_string(),
        None => UNKNOWN_CATEGORY.to_owned(),
    };
    match &question {
        Some(q) => {
            QUIZ_QUESTIONS_SERVED
                .with_label_values(&[label.as_str()])
                .inc();
            tracing::debug!(category = category.0, id = q.id, "Quiz question served");
        }
        None => {
            QUIZ_ROUNDS_EXHAUSTED
                .with_label_values(&[label.as_str()])
                .inc();
            tracing::info!(
                category = category.0,
                seen = previous.len(),
                "No unseen questions left in category"
            );
        }
    }

    Ok(Json(QuizQuestion {
        success: true,
        question,
    }))
}

pub fn quizzes_router(state: AppState) -> Router {
    Router::new()
        .route("/quizzes", post(next_question))
        .with_state(state)
}
