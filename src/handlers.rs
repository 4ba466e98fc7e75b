use crate::error::ApiError;
use crate::models::{
    next_question, paginate, parse_new_question, search_questions, QuestionRecord, QuizRound,
    QUESTIONS_PER_PAGE,
};
use crate::state::AppState;
use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use tracing::info;

fn request_id_from_headers(headers: &HeaderMap) -> String {
    headers
        .get("x-request-id")
        .and_then(|h| h.to_str().ok())
        .map(|s| s.to_string())
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string())
}

#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub success: bool,
    pub categories: BTreeMap<i64, String>,
}

pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<CategoriesResponse>, ApiError> {
    let categories = state.db.categories.read().await.clone();
    // An empty table is a 404, not an empty listing.
    if categories.is_empty() {
        return Err(ApiError::NotFound);
    }
    Ok(Json(CategoriesResponse { success: true, categories }))
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct QuestionListResponse {
    pub success: bool,
    pub questions: Vec<QuestionRecord>,
    pub total_questions: usize,
    pub categories: BTreeMap<i64, String>,
    pub current_category: String,
}

pub async fn list_questions(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<QuestionListResponse>, ApiError> {
    // Unparseable page values fall back to the first page.
    let page: i64 = query
        .page
        .as_deref()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(1);

    let all: Vec<QuestionRecord> = state.db.questions.read().await.values().cloned().collect();
    let page_items = paginate(&all, page, QUESTIONS_PER_PAGE).to_vec();
    if page_items.is_empty() {
        return Err(ApiError::NotFound);
    }

    let categories = state.db.categories.read().await.clone();
    Ok(Json(QuestionListResponse {
        success: true,
        questions: page_items,
        total_questions: all.len(),
        categories,
        // Fixed label on the unfiltered listing.
        current_category: "Science".to_string(),
    }))
}

pub async fn delete_question(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(question_id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    let request_id = request_id_from_headers(&headers);
    if !state.delete_question(question_id).await {
        return Err(ApiError::NotFound);
    }
    info!(%request_id, question_id, "question deleted");
    Ok(Json(json!({ "success": true })))
}

// One route, two operations: a non-empty searchTerm turns the request
// into a search instead of a create.
pub async fn post_questions(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Option<Json<Value>>,
) -> Result<Json<Value>, ApiError> {
    let request_id = request_id_from_headers(&headers);
    let Some(Json(body)) = body else {
        return Err(ApiError::BadRequest);
    };

    if let Some(term) = body
        .get("searchTerm")
        .and_then(Value::as_str)
        .filter(|t| !t.is_empty())
    {
        return search_questions_response(&state, term).await;
    }

    let new = parse_new_question(&body).ok_or(ApiError::BadRequest)?;
    let question_id = state.create_question(new).await;
    info!(%request_id, question_id, "question created");
    Ok(Json(json!({ "success": true })))
}

async fn search_questions_response(state: &AppState, term: &str) -> Result<Json<Value>, ApiError> {
    let all: Vec<QuestionRecord> = state.db.questions.read().await.values().cloned().collect();
    let matches = search_questions(&all, term);
    if matches.is_empty() {
        return Err(ApiError::NotFound);
    }
    Ok(Json(json!({
        "success": true,
        "total_questions": matches.len(),
        "questions": matches,
        "current_category": "Entertainment",
    })))
}

#[derive(Debug, Serialize)]
pub struct CategoryQuestionsResponse {
    pub success: bool,
    pub questions: Vec<QuestionRecord>,
    pub total_questions: usize,
    pub current_category: String,
}

pub async fn questions_by_category(
    State(state): State<AppState>,
    Path(category_id): Path<i64>,
) -> Result<Json<CategoryQuestionsResponse>, ApiError> {
    let category_type = state
        .db
        .categories
        .read()
        .await
        .get(&category_id)
        .cloned()
        .ok_or(ApiError::NotFound)?;

    let questions: Vec<QuestionRecord> = state
        .db
        .questions
        .read()
        .await
        .values()
        .filter(|q| q.category == category_id)
        .cloned()
        .collect();
    if questions.is_empty() {
        return Err(ApiError::NotFound);
    }

    Ok(Json(CategoryQuestionsResponse {
        success: true,
        total_questions: questions.len(),
        questions,
        current_category: category_type,
    }))
}

pub async fn next_quiz_question(
    State(state): State<AppState>,
    body: Option<Json<Value>>,
) -> Result<Json<Value>, ApiError> {
    let Some(Json(body)) = body else {
        return Err(ApiError::Unprocessable);
    };
    let round: QuizRound = serde_json::from_value(body).map_err(|_| ApiError::Unprocessable)?;

    let questions = state.db.questions.read().await;
    let pool: Vec<QuestionRecord> = if round.quiz_category.is_all() {
        questions.values().cloned().collect()
    } else {
        questions
            .values()
            .filter(|q| q.category == round.quiz_category.id)
            .cloned()
            .collect()
    };
    drop(questions);

    let question = next_question(&round.previous_questions, &pool);
    Ok(Json(json!({ "success": true, "question": question })))
}

pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

pub async fn route_not_found() -> ApiError {
    ApiError::NotFound
}
