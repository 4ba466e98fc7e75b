use crate::handlers;
use crate::state::AppState;
use axum::routing::{delete, get, post};
use axum::Router;
use http::{header, Method};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route(
            "/api/v1/categories",
            get(handlers::list_categories).fallback(handlers::method_not_allowed),
        )
        .route(
            "/api/v1/questions",
            get(handlers::list_questions)
                .post(handlers::post_questions)
                .fallback(handlers::method_not_allowed),
        )
        .route(
            "/api/v1/questions/:question_id",
            delete(handlers::delete_question).fallback(handlers::method_not_allowed),
        )
        .route(
            "/api/v1/categories/:category_id/questions",
            get(handlers::questions_by_category).fallback(handlers::method_not_allowed),
        )
        .route(
            "/api/v1/quizzes",
            post(handlers::next_quiz_question).fallback(handlers::method_not_allowed),
        )
        .fallback(handlers::route_not_found)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
