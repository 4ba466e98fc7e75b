use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Every failure renders the same fixed envelope:
// {"success": false, "error": <status>, "message": <fixed string>}.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("bad request")]
    BadRequest,
    #[error("requested resource not found")]
    NotFound,
    #[error("method not allowed")]
    MethodNotAllowed,
    #[error("unprocessable entity")]
    Unprocessable,
    #[error("internal server error")]
    Internal,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Unprocessable => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = json!({
            "success": false,
            "error": status.as_u16(),
            "message": self.to_string(),
        });
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_match_the_taxonomy() {
        assert_eq!(ApiError::BadRequest.status().as_u16(), 400);
        assert_eq!(ApiError::NotFound.status().as_u16(), 404);
        assert_eq!(ApiError::MethodNotAllowed.status().as_u16(), 405);
        assert_eq!(ApiError::Unprocessable.status().as_u16(), 422);
        assert_eq!(ApiError::Internal.status().as_u16(), 500);
    }

    #[test]
    fn messages_are_the_fixed_strings() {
        assert_eq!(ApiError::NotFound.to_string(), "requested resource not found");
        assert_eq!(ApiError::Unprocessable.to_string(), "unprocessable entity");
    }
}
