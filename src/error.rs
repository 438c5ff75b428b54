use std::collections::HashMap;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use smartmeal_recommend::RecommendError;
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0:?}")]
    ValidationError(HashMap<String, String>),

    #[error("Recipe not found.")]
    RecipeNotFound,

    #[error("Failed to generate recommendation: {0}")]
    RecommendError(#[from] RecommendError),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let field_errors = errors
            .field_errors()
            .iter()
            .map(|(field, errors)| {
                let message = errors
                    .first()
                    .and_then(|e| e.message.as_ref())
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "Validation failed".to_string());
                (field.to_string(), message)
            })
            .collect();

        AppError::ValidationError(field_errors)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::ValidationError(HashMap::from([(
            "body".to_string(),
            rejection.body_text(),
        )]))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let detail = self.to_string();

        match self {
            AppError::ValidationError(field_errors) => {
                tracing::warn!(errors = ?field_errors, "Request validation failed");
                let body = json!({
                    "detail": "Invalid request.",
                    "errors": field_errors,
                });

                (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response()
            }
            AppError::RecipeNotFound => {
                (StatusCode::NOT_FOUND, Json(json!({ "detail": detail }))).into_response()
            }
            AppError::RecommendError(e) => {
                tracing::error!("Recommendation failed: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "detail": detail })),
                )
                    .into_response()
            }
            AppError::InternalError(msg) => {
                tracing::error!("Internal server error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "detail": format!("Failed to generate recommendation: {msg}") })),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smartmeal_recipe::RecipeError;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::RecipeNotFound.into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::ValidationError(HashMap::new())
                .into_response()
                .status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );

        let err = AppError::from(RecommendError::Catalog(RecipeError::DatasetNotFound {
            searched: "data/recipes_extended.csv".to_string(),
        }));
        assert_eq!(
            err.to_string(),
            "Failed to generate recommendation: Recipe dataset not found, searched: \
             data/recipes_extended.csv"
        );
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
