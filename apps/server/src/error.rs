use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use healthwatch::HealthError;
use serde_json::json;
use thiserror::Error;

/// API-facing errors; everything renders as `{ "error": message }`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Internal(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({ "error": self.to_string() }))
    }
}

impl From<HealthError> for ApiError {
    fn from(err: HealthError) -> Self {
        match err {
            HealthError::TargetNotFound { .. } => ApiError::NotFound(err.to_string()),
            HealthError::Registry(_) => ApiError::Internal(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        let err = ApiError::NotFound("Service not found".to_string());
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn health_errors_convert_by_variant() {
        let err: ApiError = HealthError::TargetNotFound {
            kind: healthwatch::TargetKind::Service,
            id: "service-1".to_string(),
        }
        .into();
        assert!(matches!(err, ApiError::NotFound(_)));

        let err: ApiError = HealthError::Registry(anyhow::anyhow!("disk gone")).into();
        assert!(matches!(err, ApiError::Internal(_)));
    }
}
