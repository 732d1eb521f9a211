use axum::{
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::error::JsonApiError;

pub const JSON_API_MEDIA_TYPE: &str = "application/vnd.api+json";

/// Top-level `{"errors": [...]}` body sent for every rejected request.
#[derive(Debug, Serialize)]
pub struct ErrorDocument {
    pub errors: Vec<ErrorObject>,
}

#[derive(Debug, Serialize)]
pub struct ErrorObject {
    /// HTTP status code as a string
    pub status: String,
    pub title: String,
    pub detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<ErrorSource>,
}

#[derive(Debug, Serialize)]
pub struct ErrorSource {
    pub parameter: String,
}

impl From<&JsonApiError> for ErrorObject {
    fn from(err: &JsonApiError) -> Self {
        ErrorObject {
            status: err.status_code().as_u16().to_string(),
            title: err.title().to_string(),
            detail: err.detail(),
            source: err.source_parameter().map(|parameter| ErrorSource {
                parameter: parameter.to_string(),
            }),
        }
    }
}

impl From<&JsonApiError> for ErrorDocument {
    fn from(err: &JsonApiError) -> Self {
        ErrorDocument {
            errors: vec![ErrorObject::from(err)],
        }
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorDocument::from(&self);

        (
            status,
            [(header::CONTENT_TYPE, JSON_API_MEDIA_TYPE)],
            Json(body),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_document_shape() {
        let err = JsonApiError::invalid_query("include", "Relationship 'x' is not allowed.");
        let value = serde_json::to_value(ErrorDocument::from(&err)).unwrap();

        assert_eq!(
            value,
            serde_json::json!({
                "errors": [{
                    "status": "400",
                    "title": "Invalid query parameter value.",
                    "detail": "Relationship 'x' is not allowed.",
                    "source": { "parameter": "include" }
                }]
            })
        );
    }

    #[test]
    fn test_source_is_omitted_without_parameter() {
        let err = JsonApiError::ResourceNotFound {
            name: "unicorns".to_string(),
        };
        let value = serde_json::to_value(ErrorDocument::from(&err)).unwrap();
        assert!(value["errors"][0].get("source").is_none());
        assert_eq!(value["errors"][0]["status"], "400");
    }
}
