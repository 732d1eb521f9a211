use axum::http::StatusCode;
use thiserror::Error;

use crate::model::{HttpMethod, QueryParameterKind};

/// Result type used throughout the query engine.
pub type Result<T> = std::result::Result<T, JsonApiError>;

const INVALID_QUERY_TITLE: &str = "Invalid query parameter value.";
const DISABLED_QUERY_TITLE: &str =
    "Usage of one or more query string parameters is not allowed at the requested endpoint.";

/// Defects detected while freezing a resource graph.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("Resource name '{0}' is registered more than once")]
    DuplicateResourceName(String),

    #[error("Resource type '{0}' is registered more than once")]
    DuplicateResourceType(String),

    #[error("Attribute '{attribute}' is declared more than once on resource '{resource}'")]
    DuplicateAttribute { resource: String, attribute: String },

    #[error("Relationship '{relationship}' is declared more than once on resource '{resource}'")]
    DuplicateRelationship {
        resource: String,
        relationship: String,
    },

    #[error("Relationship '{relationship}' on resource '{resource}' targets unknown resource '{target}'")]
    UnresolvedTarget {
        resource: String,
        relationship: String,
        target: String,
    },

    #[error("Invalid resource graph definition: {0}")]
    Definition(#[from] serde_json::Error),
}

/// Every failure a request can run into while its query string is resolved.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum JsonApiError {
    /// Schema lookup miss.
    #[error("Resource '{name}' does not exist in the resource graph.")]
    ResourceNotFound { name: String },

    /// Malformed syntax, unknown token, missing capability or empty value.
    #[error("{title} {detail}")]
    InvalidQueryParameter {
        parameter: String,
        title: String,
        detail: String,
    },

    /// No service claims the key and unknown parameters are not ignored.
    #[error("Unknown query string parameter '{parameter}'.")]
    UnknownQueryParameter { parameter: String },

    /// More than one service claims the key. This is a deployment defect.
    #[error("Query string parameter '{parameter}' is claimed by multiple services: {}", .services.join(", "))]
    AmbiguousQueryParameter {
        parameter: String,
        services: Vec<&'static str>,
    },

    #[error("Resource does not support {method} requests.")]
    MethodNotAllowed { method: HttpMethod },
}

impl JsonApiError {
    pub fn invalid_query(parameter: impl Into<String>, detail: impl Into<String>) -> Self {
        JsonApiError::InvalidQueryParameter {
            parameter: parameter.into(),
            title: INVALID_QUERY_TITLE.to_string(),
            detail: detail.into(),
        }
    }

    /// "<Parameter> parameter must not be empty if provided."
    pub fn empty_parameter(parameter: impl Into<String>, kind: QueryParameterKind) -> Self {
        Self::invalid_query(
            parameter,
            format!("{} parameter must not be empty if provided.", kind.display_name()),
        )
    }

    /// The owning service exists but is switched off for the current resource.
    pub fn parameter_not_allowed(parameter: impl Into<String>) -> Self {
        let parameter = parameter.into();
        let detail = format!(
            "The parameter '{}' is not allowed for this resource.",
            parameter
        );
        JsonApiError::InvalidQueryParameter {
            parameter,
            title: DISABLED_QUERY_TITLE.to_string(),
            detail,
        }
    }

    /// Point the error at the query string key as the client sent it
    /// (`filter[title]` rather than `filter`).
    pub fn at_parameter(self, key: &str) -> Self {
        match self {
            JsonApiError::InvalidQueryParameter { title, detail, .. } => {
                JsonApiError::InvalidQueryParameter {
                    parameter: key.to_string(),
                    title,
                    detail,
                }
            }
            other => other,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            JsonApiError::ResourceNotFound { .. } => StatusCode::BAD_REQUEST,
            JsonApiError::InvalidQueryParameter { .. } => StatusCode::BAD_REQUEST,
            JsonApiError::UnknownQueryParameter { .. } => StatusCode::BAD_REQUEST,
            JsonApiError::AmbiguousQueryParameter { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            JsonApiError::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
        }
    }

    /// Short summary, fixed per error kind.
    pub fn title(&self) -> &str {
        match self {
            JsonApiError::ResourceNotFound { .. } => "The requested resource type does not exist.",
            JsonApiError::InvalidQueryParameter { title, .. } => title,
            JsonApiError::UnknownQueryParameter { .. } => "Unknown query string parameter.",
            JsonApiError::AmbiguousQueryParameter { .. } => {
                "An unhandled error occurred while processing this request."
            }
            JsonApiError::MethodNotAllowed { .. } => "The request method is not allowed.",
        }
    }

    /// The specific violation.
    pub fn detail(&self) -> String {
        match self {
            JsonApiError::InvalidQueryParameter { detail, .. } => detail.clone(),
            JsonApiError::UnknownQueryParameter { parameter } => format!(
                "Query string parameter '{}' is unknown. Set 'allow_unknown_query_parameters' to 'true' in the configuration to ignore unknown parameters.",
                parameter
            ),
            other => other.to_string(),
        }
    }

    /// The query string key that caused the failure, if any.
    pub fn source_parameter(&self) -> Option<&str> {
        match self {
            JsonApiError::InvalidQueryParameter { parameter, .. }
            | JsonApiError::UnknownQueryParameter { parameter }
            | JsonApiError::AmbiguousQueryParameter { parameter, .. } => {
                Some(parameter.as_str()).filter(|p| !p.is_empty())
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_parameter_message() {
        let err = JsonApiError::empty_parameter("include", QueryParameterKind::Include);
        assert!(err
            .to_string()
            .contains("Include parameter must not be empty if provided"));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.source_parameter(), Some("include"));
    }

    #[test]
    fn test_at_parameter_keeps_message() {
        let err = JsonApiError::invalid_query("filter", "Attribute 'body' is not allowed.")
            .at_parameter("filter[body]");
        assert_eq!(err.source_parameter(), Some("filter[body]"));
        assert_eq!(err.detail(), "Attribute 'body' is not allowed.");

        let err = JsonApiError::UnknownQueryParameter {
            parameter: "foo".to_string(),
        }
        .at_parameter("bar");
        assert_eq!(err.source_parameter(), Some("foo"));
    }

    #[test]
    fn test_method_not_allowed_maps_to_405() {
        let err = JsonApiError::MethodNotAllowed {
            method: HttpMethod::Post,
        };
        assert_eq!(err.status_code(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(err.title(), "The request method is not allowed.");
        assert_eq!(err.detail(), "Resource does not support POST requests.");
        assert_eq!(err.source_parameter(), None);
    }

    #[test]
    fn test_ambiguous_parameter_lists_services() {
        let err = JsonApiError::AmbiguousQueryParameter {
            parameter: "sort".to_string(),
            services: vec!["sort", "sort"],
        };
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().contains("sort, sort"));
    }
}
