use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};

use crate::error::JsonApiError;

/// Raw query string pairs in the order the client sent them, repeated keys
/// included.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryStringPairs(pub Vec<(String, String)>);

#[async_trait]
impl<S> FromRequestParts<S> for QueryStringPairs
where
    S: Send + Sync,
{
    type Rejection = JsonApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::try_from_uri(&parts.uri)
            .map_err(|rejection| JsonApiError::invalid_query("", rejection.body_text()))?;

        Ok(QueryStringPairs(pairs))
    }
}
