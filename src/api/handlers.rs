use axum::{
    extract::{Path, State},
    http::{header, Method, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use std::sync::Arc;

use crate::api::error_document::JSON_API_MEDIA_TYPE;
use crate::api::query_extractor::QueryStringPairs;
use crate::config::JsonApiOptions;
use crate::error::{JsonApiError, Result};
use crate::logic::QueryParameterParser;
use crate::model::{
    Cardinality, CurrentRequest, HttpMethod, QueryParameterKind, QuerySet, ResourceGraph,
};

/// Process-wide state shared by every request: the frozen graph and the
/// query options it is parsed with.
#[derive(Debug)]
pub struct JsonApiState {
    pub graph: ResourceGraph,
    pub options: JsonApiOptions,
}

pub type AppState = Arc<JsonApiState>;

impl JsonApiState {
    pub fn new(graph: ResourceGraph, options: JsonApiOptions) -> AppState {
        Arc::new(Self { graph, options })
    }
}

/// Simple health check endpoint
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

#[derive(Debug, Serialize)]
pub struct ListResponse<T> {
    pub items: Vec<T>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct RelationshipSummary {
    pub name: String,
    pub target: String,
    pub cardinality: Cardinality,
}

#[derive(Debug, Serialize)]
pub struct ResourceSummary {
    pub resource_name: String,
    pub type_name: String,
    pub attributes: Vec<String>,
    pub relationships: Vec<RelationshipSummary>,
    pub disabled_query_parameters: Vec<QueryParameterKind>,
    pub disallowed_methods: Vec<HttpMethod>,
}

/// List every resource in the graph with its exposed fields
pub async fn list_resources(State(state): State<AppState>) -> Json<ListResponse<ResourceSummary>> {
    let graph = &state.graph;
    let items: Vec<ResourceSummary> = graph
        .resources()
        .iter()
        .map(|resource| ResourceSummary {
            resource_name: resource.resource_name.clone(),
            type_name: resource.type_name.clone(),
            attributes: resource
                .attributes
                .iter()
                .map(|attribute| attribute.public_name.clone())
                .collect(),
            relationships: resource
                .relationships
                .iter()
                .map(|relationship| RelationshipSummary {
                    name: relationship.public_name.clone(),
                    target: graph.resource(relationship.target).resource_name.clone(),
                    cardinality: relationship.cardinality,
                })
                .collect(),
            disabled_query_parameters: resource.disabled_query_parameters.iter().copied().collect(),
            disallowed_methods: resource.disallowed_methods.iter().copied().collect(),
        })
        .collect();

    let total = items.len();
    Json(ListResponse { items, total })
}

#[derive(Debug, Serialize)]
pub struct QueryMeta {
    pub resource: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub method: HttpMethod,
    pub query: QuerySet,
}

/// Echo of the resolved request; the data-access layer is out of scope
#[derive(Debug, Serialize)]
pub struct QueryDocument {
    pub meta: QueryMeta,
}

pub async fn handle_collection(
    State(state): State<AppState>,
    method: Method,
    Path(resource_name): Path<String>,
    QueryStringPairs(pairs): QueryStringPairs,
) -> Result<Response> {
    resolve_request(&state, &method, resource_name, None, pairs)
}

pub async fn handle_single(
    State(state): State<AppState>,
    method: Method,
    Path((resource_name, id)): Path<(String, String)>,
    QueryStringPairs(pairs): QueryStringPairs,
) -> Result<Response> {
    resolve_request(&state, &method, resource_name, Some(id), pairs)
}

fn resolve_request(
    state: &JsonApiState,
    method: &Method,
    resource_name: String,
    id: Option<String>,
    pairs: Vec<(String, String)>,
) -> Result<Response> {
    let resource = state.graph.get_resource_context(&resource_name)?;

    let Some(method) = HttpMethod::parse(method.as_str()) else {
        return Ok(StatusCode::METHOD_NOT_ALLOWED.into_response());
    };
    if !resource.allows_method(method) {
        log::warn!(
            "Rejected {} request on resource '{}'",
            method,
            resource.resource_name
        );
        return Err(JsonApiError::MethodNotAllowed { method });
    }

    let request = CurrentRequest::new(resource).with_method(method);
    let query = QueryParameterParser::new(&state.graph, request, &state.options).parse(pairs)?;

    log::info!(
        "{} /{} resolved {} include(s), {} sort field(s)",
        method,
        resource_name,
        query.include.len(),
        query.sort.len()
    );

    let document = QueryDocument {
        meta: QueryMeta {
            resource: resource_name,
            id,
            method,
            query,
        },
    };
    Ok(([(header::CONTENT_TYPE, JSON_API_MEDIA_TYPE)], Json(document)).into_response())
}
