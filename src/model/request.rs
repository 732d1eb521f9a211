use crate::model::{HttpMethod, QueryParameterKind, ResourceContext};
use std::collections::BTreeSet;

/// Per-request scope consumed by the query parameter services.
///
/// Holds the primary resource of the request and any query parameters the
/// endpoint switches off on top of what the resource itself disables.
#[derive(Debug, Clone)]
pub struct CurrentRequest<'g> {
    resource: &'g ResourceContext,
    method: HttpMethod,
    disabled_query_parameters: BTreeSet<QueryParameterKind>,
}

impl<'g> CurrentRequest<'g> {
    pub fn new(resource: &'g ResourceContext) -> Self {
        Self {
            resource,
            method: HttpMethod::Get,
            disabled_query_parameters: BTreeSet::new(),
        }
    }

    pub fn with_method(mut self, method: HttpMethod) -> Self {
        self.method = method;
        self
    }

    pub fn disable_query_parameter(mut self, kind: QueryParameterKind) -> Self {
        self.disabled_query_parameters.insert(kind);
        self
    }

    /// Primary resource type of this request
    pub fn request_resource(&self) -> &'g ResourceContext {
        self.resource
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn is_query_parameter_disabled(&self, kind: QueryParameterKind) -> bool {
        self.disabled_query_parameters.contains(&kind)
            || self.resource.is_query_parameter_disabled(kind)
    }
}
