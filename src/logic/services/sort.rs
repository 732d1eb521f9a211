use crate::error::{JsonApiError, Result};
use crate::logic::chain::resolve_attribute_path;
use crate::logic::services::QueryParameterService;
use crate::model::{
    Capability, QueryParameterKind, ResourceContext, ResourceGraph, SortDirection, SortField,
};

/// Parses `?sort=-createdAt,author.name`.
pub struct SortService<'g> {
    graph: &'g ResourceGraph,
    resource: &'g ResourceContext,
    fields: Vec<SortField>,
}

impl<'g> SortService<'g> {
    pub fn new(graph: &'g ResourceGraph, resource: &'g ResourceContext) -> Self {
        Self {
            graph,
            resource,
            fields: Vec::new(),
        }
    }

    pub fn into_fields(self) -> Vec<SortField> {
        self.fields
    }

    fn parse_element(&self, key: &str, element: &str) -> Result<SortField> {
        let (direction, path) = match element.strip_prefix('-') {
            Some(path) => (SortDirection::Descending, path),
            None => (SortDirection::Ascending, element),
        };

        if path.is_empty() {
            return Err(JsonApiError::invalid_query(
                key,
                "Sort parameter must not contain empty elements.",
            ));
        }

        let field = resolve_attribute_path(self.graph, self.resource, path, Capability::Sort)?;

        // Ordering by a to-many relationship has no single value per resource
        if let Some(hop) = field
            .relationships
            .as_ref()
            .and_then(|chain| chain.hops().iter().find(|hop| hop.is_to_many()))
        {
            return Err(JsonApiError::invalid_query(
                key,
                format!(
                    "Sorting on to-many relationship '{}' in '{}' query parameter is not allowed.",
                    hop.public_name, key
                ),
            ));
        }

        Ok(SortField { field, direction })
    }
}

impl QueryParameterService for SortService<'_> {
    type Output = Vec<SortField>;

    fn kind(&self) -> QueryParameterKind {
        QueryParameterKind::Sort
    }

    fn get(&self) -> Vec<SortField> {
        self.fields.clone()
    }

    fn can_parse(&self, key: &str) -> bool {
        key == "sort"
    }

    fn parse(&mut self, key: &str, value: &str) -> Result<()> {
        if value.is_empty() {
            return Err(JsonApiError::empty_parameter(key, self.kind()));
        }

        let parsed = value
            .split(',')
            .map(|element| self.parse_element(key, element))
            .collect::<Result<Vec<_>>>()?;

        self.fields.extend(parsed);
        Ok(())
    }
}
