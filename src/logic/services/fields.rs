use crate::error::{JsonApiError, Result};
use crate::logic::chain::resolve_chain;
use crate::logic::services::QueryParameterService;
use crate::model::{
    bracketed, Capability, QueryParameterKind, ResourceContext, ResourceGraph, SparseFieldset,
};

/// Parses sparse fieldsets: `?fields=title` or `?fields[articles]=title` for
/// the primary resource, `?fields[author]=name` for a related resource.
pub struct FieldsService<'g> {
    graph: &'g ResourceGraph,
    resource: &'g ResourceContext,
    fieldsets: Vec<SparseFieldset>,
}

impl<'g> FieldsService<'g> {
    pub fn new(graph: &'g ResourceGraph, resource: &'g ResourceContext) -> Self {
        Self {
            graph,
            resource,
            fieldsets: Vec::new(),
        }
    }

    pub fn into_fieldsets(self) -> Vec<SparseFieldset> {
        self.fieldsets
    }
}

impl QueryParameterService for FieldsService<'_> {
    type Output = Vec<SparseFieldset>;

    fn kind(&self) -> QueryParameterKind {
        QueryParameterKind::Fields
    }

    fn get(&self) -> Vec<SparseFieldset> {
        self.fieldsets.clone()
    }

    fn can_parse(&self, key: &str) -> bool {
        key == "fields" || bracketed(key, "fields").is_some()
    }

    fn parse(&mut self, key: &str, value: &str) -> Result<()> {
        if value.is_empty() {
            return Err(JsonApiError::empty_parameter(key, self.kind()));
        }

        let relationship = match bracketed(key, "fields") {
            None => None,
            Some(target) if target == self.resource.resource_name => None,
            Some("") => {
                return Err(JsonApiError::invalid_query(
                    key,
                    format!(
                        "Query parameter '{}' is malformed, expected 'fields[relationship]=attributes'.",
                        key
                    ),
                ))
            }
            Some(path) => Some(resolve_chain(
                self.graph,
                self.resource,
                path,
                Capability::Fields,
            )?),
        };

        let target = relationship
            .as_ref()
            .map_or(self.resource, |chain| self.graph.resource(chain.target()));

        let mut attributes: Vec<String> = Vec::new();
        for name in value.split(',') {
            if name.is_empty() {
                return Err(JsonApiError::invalid_query(
                    key,
                    "Fields parameter must not contain empty elements.",
                ));
            }
            if target.attribute(name).is_none() {
                return Err(JsonApiError::invalid_query(
                    key,
                    format!(
                        "Invalid field '{}' in '{}' query parameter: it does not exist on resource '{}'.",
                        name, key, target.resource_name
                    ),
                ));
            }
            if !attributes.iter().any(|existing| existing == name) {
                attributes.push(name.to_string());
            }
        }

        match self
            .fieldsets
            .iter_mut()
            .find(|fieldset| fieldset.relationship == relationship)
        {
            Some(existing) => {
                for name in attributes {
                    if !existing.attributes.contains(&name) {
                        existing.attributes.push(name);
                    }
                }
            }
            None => self.fieldsets.push(SparseFieldset {
                relationship,
                attributes,
            }),
        }

        Ok(())
    }
}
