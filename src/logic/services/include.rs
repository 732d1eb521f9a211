use crate::error::{JsonApiError, Result};
use crate::logic::chain::resolve_chain;
use crate::logic::services::QueryParameterService;
use crate::model::{
    Capability, QueryParameterKind, RelationshipChain, ResourceContext, ResourceGraph,
};

/// Parses `?include=author.blogs,reviewer` into relationship chains.
pub struct IncludeService<'g> {
    graph: &'g ResourceGraph,
    resource: &'g ResourceContext,
    maximum_depth: Option<usize>,
    chains: Vec<RelationshipChain>,
}

impl<'g> IncludeService<'g> {
    pub fn new(graph: &'g ResourceGraph, resource: &'g ResourceContext) -> Self {
        Self {
            graph,
            resource,
            maximum_depth: None,
            chains: Vec::new(),
        }
    }

    pub fn with_maximum_depth(mut self, maximum_depth: Option<usize>) -> Self {
        self.maximum_depth = maximum_depth;
        self
    }

    pub fn into_chains(self) -> Vec<RelationshipChain> {
        self.chains
    }
}

impl QueryParameterService for IncludeService<'_> {
    type Output = Vec<RelationshipChain>;

    fn kind(&self) -> QueryParameterKind {
        QueryParameterKind::Include
    }

    /// Parsed chains in input order
    fn get(&self) -> Vec<RelationshipChain> {
        self.chains.clone()
    }

    fn can_parse(&self, key: &str) -> bool {
        key == "include"
    }

    fn parse(&mut self, key: &str, value: &str) -> Result<()> {
        if value.is_empty() {
            return Err(JsonApiError::empty_parameter(key, self.kind()));
        }

        let mut parsed = Vec::new();
        for path in value.split(',') {
            if path.is_empty() {
                return Err(JsonApiError::empty_parameter(key, self.kind()));
            }

            let chain = resolve_chain(self.graph, self.resource, path, Capability::Include)?;

            if let Some(maximum) = self.maximum_depth {
                if chain.len() > maximum {
                    return Err(JsonApiError::invalid_query(
                        key,
                        format!(
                            "Including '{}' exceeds the maximum inclusion depth of {}.",
                            path, maximum
                        ),
                    ));
                }
            }

            parsed.push(chain);
        }

        self.chains.extend(parsed);
        Ok(())
    }
}
