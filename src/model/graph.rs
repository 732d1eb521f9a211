use crate::error::{GraphError, JsonApiError, Result};
use crate::model::{
    AttributeMetadata, RelationshipMetadata, ResourceContext, ResourceDefinition, ResourceKey,
};
use std::collections::{BTreeSet, HashMap};

/// Collects resource definitions and freezes them into a [`ResourceGraph`].
#[derive(Debug, Default)]
pub struct ResourceGraphBuilder {
    definitions: Vec<ResourceDefinition>,
}

impl ResourceGraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(mut self, definition: ResourceDefinition) -> Self {
        self.definitions.push(definition);
        self
    }

    pub fn push(&mut self, definition: ResourceDefinition) {
        self.definitions.push(definition);
    }

    /// Register every definition, then resolve relationship targets into arena
    /// keys. Targets may point at definitions added later, so cycles such as
    /// articles -> people -> articles are fine.
    pub fn build(self) -> std::result::Result<ResourceGraph, GraphError> {
        let mut by_name = HashMap::new();
        let mut by_type = HashMap::new();

        for (index, def) in self.definitions.iter().enumerate() {
            if by_name
                .insert(def.resource_name.clone(), ResourceKey(index))
                .is_some()
            {
                return Err(GraphError::DuplicateResourceName(def.resource_name.clone()));
            }
            if by_type
                .insert(def.type_name.clone(), ResourceKey(index))
                .is_some()
            {
                return Err(GraphError::DuplicateResourceType(def.type_name.clone()));
            }
        }

        let mut resources = Vec::with_capacity(self.definitions.len());
        for (index, def) in self.definitions.into_iter().enumerate() {
            let attributes = build_attributes(&def)?;
            let relationships = build_relationships(&def, &by_name, &by_type)?;

            resources.push(ResourceContext {
                key: ResourceKey(index),
                resource_name: def.resource_name,
                type_name: def.type_name,
                attributes,
                relationships,
                disabled_query_parameters: def.disabled_query_parameters.into_iter().collect(),
                disallowed_methods: def.disallowed_methods.into_iter().collect(),
            });
        }

        log::info!("Resource graph built with {} resources", resources.len());

        Ok(ResourceGraph {
            resources,
            by_name,
            by_type,
        })
    }
}

fn build_attributes(
    def: &ResourceDefinition,
) -> std::result::Result<Vec<AttributeMetadata>, GraphError> {
    let mut seen = BTreeSet::new();
    let mut attributes = Vec::with_capacity(def.attributes.len() + 1);

    // Every resource exposes its identifier
    if !def.attributes.iter().any(|attr| attr.name == "id") {
        seen.insert("id");
        attributes.push(AttributeMetadata {
            public_name: "id".to_string(),
            property_name: "id".to_string(),
            filterable: true,
            sortable: true,
        });
    }

    for attr in &def.attributes {
        if !seen.insert(attr.name.as_str()) {
            return Err(GraphError::DuplicateAttribute {
                resource: def.resource_name.clone(),
                attribute: attr.name.clone(),
            });
        }
        attributes.push(AttributeMetadata {
            public_name: attr.name.clone(),
            property_name: attr.property.clone().unwrap_or_else(|| attr.name.clone()),
            filterable: attr.filterable,
            sortable: attr.sortable,
        });
    }

    Ok(attributes)
}

fn build_relationships(
    def: &ResourceDefinition,
    by_name: &HashMap<String, ResourceKey>,
    by_type: &HashMap<String, ResourceKey>,
) -> std::result::Result<Vec<RelationshipMetadata>, GraphError> {
    let mut seen = BTreeSet::new();
    let mut relationships = Vec::with_capacity(def.relationships.len());

    for rel in &def.relationships {
        if !seen.insert(rel.name.as_str()) {
            return Err(GraphError::DuplicateRelationship {
                resource: def.resource_name.clone(),
                relationship: rel.name.clone(),
            });
        }

        let target = by_name
            .get(&rel.target)
            .or_else(|| by_type.get(&rel.target))
            .copied()
            .ok_or_else(|| GraphError::UnresolvedTarget {
                resource: def.resource_name.clone(),
                relationship: rel.name.clone(),
                target: rel.target.clone(),
            })?;

        relationships.push(RelationshipMetadata {
            public_name: rel.name.clone(),
            property_name: rel.property.clone().unwrap_or_else(|| rel.name.clone()),
            target,
            cardinality: rel.cardinality,
            includable: rel.includable,
            filterable: rel.filterable,
            sortable: rel.sortable,
        });
    }

    Ok(relationships)
}

/// Immutable schema of every resource exposed by the API.
///
/// Built once at startup and shared read-only between requests.
#[derive(Debug, Clone)]
pub struct ResourceGraph {
    resources: Vec<ResourceContext>,
    by_name: HashMap<String, ResourceKey>,
    by_type: HashMap<String, ResourceKey>,
}

impl ResourceGraph {
    pub fn builder() -> ResourceGraphBuilder {
        ResourceGraphBuilder::new()
    }

    /// Build a graph from a JSON array of resource definitions
    pub fn from_json(json: &str) -> std::result::Result<Self, GraphError> {
        let definitions: Vec<ResourceDefinition> = serde_json::from_str(json)?;
        let mut builder = ResourceGraphBuilder::new();
        for definition in definitions {
            builder.push(definition);
        }
        builder.build()
    }

    pub fn resources(&self) -> &[ResourceContext] {
        &self.resources
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Resolve a key handed out by this graph.
    ///
    /// Panics if the key belongs to a different graph.
    pub fn resource(&self, key: ResourceKey) -> &ResourceContext {
        &self.resources[key.0]
    }

    /// Find a resource by its public name (e.g., "articles")
    pub fn get_resource_context(&self, resource_name: &str) -> Result<&ResourceContext> {
        self.by_name
            .get(resource_name)
            .map(|key| self.resource(*key))
            .ok_or_else(|| JsonApiError::ResourceNotFound {
                name: resource_name.to_string(),
            })
    }

    /// Find a resource by its internal type identity (e.g., "Article")
    pub fn get_resource_context_by_type(&self, type_name: &str) -> Result<&ResourceContext> {
        self.by_type
            .get(type_name)
            .map(|key| self.resource(*key))
            .ok_or_else(|| JsonApiError::ResourceNotFound {
                name: type_name.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AttributeDefinition, Cardinality, RelationshipDefinition};

    fn articles_and_people() -> ResourceGraphBuilder {
        ResourceGraph::builder()
            .add(
                ResourceDefinition::new("articles", "Article")
                    .attribute(AttributeDefinition::new("title"))
                    .relationship(RelationshipDefinition::to_one("author", "people")),
            )
            .add(
                ResourceDefinition::new("people", "Person")
                    .attribute(AttributeDefinition::new("name").with_property("FullName"))
                    .relationship(RelationshipDefinition::to_many("articles", "Article")),
            )
    }

    #[test]
    fn test_build_resolves_forward_references_and_cycles() {
        let graph = articles_and_people().build().unwrap();
        assert_eq!(graph.len(), 2);

        let articles = graph.get_resource_context("articles").unwrap();
        let author = articles.relationship("author").unwrap();
        let people = graph.resource(author.target);
        assert_eq!(people.resource_name, "people");

        let back = people.relationship("articles").unwrap();
        assert_eq!(back.cardinality, Cardinality::ToMany);
        assert_eq!(graph.resource(back.target).key, articles.key);
    }

    #[test]
    fn test_lookup_by_name_and_type() {
        let graph = articles_and_people().build().unwrap();

        let by_type = graph.get_resource_context_by_type("Person").unwrap();
        assert_eq!(by_type.resource_name, "people");

        let err = graph.get_resource_context("Person").unwrap_err();
        assert_eq!(
            err,
            JsonApiError::ResourceNotFound {
                name: "Person".to_string()
            }
        );
        assert!(graph.get_resource_context_by_type("people").is_err());
    }

    #[test]
    fn test_implicit_id_attribute() {
        let graph = articles_and_people().build().unwrap();
        let people = graph.get_resource_context("people").unwrap();

        let id = people.attribute("id").unwrap();
        assert!(id.filterable && id.sortable);
        assert_eq!(people.attributes[0].public_name, "id");
        assert_eq!(people.attribute("name").unwrap().property_name, "FullName");
    }

    #[test]
    fn test_duplicate_names_are_rejected() {
        let err = articles_and_people()
            .add(ResourceDefinition::new("articles", "Other"))
            .build()
            .unwrap_err();
        assert!(matches!(err, GraphError::DuplicateResourceName(name) if name == "articles"));

        let err = ResourceGraph::builder()
            .add(
                ResourceDefinition::new("songs", "Song")
                    .attribute(AttributeDefinition::new("title"))
                    .attribute(AttributeDefinition::new("title")),
            )
            .build()
            .unwrap_err();
        assert!(matches!(err, GraphError::DuplicateAttribute { .. }));
    }

    #[test]
    fn test_unresolved_target_is_rejected() {
        let err = ResourceGraph::builder()
            .add(
                ResourceDefinition::new("articles", "Article")
                    .relationship(RelationshipDefinition::to_one("author", "writers")),
            )
            .build()
            .unwrap_err();

        match err {
            GraphError::UnresolvedTarget {
                resource, target, ..
            } => {
                assert_eq!(resource, "articles");
                assert_eq!(target, "writers");
            }
            other => panic!("Expected UnresolvedTarget, got {:?}", other),
        }
    }

    #[test]
    fn test_from_json() {
        let json = r#"[
            {"resource_name": "blogs", "type_name": "Blog",
             "relationships": [{"name": "owner", "target": "people"}]},
            {"resource_name": "people", "type_name": "Person",
             "attributes": [{"name": "name"}]}
        ]"#;

        let graph = ResourceGraph::from_json(json).unwrap();
        let blogs = graph.get_resource_context("blogs").unwrap();
        assert_eq!(
            graph.resource(blogs.relationships[0].target).type_name,
            "Person"
        );

        assert!(matches!(
            ResourceGraph::from_json("{not json").unwrap_err(),
            GraphError::Definition(_)
        ));
    }
}
