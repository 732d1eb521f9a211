use crate::error::GraphError;
use crate::model::{
    AttributeDefinition, HttpMethod, QueryParameterKind, RelationshipDefinition,
    ResourceDefinition, ResourceGraph,
};

/// Resource definitions for a small blogging API.
///
/// articles -> people -> blogs -> people forms a cycle, `cannotInclude` is a
/// relationship that exists but is not includable, `restrictedItems` rejects
/// POST and `reports` switches off include and sort.
pub fn demo_resource_definitions() -> Vec<ResourceDefinition> {
    vec![
        ResourceDefinition::new("articles", "Article")
            .attribute(AttributeDefinition::new("title"))
            .attribute(AttributeDefinition::new("body").not_filterable().not_sortable())
            .attribute(AttributeDefinition::new("createdAt").with_property("created_at"))
            .relationship(RelationshipDefinition::to_one("author", "people"))
            .relationship(RelationshipDefinition::to_one("reviewer", "people").not_sortable())
            .relationship(
                RelationshipDefinition::to_one("cannotInclude", "people")
                    .with_property("hidden_owner")
                    .not_includable(),
            )
            .relationship(RelationshipDefinition::to_many("tags", "tags")),
        ResourceDefinition::new("people", "Person")
            .attribute(AttributeDefinition::new("name"))
            .attribute(AttributeDefinition::new("age").not_sortable())
            .relationship(RelationshipDefinition::to_many("blogs", "blogs"))
            .relationship(RelationshipDefinition::to_many("articles", "articles"))
            .relationship(RelationshipDefinition::to_one("favoriteFood", "foods"))
            .relationship(RelationshipDefinition::to_one("favoriteSong", "songs").not_filterable()),
        ResourceDefinition::new("blogs", "Blog")
            .attribute(AttributeDefinition::new("title"))
            .relationship(RelationshipDefinition::to_one("author", "people"))
            .relationship(RelationshipDefinition::to_one("reviewer", "people"))
            .relationship(RelationshipDefinition::to_many("articles", "articles")),
        ResourceDefinition::new("foods", "Food")
            .attribute(AttributeDefinition::new("name"))
            .attribute(AttributeDefinition::new("dish")),
        ResourceDefinition::new("songs", "Song").attribute(AttributeDefinition::new("title")),
        ResourceDefinition::new("tags", "Tag").attribute(AttributeDefinition::new("name")),
        ResourceDefinition::new("restrictedItems", "RestrictedItem")
            .attribute(AttributeDefinition::new("name"))
            .disallow_method(HttpMethod::Post),
        ResourceDefinition::new("reports", "Report")
            .attribute(AttributeDefinition::new("title"))
            .relationship(RelationshipDefinition::to_one("owner", "people"))
            .disable_query_parameter(QueryParameterKind::Include)
            .disable_query_parameter(QueryParameterKind::Sort),
    ]
}

pub fn demo_resource_graph() -> Result<ResourceGraph, GraphError> {
    let mut builder = ResourceGraph::builder();
    for definition in demo_resource_definitions() {
        builder.push(definition);
    }
    builder.build()
}
