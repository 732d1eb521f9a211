use crate::error::{JsonApiError, Result};
use crate::model::{AttributePath, Capability, RelationshipChain, ResourceContext, ResourceGraph};

/// Walk a dotted relationship path hop by hop, starting at `start`.
///
/// Hop 0 is looked up on `start`, every later hop on the resource the previous
/// hop points at. Each hop must carry `capability`. The first invalid hop
/// (left to right) decides the error.
pub fn resolve_chain(
    graph: &ResourceGraph,
    start: &ResourceContext,
    path: &str,
    capability: Capability,
) -> Result<RelationshipChain> {
    let parameter = capability.parameter().name();
    let mut hops = Vec::new();
    let mut current = start;

    for token in path.split('.') {
        let relationship = current.relationship(token).ok_or_else(|| {
            JsonApiError::invalid_query(
                parameter,
                format!(
                    "Invalid relationship '{}' in '{}' query parameter: it does not exist on resource '{}'.",
                    token, parameter, current.resource_name
                ),
            )
        })?;

        if !relationship.has_capability(capability) {
            return Err(JsonApiError::invalid_query(
                parameter,
                format!(
                    "Relationship '{}' in '{}' query parameter is not allowed.",
                    token, parameter
                ),
            ));
        }

        current = graph.resource(relationship.target);
        hops.push(relationship.clone());
    }

    Ok(RelationshipChain::new(start.key, hops))
}

/// Resolve `rel1.rel2.attr` into the relationship chain `rel1.rel2` and the
/// attribute `attr` of the resource it reaches. A path without dots names an
/// attribute of `start`.
pub fn resolve_attribute_path(
    graph: &ResourceGraph,
    start: &ResourceContext,
    path: &str,
    capability: Capability,
) -> Result<AttributePath> {
    let parameter = capability.parameter().name();

    let (relationships, attribute_name) = match path.rsplit_once('.') {
        Some((chain, attribute)) => (
            Some(resolve_chain(graph, start, chain, capability)?),
            attribute,
        ),
        None => (None, path),
    };

    let resource = relationships
        .as_ref()
        .map_or(start, |chain| graph.resource(chain.target()));

    let attribute = resource.attribute(attribute_name).ok_or_else(|| {
        JsonApiError::invalid_query(
            parameter,
            format!(
                "Invalid attribute '{}' in '{}' query parameter: it does not exist on resource '{}'.",
                attribute_name, parameter, resource.resource_name
            ),
        )
    })?;

    if !attribute.has_capability(capability) {
        return Err(JsonApiError::invalid_query(
            parameter,
            format!(
                "Attribute '{}' in '{}' query parameter is not allowed.",
                attribute_name, parameter
            ),
        ));
    }

    Ok(AttributePath {
        relationships,
        attribute: attribute.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::demo_resource_graph;

    #[test]
    fn test_resolve_chain_follows_hops_in_order() {
        let graph = demo_resource_graph().unwrap();
        let articles = graph.get_resource_context("articles").unwrap();

        let chain = resolve_chain(
            &graph,
            articles,
            "author.blogs.reviewer.favoriteFood",
            Capability::Include,
        )
        .unwrap();

        assert_eq!(
            chain.public_names(),
            vec!["author", "blogs", "reviewer", "favoriteFood"]
        );
        assert_eq!(chain.root(), articles.key);
        assert_eq!(graph.resource(chain.target()).resource_name, "foods");
        assert_eq!(chain.to_string(), "author.blogs.reviewer.favoriteFood");
    }

    #[test]
    fn test_unknown_token_reports_invalid() {
        let graph = demo_resource_graph().unwrap();
        let articles = graph.get_resource_context("articles").unwrap();

        let err = resolve_chain(&graph, articles, "author.nonsense.blogs", Capability::Include)
            .unwrap_err();
        let detail = err.detail();
        assert!(detail.starts_with("Invalid relationship 'nonsense'"));
        assert!(detail.contains("'people'"));
        assert!(!detail.contains("not allowed"));
    }

    #[test]
    fn test_first_invalid_hop_wins() {
        let graph = demo_resource_graph().unwrap();
        let articles = graph.get_resource_context("articles").unwrap();

        // `cannotInclude` lacks the capability and comes before the unknown hop
        let err = resolve_chain(&graph, articles, "cannotInclude.nonsense", Capability::Include)
            .unwrap_err();
        assert_eq!(
            err.detail(),
            "Relationship 'cannotInclude' in 'include' query parameter is not allowed."
        );

        let err = resolve_chain(&graph, articles, "nonsense.cannotInclude", Capability::Include)
            .unwrap_err();
        assert!(err.detail().starts_with("Invalid relationship 'nonsense'"));
        assert!(!err.detail().contains("not allowed"));
    }

    #[test]
    fn test_capability_checked_on_every_hop() {
        let graph = demo_resource_graph().unwrap();
        let articles = graph.get_resource_context("articles").unwrap();

        let err = resolve_chain(&graph, articles, "author.favoriteSong", Capability::Filter)
            .unwrap_err();
        assert!(err
            .to_string()
            .contains("Relationship 'favoriteSong' in 'filter' query parameter is not allowed."));

        assert!(resolve_chain(&graph, articles, "author.favoriteSong", Capability::Include).is_ok());
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let graph = demo_resource_graph().unwrap();
        let articles = graph.get_resource_context("articles").unwrap();

        let first = resolve_chain(&graph, articles, "reviewer.blogs", Capability::Include);
        let second = resolve_chain(&graph, articles, "reviewer.blogs", Capability::Include);
        assert_eq!(first, second);

        let first = resolve_chain(&graph, articles, "reviewer.nope", Capability::Include);
        let second = resolve_chain(&graph, articles, "reviewer.nope", Capability::Include);
        assert_eq!(first, second);
    }

    #[test]
    fn test_resolve_attribute_path() {
        let graph = demo_resource_graph().unwrap();
        let articles = graph.get_resource_context("articles").unwrap();

        let path = resolve_attribute_path(&graph, articles, "title", Capability::Sort).unwrap();
        assert!(path.relationships.is_none());
        assert_eq!(path.attribute.public_name, "title");

        let path =
            resolve_attribute_path(&graph, articles, "author.name", Capability::Filter).unwrap();
        assert_eq!(path.relationships.as_ref().unwrap().public_names(), vec!["author"]);
        assert_eq!(path.dotted(), "author.name");

        let err = resolve_attribute_path(&graph, articles, "author.shoeSize", Capability::Filter)
            .unwrap_err();
        assert!(err.detail().starts_with("Invalid attribute 'shoeSize'"));

        let err =
            resolve_attribute_path(&graph, articles, "body", Capability::Sort).unwrap_err();
        assert!(err.detail().contains("not allowed"));
    }
}
