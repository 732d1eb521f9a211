pub mod api;
pub mod config;
pub mod error;
pub mod logic;
pub mod model;
pub mod seed;

// Export API types
pub use api::handlers;
pub use api::routes;
pub use api::{AppState, ErrorDocument, JsonApiState, QueryStringPairs};

pub use config::{AppConfig, JsonApiOptions};
pub use error::{GraphError, JsonApiError, Result};

// Export logic types
pub use logic::{
    resolve_attribute_path, resolve_chain, QueryParameterParser, QueryParameterService,
    QueryService,
};

// Export all model types
pub use model::*;

// Export seed module
pub use seed::*;

/// Build the router for `graph` with its state attached
pub fn app(graph: model::ResourceGraph, options: JsonApiOptions) -> axum::Router {
    api::routes::create_router().with_state(JsonApiState::new(graph, options))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graph_from_json_definitions() {
        let json = r#"[
            {
                "resource_name": "orders",
                "type_name": "Order",
                "attributes": [{"name": "total"}, {"name": "note", "filterable": false}],
                "relationships": [
                    {"name": "customer", "target": "customers"},
                    {"name": "lines", "target": "OrderLine", "cardinality": "to-many"}
                ],
                "disabled_query_parameters": ["omitNull"],
                "disallowed_methods": ["DELETE"]
            },
            {
                "resource_name": "customers",
                "type_name": "Customer",
                "attributes": [{"name": "name"}],
                "relationships": [{"name": "orders", "target": "orders", "cardinality": "to-many"}]
            },
            {
                "resource_name": "orderLines",
                "type_name": "OrderLine",
                "attributes": [{"name": "quantity"}]
            }
        ]"#;

        let graph = ResourceGraph::from_json(json).unwrap();
        let orders = graph.get_resource_context("orders").unwrap();
        let options = JsonApiOptions::default();

        let query = QueryParameterParser::new(&graph, CurrentRequest::new(orders), &options)
            .parse([
                ("include", "customer.orders.lines"),
                ("filter[customer.name]", "Ann"),
                ("fields[lines]", "quantity"),
            ])
            .unwrap();
        assert_eq!(query.include[0].dotted(), "customer.orders.lines");
        assert!(query.filter.is_some());
        println!("✓ Forward references and cycles resolve");

        let err = QueryParameterParser::new(&graph, CurrentRequest::new(orders), &options)
            .parse([("filter[note]", "x")])
            .unwrap_err();
        assert!(err.detail().contains("not allowed"));
        assert_eq!(err.source_parameter(), Some("filter[note]"));

        let err = QueryParameterParser::new(&graph, CurrentRequest::new(orders), &options)
            .parse([("omitNull", "true")])
            .unwrap_err();
        assert!(err.to_string().contains("is not allowed for this resource"));
        assert!(!orders.allows_method(HttpMethod::Delete));
    }

    #[test]
    fn test_query_set_serialization() {
        let graph = demo_resource_graph().unwrap();
        let articles = graph.get_resource_context("articles").unwrap();
        let query = QueryParameterParser::new(
            &graph,
            CurrentRequest::new(articles),
            &JsonApiOptions::default(),
        )
        .parse([
            ("include", "author.blogs"),
            ("filter[author.age]", "ge:18"),
            ("sort", "-title"),
            ("fields[author]", "name"),
        ])
        .unwrap();

        let value = serde_json::to_value(&query).unwrap();
        assert_eq!(value["include"], serde_json::json!([["author", "blogs"]]));
        assert_eq!(
            value["filter"],
            serde_json::json!({"field": "author.age", "op": "ge", "value": "18"})
        );
        assert_eq!(
            value["sort"],
            serde_json::json!([{"field": "title", "direction": "descending"}])
        );
        assert_eq!(value["page"], serde_json::json!({"size": 10, "number": 1}));
        assert_eq!(
            value["fields"],
            serde_json::json!([{"relationship": ["author"], "attributes": ["name"]}])
        );
    }
}
