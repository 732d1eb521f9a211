use crate::model::{Cardinality, HttpMethod, QueryParameterKind};
use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

/// Resource definition input model for graph construction.
/// Relationship targets refer to other definitions by resource name or type
/// name and are resolved when the graph is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceDefinition {
    /// Public name (e.g., "articles")
    pub resource_name: String,

    /// Internal type identity (e.g., "Article")
    pub type_name: String,

    #[serde(default)]
    pub attributes: Vec<AttributeDefinition>,

    #[serde(default)]
    pub relationships: Vec<RelationshipDefinition>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub disabled_query_parameters: Vec<QueryParameterKind>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub disallowed_methods: Vec<HttpMethod>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeDefinition {
    pub name: String,
    /// Internal property identity, defaults to `name`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property: Option<String>,
    #[serde(default = "default_true")]
    pub filterable: bool,
    #[serde(default = "default_true")]
    pub sortable: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationshipDefinition {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property: Option<String>,
    /// Resource name or type name of the related resource
    pub target: String,
    #[serde(default)]
    pub cardinality: Cardinality,
    #[serde(default = "default_true")]
    pub includable: bool,
    #[serde(default = "default_true")]
    pub filterable: bool,
    #[serde(default = "default_true")]
    pub sortable: bool,
}

impl ResourceDefinition {
    pub fn new(resource_name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            resource_name: resource_name.into(),
            type_name: type_name.into(),
            attributes: Vec::new(),
            relationships: Vec::new(),
            disabled_query_parameters: Vec::new(),
            disallowed_methods: Vec::new(),
        }
    }

    pub fn attribute(mut self, attribute: AttributeDefinition) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn relationship(mut self, relationship: RelationshipDefinition) -> Self {
        self.relationships.push(relationship);
        self
    }

    pub fn disable_query_parameter(mut self, kind: QueryParameterKind) -> Self {
        self.disabled_query_parameters.push(kind);
        self
    }

    pub fn disallow_method(mut self, method: HttpMethod) -> Self {
        self.disallowed_methods.push(method);
        self
    }
}

impl AttributeDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            property: None,
            filterable: true,
            sortable: true,
        }
    }

    pub fn with_property(mut self, property: impl Into<String>) -> Self {
        self.property = Some(property.into());
        self
    }

    pub fn not_filterable(mut self) -> Self {
        self.filterable = false;
        self
    }

    pub fn not_sortable(mut self) -> Self {
        self.sortable = false;
        self
    }
}

impl RelationshipDefinition {
    pub fn to_one(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            property: None,
            target: target.into(),
            cardinality: Cardinality::ToOne,
            includable: true,
            filterable: true,
            sortable: true,
        }
    }

    pub fn to_many(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            cardinality: Cardinality::ToMany,
            ..Self::to_one(name, target)
        }
    }

    pub fn with_property(mut self, property: impl Into<String>) -> Self {
        self.property = Some(property.into());
        self
    }

    pub fn not_includable(mut self) -> Self {
        self.includable = false;
        self
    }

    pub fn not_filterable(mut self) -> Self {
        self.filterable = false;
        self
    }

    pub fn not_sortable(mut self) -> Self {
        self.sortable = false;
        self
    }
}
