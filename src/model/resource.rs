use crate::model::{Capability, Cardinality, HttpMethod, QueryParameterKind, ResourceKey};
use serde::Serialize;
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributeMetadata {
    /// Name exposed in the API (e.g., "title")
    pub public_name: String,
    /// Internal property identity
    pub property_name: String,
    pub filterable: bool,
    pub sortable: bool,
}

impl AttributeMetadata {
    pub fn has_capability(&self, capability: Capability) -> bool {
        match capability {
            Capability::Filter => self.filterable,
            Capability::Sort => self.sortable,
            Capability::Fields => true,
            Capability::Include => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelationshipMetadata {
    /// Name exposed in the API (e.g., "author")
    pub public_name: String,
    /// Internal property identity
    pub property_name: String,
    /// Resource on the other side of the relationship
    pub target: ResourceKey,
    pub cardinality: Cardinality,
    pub includable: bool,
    pub filterable: bool,
    pub sortable: bool,
}

impl RelationshipMetadata {
    pub fn has_capability(&self, capability: Capability) -> bool {
        match capability {
            Capability::Include => self.includable,
            Capability::Filter => self.filterable,
            Capability::Sort => self.sortable,
            Capability::Fields => true,
        }
    }

    pub fn is_to_many(&self) -> bool {
        self.cardinality == Cardinality::ToMany
    }
}

/// Describes one resource type of the API
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceContext {
    pub key: ResourceKey,

    /// Public name (e.g., "articles")
    pub resource_name: String,

    /// Internal type identity (e.g., "Article")
    pub type_name: String,

    pub attributes: Vec<AttributeMetadata>,

    pub relationships: Vec<RelationshipMetadata>,

    /// Query parameters switched off for every request on this resource
    pub disabled_query_parameters: BTreeSet<QueryParameterKind>,

    pub disallowed_methods: BTreeSet<HttpMethod>,
}

impl ResourceContext {
    /// Find an attribute by public name
    pub fn attribute(&self, public_name: &str) -> Option<&AttributeMetadata> {
        self.attributes
            .iter()
            .find(|attr| attr.public_name == public_name)
    }

    /// Find a relationship by public name
    pub fn relationship(&self, public_name: &str) -> Option<&RelationshipMetadata> {
        self.relationships
            .iter()
            .find(|rel| rel.public_name == public_name)
    }

    pub fn is_query_parameter_disabled(&self, kind: QueryParameterKind) -> bool {
        self.disabled_query_parameters.contains(&kind)
    }

    pub fn allows_method(&self, method: HttpMethod) -> bool {
        !self.disallowed_methods.contains(&method)
    }
}
