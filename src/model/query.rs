use crate::model::{AttributeMetadata, RelationshipMetadata, ResourceKey};
use itertools::Itertools;
use serde::{Serialize, Serializer};
use std::fmt;

/// Ordered relationship hops parsed from one dotted path, rooted at a resource.
///
/// Never empty: hop `i`'s target is the resource hop `i + 1` was looked up in.
#[derive(Debug, Clone, PartialEq)]
pub struct RelationshipChain {
    root: ResourceKey,
    hops: Vec<RelationshipMetadata>,
}

impl RelationshipChain {
    pub(crate) fn new(root: ResourceKey, hops: Vec<RelationshipMetadata>) -> Self {
        debug_assert!(!hops.is_empty(), "relationship chains are never empty");
        Self { root, hops }
    }

    /// Resource the first hop was resolved against
    pub fn root(&self) -> ResourceKey {
        self.root
    }

    pub fn hops(&self) -> &[RelationshipMetadata] {
        &self.hops
    }

    pub fn first(&self) -> &RelationshipMetadata {
        &self.hops[0]
    }

    pub fn last(&self) -> &RelationshipMetadata {
        &self.hops[self.hops.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.hops.len()
    }

    /// Always false, kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.hops.is_empty()
    }

    /// Resource reached by the final hop
    pub fn target(&self) -> ResourceKey {
        self.last().target
    }

    pub fn public_names(&self) -> Vec<&str> {
        self.hops.iter().map(|hop| hop.public_name.as_str()).collect()
    }

    pub fn dotted(&self) -> String {
        self.hops.iter().map(|hop| hop.public_name.as_str()).join(".")
    }
}

impl fmt::Display for RelationshipChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dotted())
    }
}

impl Serialize for RelationshipChain {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.hops.iter().map(|hop| &hop.public_name))
    }
}

/// An attribute, optionally reached through a relationship chain
/// (e.g., `author.name`).
#[derive(Debug, Clone, PartialEq)]
pub struct AttributePath {
    pub relationships: Option<RelationshipChain>,
    pub attribute: AttributeMetadata,
}

impl AttributePath {
    pub fn dotted(&self) -> String {
        match &self.relationships {
            Some(chain) => format!("{}.{}", chain.dotted(), self.attribute.public_name),
            None => self.attribute.public_name.clone(),
        }
    }
}

impl fmt::Display for AttributePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dotted())
    }
}

impl Serialize for AttributePath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.dotted())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterOperator {
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
    Like,
}

/// Predicate tree over the primary resource
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FilterExpr {
    /// Logical AND - all conditions must be true
    All { all: Vec<FilterExpr> },
    /// Logical NOT - condition must be false
    Not { not: Box<FilterExpr> },
    Compare {
        field: AttributePath,
        op: FilterOperator,
        value: String,
    },
    /// Check if value is in a list
    In { r#in: (AttributePath, Vec<String>) },
    IsNull { is_null: AttributePath },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SortField {
    pub field: AttributePath,
    pub direction: SortDirection,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageQuery {
    /// `None` means unpaged
    pub size: Option<usize>,
    /// 1-based; negative numbers count back from the last page
    pub number: i64,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            size: None,
            number: 1,
        }
    }
}

/// Attributes to return for the primary resource (`relationship` is `None`)
/// or for the resource reached by `relationship`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SparseFieldset {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relationship: Option<RelationshipChain>,
    pub attributes: Vec<String>,
}

/// Everything parsed from one request's query string, ready for the
/// data-access layer.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct QuerySet {
    pub include: Vec<RelationshipChain>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<FilterExpr>,
    pub sort: Vec<SortField>,
    pub page: PageQuery,
    pub fields: Vec<SparseFieldset>,
    pub omit_null: bool,
    pub omit_default: bool,
}
