use serde::{Deserialize, Serialize};
use std::fmt;

/// Position of a resource inside a frozen [`crate::model::ResourceGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ResourceKey(pub(crate) usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Cardinality {
    #[default]
    ToOne,
    ToMany,
}

/// Query feature a field or relationship must opt into before it can be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Capability {
    Include,
    Filter,
    Sort,
    /// Sparse fieldsets; every relationship and attribute supports it.
    Fields,
}

impl Capability {
    /// The query parameter that requires this capability
    pub fn parameter(&self) -> QueryParameterKind {
        match self {
            Capability::Include => QueryParameterKind::Include,
            Capability::Filter => QueryParameterKind::Filter,
            Capability::Sort => QueryParameterKind::Sort,
            Capability::Fields => QueryParameterKind::Fields,
        }
    }
}

/// The standard query string parameters understood by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QueryParameterKind {
    Include,
    Filter,
    Sort,
    Page,
    Fields,
    OmitNull,
    OmitDefault,
}

impl QueryParameterKind {
    pub const ALL: [QueryParameterKind; 7] = [
        QueryParameterKind::Include,
        QueryParameterKind::Filter,
        QueryParameterKind::Sort,
        QueryParameterKind::Page,
        QueryParameterKind::Fields,
        QueryParameterKind::OmitNull,
        QueryParameterKind::OmitDefault,
    ];

    /// Reserved query string key (or key prefix for bracketed parameters)
    pub fn name(&self) -> &'static str {
        match self {
            QueryParameterKind::Include => "include",
            QueryParameterKind::Filter => "filter",
            QueryParameterKind::Sort => "sort",
            QueryParameterKind::Page => "page",
            QueryParameterKind::Fields => "fields",
            QueryParameterKind::OmitNull => "omitNull",
            QueryParameterKind::OmitDefault => "omitDefault",
        }
    }

    /// Capitalized name used at the start of error messages
    pub fn display_name(&self) -> &'static str {
        match self {
            QueryParameterKind::Include => "Include",
            QueryParameterKind::Filter => "Filter",
            QueryParameterKind::Sort => "Sort",
            QueryParameterKind::Page => "Page",
            QueryParameterKind::Fields => "Fields",
            QueryParameterKind::OmitNull => "OmitNull",
            QueryParameterKind::OmitDefault => "OmitDefault",
        }
    }
}

impl fmt::Display for QueryParameterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }

    pub fn parse(method: &str) -> Option<Self> {
        match method {
            "GET" | "HEAD" => Some(HttpMethod::Get),
            "POST" => Some(HttpMethod::Post),
            "PATCH" => Some(HttpMethod::Patch),
            "DELETE" => Some(HttpMethod::Delete),
            _ => None,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Extracts `inner` from `prefix[inner]`.
pub fn bracketed<'k>(key: &'k str, prefix: &str) -> Option<&'k str> {
    key.strip_prefix(prefix)?
        .strip_prefix('[')?
        .strip_suffix(']')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bracketed_keys() {
        assert_eq!(bracketed("filter[title]", "filter"), Some("title"));
        assert_eq!(bracketed("filter[author.name]", "filter"), Some("author.name"));
        assert_eq!(bracketed("filter[]", "filter"), Some(""));
        assert_eq!(bracketed("filter", "filter"), None);
        assert_eq!(bracketed("filters[title]", "filter"), None);
        assert_eq!(bracketed("filter[title", "filter"), None);
    }

    #[test]
    fn test_query_parameter_names() {
        let names: Vec<_> = QueryParameterKind::ALL.iter().map(|k| k.name()).collect();
        assert_eq!(
            names,
            vec!["include", "filter", "sort", "page", "fields", "omitNull", "omitDefault"]
        );
        assert_eq!(Capability::Sort.parameter(), QueryParameterKind::Sort);
    }

    #[test]
    fn test_http_method_round_trip_names() {
        assert_eq!(HttpMethod::parse("POST"), Some(HttpMethod::Post));
        assert_eq!(HttpMethod::parse("post"), None);
        assert_eq!(HttpMethod::parse("HEAD"), Some(HttpMethod::Get));
        assert_eq!(HttpMethod::Patch.to_string(), "PATCH");
    }
}
