use crate::error::{JsonApiError, Result};
use crate::logic::chain::resolve_attribute_path;
use crate::logic::services::QueryParameterService;
use crate::model::{
    bracketed, AttributePath, Capability, FilterExpr, FilterOperator, QueryParameterKind,
    ResourceContext, ResourceGraph,
};

/// Operation prefix of a filter value (`filter[age]=ge:18`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FilterOperation {
    Compare(FilterOperator),
    In,
    NotIn,
    IsNull,
    IsNotNull,
}

impl FilterOperation {
    fn parse(prefix: &str) -> Option<Self> {
        let operation = match prefix {
            "eq" => FilterOperation::Compare(FilterOperator::Eq),
            "ne" => FilterOperation::Compare(FilterOperator::Ne),
            "lt" => FilterOperation::Compare(FilterOperator::Lt),
            "gt" => FilterOperation::Compare(FilterOperator::Gt),
            "le" => FilterOperation::Compare(FilterOperator::Le),
            "ge" => FilterOperation::Compare(FilterOperator::Ge),
            "like" => FilterOperation::Compare(FilterOperator::Like),
            "in" => FilterOperation::In,
            "nin" => FilterOperation::NotIn,
            "isnull" => FilterOperation::IsNull,
            "isnotnull" => FilterOperation::IsNotNull,
            _ => return None,
        };
        Some(operation)
    }
}

/// Parses `?filter[path]=[op:]value` into a predicate tree.
pub struct FilterService<'g> {
    graph: &'g ResourceGraph,
    resource: &'g ResourceContext,
    filters: Vec<FilterExpr>,
}

impl<'g> FilterService<'g> {
    pub fn new(graph: &'g ResourceGraph, resource: &'g ResourceContext) -> Self {
        Self {
            graph,
            resource,
            filters: Vec::new(),
        }
    }

    fn parse_value(key: &str, field: AttributePath, value: &str) -> Result<FilterExpr> {
        let (operation, operand) = match value.split_once(':') {
            Some((prefix, rest)) => match FilterOperation::parse(prefix) {
                Some(operation) => (operation, rest),
                None => (FilterOperation::Compare(FilterOperator::Eq), value),
            },
            None => (FilterOperation::Compare(FilterOperator::Eq), value),
        };

        let expr = match operation {
            FilterOperation::Compare(op) => {
                if operand.is_empty() {
                    return Err(JsonApiError::invalid_query(
                        key,
                        format!("Filter operator in '{}' requires a value.", key),
                    ));
                }
                FilterExpr::Compare {
                    field,
                    op,
                    value: operand.to_string(),
                }
            }
            FilterOperation::In | FilterOperation::NotIn => {
                if operand.is_empty() {
                    return Err(JsonApiError::invalid_query(
                        key,
                        format!("Filter operator in '{}' requires at least one value.", key),
                    ));
                }
                if operand.split(',').any(str::is_empty) {
                    return Err(JsonApiError::invalid_query(
                        key,
                        format!("Filter value list in '{}' must not contain empty elements.", key),
                    ));
                }
                let values = operand.split(',').map(str::to_string).collect();
                let expr = FilterExpr::In {
                    r#in: (field, values),
                };
                if operation == FilterOperation::NotIn {
                    FilterExpr::Not {
                        not: Box::new(expr),
                    }
                } else {
                    expr
                }
            }
            FilterOperation::IsNull | FilterOperation::IsNotNull => {
                if !operand.is_empty() {
                    return Err(JsonApiError::invalid_query(
                        key,
                        format!("Filter operator in '{}' does not take a value.", key),
                    ));
                }
                let expr = FilterExpr::IsNull { is_null: field };
                if operation == FilterOperation::IsNotNull {
                    FilterExpr::Not {
                        not: Box::new(expr),
                    }
                } else {
                    expr
                }
            }
        };

        Ok(expr)
    }
}

impl QueryParameterService for FilterService<'_> {
    type Output = Option<FilterExpr>;

    fn kind(&self) -> QueryParameterKind {
        QueryParameterKind::Filter
    }

    /// All parsed filters joined by `All`; `None` when nothing was parsed
    fn get(&self) -> Option<FilterExpr> {
        match self.filters.as_slice() {
            [] => None,
            [single] => Some(single.clone()),
            many => Some(FilterExpr::All {
                all: many.to_vec(),
            }),
        }
    }

    fn can_parse(&self, key: &str) -> bool {
        bracketed(key, "filter").is_some()
    }

    fn parse(&mut self, key: &str, value: &str) -> Result<()> {
        let path = match bracketed(key, "filter") {
            Some(path) if !path.is_empty() => path,
            _ => {
                return Err(JsonApiError::invalid_query(
                    key,
                    format!(
                        "Query parameter '{}' is malformed, expected 'filter[field]=value'.",
                        key
                    ),
                ))
            }
        };

        if value.is_empty() {
            return Err(JsonApiError::empty_parameter(key, self.kind()));
        }

        let field = resolve_attribute_path(self.graph, self.resource, path, Capability::Filter)?;
        let expr = Self::parse_value(key, field, value)?;
        self.filters.push(expr);
        Ok(())
    }
}
