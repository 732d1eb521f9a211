pub mod fields;
pub mod filter;
pub mod include;
pub mod omit;
pub mod page;
pub mod sort;

pub use fields::FieldsService;
pub use filter::FilterService;
pub use include::IncludeService;
pub use omit::OmitValueService;
pub use page::PageService;
pub use sort::SortService;

use crate::error::Result;
use crate::model::{QueryParameterKind, QuerySet};

/// Uniform interface over the per-parameter parsers.
///
/// `parse` is all-or-nothing: when it returns an error the service's
/// accumulated result is unchanged. `get` yields the accumulated result, or
/// the service's default when nothing was parsed.
pub trait QueryParameterService {
    type Output;

    fn kind(&self) -> QueryParameterKind;
    fn can_parse(&self, key: &str) -> bool;
    fn parse(&mut self, key: &str, value: &str) -> Result<()>;
    fn get(&self) -> Self::Output;
}

/// The fixed set of services a request is parsed with.
pub enum QueryService<'g> {
    Include(IncludeService<'g>),
    Filter(FilterService<'g>),
    Sort(SortService<'g>),
    Page(PageService),
    Fields(FieldsService<'g>),
    OmitNull(OmitValueService),
    OmitDefault(OmitValueService),
}

macro_rules! each_service {
    ($self:expr, $service:ident => $body:expr) => {
        match $self {
            QueryService::Include($service) => $body,
            QueryService::Filter($service) => $body,
            QueryService::Sort($service) => $body,
            QueryService::Page($service) => $body,
            QueryService::Fields($service) => $body,
            QueryService::OmitNull($service) | QueryService::OmitDefault($service) => $body,
        }
    };
}

impl QueryService<'_> {
    pub fn kind(&self) -> QueryParameterKind {
        each_service!(self, service => service.kind())
    }

    pub fn can_parse(&self, key: &str) -> bool {
        each_service!(self, service => service.can_parse(key))
    }

    pub fn parse(&mut self, key: &str, value: &str) -> Result<()> {
        each_service!(self, service => service.parse(key, value))
    }

    /// Move this service's result into its slot of the aggregate
    pub fn apply(self, query: &mut QuerySet) {
        match self {
            QueryService::Include(service) => query.include = service.into_chains(),
            QueryService::Filter(service) => query.filter = service.get(),
            QueryService::Sort(service) => query.sort = service.into_fields(),
            QueryService::Page(service) => query.page = service.get(),
            QueryService::Fields(service) => query.fields = service.into_fieldsets(),
            QueryService::OmitNull(service) => query.omit_null = service.get(),
            QueryService::OmitDefault(service) => query.omit_default = service.get(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::JsonApiOptions;
    use crate::model::PageQuery;
    use crate::seed::demo_resource_graph;

    fn parse_one<S: QueryParameterService>(mut service: S, key: &str, value: &str) -> S::Output {
        assert!(service.can_parse(key));
        service.parse(key, value).unwrap();
        service.get()
    }

    #[test]
    fn test_get_through_shared_interface() {
        let graph = demo_resource_graph().unwrap();
        let articles = graph.get_resource_context("articles").unwrap();
        let options = JsonApiOptions::default();

        let chains = parse_one(IncludeService::new(&graph, articles), "include", "author");
        assert_eq!(chains[0].dotted(), "author");

        let page = parse_one(PageService::new(&options), "page[number]", "-2");
        assert_eq!(
            page,
            PageQuery {
                size: Some(10),
                number: -2
            }
        );

        // Nothing parsed yields each service's default
        assert!(SortService::new(&graph, articles).get().is_empty());
        assert!(FilterService::new(&graph, articles).get().is_none());
        assert!(!OmitValueService::omit_null(&options).get());
    }

    #[test]
    fn test_query_service_delegates_to_variant() {
        let graph = demo_resource_graph().unwrap();
        let articles = graph.get_resource_context("articles").unwrap();
        let mut service = QueryService::Sort(SortService::new(&graph, articles));

        assert_eq!(service.kind(), QueryParameterKind::Sort);
        assert!(service.can_parse("sort"));
        assert!(!service.can_parse("include"));
        service.parse("sort", "-title").unwrap();

        let mut query = QuerySet::default();
        service.apply(&mut query);
        assert_eq!(query.sort[0].field.dotted(), "title");
    }
}
