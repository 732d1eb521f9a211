use crate::config::JsonApiOptions;
use crate::error::{JsonApiError, Result};
use crate::logic::services::{
    FieldsService, FilterService, IncludeService, OmitValueService, PageService, QueryService,
    SortService,
};
use crate::model::{CurrentRequest, QuerySet, ResourceGraph};

/// Routes each query string pair to the one service that claims its key and
/// assembles the results into a [`QuerySet`].
///
/// Built fresh for every request and consumed by [`parse`](Self::parse).
pub struct QueryParameterParser<'g> {
    request: CurrentRequest<'g>,
    allow_unknown: bool,
    services: Vec<QueryService<'g>>,
}

impl<'g> QueryParameterParser<'g> {
    /// Parser with every standard service registered
    pub fn new(
        graph: &'g ResourceGraph,
        request: CurrentRequest<'g>,
        options: &JsonApiOptions,
    ) -> Self {
        let resource = request.request_resource();
        let services = vec![
            QueryService::Include(
                IncludeService::new(graph, resource)
                    .with_maximum_depth(options.maximum_include_depth),
            ),
            QueryService::Filter(FilterService::new(graph, resource)),
            QueryService::Sort(SortService::new(graph, resource)),
            QueryService::Page(PageService::new(options)),
            QueryService::Fields(FieldsService::new(graph, resource)),
            QueryService::OmitNull(OmitValueService::omit_null(options)),
            QueryService::OmitDefault(OmitValueService::omit_default(options)),
        ];

        Self::with_services(request, options.allow_unknown_query_parameters, services)
    }

    pub fn with_services(
        request: CurrentRequest<'g>,
        allow_unknown: bool,
        services: Vec<QueryService<'g>>,
    ) -> Self {
        Self {
            request,
            allow_unknown,
            services,
        }
    }

    /// Parse all pairs in order. The first failing pair rejects the request.
    pub fn parse<I, K, V>(mut self, pairs: I) -> Result<QuerySet>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let resource_name = &self.request.request_resource().resource_name;
        let method = self.request.method();

        for (key, value) in pairs {
            let (key, value) = (key.as_ref(), value.as_ref());

            let mut candidates = self
                .services
                .iter_mut()
                .filter(|service| service.can_parse(key));

            let service = match (candidates.next(), candidates.next()) {
                (Some(service), None) => service,
                (None, _) => {
                    if self.allow_unknown {
                        log::debug!("Ignoring unknown query parameter '{}'", key);
                        continue;
                    }
                    log::warn!(
                        "Rejecting unknown query parameter '{}' on {} /{}",
                        key,
                        method,
                        resource_name
                    );
                    return Err(JsonApiError::UnknownQueryParameter {
                        parameter: key.to_string(),
                    });
                }
                (Some(first), Some(second)) => {
                    let mut services = vec![first.kind().name(), second.kind().name()];
                    services.extend(candidates.map(|service| service.kind().name()));
                    log::error!(
                        "Query parameter '{}' is claimed by more than one service: {:?}",
                        key,
                        services
                    );
                    return Err(JsonApiError::AmbiguousQueryParameter {
                        parameter: key.to_string(),
                        services,
                    });
                }
            };

            let kind = service.kind();
            if self.request.is_query_parameter_disabled(kind) {
                log::warn!(
                    "Query parameter '{}' is disabled for {} /{}",
                    key,
                    method,
                    resource_name
                );
                return Err(JsonApiError::parameter_not_allowed(key));
            }

            log::debug!("Dispatching '{}' to the {} service", key, kind);
            if let Err(err) = service.parse(key, value) {
                log::warn!("Rejected query parameter '{}': {}", key, err);
                return Err(err.at_parameter(key));
            }
        }

        let mut query = QuerySet::default();
        for service in self.services {
            service.apply(&mut query);
        }
        Ok(query)
    }
}
