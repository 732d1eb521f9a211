pub mod chain;
pub mod dispatch;
pub mod services;

pub use chain::{resolve_attribute_path, resolve_chain};
pub use dispatch::QueryParameterParser;
pub use services::{
    FieldsService, FilterService, IncludeService, OmitValueService, PageService,
    QueryParameterService, QueryService, SortService,
};
