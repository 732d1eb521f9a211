pub mod common;
pub mod definition;
pub mod graph;
pub mod query;
pub mod request;
pub mod resource;

pub use common::*;
pub use definition::*;
pub use graph::*;
pub use query::*;
pub use request::*;
pub use resource::*;
