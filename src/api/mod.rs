pub mod error_document;
pub mod handlers;
pub mod query_extractor;
pub mod routes;

pub use error_document::*;
pub use handlers::*;
pub use query_extractor::*;
pub use routes::*;
