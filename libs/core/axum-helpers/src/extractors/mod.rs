//! Extractors that reject bad input with a JSON [`ErrorResponse`](crate::ErrorResponse).

pub mod uuid_path;
pub mod validated_query;

pub use uuid_path::UuidPath;
pub use validated_query::ValidatedQuery;
