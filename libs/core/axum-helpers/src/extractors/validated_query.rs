//! Query-string extractor with validation via the validator crate.

use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use validator::Validate;

/// Deserializes the query string into `T` and runs `T::validate`.
///
/// A missing or unparsable parameter becomes `INVALID_QUERY`; a failed
/// validation rule becomes `VALIDATION_ERROR` with per-field details.
/// Both are 400.
///
/// ```ignore
/// #[derive(Deserialize, Validate)]
/// struct Params {
///     #[validate(length(min = 1))]
///     name: String,
/// }
///
/// async fn create(ValidatedQuery(params): ValidatedQuery<Params>) -> String {
///     params.name
/// }
/// ```
pub struct ValidatedQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state).await?;
        value.validate()?;
        Ok(ValidatedQuery(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::Request, http::StatusCode, routing::get};
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Deserialize, Validate)]
    struct Params {
        #[validate(length(min = 1))]
        name: String,
        #[validate(range(min = 0))]
        count: i32,
    }

    async fn handler(ValidatedQuery(params): ValidatedQuery<Params>) -> String {
        format!("{}:{}", params.name, params.count)
    }

    async fn status_of(uri: &str) -> StatusCode {
        Router::new()
            .route("/", get(handler))
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn test_valid_query_passes() {
        assert_eq!(status_of("/?name=bolt&count=3").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_missing_field_is_bad_request() {
        assert_eq!(status_of("/?name=bolt").await, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unparsable_value_is_bad_request() {
        assert_eq!(status_of("/?name=bolt&count=many").await, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_failed_rule_is_bad_request() {
        assert_eq!(status_of("/?name=&count=3").await, StatusCode::BAD_REQUEST);
        assert_eq!(status_of("/?name=bolt&count=-1").await, StatusCode::BAD_REQUEST);
    }
}
