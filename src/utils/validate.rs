use axum::extract::{FromRequest, FromRequestParts, Json, Query, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::{AppError, AppResult};

/// JSON body that has been deserialized and passed `Validate`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> AppResult<Self> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::bad_request(rejection.body_text()))?;
        value.validate()?;
        Ok(ValidatedJson(value))
    }
}

/// Query string that has been deserialized and passed `Validate`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> AppResult<Self> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::bad_request(rejection.body_text()))?;
        value.validate()?;
        Ok(ValidatedQuery(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Method, header};
    use serde::Deserialize;

    #[derive(Debug, Deserialize, Validate)]
    struct Payload {
        #[validate(length(min = 1, message = "must not be empty"))]
        name: String,
        #[validate(range(min = 1, max = 100))]
        size: u32,
    }

    fn json_request(body: &str) -> Request {
        Request::builder()
            .method(Method::POST)
            .uri("/test")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_valid_json() {
        let request = json_request(r#"{"name":"books","size":3}"#);
        let ValidatedJson(payload) = ValidatedJson::<Payload>::from_request(request, &())
            .await
            .unwrap();
        assert_eq!(payload.name, "books");
        assert_eq!(payload.size, 3);
    }

    #[tokio::test]
    async fn test_json_validation_failure() {
        let request = json_request(r#"{"name":"","size":300}"#);
        match ValidatedJson::<Payload>::from_request(request, &()).await {
            Err(AppError::ValidationErrors { errors }) => {
                assert_eq!(errors.len(), 2);
                assert_eq!(errors[0].field, "name");
                assert_eq!(errors[0].message, "must not be empty");
                assert_eq!(errors[1].field, "size");
            }
            other => panic!("Expected ValidationErrors, got {:?}", other.map(|v| v.0)),
        }
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let request = json_request(r#"{"name":"#);
        assert!(matches!(
            ValidatedJson::<Payload>::from_request(request, &()).await,
            Err(AppError::BadRequest { .. })
        ));
    }

    #[tokio::test]
    async fn test_missing_content_type_is_bad_request() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/test")
            .body(Body::from(r#"{"name":"x","size":1}"#))
            .unwrap();
        assert!(matches!(
            ValidatedJson::<Payload>::from_request(request, &()).await,
            Err(AppError::BadRequest { .. })
        ));
    }

    #[tokio::test]
    async fn test_query_validation() {
        let (mut parts, _) = Request::builder()
            .uri("/test?name=a&size=0")
            .body(())
            .unwrap()
            .into_parts();
        assert!(matches!(
            ValidatedQuery::<Payload>::from_request_parts(&mut parts, &()).await,
            Err(AppError::ValidationErrors { .. })
        ));
    }

    #[tokio::test]
    async fn test_unparseable_query_is_bad_request() {
        let (mut parts, _) = Request::builder()
            .uri("/test?name=a&size=lots")
            .body(())
            .unwrap()
            .into_parts();
        assert!(matches!(
            ValidatedQuery::<Payload>::from_request_parts(&mut parts, &()).await,
            Err(AppError::BadRequest { .. })
        ));
    }
}
