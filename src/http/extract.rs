//! Request body extraction.

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::http::header;
use axum::Json;
use serde::de::DeserializeOwned;

use crate::http::error::ApiError;

/// JSON body extractor that is lenient about the `Content-Type` header:
/// a request that declares none is still parsed as JSON, while an explicit
/// non-JSON type is refused.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        if request.headers().contains_key(header::CONTENT_TYPE) {
            let Json(value) = Json::<T>::from_request(request, state).await?;
            return Ok(Self(value));
        }

        // No declared media type: take the raw bytes and parse them as JSON.
        let bytes = Bytes::from_request(request, state)
            .await
            .map_err(|rejection| ApiError::Validation(rejection.body_text()))?;
        let value = serde_json::from_slice(&bytes).map_err(|err| {
            ApiError::Validation(format!("Failed to parse the request body as JSON: {err}"))
        })?;
        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::JsonBody;
    use crate::store::Item;

    async fn echo(JsonBody(item): JsonBody<Item>) -> Json<Item> {
        Json(item)
    }

    fn router() -> Router {
        Router::new().route("/echo", post(echo))
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn missing_content_type_is_parsed_as_json() {
        let response = router()
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/echo")
                    .body(Body::from(r#"{"name": "widget"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({"name": "widget"}));
    }

    #[tokio::test]
    async fn explicit_non_json_content_type_is_refused() {
        let response = router()
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/echo")
                    .header(header::CONTENT_TYPE, "text/plain")
                    .body(Body::from(r#"{"name": "widget"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body_json(response).await.get("detail").is_some());
    }

    #[tokio::test]
    async fn malformed_body_without_content_type_is_refused() {
        let response = router()
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/echo")
                    .body(Body::from("not json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body_json(response).await.get("detail").is_some());
    }
}
