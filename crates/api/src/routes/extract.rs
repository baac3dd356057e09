//! Request extraction and field validation for the JSON API.

use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use favorites_core::{FavoriteListId, ListName, Sku};

use crate::error::{AppError, ValidationErrors};
use crate::services::FavoritesError;

/// JSON body extractor whose rejections use the API error body.
///
/// The body must be a JSON object. Malformed JSON, a wrong content type, or
/// any other top-level value (array, string, number) is a 400 with
/// `{"message": ...}`.
#[derive(Debug, Clone)]
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| bad_json(&rejection))?;

        if !value.is_object() {
            tracing::debug!("Rejected non-object request body");
            return Err(AppError::BadRequest(NOT_AN_OBJECT.to_owned()));
        }

        serde_json::from_value(value).map(Self).map_err(|e| {
            tracing::debug!(error = %e, "Rejected request body");
            AppError::BadRequest(format!("Failed to deserialize the JSON body: {e}"))
        })
    }
}

const NOT_AN_OBJECT: &str = "The request body must be a JSON object.";

fn bad_json(rejection: &JsonRejection) -> AppError {
    tracing::debug!(error = %rejection, "Rejected request body");
    AppError::BadRequest(rejection.body_text())
}

/// Body of `POST /api/lists`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateListRequest {
    #[serde(default)]
    pub name: Option<Value>,
}

impl CreateListRequest {
    /// Validate the request into a list name.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` describing the `name` field.
    pub fn validate(&self) -> Result<ListName, AppError> {
        list_name(self.name.as_ref())
    }
}

/// Body of `PUT /api/lists/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateListRequest {
    #[serde(default)]
    pub name: Option<Value>,
}

impl UpdateListRequest {
    /// Validate the request into a list name.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` describing the `name` field.
    pub fn validate(&self) -> Result<ListName, AppError> {
        list_name(self.name.as_ref())
    }
}

/// Body of `POST /api/lists/{id}/products`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddProductRequest {
    #[serde(default)]
    pub sku: Option<Value>,
}

impl AddProductRequest {
    /// Validate the request into a SKU.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` describing the `sku` field.
    pub fn validate(&self) -> Result<Sku, AppError> {
        let raw = string_field("sku", self.sku.as_ref())?;
        Sku::parse(raw).map_err(|e| invalid("sku", e.to_string()))
    }
}

fn list_name(value: Option<&Value>) -> Result<ListName, AppError> {
    let raw = string_field("name", value)?;
    ListName::parse(raw).map_err(|e| invalid("name", e.to_string()))
}

/// A required string field.
fn string_field<'a>(field: &str, value: Option<&'a Value>) -> Result<&'a str, AppError> {
    match value {
        None | Some(Value::Null) => Err(invalid(field, format!("The {field} field is required."))),
        Some(Value::String(s)) => Ok(s),
        Some(_) => Err(invalid(field, format!("The {field} field must be a string."))),
    }
}

fn invalid(field: &str, message: String) -> AppError {
    AppError::Validation(ValidationErrors::single(field, message))
}

/// Parse a list ID path segment. Anything that is not an ID names no list.
///
/// # Errors
///
/// Returns `FavoritesError::ListNotFound` for a non-numeric segment.
pub fn list_id(raw: &str) -> Result<FavoriteListId, AppError> {
    raw.parse()
        .map_err(|_| FavoritesError::ListNotFound(raw.to_owned()).into())
}

/// Parse a SKU path segment. A blank SKU is never on a list.
///
/// # Errors
///
/// Returns `FavoritesError::ProductNotInList` for a segment that is not a SKU.
pub fn sku(raw: &str) -> Result<Sku, AppError> {
    Sku::parse(raw).map_err(|_| FavoritesError::ProductNotInList(raw.to_owned()).into())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::Body;
    use axum::http::header::CONTENT_TYPE;
    use serde_json::json;

    use super::*;

    async fn extract_create(body: &str) -> Result<ApiJson<CreateListRequest>, AppError> {
        let request = Request::builder()
            .method("POST")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_owned()))
            .unwrap();
        ApiJson::<CreateListRequest>::from_request(request, &()).await
    }

    #[tokio::test]
    async fn test_body_must_be_an_object() {
        for body in [r#"["Electronics"]"#, r#""Electronics""#, "42", "null"] {
            match extract_create(body).await {
                Err(AppError::BadRequest(message)) => assert_eq!(message, NOT_AN_OBJECT),
                other => panic!("expected bad request for {body}, got {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn test_object_body_is_extracted() {
        let ApiJson(request) = extract_create(r#"{"name":"Electronics"}"#).await.unwrap();
        assert_eq!(request.validate().unwrap().as_str(), "Electronics");

        assert!(matches!(
            extract_create(r#"{"name":"#).await,
            Err(AppError::BadRequest(_))
        ));
    }

    fn name_errors(body: Value) -> Vec<String> {
        let request: CreateListRequest = serde_json::from_value(body).unwrap();
        match request.validate() {
            Err(AppError::Validation(errors)) => errors.field("name").to_vec(),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_name_validation_messages() {
        assert_eq!(name_errors(json!({})), ["The name field is required."]);
        assert_eq!(name_errors(json!({ "name": null })), ["The name field is required."]);
        assert_eq!(name_errors(json!({ "name": "  " })), ["The name field is required."]);
        assert_eq!(name_errors(json!({ "name": 5 })), ["The name field must be a string."]);
        assert_eq!(
            name_errors(json!({ "name": "a".repeat(256) })),
            ["The name field must not be greater than 255 characters."]
        );
    }

    #[test]
    fn test_valid_requests() {
        let create: CreateListRequest =
            serde_json::from_value(json!({ "name": "a".repeat(255) })).unwrap();
        assert_eq!(create.validate().unwrap().as_str().len(), 255);

        let update: UpdateListRequest =
            serde_json::from_value(json!({ "name": " Gifts " })).unwrap();
        assert_eq!(update.validate().unwrap().as_str(), "Gifts");

        let add: AddProductRequest = serde_json::from_value(json!({ "sku": "ABC123" })).unwrap();
        assert_eq!(add.validate().unwrap().as_str(), "ABC123");
    }

    #[test]
    fn test_sku_required() {
        let add: AddProductRequest = serde_json::from_value(json!({ "sku": "" })).unwrap();
        match add.validate() {
            Err(AppError::Validation(errors)) => {
                assert_eq!(errors.field("sku"), ["The sku field is required."]);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_path_segments() {
        assert_eq!(list_id("12").unwrap(), FavoriteListId::new(12));
        assert!(matches!(
            list_id("abc"),
            Err(AppError::Favorites(FavoritesError::ListNotFound(ref raw))) if raw == "abc"
        ));
        assert!(matches!(
            sku(" "),
            Err(AppError::Favorites(FavoritesError::ProductNotInList(_)))
        ));
    }
}
