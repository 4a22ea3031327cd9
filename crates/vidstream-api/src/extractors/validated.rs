//! Validated JSON extractor
//!
//! Extracts a JSON body and validates it using the `validator` crate.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::response::ApiError;
use vidstream_common::AppError;

/// Validated JSON extractor
///
/// The inner type must implement both `Deserialize` and `Validate`.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|e| {
            let message = match e {
                JsonRejection::JsonDataError(e) => e.to_string(),
                JsonRejection::JsonSyntaxError(e) => e.to_string(),
                JsonRejection::MissingJsonContentType(e) => e.to_string(),
                JsonRejection::BytesRejection(e) => e.to_string(),
                _ => "Invalid JSON body".to_string(),
            };
            ApiError::App(AppError::InvalidInput(message))
        })?;

        value.validate()?;

        Ok(ValidatedJson(value))
    }
}
