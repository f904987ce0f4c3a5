//! JSON extractor that validates the payload before the handler runs.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::errors::AppError;

/// Request body extractor combining deserialization and validation.
///
/// Handlers take `ValidatedJson<T>` instead of `Json<T>`; a body that does
/// not deserialize, or that fails the `validator` rules declared on `T`,
/// is rejected with a 400 before the handler body runs.
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::validation(rejection.body_text()))?;

        if let Err(errors) = value.validate() {
            return Err(AppError::validation(collect_messages(&errors)));
        }

        Ok(ValidatedJson(value))
    }
}

/// Flatten field errors into one message, preferring the per-field texts
/// declared on the request types. Sorted so the output is deterministic.
fn collect_messages(errors: &validator::ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(message) => message.to_string(),
                None => format!("{field} is invalid"),
            })
        })
        .collect();
    messages.sort();
    messages.join("; ")
}
