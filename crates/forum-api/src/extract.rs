use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde_json::Value;

use crate::error::ApiError;
use crate::validation::{FromPayload, ValidationErrors};

/// Raw JSON request body, validated later against a [`RequestSchema`]
///
/// An empty body is an empty object. The `Content-Type` header is not
/// inspected. A body that is not JSON is held as a validation failure and
/// only reported by [`JsonPayload::validated`], so handlers can resolve
/// path resources first.
///
/// [`RequestSchema`]: crate::validation::RequestSchema
#[derive(Debug, Clone)]
pub struct JsonPayload(Result<Value, ValidationErrors>);

impl JsonPayload {
    pub fn value(&self) -> Option<&Value> {
        self.0.as_ref().ok()
    }

    /// Validate against the target's schema and build it
    pub fn validated<T: FromPayload>(&self) -> Result<T, ApiError> {
        match &self.0 {
            Ok(value) => T::from_payload(value).map_err(ApiError::Validation),
            Err(errors) => Err(ApiError::Validation(errors.clone())),
        }
    }
}

#[async_trait]
impl<S> FromRequest<S> for JsonPayload
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::BodyRejected(e.status(), e.body_text()))?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self(Ok(Value::Object(Default::default()))));
        }

        let parsed = serde_json::from_slice(&bytes).map_err(|_| {
            ValidationErrors::single("payload", "The request body must be valid JSON.")
        });
        Ok(Self(parsed))
    }
}
