//! Validated JSON extractor
//!
//! Deserializes the body and runs the DTO's rules before the handler sees
//! it. Malformed JSON and rule violations both reject with a request
//! validation error.

use axum::Json;
use axum::extract::{FromRequest, Request};
use kernel::error::validation::RequestValidationError;
use serde::de::DeserializeOwned;

use crate::error::AuthError;

/// Request body rules
pub trait Validate: Sized {
    /// Typed input produced by a successful check
    type Validated;

    /// Check every rule, reporting all violations at once
    fn validate(self) -> Result<Self::Validated, RequestValidationError>;
}

/// JSON body that passed [`Validate`]
pub struct ValidatedJson<T: Validate>(pub T::Validated);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<T>::from_request(req, state)
            .await
            .map_err(RequestValidationError::from)?;

        Ok(Self(body.validate()?))
    }
}
