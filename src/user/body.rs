use crate::api_error::ApiError;
use actix_web::{dev::Payload, web::Bytes, FromRequest, HttpRequest};
use futures::future::{FutureExt, LocalBoxFuture};
use serde::de::DeserializeOwned;

/// JSON body that must be present. An absent body is rejected before the
/// handler runs, which keeps "no body" apart from an empty object.
pub struct RequiredJson<T>(pub T);

impl<T> RequiredJson<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> FromRequest for RequiredJson<T>
where
    T: DeserializeOwned + 'static,
{
    type Error = ApiError;
    type Future = LocalBoxFuture<'static, Result<Self, ApiError>>;

    fn from_request(req: &HttpRequest, pl: &mut Payload) -> Self::Future {
        let body = Bytes::from_request(req, pl);

        async move {
            let body = body.await.map_err(|e| {
                let status = e.as_response_error().status_code().as_u16();
                ApiError::new(status, format!("Failed to read body: {}", e))
            })?;

            if body.iter().all(u8::is_ascii_whitespace) {
                return Err(ApiError::new(400, "No data provided"));
            }

            serde_json::from_slice(&body)
                .map(RequiredJson)
                .map_err(|e| ApiError::new(400, format!("Invalid JSON body: {}", e)))
        }
        .boxed_local()
    }
}
