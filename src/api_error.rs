use crate::response::Envelope;
use crate::user::StoreError;
use actix_web::error::BlockingError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use derive_more::Display;

#[derive(Debug, Display)]
#[display(fmt = "{}", message)]
pub struct ApiError {
    pub status_code: u16,
    pub message: String,
}

impl ApiError {
    pub fn new(status_code: u16, message: impl Into<String>) -> ApiError {
        ApiError {
            status_code,
            message: message.into(),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(error: StoreError) -> ApiError {
        match error {
            StoreError::Backend(err) => ApiError::new(500, format!("Store error: {}", err)),
            not_found => ApiError::new(404, not_found.to_string()),
        }
    }
}

impl From<BlockingError> for ApiError {
    fn from(error: BlockingError) -> ApiError {
        ApiError::new(500, format!("Blocking task failed: {}", error))
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn error_response(&self) -> HttpResponse {
        let status_code = self.status_code();

        let message = if status_code.is_server_error() {
            error!("{}", self.message);
            "Internal server error".to_string()
        } else {
            self.message.clone()
        };

        HttpResponse::build(status_code).json(Envelope::error(message))
    }
}
