//! Request and response data transfer objects.

pub mod request;
pub mod response;

use validator::Validate;

use prepper_core::error::AppError;

/// Run the `validator` rules declared on a request body.
pub fn validate_body<T: Validate>(body: &T) -> Result<(), AppError> {
    body.validate()
        .map_err(|e| AppError::validation(format!("Invalid request: {e}")))
}
