//! Request body validation helper.

use validator::Validate;

use rental_core::error::AppError;

/// Run `validator` rules and turn the first failure into a validation error.
pub fn validate_body<T: Validate>(body: &T) -> Result<(), AppError> {
    body.validate().map_err(|errors| {
        let message = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(msg) => msg.to_string(),
                    None => format!("Invalid value for {field}"),
                })
            })
            .next()
            .unwrap_or_else(|| "Invalid request body".to_string());
        AppError::validation(message)
    })
}
