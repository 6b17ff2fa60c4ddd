use crate::error::AppError;

/// `Some` only for a present, non-empty string.
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Parses a path id that must be an integer greater than zero.
pub fn parse_positive_id(raw: &str, name: &str) -> Result<i64, AppError> {
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(AppError::InvalidInput(format!(
            "{name} must be a positive integer"
        ))),
    }
}
