use crate::errors::EMPTY_ACCOUNT_ID;

/// **Basic input validation for an account ID**
///
/// Checks for:
/// - An empty string.
///
/// Returns the reason when the ID isn't valid.
pub fn is_valid_id(id: &str) -> Option<&'static str> {
    if id.trim().is_empty() {
        Some(EMPTY_ACCOUNT_ID)
    } else {
        None
    }
}
