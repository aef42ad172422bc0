use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{AppError, AppResult};

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

pub const SUBSCRIBED_NOTICE: &str = "You have subscribed successfully!";

/// Validates a newsletter sign-up and returns the notice to show.
///
/// There is no mailing backend; a valid address is only logged.
pub fn subscribe(email: &str) -> AppResult<&'static str> {
    let email = email.trim();

    if email.is_empty() {
        return Err(AppError::Validation("Please enter your email".to_string()));
    }

    if !EMAIL_PATTERN.is_match(email) {
        return Err(AppError::Validation(
            "Please enter a valid email".to_string(),
        ));
    }

    tracing::info!(domain = email.rsplit('@').next().unwrap_or_default(), "Newsletter subscription accepted");

    Ok(SUBSCRIBED_NOTICE)
}
