//! Email address utilities

use once_cell::sync::Lazy;
use regex::Regex;

// Pragmatic address check: local part, a single @, dotted domain with a TLD
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9](?:[A-Za-z0-9\-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9\-]*[A-Za-z0-9])?)*\.[A-Za-z]{2,}$")
        .expect("email regex is valid")
});

/// Check if an email address is syntactically deliverable
pub fn is_valid_email(email: &str) -> bool {
    let trimmed = email.trim();
    trimmed.len() <= 254 && EMAIL_REGEX.is_match(trimmed)
}

/// Mask an email address for logs (e.g., jo****@example.com)
pub fn mask_email(email: &str) -> String {
    match email.trim().split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {
            let visible: String = local.chars().take(2).collect();
            format!("{}****@{}", visible, domain)
        }
        _ => "****".to_string(),
    }
}
