//! Field-level validation rules shared by all input validators

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// A single rejected field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// All field errors found in one input
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{}", format_errors(.errors))]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

fn format_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(FieldError::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            errors: vec![FieldError::new(field, message)],
        }
    }

    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError::new(field, message));
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    /// `Ok(value)` when no errors were collected
    pub fn into_result<T>(self, value: T) -> Result<T, ValidationErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

fn url_regex() -> &'static Regex {
    static URL: OnceLock<Regex> = OnceLock::new();
    URL.get_or_init(|| {
        Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*://[^\s/?#]+[^\s]*$").expect("url pattern is valid")
    })
}

fn uuid_regex() -> &'static Regex {
    static UUID: OnceLock<Regex> = OnceLock::new();
    UUID.get_or_init(|| {
        Regex::new(r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$")
            .expect("uuid pattern is valid")
    })
}

/// Absolute URL with a scheme and host
pub fn is_url(value: &str) -> bool {
    url_regex().is_match(value)
}

pub fn is_uuid(value: &str) -> bool {
    uuid_regex().is_match(value)
}

/// Form fields arrive as empty strings when left blank
pub fn blank_to_none(value: &mut Option<String>) {
    if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
        *value = None;
    }
}

pub fn require(errors: &mut ValidationErrors, field: &str, value: &str, message: &str) {
    if value.trim().is_empty() {
        errors.push(field, message);
    }
}

pub fn require_url(errors: &mut ValidationErrors, field: &str, value: &str, message: &str) {
    if value.trim().is_empty() {
        errors.push(field, message);
    } else if !is_url(value) {
        errors.push(field, "Must be a valid URL");
    }
}

pub fn optional_url(errors: &mut ValidationErrors, field: &str, value: Option<&str>) {
    if let Some(v) = value {
        if !is_url(v) {
            errors.push(field, "Must be a valid URL");
        }
    }
}

pub fn in_range<T>(errors: &mut ValidationErrors, field: &str, value: T, min: T, max: T)
where
    T: PartialOrd + fmt::Display + Copy,
{
    if value < min || value > max {
        errors.push(field, format!("Must be between {} and {}", min, max));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_url() {
        assert!(is_url("https://example.com"));
        assert!(is_url("http://cdn.example.com/a/b.png?x=1"));
        assert!(!is_url("example.com"));
        assert!(!is_url("https://"));
        assert!(!is_url("not a url"));
    }

    #[test]
    fn test_is_uuid() {
        assert!(is_uuid("123e4567-e89b-12d3-a456-426614174000"));
        assert!(!is_uuid("123e4567"));
    }

    #[test]
    fn test_blank_to_none() {
        let mut value = Some("  ".to_string());
        blank_to_none(&mut value);
        assert!(value.is_none());

        let mut kept = Some("x".to_string());
        blank_to_none(&mut kept);
        assert_eq!(kept.as_deref(), Some("x"));
    }

    #[test]
    fn test_errors_display() {
        let mut errors = ValidationErrors::new();
        errors.push("name", "Name is required");
        errors.push("contact", "Contact is required");
        assert_eq!(
            errors.to_string(),
            "name: Name is required; contact: Contact is required"
        );
    }

    #[test]
    fn test_in_range() {
        let mut errors = ValidationErrors::new();
        in_range(&mut errors, "progress_percent", 101, 0, 100);
        in_range(&mut errors, "latitude", 45.0, -90.0, 90.0);
        assert_eq!(errors.errors.len(), 1);
        assert!(errors.has_field("progress_percent"));
    }
}
