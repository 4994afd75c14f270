use super::rules::{blank_to_none, optional_url, require, ValidationErrors};
use crate::models::QuoteRequest;

/// True when the hidden honeypot field was filled in
pub fn is_spam(request: &QuoteRequest) -> bool {
    request.honeypot.as_deref().is_some_and(|h| !h.is_empty())
}

/// Validate a public quote request
pub fn validate_quote(mut request: QuoteRequest) -> Result<QuoteRequest, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    blank_to_none(&mut request.category);
    blank_to_none(&mut request.example_product_link);
    blank_to_none(&mut request.requirements);

    require(&mut errors, "name", &request.name, "Enter your name");
    require(&mut errors, "contact", &request.contact, "Enter your contact details");
    optional_url(
        &mut errors,
        "example_product_link",
        request.example_product_link.as_deref(),
    );
    if !request.privacy_agreed {
        errors.push("privacy_agreed", "Agree to the privacy policy");
    }
    if is_spam(&request) {
        errors.push("honeypot", "Detected as spam");
    }

    errors.into_result(request)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> QuoteRequest {
        QuoteRequest {
            name: "Kim".to_string(),
            contact: "010-0000-0000".to_string(),
            privacy_agreed: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_request_passes() {
        assert!(validate_quote(valid_request()).is_ok());
    }

    #[test]
    fn test_required_fields() {
        let err = validate_quote(QuoteRequest::default()).unwrap_err();
        assert!(err.has_field("name"));
        assert!(err.has_field("contact"));
        assert!(err.has_field("privacy_agreed"));
    }

    #[test]
    fn test_example_link_must_be_url_when_present() {
        let mut request = valid_request();
        request.example_product_link = Some("my product".to_string());
        assert!(validate_quote(request).unwrap_err().has_field("example_product_link"));

        let mut request = valid_request();
        request.example_product_link = Some(String::new());
        let cleaned = validate_quote(request).unwrap();
        assert!(cleaned.example_product_link.is_none());
    }

    #[test]
    fn test_honeypot() {
        let mut request = valid_request();
        request.honeypot = Some("http://spam".to_string());
        assert!(is_spam(&request));
        assert!(validate_quote(request).unwrap_err().has_field("honeypot"));

        let mut request = valid_request();
        request.honeypot = Some(String::new());
        assert!(!is_spam(&request));
    }
}
