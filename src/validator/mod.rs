pub mod quote;
pub mod resources;
pub mod rules;

pub use quote::{is_spam, validate_quote};
pub use resources::validate_resource;
pub use rules::{is_url, FieldError, ValidationErrors};
