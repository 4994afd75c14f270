// Bridgesite - manufacturing partner site server
// Interview Q/A parsing, page rendering, quote intake and the admin content API

pub mod cli;
pub mod models;
pub mod parser;
pub mod render;
pub mod server;
pub mod services;
pub mod validator;

pub use anyhow::{Context, Result};
pub use colored::Colorize;

// Re-export commonly used types
pub use models::{ContentBlock, QaEntry, SiteConfig};
pub use parser::interview::parse as parse_interview;
pub use services::{RateLimiter, ServiceError};
