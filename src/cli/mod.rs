//! CLI commands
//!
//! - `serve` - run the site server
//! - `parse` - show the Q/A entries of an interview document
//! - `render` - print the rendered HTML of an interview document
//! - `init` - write a default config file

pub mod init;
pub mod parse;
pub mod render;
pub mod serve;
