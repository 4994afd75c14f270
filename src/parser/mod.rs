pub mod interview;

pub use interview::{classify_line, fold_into_entries, parse, parse_blocks, LineKind};
