use crate::render::render_interview_body;
use crate::Result;
use anyhow::Context;
use std::path::Path;

pub fn run(file: &Path) -> Result<()> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    print!("{}", render_interview_body(&content));
    Ok(())
}
