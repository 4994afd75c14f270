use crate::models::QaEntry;
use crate::parser::interview;
use crate::Result;
use anyhow::Context;
use colored::Colorize;
use std::path::Path;

pub fn run(file: &Path, json: bool) -> Result<()> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let entries = interview::parse(&content);

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!(
            "{}",
            "No Q/A structure found; the document renders as plain Markdown".yellow()
        );
        return Ok(());
    }

    println!(
        "{}",
        format!("{} entries in {}", entries.len(), file.display())
            .cyan()
            .bold()
    );
    for (index, entry) in entries.iter().enumerate() {
        print_entry(index + 1, entry);
    }

    Ok(())
}

fn first_line(text: &str) -> &str {
    text.trim().lines().next().unwrap_or_default()
}

fn print_entry(number: usize, entry: &QaEntry) {
    println!();
    let question = entry.question_text().trim();
    if question.is_empty() {
        println!("{} {}", format!("{:>3}.", number).bold(), "(no question)".bright_black());
    } else {
        println!("{} Q. {}", format!("{:>3}.", number).bold(), question);
    }

    match entry.answer_text() {
        Some(answer) => {
            let lines = answer.trim().lines().count();
            println!("     A. {} {}", first_line(answer), format!("({} lines)", lines).bright_black());
        }
        None => println!("     {}", "no answer".bright_black()),
    }

    if let Some(card) = entry.result_card_text() {
        println!("     {} {}", "▣".green(), first_line(card));
    }
}
